use arrow::array::{Array, AsArray};
use arrow::datatypes::Date32Type;
use salesboard::{
    aggregate::product_categories,
    derive,
    derive::date_parser::from_date32,
    load_sales_file,
    schema::types::{DATE, GENDER, YEAR},
    SalesTable,
};
use std::{collections::BTreeSet, env, path::Path, process::exit};

fn main() {
    // Expect exactly one CLI argument: path to a sales CSV.
    let args: Vec<String> = env::args().collect();
    if args.len() != 2 {
        eprintln!("Usage: {} <SALES_CSV>", args[0]);
        exit(1);
    }
    if let Err(e) = inspect_dataset(Path::new(&args[1])) {
        eprintln!("Error: {}", e);
        exit(1);
    }
}

/// Load and derive the file, then print schema, size and value ranges.
fn inspect_dataset(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let raw = load_sales_file(path)?;
    let table = derive(&raw)?;
    let batch = table.batch();

    println!("=== Sales dataset: {} ===", path.display());
    println!("Rows:                 {}", batch.num_rows());
    println!("File-size on disk:    {} bytes", std::fs::metadata(path)?.len());
    println!();

    println!("=== Columns ===");
    for field in batch.schema().fields() {
        println!("- {:<20} | {:?}", field.name(), field.data_type());
    }
    println!();

    print_ranges(&table)?;
    Ok(())
}

fn print_ranges(table: &SalesTable) -> Result<(), Box<dyn std::error::Error>> {
    let batch = table.batch();
    let dates = batch
        .column_by_name(DATE)
        .and_then(|c| c.as_primitive_opt::<Date32Type>())
        .ok_or("derived Date column missing")?;
    let first = dates.values().iter().min().copied().and_then(from_date32);
    let last = dates.values().iter().max().copied().and_then(from_date32);
    match (first, last) {
        (Some(a), Some(b)) => println!("Date range:           {} .. {}", a, b),
        _ => println!("Date range:           <empty>"),
    }

    let years: BTreeSet<i32> = batch
        .column_by_name(YEAR)
        .and_then(|c| c.as_primitive_opt::<arrow::datatypes::Int32Type>())
        .map(|a| a.values().iter().copied().collect())
        .unwrap_or_default();
    println!("Years:                {:?}", years);

    let genders: BTreeSet<&str> = batch
        .column_by_name(GENDER)
        .and_then(|c| c.as_string_opt::<i32>())
        .map(|a| a.iter().flatten().collect())
        .unwrap_or_default();
    println!("Genders:              {:?}", genders);

    println!("Product categories:   {:?}", product_categories(table)?);
    let nulls: usize = batch.columns().iter().map(|c| c.null_count()).sum();
    println!("Missing cells:        {}", nulls);
    Ok(())
}
