use anyhow::Result;
use salesboard::{
    aggregate::{
        self,
        customer::GenderMean,
        spending::AgeSpendPoint,
    },
    derive, read_sales_csv, render, Category, DashboardError, DatasetCache, PanelData, SalesTable,
};
use std::io::{Cursor, Write};
use std::sync::Arc;
use tempfile::NamedTempFile;

const SALES: &str = "Transaction ID,Date,Customer ID,Gender,Age,Product Category,Quantity,Total Amount
1,2023-11-24,CUST001,Male,34,Beauty,3,150
2,2023-02-27,CUST002,Female,26,Clothing,2,1000
3,2023-01-13,CUST003,Male,50,Electronics,1,30
4,2023-05-21,CUST004,Male,37,Clothing,1,500
5,2023-05-06,CUST005,Male,30,Beauty,2,100
6,2023-04-25,CUST006,Female,45,Beauty,1,30
7,2023-03-13,CUST007,Male,46,Clothing,2,50
8,2023-02-22,CUST008,Male,30,Electronics,4,100
9,2023-12-13,CUST009,Male,63,Electronics,2,600
10,2023-10-07,CUST010,Female,52,Clothing,4,200
11,2024-01-01,CUST001,Male,34,Electronics,1,25
12,2023-02-27,CUST002,Female,26,Beauty,3,90
";

fn derived(csv: &str) -> SalesTable {
    derive(&read_sales_csv(Cursor::new(csv)).unwrap()).unwrap()
}

fn grand_total(t: &SalesTable) -> f64 {
    aggregate::revenue_by_category(t)
        .unwrap()
        .iter()
        .map(|r| r.total_amount)
        .sum()
}

#[test]
fn session_flow_from_disk() -> Result<()> {
    let mut tmp = NamedTempFile::new()?;
    tmp.write_all(SALES.as_bytes())?;
    tmp.flush()?;

    let cache = DatasetCache::new(tmp.path());
    let first = cache.load_derived()?;
    let again = cache.load_derived()?;
    assert!(Arc::ptr_eq(&first, &again));
    assert_eq!(first.num_rows(), 12);

    for category in Category::ALL {
        let panels = render(&first, category)?;
        assert_eq!(panels.len(), 3, "{category}");
    }
    Ok(())
}

#[test]
fn derive_is_idempotent_on_real_shaped_data() {
    let once = derived(SALES);
    let twice = derive(&once).unwrap();
    assert_eq!(once, twice);
}

#[test]
fn every_year_gets_twelve_months() {
    let t = derived(SALES);
    let monthly = aggregate::monthly_sales(&t).unwrap();
    assert_eq!(monthly.len(), 24);
    for year in [2023, 2024] {
        let months: Vec<u32> = monthly.iter().filter(|m| m.year == year).map(|m| m.month).collect();
        assert_eq!(months, (1..=12).collect::<Vec<_>>());
    }
    // 2024 only has January sales
    let y2024: Vec<f64> = monthly
        .iter()
        .filter(|m| m.year == 2024)
        .map(|m| m.total_amount)
        .collect();
    assert_eq!(y2024[0], 25.0);
    assert!(y2024[1..].iter().all(|v| *v == 0.0));

    let total: f64 = monthly.iter().map(|m| m.total_amount).sum();
    assert_eq!(total, grand_total(&t));
}

#[test]
fn weekend_split_matches_grand_total() {
    let t = derived(SALES);
    let split = aggregate::weekend_vs_weekday(&t).unwrap();
    let sum: f64 = split.iter().map(|r| r.total_amount).sum();
    assert!((sum - grand_total(&t)).abs() < 1e-9);
    // 2023-05-21 (Sun), 2023-05-06 (Sat), 2023-10-07 (Sat)
    assert_eq!(split[1].total_amount, 800.0);
}

#[test]
fn revenue_shares_sum_to_one() {
    let t = derived(SALES);
    let shares = aggregate::revenue_share_by_category(&t).unwrap();
    let sum: f64 = shares.iter().map(|s| s.share).sum();
    assert!((sum - 1.0).abs() < 1e-9);
}

#[test]
fn per_customer_mean_is_not_the_flat_mean() {
    let t = derived(SALES);
    let per_customer = aggregate::mean_spend_per_customer(&t).unwrap();
    let flat = grand_total(&t) / t.num_rows() as f64;
    // CUST001 and CUST002 bought twice, so the two means must differ
    assert!((per_customer - grand_total(&t) / 10.0).abs() < 1e-9);
    assert!((per_customer - flat).abs() > 1e-6);
}

#[test]
fn two_customer_example() {
    let t = derived(
        "Date,Customer ID,Gender,Age,Product Category,Quantity,Total Amount
2023-06-01,A,Male,20,Beauty,1,100
2023-06-02,B,Female,40,Beauty,1,300
",
    );
    assert_eq!(
        aggregate::mean_amount_by_gender(&t).unwrap(),
        vec![
            GenderMean { gender: "Female".into(), mean_total_amount: 300.0 },
            GenderMean { gender: "Male".into(), mean_total_amount: 100.0 },
        ]
    );
    assert_eq!(
        aggregate::age_vs_spend(&t).unwrap(),
        vec![
            AgeSpendPoint { age: 20, total_amount: 100.0, gender: "Male".into() },
            AgeSpendPoint { age: 40, total_amount: 300.0, gender: "Female".into() },
        ]
    );
}

#[test]
fn empty_dataset_behaviour() {
    let t = derived("Date,Customer ID,Gender,Age,Product Category,Quantity,Total Amount\n");
    assert!(aggregate::revenue_by_category(&t).unwrap().is_empty());
    assert!(aggregate::quantity_by_category(&t).unwrap().is_empty());
    assert!(aggregate::gender_counts(&t).unwrap().is_empty());
    assert!(matches!(
        aggregate::mean_spend_per_customer(&t),
        Err(DashboardError::EmptyAggregation(_))
    ));

    let trend = render(&t, Category::SalesTrend).unwrap();
    match &trend[0].data {
        PanelData::MonthlySales(rows) => assert!(rows.is_empty()),
        other => panic!("unexpected panel data {other:?}"),
    }
}
