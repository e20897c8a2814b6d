use arrow::{
    array::{Array, ArrayRef, AsArray, Float64Builder, Int64Builder, StringArray},
    datatypes::DataType,
    record_batch::RecordBatch,
};
use std::{str::FromStr, sync::Arc};

use crate::error::{DashboardError, Result};
use crate::schema::{build_typed_schema, types::REQUIRED_COLUMNS};

/// Trim whitespace and strip one pair of outer quotes.
pub fn clean_str(raw: &str) -> &str {
    let trimmed = raw.trim();
    trimmed
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(trimmed)
}

/// Coerce the all-Utf8 batch read from disk into its final column types.
/// Required columns may not contain empty cells.
pub fn coerce_columns(batch: &RecordBatch, headers: &[String]) -> Result<RecordBatch> {
    let schema = build_typed_schema(headers);
    let mut out = Vec::with_capacity(batch.num_columns());

    for (arr, fld) in batch.columns().iter().zip(schema.fields()) {
        let name = fld.name().as_str();
        let strings = arr.as_string_opt::<i32>().ok_or_else(|| {
            DashboardError::Schema(format!("column `{}` was not read as text", name))
        })?;

        match fld.data_type() {
            DataType::Int64 => {
                let mut b = Int64Builder::with_capacity(strings.len());
                for (row, cell) in strings.iter().enumerate() {
                    b.append_value(parse_cell::<i64>(cell, name, row)?);
                }
                out.push(Arc::new(b.finish()) as ArrayRef);
            }
            DataType::Float64 => {
                let mut b = Float64Builder::with_capacity(strings.len());
                for (row, cell) in strings.iter().enumerate() {
                    b.append_value(parse_cell::<f64>(cell, name, row)?);
                }
                out.push(Arc::new(b.finish()) as ArrayRef);
            }
            _ => {
                if REQUIRED_COLUMNS.contains(&name) {
                    ensure_no_missing(strings, name)?;
                }
                out.push(arr.clone());
            }
        }
    }

    RecordBatch::try_new(schema, out).map_err(|e| DashboardError::Schema(e.to_string()))
}

fn parse_cell<T: FromStr>(cell: Option<&str>, column: &str, row: usize) -> Result<T> {
    let raw = cell.ok_or_else(|| missing_value(column, row))?;
    clean_str(raw).parse().map_err(|_| {
        DashboardError::Schema(format!(
            "column `{}` data row {}: cannot parse {:?}",
            column,
            row + 1,
            raw
        ))
    })
}

fn ensure_no_missing(strings: &StringArray, column: &str) -> Result<()> {
    match strings.iter().position(|cell| cell.is_none()) {
        Some(row) => Err(missing_value(column, row)),
        None => Ok(()),
    }
}

fn missing_value(column: &str, row: usize) -> DashboardError {
    DashboardError::Schema(format!(
        "column `{}` data row {}: missing value",
        column,
        row + 1
    ))
}
