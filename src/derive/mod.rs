// src/derive/mod.rs
use arrow::{
    array::{Array, ArrayRef, AsArray, BooleanBuilder, Date32Array, Date32Builder, Int32Builder},
    datatypes::{DataType, Date32Type, Field, Schema},
    record_batch::RecordBatch,
};
use chrono::{Datelike, Weekday};
use std::sync::Arc;
use tracing::debug;

use crate::error::{DashboardError, Result};
use crate::schema::types::{DATE, DAY_OF_WEEK, DERIVED_COLUMNS, MONTH, WEEKEND, YEAR};
use crate::table::SalesTable;

pub mod date_parser;

use date_parser::{from_date32, parse_sale_date, to_date32};

/// Parse `Date` into a calendar date and append `Month`, `Year`,
/// `DayOfWeek` (0 = Monday) and `Weekend`.
///
/// Idempotent: a `Date` column that is already Date32 is reused and any
/// previously derived columns are recomputed, so deriving a derived table
/// gives back an equal table.
#[tracing::instrument(level = "debug", skip(table), fields(rows = table.num_rows()))]
pub fn derive(table: &SalesTable) -> Result<SalesTable> {
    let batch = table.batch();
    let schema = batch.schema();
    let date_idx = schema
        .index_of(DATE)
        .map_err(|_| DashboardError::missing_column(DATE))?;
    let dates = parse_date_column(batch.column(date_idx))?;

    let mut fields: Vec<Field> = Vec::with_capacity(schema.fields().len() + DERIVED_COLUMNS.len());
    let mut columns: Vec<ArrayRef> = Vec::with_capacity(fields.capacity());
    for (i, field) in schema.fields().iter().enumerate() {
        if DERIVED_COLUMNS.contains(&field.name().as_str()) {
            continue;
        }
        if i == date_idx {
            fields.push(Field::new(DATE, DataType::Date32, false));
            columns.push(Arc::new(dates.clone()) as ArrayRef);
        } else {
            fields.push(field.as_ref().clone());
            columns.push(batch.column(i).clone());
        }
    }

    let n = dates.len();
    let mut month = Int32Builder::with_capacity(n);
    let mut year = Int32Builder::with_capacity(n);
    let mut day_of_week = Int32Builder::with_capacity(n);
    let mut weekend = BooleanBuilder::with_capacity(n);
    for &days in dates.values().iter() {
        let date = from_date32(days).ok_or_else(|| {
            DashboardError::Schema(format!("Date32 value {} is out of range", days))
        })?;
        let weekday = date.weekday();
        month.append_value(date.month() as i32);
        year.append_value(date.year());
        day_of_week.append_value(weekday.num_days_from_monday() as i32);
        weekend.append_value(matches!(weekday, Weekday::Sat | Weekday::Sun));
    }

    fields.push(Field::new(MONTH, DataType::Int32, false));
    fields.push(Field::new(YEAR, DataType::Int32, false));
    fields.push(Field::new(DAY_OF_WEEK, DataType::Int32, false));
    fields.push(Field::new(WEEKEND, DataType::Boolean, false));
    columns.push(Arc::new(month.finish()));
    columns.push(Arc::new(year.finish()));
    columns.push(Arc::new(day_of_week.finish()));
    columns.push(Arc::new(weekend.finish()));

    let out = RecordBatch::try_new(Arc::new(Schema::new(fields)), columns)
        .map_err(|e| DashboardError::Schema(format!("building derived table: {}", e)))?;
    debug!(columns = out.num_columns(), "derived calendar fields");
    Ok(SalesTable::new(out))
}

fn parse_date_column(col: &ArrayRef) -> Result<Date32Array> {
    if let Some(existing) = col.as_primitive_opt::<Date32Type>() {
        if existing.null_count() > 0 {
            return Err(DashboardError::Schema(format!(
                "column `{}` has {} missing values",
                DATE,
                existing.null_count()
            )));
        }
        return Ok(existing.clone());
    }

    let strings = col.as_string_opt::<i32>().ok_or_else(|| {
        DashboardError::Schema(format!(
            "column `{}` is {:?}, expected text or Date32",
            DATE,
            col.data_type()
        ))
    })?;

    let mut b = Date32Builder::with_capacity(strings.len());
    for (row, cell) in strings.iter().enumerate() {
        let raw = cell.ok_or_else(|| {
            DashboardError::Schema(format!("column `{}` data row {}: missing value", DATE, row + 1))
        })?;
        let date = parse_sale_date(raw).ok_or_else(|| {
            DashboardError::Schema(format!(
                "column `{}` data row {}: cannot parse {:?} as a date",
                DATE,
                row + 1,
                raw
            ))
        })?;
        b.append_value(to_date32(date));
    }
    Ok(b.finish())
}
