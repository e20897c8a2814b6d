// src/schema/arrow.rs

use arrow::datatypes::{DataType, Field, Schema};
use std::sync::Arc;

use super::types::{AGE, QUANTITY, TOTAL_AMOUNT};

/// Map a CSV column name onto the Arrow type it is coerced to after load.
///
/// - Age, Quantity  → Int64
/// - Total Amount   → Float64
/// - everything else (Date included, parsed later by the deriver) → Utf8
pub fn map_to_arrow_type(column: &str) -> DataType {
    match column {
        AGE | QUANTITY => DataType::Int64,
        TOTAL_AMOUNT => DataType::Float64,
        _ => DataType::Utf8,
    }
}

/// All-Utf8 schema used for the initial CSV read.
pub fn build_raw_schema(headers: &[String]) -> Arc<Schema> {
    let fields: Vec<Field> = headers
        .iter()
        .map(|n| Field::new(n, DataType::Utf8, /* nullable = */ true))
        .collect();
    Arc::new(Schema::new(fields))
}

/// Schema after numeric coercion.
pub fn build_typed_schema(headers: &[String]) -> Arc<Schema> {
    let fields: Vec<Field> = headers
        .iter()
        .map(|n| Field::new(n, map_to_arrow_type(n), true))
        .collect();
    Arc::new(Schema::new(fields))
}
