// src/table.rs

use arrow::{
    array::{Array, AsArray, BooleanArray, Float64Array, Int32Array, Int64Array, StringArray},
    datatypes::{Float64Type, Int32Type, Int64Type},
    record_batch::RecordBatch,
};

use crate::error::{DashboardError, Result};
use crate::schema::types::DERIVED_COLUMNS;

/// The in-memory sales dataset. Never mutated once built; the deriver
/// returns a new table instead.
#[derive(Debug, Clone, PartialEq)]
pub struct SalesTable {
    batch: RecordBatch,
}

impl SalesTable {
    pub fn new(batch: RecordBatch) -> Self {
        Self { batch }
    }

    pub fn batch(&self) -> &RecordBatch {
        &self.batch
    }

    pub fn num_rows(&self) -> usize {
        self.batch.num_rows()
    }

    pub fn is_empty(&self) -> bool {
        self.batch.num_rows() == 0
    }

    /// True once every calendar column has been appended.
    pub fn is_derived(&self) -> bool {
        DERIVED_COLUMNS
            .iter()
            .all(|name| self.batch.column_by_name(name).is_some())
    }

    /// First `n` rows (fewer if the table is shorter).
    pub fn preview(&self, n: usize) -> RecordBatch {
        self.batch.slice(0, n.min(self.batch.num_rows()))
    }

    fn column(&self, name: &str) -> Result<&dyn Array> {
        let col = self
            .batch
            .column_by_name(name)
            .ok_or_else(|| DashboardError::missing_column(name))?;
        if col.null_count() > 0 {
            return Err(DashboardError::Schema(format!(
                "column `{}` has {} missing values",
                name,
                col.null_count()
            )));
        }
        Ok(col.as_ref())
    }

    fn wrong_type(name: &str, col: &dyn Array, expected: &str) -> DashboardError {
        DashboardError::Schema(format!(
            "column `{}` is {:?}, expected {}",
            name,
            col.data_type(),
            expected
        ))
    }

    pub(crate) fn utf8(&self, name: &str) -> Result<&StringArray> {
        let col = self.column(name)?;
        col.as_string_opt::<i32>()
            .ok_or_else(|| Self::wrong_type(name, col, "Utf8"))
    }

    pub(crate) fn int64(&self, name: &str) -> Result<&Int64Array> {
        let col = self.column(name)?;
        col.as_primitive_opt::<Int64Type>()
            .ok_or_else(|| Self::wrong_type(name, col, "Int64"))
    }

    pub(crate) fn int32(&self, name: &str) -> Result<&Int32Array> {
        let col = self.column(name)?;
        col.as_primitive_opt::<Int32Type>()
            .ok_or_else(|| Self::wrong_type(name, col, "Int32"))
    }

    pub(crate) fn float64(&self, name: &str) -> Result<&Float64Array> {
        let col = self.column(name)?;
        col.as_primitive_opt::<Float64Type>()
            .ok_or_else(|| Self::wrong_type(name, col, "Float64"))
    }

    pub(crate) fn boolean(&self, name: &str) -> Result<&BooleanArray> {
        let col = self.column(name)?;
        col.as_boolean_opt()
            .ok_or_else(|| Self::wrong_type(name, col, "Boolean"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::load::read_sales_csv;
    use std::io::Cursor;

    const CSV: &str = "Date,Customer ID,Gender,Age,Product Category,Quantity,Total Amount
2023-01-05,CUST001,Male,34,Beauty,3,150
2023-01-06,CUST002,Female,26,Clothing,2,500
2023-02-11,CUST003,Male,50,Electronics,1,30
";

    #[test]
    fn preview_is_clamped_to_table_length() {
        let table = read_sales_csv(Cursor::new(CSV)).unwrap();
        assert_eq!(table.preview(2).num_rows(), 2);
        assert_eq!(table.preview(5).num_rows(), 3);
        assert_eq!(table.preview(0).num_rows(), 0);
    }

    #[test]
    fn typed_accessors_reject_wrong_types() {
        let table = read_sales_csv(Cursor::new(CSV)).unwrap();
        assert!(table.int64("Age").is_ok());
        assert!(matches!(
            table.float64("Age"),
            Err(DashboardError::Schema(_))
        ));
        assert!(matches!(
            table.int32("Month"),
            Err(DashboardError::Schema(_))
        ));
        assert!(!table.is_derived());
    }
}
