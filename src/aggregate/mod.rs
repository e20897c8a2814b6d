//! One pure function per reporting question, grouped the way the dashboard
//! menu groups them. Every function expects a derived table.

use arrow::array::{BooleanArray, Float64Array, Int32Array, Int64Array, StringArray};

use crate::error::Result;
use crate::schema::types::{
    AGE, CUSTOMER_ID, DAY_OF_WEEK, GENDER, MONTH, PRODUCT_CATEGORY, QUANTITY, TOTAL_AMOUNT, WEEKEND,
    YEAR,
};
use crate::table::SalesTable;

pub mod customer;
pub mod product;
pub mod spending;
pub mod trend;

pub use customer::{age_distribution, gender_counts, mean_amount_by_gender};
pub use product::{
    product_categories, quantity_by_category, revenue_by_category, revenue_share_by_category,
};
pub use spending::{age_vs_spend, mean_quantity, mean_spend_per_customer};
pub use trend::{monthly_sales, sales_by_day_of_week, weekend_vs_weekday};

/// Typed, null-free handles on the columns the aggregations read.
pub(crate) struct SalesView<'a> {
    pub customer_id: &'a StringArray,
    pub gender: &'a StringArray,
    pub age: &'a Int64Array,
    pub category: &'a StringArray,
    pub quantity: &'a Int64Array,
    pub total_amount: &'a Float64Array,
    pub month: &'a Int32Array,
    pub year: &'a Int32Array,
    pub day_of_week: &'a Int32Array,
    pub weekend: &'a BooleanArray,
}

impl<'a> SalesView<'a> {
    pub fn new(table: &'a SalesTable) -> Result<Self> {
        Ok(Self {
            customer_id: table.utf8(CUSTOMER_ID)?,
            gender: table.utf8(GENDER)?,
            age: table.int64(AGE)?,
            category: table.utf8(PRODUCT_CATEGORY)?,
            quantity: table.int64(QUANTITY)?,
            total_amount: table.float64(TOTAL_AMOUNT)?,
            month: table.int32(MONTH)?,
            year: table.int32(YEAR)?,
            day_of_week: table.int32(DAY_OF_WEEK)?,
            weekend: table.boolean(WEEKEND)?,
        })
    }

    pub fn len(&self) -> usize {
        self.total_amount.len()
    }

    pub fn rows(&self) -> std::ops::Range<usize> {
        0..self.len()
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::derive::derive;
    use crate::load::read_sales_csv;
    use crate::table::SalesTable;
    use std::io::Cursor;

    pub const HEADER: &str = "Date,Customer ID,Gender,Age,Product Category,Quantity,Total Amount";

    /// Derived table built from data rows (no header).
    pub fn table(rows: &[&str]) -> SalesTable {
        let mut csv = String::from(HEADER);
        csv.push('\n');
        for row in rows {
            csv.push_str(row);
            csv.push('\n');
        }
        let raw = read_sales_csv(Cursor::new(csv)).unwrap();
        derive(&raw).unwrap()
    }

    pub fn empty() -> SalesTable {
        table(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DashboardError;
    use crate::load::read_sales_csv;
    use std::io::Cursor;

    #[test]
    fn underived_table_is_rejected() {
        let raw = read_sales_csv(Cursor::new(format!(
            "{}\n2023-01-01,C1,Male,20,Beauty,1,10\n",
            fixtures::HEADER
        )))
        .unwrap();
        match monthly_sales(&raw) {
            Err(DashboardError::Schema(msg)) => assert!(msg.contains("Month"), "{msg}"),
            other => panic!("expected schema error, got {other:?}"),
        }
    }
}
