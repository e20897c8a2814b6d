// src/schema/types.rs

/// Column names as they appear in the CSV header.
pub const DATE: &str = "Date";
pub const CUSTOMER_ID: &str = "Customer ID";
pub const GENDER: &str = "Gender";
pub const AGE: &str = "Age";
pub const PRODUCT_CATEGORY: &str = "Product Category";
pub const QUANTITY: &str = "Quantity";
pub const TOTAL_AMOUNT: &str = "Total Amount";

/// Columns appended by the field deriver.
pub const MONTH: &str = "Month";
pub const YEAR: &str = "Year";
pub const DAY_OF_WEEK: &str = "DayOfWeek";
pub const WEEKEND: &str = "Weekend";

/// Every column the loader insists on.
pub const REQUIRED_COLUMNS: [&str; 7] = [
    DATE,
    CUSTOMER_ID,
    GENDER,
    AGE,
    PRODUCT_CATEGORY,
    QUANTITY,
    TOTAL_AMOUNT,
];

/// Derived columns, in the order they are appended.
pub const DERIVED_COLUMNS: [&str; 4] = [MONTH, YEAR, DAY_OF_WEEK, WEEKEND];
