//! # salesboard
//!
//! Reporting core of a retail-sales dashboard: load a sales CSV once per
//! session, derive calendar fields, and answer a fixed set of reporting
//! questions grouped into four menu categories.
//!
//! ```no_run
//! use salesboard::{render, Category, DatasetCache};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let cache = DatasetCache::new("retail_sales_dataset.csv");
//!     let table = cache.load_derived()?;
//!     for panel in render(&table, Category::Product)? {
//!         println!("{} ({:?})", panel.title, panel.chart);
//!     }
//!     Ok(())
//! }
//! ```

pub mod aggregate;
pub mod config;
pub mod derive;
pub mod error;
pub mod load;
pub mod report;
pub mod schema;
pub mod table;

pub use config::Config;
pub use derive::derive;
pub use error::{DashboardError, Result};
pub use load::{load_sales_file, read_sales_csv, DatasetCache};
pub use report::{render, Category, ChartKind, Panel, PanelData};
pub use table::SalesTable;
