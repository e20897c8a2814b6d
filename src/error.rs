//! Error types for the dashboard core

use thiserror::Error;

/// Every failure a view can report. All of them abort the current render.
#[derive(Error, Debug)]
pub enum DashboardError {
    /// File missing, unreadable, or not parseable as CSV.
    #[error("load error: {0}")]
    Load(String),

    /// Required column absent, wrong type, or a value that does not coerce.
    #[error("schema error: {0}")]
    Schema(String),

    /// A mean was requested over zero records.
    #[error("cannot compute {0} over zero records")]
    EmptyAggregation(&'static str),
}

pub type Result<T> = std::result::Result<T, DashboardError>;

impl DashboardError {
    pub(crate) fn missing_column(name: &str) -> Self {
        DashboardError::Schema(format!("required column `{}` is absent", name))
    }
}
