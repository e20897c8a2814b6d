// src/load/mod.rs
use arrow::{
    compute::concat_batches,
    csv::{reader::Format, ReaderBuilder},
};
use once_cell::sync::OnceCell;
use std::{
    fs::File,
    io::{Cursor, Read},
    path::{Path, PathBuf},
    sync::Arc,
};
use tracing::{debug, info};

use crate::derive::derive;
use crate::error::{DashboardError, Result};
use crate::schema::{build_raw_schema, types::REQUIRED_COLUMNS};
use crate::table::SalesTable;

pub mod convert;

use convert::{clean_str, coerce_columns};

const BATCH_SIZE: usize = 8192;

/// Session-owned memo of the dataset. Construct one per session and hand it
/// to whatever needs the table; the file is read at most once per cache.
#[derive(Debug)]
pub struct DatasetCache {
    path: PathBuf,
    raw: OnceCell<Arc<SalesTable>>,
    derived: OnceCell<Arc<SalesTable>>,
}

impl DatasetCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            raw: OnceCell::new(),
            derived: OnceCell::new(),
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.raw.get().is_some()
    }

    /// The table as read from disk. Every call after the first returns the
    /// same `Arc` without touching the file.
    pub fn load(&self) -> Result<Arc<SalesTable>> {
        self.raw
            .get_or_try_init(|| load_sales_file(&self.path).map(Arc::new))
            .map(Arc::clone)
    }

    /// The table with calendar columns appended, derived once per cache.
    pub fn load_derived(&self) -> Result<Arc<SalesTable>> {
        self.derived
            .get_or_try_init(|| {
                let raw = self.load()?;
                derive(&raw).map(Arc::new)
            })
            .map(Arc::clone)
    }
}

/// Open `path` and read it as a sales CSV.
#[tracing::instrument(level = "info", skip(path), fields(path = %path.display()))]
pub fn load_sales_file(path: &Path) -> Result<SalesTable> {
    let file = File::open(path).map_err(|e| {
        DashboardError::Load(format!("failed to open {}: {}", path.display(), e))
    })?;
    let table = read_sales_csv(file)?;
    info!(rows = table.num_rows(), "loaded sales dataset");
    Ok(table)
}

/// Read a comma-delimited sales file with a header row.
///
/// Every column is first read as text; `Age`, `Quantity` and `Total Amount`
/// are then coerced. Extra columns are kept as text.
pub fn read_sales_csv<R: Read>(mut reader: R) -> Result<SalesTable> {
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .map_err(|e| DashboardError::Load(format!("reading input: {}", e)))?;

    // the header goes through the same CSV parser as the data rows
    let (header_schema, _) = Format::default()
        .with_header(true)
        .infer_schema(Cursor::new(bytes.as_slice()), Some(0))
        .map_err(|e| DashboardError::Load(format!("parsing header line: {}", e)))?;
    let headers: Vec<String> = header_schema
        .fields()
        .iter()
        .map(|f| clean_str(f.name().trim_start_matches('\u{feff}')).to_string())
        .collect();
    if headers.is_empty() || headers.iter().all(String::is_empty) {
        return Err(DashboardError::Load("file is empty, expected a header line".into()));
    }
    debug!(?headers, "parsed header");

    for required in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == required) {
            return Err(DashboardError::missing_column(required));
        }
    }

    let raw_schema = build_raw_schema(&headers);
    let csv = ReaderBuilder::new(raw_schema.clone())
        .with_header(true)
        .with_batch_size(BATCH_SIZE)
        .build(Cursor::new(bytes))
        .map_err(|e| DashboardError::Load(format!("creating CSV reader: {}", e)))?;

    let mut batches = Vec::new();
    for (idx, batch) in csv.enumerate() {
        let batch = batch
            .map_err(|e| DashboardError::Load(format!("CSV parse error in batch {}: {}", idx, e)))?;
        batches.push(batch);
    }

    let raw = concat_batches(&raw_schema, &batches)
        .map_err(|e| DashboardError::Load(format!("assembling table: {}", e)))?;
    let typed = coerce_columns(&raw, &headers)?;
    Ok(SalesTable::new(typed))
}
