use anyhow::{Context, Result};
use serde::Deserialize;
use std::{
    env, fs,
    path::{Path, PathBuf},
};

pub const DEFAULT_DATA_PATH: &str = "retail_sales_dataset.csv";
pub const DEFAULT_PREVIEW_ROWS: usize = 5;
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Runtime settings for the dashboard shell.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// CSV read once per session.
    pub data_path: PathBuf,
    /// Rows shown in the dataset preview.
    pub preview_rows: usize,
    /// `tracing_subscriber::EnvFilter` directive used when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            preview_rows: DEFAULT_PREVIEW_ROWS,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl Config {
    /// Read `SALES_DATA_PATH`, `PREVIEW_ROWS` and `LOG_LEVEL`, falling back to
    /// defaults for anything unset.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut cfg = Self::default();
        if let Some(path) = lookup("SALES_DATA_PATH") {
            cfg.data_path = PathBuf::from(path);
        }
        if let Some(rows) = lookup("PREVIEW_ROWS") {
            cfg.preview_rows = rows
                .trim()
                .parse()
                .with_context(|| format!("PREVIEW_ROWS must be a row count, got {:?}", rows))?;
        }
        if let Some(level) = lookup("LOG_LEVEL") {
            cfg.log_filter = level;
        }
        Ok(cfg)
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_yaml_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn from_yaml_str(text: &str) -> Result<Self> {
        serde_yaml::from_str(text).map_err(Into::into)
    }
}
