use crate::analysis::table::SummaryTable;
use crate::error::AppError;
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

/// Destination for finished summary tables.
pub trait TableSink {
    fn write_table(&mut self, table: &SummaryTable) -> Result<(), AppError>;
}

/// Writes each table to `<dir>/<prefix>_<title>.json`.
pub struct JsonSink {
    dir: PathBuf,
    prefix: String,
}

impl JsonSink {
    pub fn new(dir: &Path, prefix: &str) -> Result<Self, AppError> {
        fs::create_dir_all(dir).map_err(|e| {
            AppError::CacheError(format!("Failed to create {}: {}", dir.display(), e))
        })?;
        Ok(JsonSink {
            dir: dir.to_path_buf(),
            prefix: prefix.to_string(),
        })
    }

    pub fn path_for(&self, title: &str) -> PathBuf {
        let slug: String = title
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
            .collect();
        self.dir.join(format!("{}_{}.json", self.prefix, slug))
    }
}

impl TableSink for JsonSink {
    fn write_table(&mut self, table: &SummaryTable) -> Result<(), AppError> {
        let path = self.path_for(&table.title);
        info!("Dumping {} rows to {}", table.len(), path.display());

        let json = serde_json::to_string_pretty(table)
            .map_err(|e| AppError::JsonError(format!("Failed to serialize table: {}", e)))?;
        fs::write(&path, json)
            .map_err(|e| AppError::CacheError(format!("Failed to write {}: {}", path.display(), e)))
    }
}
