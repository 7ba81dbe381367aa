//! Shared helpers for command handlers

use crate::error::{Error, Result};
use rollbook_core::MemoryDataset;
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Read a JSON or YAML file (by extension) into a JSON value.
pub fn load_value(path: &Path) -> Result<Value> {
    if !path.exists() {
        return Err(Error::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let content = fs::read_to_string(path)?;

    let is_yaml = path
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s == "yaml" || s == "yml")
        .unwrap_or(false);

    if is_yaml {
        serde_yaml::from_str(&content).map_err(|_| Error::InvalidFormat {
            path: path.to_path_buf(),
            expected: "YAML".to_string(),
        })
    } else {
        serde_json::from_str(&content).map_err(|_| Error::InvalidFormat {
            path: path.to_path_buf(),
            expected: "JSON".to_string(),
        })
    }
}

/// Load a roster dataset file into memory.
pub fn load_dataset(path: &Path) -> Result<MemoryDataset> {
    let value = load_value(path)?;
    MemoryDataset::from_value(value).map_err(Error::Core)
}
