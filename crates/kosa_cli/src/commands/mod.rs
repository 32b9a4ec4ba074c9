//! CLI command implementations.

pub mod export;
pub mod inspect;
pub mod verify;

use kosa_core::ExportConfig;
use std::path::Path;

/// Reads the configuration file, or returns the defaults.
pub fn load_config(path: Option<&Path>) -> Result<ExportConfig, Box<dyn std::error::Error>> {
    match path {
        Some(path) => Ok(ExportConfig::from_json_file(path)?),
        None => Ok(ExportConfig::default()),
    }
}
