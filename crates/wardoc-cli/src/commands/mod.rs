//! CLI subcommands.

pub mod batch;
pub mod config;
pub mod inference;
pub mod scan;
pub mod tools;

use std::path::Path;

use tracing::debug;
use wardoc_core::WardocConfig;

/// Load the `-c` config file, else the user config file if present, else defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<WardocConfig> {
    if let Some(path) = config_path {
        return Ok(WardocConfig::from_file(Path::new(path))?);
    }

    let default_path = config::default_config_path();
    if default_path.exists() {
        debug!("Loading configuration from {}", default_path.display());
        Ok(WardocConfig::from_file(&default_path)?)
    } else {
        Ok(WardocConfig::default())
    }
}
