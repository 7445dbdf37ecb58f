pub mod builder;
pub mod defaults;
pub mod merge;
pub mod types;


pub use builder::ConfigBuilder;
pub use types::*;

use anyhow::{Context, Result};
use std::path::Path;

/// Main configuration loading function
///
/// A missing file is not an error: every key has a default.
pub fn load_config(working_dir: &Path, config_file: &str) -> Result<ConfigInput> {
    let path = working_dir.join(config_file);

    if !path.exists() {
        return Ok(ConfigInput::default());
    }

    let contents = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    if contents.trim().is_empty() {
        return Ok(ConfigInput::default());
    }

    serde_yaml::from_str(&contents)
        .with_context(|| format!("Invalid config file {}", path.display()))
}
