pub mod builder;
pub mod defaults;
pub mod merge;
pub mod types;


pub use builder::ConfigBuilder;
pub use types::*;

use anyhow::{Context, Result};
use std::path::Path;

/// Read the YAML config file, or fall back to an empty input when it does
/// not exist.
pub fn load_config(config_file: &str) -> Result<ConfigInput> {
    let path = Path::new(config_file);

    let config_input = if path.exists() {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", config_file))?;
        serde_yaml::from_str(&contents)
            .with_context(|| format!("Invalid config file {}", config_file))?
    } else {
        ConfigInput::default()
    };

    Ok(config_input)
}
