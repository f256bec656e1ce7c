//! Configuration file loading and validation.

use crate::error::ConfigError;
use crate::types::ProjectConfig;
use alloy_primitives::Address;
use std::path::Path;

/// Name of the configuration file in a project root.
pub const CONFIG_FILE: &str = "ferrule.toml";

/// Loads and validates a configuration file at an explicit path.
pub fn load_config(path: &Path) -> Result<ProjectConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    load_config_from_str(&content)
}

/// Loads `<project_dir>/ferrule.toml`, or the defaults if the file is absent.
pub fn load_project_config(project_dir: &Path) -> Result<ProjectConfig, ConfigError> {
    let path = project_dir.join(CONFIG_FILE);
    if !path.exists() {
        return Ok(ProjectConfig::default());
    }
    load_config(&path)
}

/// Parses and validates a `ferrule.toml` configuration from a string.
///
/// Useful for testing without filesystem dependencies.
pub fn load_config_from_str(content: &str) -> Result<ProjectConfig, ConfigError> {
    let config: ProjectConfig =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

/// Validates that configuration values are well-formed.
fn validate_config(config: &ProjectConfig) -> Result<(), ConfigError> {
    if config.compile.network_id.get() == 0 {
        return Err(ConfigError::ValidationError(
            "compile.network_id must be non-zero".to_string(),
        ));
    }
    if config.deploy.gas_price_wei().is_none() {
        return Err(ConfigError::ValidationError(format!(
            "deploy.gas_price '{}' is not an integer amount of wei",
            config.deploy.gas_price
        )));
    }
    if let Some(from) = &config.deploy.from {
        from.parse::<Address>().map_err(|_| {
            ConfigError::ValidationError(format!("deploy.from '{from}' is not an address"))
        })?;
    }
    for version in config.compilers.keys() {
        if !is_release_version(version) {
            return Err(ConfigError::ValidationError(format!(
                "compiler version '{version}' must look like 0.4.11"
            )));
        }
    }
    Ok(())
}

/// Returns `true` for `X.Y.Z` with one- or two-digit numeric components.
fn is_release_version(version: &str) -> bool {
    let parts: Vec<&str> = version.split('.').collect();
    parts.len() == 3
        && parts
            .iter()
            .all(|p| (1..=2).contains(&p.len()) && p.chars().all(|c| c.is_ascii_digit()))
}
