//! Parsing and validation of `ferrule.toml` project configuration files.
//!
//! Every field has a default, so a project without a configuration file
//! behaves exactly like one with an empty file. Command-line flags are
//! layered on top by the CLI.

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod types;

pub use error::ConfigError;
pub use loader::{load_config, load_config_from_str, load_project_config, CONFIG_FILE};
pub use types::*;
