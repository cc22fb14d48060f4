//! toolwin configuration system.
//!
//! Provides TOML-based configuration with live reload and validation, plus
//! a small store for persisted workspace state. All config sections use
//! defaults so partial configs work out of the box.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use toolwin_config::{load_config, config_to_json};
//!
//! let config = load_config().expect("failed to load config");
//! println!("{}", config_to_json(&config));
//! ```

mod fs;
pub mod schema;
pub mod state_store;
pub mod toml_loader;
pub mod toml_writer;
pub mod validation;
pub mod watcher;

pub use schema::{
    DockingConfig, LoggingConfig, StripesConfig, ToolwinConfig, CONFIG_SCHEMA_VERSION,
};
pub use state_store::{load_state, save_state};
pub use toml_writer::{save_config, save_config_to_path};
pub use watcher::ConfigWatcher;

use toolwin_common::ConfigError;

/// Load `config.toml` from the OS config directory, creating a default
/// if none exists, and validate the result.
pub fn load_config() -> Result<ToolwinConfig, ConfigError> {
    let config = toml_loader::load_default()?;
    validation::validate(&config)?;
    Ok(config)
}

/// Serialize a config to a pretty-printed JSON string.
pub fn config_to_json(config: &ToolwinConfig) -> String {
    serde_json::to_string_pretty(config)
        .unwrap_or_else(|e| format!("{{\"error\": \"failed to serialize config: {e}\"}}"))
}
