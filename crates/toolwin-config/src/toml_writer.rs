//! Writing the config back to disk.

use std::path::Path;

use toolwin_common::ConfigError;

use crate::fs::write_atomic;
use crate::schema::ToolwinConfig;
use crate::toml_loader::default_config_path;

/// Write config to the platform default path (`~/.config/toolwin/config.toml`).
pub fn save_config(config: &ToolwinConfig) -> Result<(), ConfigError> {
    let path = default_config_path()?;
    save_config_to_path(config, &path)
}

/// Write config to `path`, creating missing parent directories. Every
/// field is written, defaults included.
pub fn save_config_to_path(config: &ToolwinConfig, path: &Path) -> Result<(), ConfigError> {
    let toml_str = toml::to_string_pretty(config)
        .map_err(|e| ConfigError::ParseError(format!("failed to serialize config: {e}")))?;
    write_atomic(path, &toml_str)?;
    tracing::debug!(path = %path.display(), "config saved");
    Ok(())
}
