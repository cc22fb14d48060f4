//! Where toolwin keeps its files.

use std::path::{Path, PathBuf};

use toolwin_common::ConfigError;
use tracing::info;

use super::template::default_config_toml;
use crate::fs::write_atomic;

const APP_DIR: &str = "toolwin";

/// `<os config dir>/toolwin`.
pub fn config_dir() -> Result<PathBuf, ConfigError> {
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR))
        .ok_or_else(|| ConfigError::ParseError("could not determine config directory".into()))
}

pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    Ok(config_dir()?.join("config.toml"))
}

/// Where the workspace state (frame bounds, layout) is persisted.
pub fn default_state_path() -> Result<PathBuf, ConfigError> {
    Ok(config_dir()?.join("workspace.toml"))
}

/// Write the commented default config to `path`.
pub fn create_default_config(path: &Path) -> Result<(), ConfigError> {
    write_atomic(path, &default_config_toml())?;
    info!(path = %path.display(), "created default config");
    Ok(())
}
