//! Reading `config.toml`.

use std::path::Path;

use toolwin_common::ConfigError;
use tracing::{info, warn};

use super::paths::{create_default_config, default_config_path};
use crate::fs::read_toml;
use crate::schema::ToolwinConfig;
use crate::validation;

/// Load and validate the config at `path`.
///
/// Missing fields take their defaults. A config that fails validation is
/// still returned; the violations are logged.
pub fn load_from_path(path: &Path) -> Result<ToolwinConfig, ConfigError> {
    let config: ToolwinConfig =
        read_toml(path)?.ok_or_else(|| ConfigError::FileNotFound(path.to_path_buf()))?;

    if let Err(e) = validation::validate(&config) {
        warn!(path = %path.display(), error = %e, "config has out-of-range values");
    }
    info!(path = %path.display(), "config loaded");
    Ok(config)
}

/// Load the config from the OS config directory, writing the commented
/// template there first if there is none.
pub fn load_default() -> Result<ToolwinConfig, ConfigError> {
    let path = default_config_path()?;
    match load_from_path(&path) {
        Err(ConfigError::FileNotFound(_)) => {
            create_default_config(&path)?;
            Ok(ToolwinConfig::default())
        }
        other => other,
    }
}
