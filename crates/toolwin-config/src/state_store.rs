//! Persistence of workspace state next to the config file.
//!
//! The store is generic over the state type so the docking core owns its
//! own schema. Files are TOML and written atomically.

use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;
use toolwin_common::ConfigError;
use tracing::{debug, info};

use crate::fs::{read_toml, write_atomic};

/// Read a persisted state file.
///
/// Returns `Ok(None)` when no file exists yet; a file that exists but
/// cannot be parsed is an error so that callers don't silently overwrite it.
pub fn load_state<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, ConfigError> {
    let state = read_toml(path)?;
    match &state {
        Some(_) => info!(path = %path.display(), "loaded workspace state"),
        None => debug!(path = %path.display(), "no workspace state on disk"),
    }
    Ok(state)
}

/// Write a state value to `path`, replacing any previous file.
pub fn save_state<T: Serialize>(state: &T, path: &Path) -> Result<(), ConfigError> {
    let content = toml::to_string_pretty(state)
        .map_err(|e| ConfigError::ParseError(format!("failed to serialize state: {e}")))?;
    write_atomic(path, &content)?;
    debug!(path = %path.display(), "workspace state saved");
    Ok(())
}
