//! File helpers shared by the config and state stores.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use toolwin_common::ConfigError;
use tracing::warn;

/// Read and parse a TOML file. `Ok(None)` when the file does not exist.
pub(crate) fn read_toml<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, ConfigError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(ConfigError::ParseError(format!(
                "failed to read {}: {e}",
                path.display()
            )))
        }
    };
    toml::from_str(&content)
        .map(Some)
        .map_err(|e| ConfigError::ParseError(format!("failed to parse {}: {e}", path.display())))
}

/// Replace `path` with `contents` through a sibling temp file, so readers
/// never see a half-written file. A failed rename falls back to writing
/// in place.
pub(crate) fn write_atomic(path: &Path, contents: &str) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            ConfigError::ParseError(format!("failed to create {}: {e}", parent.display()))
        })?;
    }

    let tmp = temp_path(path);
    let write = |target: &Path| {
        std::fs::write(target, contents).map_err(|e| {
            ConfigError::ParseError(format!("failed to write {}: {e}", target.display()))
        })
    };
    write(&tmp)?;

    if let Err(e) = std::fs::rename(&tmp, path) {
        warn!(path = %path.display(), error = %e, "rename failed, writing in place");
        let _ = std::fs::remove_file(&tmp);
        write(path)?;
    }
    Ok(())
}

pub(crate) fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}
