//! Debounced config file watcher.

use crate::schema::ToolwinConfig;
use crate::toml_loader;
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::sync::{broadcast, mpsc};
use toolwin_common::ConfigError;
use tracing::{debug, error, info, warn};

/// Quiet period after the last file event before a reload.
pub const DEBOUNCE: Duration = Duration::from_millis(500);

/// Watches a config file and broadcasts each successfully reloaded config.
pub struct ConfigWatcher {
    path: PathBuf,
}

impl ConfigWatcher {
    pub fn new(path: PathBuf) -> Result<Self, ConfigError> {
        if !path.exists() {
            warn!(
                "config file {} does not exist yet, will watch for creation",
                path.display()
            );
        }
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Re-read the watched file. Parse failures keep the previous config
    /// in effect, so they are returned to the caller instead of published.
    pub fn reload(&self) -> Result<ToolwinConfig, ConfigError> {
        toml_loader::load_from_path(&self.path)
    }

    /// Run until the notify channel closes.
    ///
    /// Editors that save via write + rename produce bursts of events; those
    /// are coalesced into one reload.
    pub async fn watch(&self, tx: broadcast::Sender<ToolwinConfig>) -> Result<(), ConfigError> {
        let watch_dir = self
            .path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.path.clone());
        let file_name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();

        info!("starting config file watcher for {}", self.path.display());

        let (notify_tx, mut notify_rx) = mpsc::channel::<()>(16);

        let mut watcher = RecommendedWatcher::new(
            move |result: Result<Event, notify::Error>| match result {
                Ok(event) => {
                    if !matches!(event.kind, EventKind::Modify(_) | EventKind::Create(_)) {
                        return;
                    }
                    let ours = event
                        .paths
                        .iter()
                        .any(|p| p.file_name().map(|n| n == file_name).unwrap_or(false));
                    if ours {
                        debug!("config file change detected");
                        let _ = notify_tx.try_send(());
                    }
                }
                Err(e) => error!("file watcher error: {e}"),
            },
            notify::Config::default(),
        )
        .map_err(|e| ConfigError::WatchError(format!("failed to create watcher: {e}")))?;

        watcher
            .watch(&watch_dir, RecursiveMode::NonRecursive)
            .map_err(|e| {
                ConfigError::WatchError(format!("failed to watch {}: {e}", watch_dir.display()))
            })?;

        while notify_rx.recv().await.is_some() {
            let debounce = tokio::time::sleep(DEBOUNCE);
            tokio::pin!(debounce);

            loop {
                tokio::select! {
                    _ = &mut debounce => break,
                    msg = notify_rx.recv() => {
                        if msg.is_none() {
                            return Ok(());
                        }
                    }
                }
            }

            match self.reload() {
                Ok(config) => {
                    info!("config file changed, publishing reloaded config");
                    if tx.send(config).is_err() {
                        debug!("no receivers for config reload");
                    }
                }
                Err(e) => warn!("ignoring config change: {e}"),
            }
        }

        drop(watcher);
        Ok(())
    }
}
