use std::path::PathBuf;

use crate::types::{PaneId, ToolWindowId};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),

    #[error("config watch error: {0}")]
    WatchError(String),
}

/// Failures reported by native window services.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlatformError {
    #[error("window has no native handle")]
    NativeHandleMissing,

    #[error("native call failed: {0}")]
    CallFailed(String),

    #[error("not supported: {0}")]
    NotSupported(String),

    #[error("operation cancelled")]
    Cancelled,
}

/// Caller contract breaches in the docking core.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    #[error("tool window \"{0}\" is not registered")]
    UnknownToolWindow(ToolWindowId),

    #[error("tool window \"{0}\" is already registered")]
    AlreadyRegistered(ToolWindowId),

    #[error("tool window pane \"{0}\" does not exist")]
    UnknownPane(PaneId),

    #[error("no drag session in progress")]
    NoDragInProgress,
}

/// Cancellation of the surrounding task. Never downgraded to "no result".
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("cancelled")]
pub struct Cancelled;

#[derive(Debug, thiserror::Error)]
pub enum ToolwinError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Platform(#[from] PlatformError),

    #[error(transparent)]
    Layout(#[from] LayoutError),

    #[error(transparent)]
    Cancelled(#[from] Cancelled),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_display() {
        let err = ConfigError::FileNotFound(PathBuf::from("/tmp/missing.toml"));
        assert_eq!(err.to_string(), "config file not found: /tmp/missing.toml");

        let err = ConfigError::ParseError("unexpected token".into());
        assert_eq!(err.to_string(), "config parse error: unexpected token");

        let err = ConfigError::ValidationError("docking.default_weight".into());
        assert_eq!(
            err.to_string(),
            "config validation error: docking.default_weight"
        );

        let err = ConfigError::WatchError("inotify limit reached".into());
        assert_eq!(err.to_string(), "config watch error: inotify limit reached");
    }

    #[test]
    fn platform_error_display() {
        assert_eq!(
            PlatformError::NativeHandleMissing.to_string(),
            "window has no native handle"
        );
        let err = PlatformError::CallFailed("GetWindowPlacement".into());
        assert_eq!(err.to_string(), "native call failed: GetWindowPlacement");
        let err = PlatformError::NotSupported("window placement".into());
        assert_eq!(err.to_string(), "not supported: window placement");
    }

    #[test]
    fn layout_error_display() {
        let err = LayoutError::UnknownToolWindow(ToolWindowId::new("Project"));
        assert_eq!(err.to_string(), "tool window \"Project\" is not registered");
        let err = LayoutError::AlreadyRegistered(ToolWindowId::new("Terminal"));
        assert_eq!(
            err.to_string(),
            "tool window \"Terminal\" is already registered"
        );
        let err = LayoutError::UnknownPane(PaneId::new("detached"));
        assert_eq!(err.to_string(), "tool window pane \"detached\" does not exist");
    }

    #[test]
    fn toolwin_error_from_layout() {
        let err: ToolwinError = LayoutError::NoDragInProgress.into();
        assert!(matches!(err, ToolwinError::Layout(_)));
        assert_eq!(err.to_string(), "no drag session in progress");
    }

    #[test]
    fn toolwin_error_from_cancelled() {
        let err: ToolwinError = Cancelled.into();
        assert!(matches!(err, ToolwinError::Cancelled(_)));
        assert_eq!(err.to_string(), "cancelled");
    }

    #[test]
    fn toolwin_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: ToolwinError = io_err.into();
        assert!(matches!(err, ToolwinError::Io(_)));
        assert!(err.to_string().contains("file missing"));
    }

    #[test]
    fn toolwin_error_from_config_and_platform() {
        let err: ToolwinError = ConfigError::ParseError("bad toml".into()).into();
        assert!(matches!(err, ToolwinError::Config(_)));
        let err: ToolwinError = PlatformError::Cancelled.into();
        assert!(matches!(err, ToolwinError::Platform(PlatformError::Cancelled)));
    }
}
