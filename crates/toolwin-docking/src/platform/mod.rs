//! Services the docking core consumes from the windowing system.
//!
//! Every OS-facing operation goes through one of these traits so the core
//! can run against a real toolkit, the headless implementations in
//! [`headless`], or test doubles.

use serde::{Deserialize, Serialize};
use toolwin_common::errors::PlatformError;
use toolwin_common::{ExtendedState, PaneId, Rect, ToolWindowId, ToolWindowType};

pub mod background;
pub mod headless;
mod recovery;

pub use recovery::native_normal_bounds;

pub type Result<T> = std::result::Result<T, PlatformError>;

/// Opaque OS handle of a top-level window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NativeHandle(pub u64);

/// Geometry change reported by a host window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WindowEvent {
    Moved(Rect),
    Resized(Rect),
}

/// Keeps an event subscription alive. Dropping it unsubscribes.
pub struct WatchHandle {
    _inner: Box<dyn std::any::Any + Send>,
}

impl WatchHandle {
    pub fn new(inner: impl std::any::Any + Send + 'static) -> Self {
        Self {
            _inner: Box::new(inner),
        }
    }
}

impl std::fmt::Debug for WatchHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("WatchHandle")
    }
}

/// The project frame whose bounds are persisted.
pub trait FrameHandle {
    /// Bounds in user (scaled) coordinates.
    fn bounds(&self) -> Rect;
    fn extended_state(&self) -> ExtendedState;
    fn is_in_full_screen(&self) -> bool;
    /// Device pixels per user-space unit.
    fn scale_factor(&self) -> f64;
    fn native_handle(&self) -> Option<NativeHandle>;
}

/// OS-level window queries.
pub trait WindowService: Send + Sync {
    fn is_full_screen_supported(&self) -> bool;

    /// Normal (restored) bounds the OS keeps for a window, in device
    /// pixels. Valid even while the window is minimized or snapped.
    fn window_placement(&self, handle: NativeHandle) -> Result<Rect>;
}

/// An OS window hosting a floating or windowed tool window.
pub trait HostWindow: Send {
    fn native_handle(&self) -> Option<NativeHandle>;
    fn bounds(&self) -> Rect;
    fn set_bounds(&mut self, bounds: Rect);
    fn extended_state(&self) -> ExtendedState;
    fn set_extended_state(&mut self, state: ExtendedState);
    fn is_visible(&self) -> bool;
    fn set_visible(&mut self, visible: bool);
    fn watch(&mut self, callback: Box<dyn Fn(WindowEvent) + Send>) -> Result<WatchHandle>;
    fn dispose(&mut self);
}

/// Creates host windows and reports frame geometry.
pub trait FrameService: Send + Sync {
    fn create_window(
        &self,
        id: &ToolWindowId,
        window_type: ToolWindowType,
    ) -> Result<Box<dyn HostWindow>>;

    /// Bounds of the frame that owns `pane`, in user coordinates.
    fn frame_bounds(&self, pane: &PaneId) -> Rect;
}

/// Transient overlays (balloons) shown next to a component.
pub trait PopupService: Send + Sync {
    fn show_balloon(&self, target: Rect, text: &str) -> Result<()>;
}
