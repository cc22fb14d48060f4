//! In-memory implementations of the platform services.
//!
//! Used by the command-line harness and by tests. Host windows keep their
//! geometry in shared state so the owning service can simulate user moves.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use toolwin_common::errors::PlatformError;
use toolwin_common::{ExtendedState, PaneId, Rect, ToolWindowId, ToolWindowType};
use tracing::info;

use super::{
    FrameHandle, FrameService, HostWindow, NativeHandle, PopupService, Result, WatchHandle,
    WindowEvent, WindowService,
};

/// A frame described by plain values.
#[derive(Debug, Clone)]
pub struct HeadlessFrame {
    pub bounds: Rect,
    pub extended_state: ExtendedState,
    pub full_screen: bool,
    pub scale_factor: f64,
    pub native_handle: Option<NativeHandle>,
}

impl Default for HeadlessFrame {
    fn default() -> Self {
        Self {
            bounds: Rect::new(0.0, 0.0, 1280.0, 800.0),
            extended_state: ExtendedState::NORMAL,
            full_screen: false,
            scale_factor: 1.0,
            native_handle: None,
        }
    }
}

impl FrameHandle for HeadlessFrame {
    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn extended_state(&self) -> ExtendedState {
        self.extended_state
    }

    fn is_in_full_screen(&self) -> bool {
        self.full_screen
    }

    fn scale_factor(&self) -> f64 {
        self.scale_factor
    }

    fn native_handle(&self) -> Option<NativeHandle> {
        self.native_handle
    }
}

/// Window service without a native placement API.
#[derive(Debug, Default)]
pub struct HeadlessWindowService {
    pub full_screen_supported: bool,
    pub placement: Option<Rect>,
}

impl HeadlessWindowService {
    pub fn with_placement(placement: Rect) -> Self {
        Self {
            full_screen_supported: true,
            placement: Some(placement),
        }
    }
}

impl WindowService for HeadlessWindowService {
    fn is_full_screen_supported(&self) -> bool {
        self.full_screen_supported
    }

    fn window_placement(&self, _handle: NativeHandle) -> Result<Rect> {
        self.placement
            .ok_or_else(|| PlatformError::NotSupported("window placement".into()))
    }
}

struct WindowState {
    bounds: Rect,
    extended_state: ExtendedState,
    visible: bool,
    disposed: bool,
    listener: Option<Arc<dyn Fn(WindowEvent) + Send + Sync>>,
}

type SharedWindow = Arc<Mutex<WindowState>>;

fn lock(window: &SharedWindow) -> MutexGuard<'_, WindowState> {
    // A poisoned lock only means a listener panicked; the geometry is
    // still usable.
    window.lock().unwrap_or_else(|e| e.into_inner())
}

/// A host window that only records its geometry.
pub struct HeadlessWindow {
    handle: NativeHandle,
    state: SharedWindow,
}

impl HostWindow for HeadlessWindow {
    fn native_handle(&self) -> Option<NativeHandle> {
        Some(self.handle)
    }

    fn bounds(&self) -> Rect {
        lock(&self.state).bounds
    }

    fn set_bounds(&mut self, bounds: Rect) {
        lock(&self.state).bounds = bounds;
    }

    fn extended_state(&self) -> ExtendedState {
        lock(&self.state).extended_state
    }

    fn set_extended_state(&mut self, state: ExtendedState) {
        lock(&self.state).extended_state = state;
    }

    fn is_visible(&self) -> bool {
        lock(&self.state).visible
    }

    fn set_visible(&mut self, visible: bool) {
        lock(&self.state).visible = visible;
    }

    fn watch(&mut self, callback: Box<dyn Fn(WindowEvent) + Send>) -> Result<WatchHandle> {
        let callback = Mutex::new(callback);
        let listener: Arc<dyn Fn(WindowEvent) + Send + Sync> = Arc::new(move |event| {
            if let Ok(cb) = callback.lock() {
                cb(event);
            }
        });
        lock(&self.state).listener = Some(listener);
        Ok(WatchHandle::new(()))
    }

    fn dispose(&mut self) {
        let mut state = lock(&self.state);
        state.visible = false;
        state.disposed = true;
        state.listener = None;
    }
}

/// Frame service that hands out [`HeadlessWindow`]s.
pub struct HeadlessFrameService {
    frame_bounds: Rect,
    windows: Mutex<HashMap<ToolWindowId, SharedWindow>>,
    next_handle: Mutex<u64>,
}

impl HeadlessFrameService {
    pub fn new(frame_bounds: Rect) -> Self {
        Self {
            frame_bounds,
            windows: Mutex::new(HashMap::new()),
            next_handle: Mutex::new(1),
        }
    }

    fn window(&self, id: &ToolWindowId) -> Option<SharedWindow> {
        self.windows
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(id)
            .cloned()
    }

    /// Move or resize the live host window of `id` as a user would,
    /// notifying its listener. Returns `false` if no live window exists.
    pub fn simulate_user_bounds(&self, id: &ToolWindowId, bounds: Rect) -> bool {
        let Some(window) = self.window(id) else {
            return false;
        };
        let (old, listener) = {
            let mut state = lock(&window);
            if state.disposed {
                return false;
            }
            let old = std::mem::replace(&mut state.bounds, bounds);
            (old, state.listener.clone())
        };
        if let Some(listener) = listener {
            if old.origin() != bounds.origin() {
                listener(WindowEvent::Moved(bounds));
            }
            if old.size() != bounds.size() {
                listener(WindowEvent::Resized(bounds));
            }
        }
        true
    }

    pub fn window_bounds(&self, id: &ToolWindowId) -> Option<Rect> {
        self.window(id).map(|w| lock(&w).bounds)
    }

    pub fn window_state(&self, id: &ToolWindowId) -> Option<ExtendedState> {
        self.window(id).map(|w| lock(&w).extended_state)
    }

    pub fn is_window_live(&self, id: &ToolWindowId) -> bool {
        self.window(id).map(|w| !lock(&w).disposed).unwrap_or(false)
    }
}

impl Default for HeadlessFrameService {
    fn default() -> Self {
        Self::new(HeadlessFrame::default().bounds)
    }
}

impl FrameService for HeadlessFrameService {
    fn create_window(
        &self,
        id: &ToolWindowId,
        window_type: ToolWindowType,
    ) -> Result<Box<dyn HostWindow>> {
        if window_type.is_internal() {
            return Err(PlatformError::NotSupported(format!(
                "host window for {window_type:?} tool window"
            )));
        }
        let handle = {
            let mut next = self.next_handle.lock().unwrap_or_else(|e| e.into_inner());
            let handle = NativeHandle(*next);
            *next += 1;
            handle
        };
        let state = Arc::new(Mutex::new(WindowState {
            bounds: Rect::ZERO,
            extended_state: ExtendedState::NORMAL,
            visible: false,
            disposed: false,
            listener: None,
        }));
        self.windows
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(id.clone(), state.clone());
        Ok(Box::new(HeadlessWindow { handle, state }))
    }

    fn frame_bounds(&self, _pane: &PaneId) -> Rect {
        self.frame_bounds
    }
}

/// Popup service that logs balloons and remembers them.
#[derive(Default)]
pub struct LoggingPopupService {
    shown: Mutex<Vec<(Rect, String)>>,
}

impl LoggingPopupService {
    pub fn shown(&self) -> Vec<(Rect, String)> {
        self.shown.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl PopupService for LoggingPopupService {
    fn show_balloon(&self, target: Rect, text: &str) -> Result<()> {
        info!(x = target.x, y = target.y, "balloon: {text}");
        self.shown
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push((target, text.to_string()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn frame_defaults() {
        let frame = HeadlessFrame::default();
        assert_eq!(frame.scale_factor(), 1.0);
        assert!(frame.native_handle().is_none());
        assert!(!frame.extended_state().is_maximized());
    }

    #[test]
    fn internal_types_have_no_host_window() {
        let service = HeadlessFrameService::default();
        assert!(service
            .create_window(&ToolWindowId::new("Project"), ToolWindowType::Docked)
            .is_err());
    }

    #[test]
    fn simulated_move_notifies_listener() {
        let service = HeadlessFrameService::default();
        let id = ToolWindowId::new("Git");
        let mut window = service.create_window(&id, ToolWindowType::Floating).unwrap();
        window.set_bounds(Rect::new(0.0, 0.0, 100.0, 100.0));

        let count = Arc::new(AtomicUsize::new(0));
        let c = count.clone();
        let _watch = window
            .watch(Box::new(move |_| {
                c.fetch_add(1, Ordering::SeqCst);
            }))
            .unwrap();

        assert!(service.simulate_user_bounds(&id, Rect::new(5.0, 5.0, 100.0, 100.0)));
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert!(service.simulate_user_bounds(&id, Rect::new(6.0, 6.0, 120.0, 100.0)));
        assert_eq!(count.load(Ordering::SeqCst), 3);
        assert_eq!(window.bounds(), Rect::new(6.0, 6.0, 120.0, 100.0));
    }

    #[test]
    fn disposed_window_is_dead() {
        let service = HeadlessFrameService::default();
        let id = ToolWindowId::new("Git");
        let mut window = service.create_window(&id, ToolWindowType::Windowed).unwrap();
        assert!(service.is_window_live(&id));
        window.dispose();
        assert!(!service.is_window_live(&id));
        assert!(!service.simulate_user_bounds(&id, Rect::new(1.0, 1.0, 1.0, 1.0)));
    }

    #[test]
    fn popup_records_balloons() {
        let popups = LoggingPopupService::default();
        popups.show_balloon(Rect::new(0.0, 40.0, 40.0, 40.0), "Build finished").unwrap();
        assert_eq!(popups.shown().len(), 1);
        assert_eq!(popups.shown()[0].1, "Build finished");
    }
}
