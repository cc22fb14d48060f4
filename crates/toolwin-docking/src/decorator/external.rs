//! Decorators hosting a tool window in its own OS window.

use toolwin_common::errors::PlatformError;
use toolwin_common::{ExtendedState, Rect, ToolWindowId, ToolWindowType};
use tracing::debug;

use super::{Decorator, DecoratorEvent, DecoratorEventSender};
use crate::model::WindowInfo;
use crate::platform::{HostWindow, WatchHandle, WindowEvent};

fn subscribe(
    window: &mut dyn HostWindow,
    id: &ToolWindowId,
    events: &DecoratorEventSender,
    forward_resizes: bool,
) -> Result<WatchHandle, PlatformError> {
    let tx = events.clone();
    let id = id.clone();
    window.watch(Box::new(move |event| {
        if matches!(event, WindowEvent::Resized(_)) && !forward_resizes {
            return;
        }
        // The receiver is gone only while the manager shuts down.
        let _ = tx.send(DecoratorEvent {
            id: id.clone(),
            event,
        });
    }))
}

fn initial_bounds(info: &WindowInfo, default_bounds: Rect) -> Rect {
    info.floating_bounds
        .filter(|b| !b.is_empty())
        .unwrap_or(default_bounds)
}

/// A tool window in an undecorated always-on-top window.
pub struct FloatingDecorator {
    id: ToolWindowId,
    window: Box<dyn HostWindow>,
    watch: Option<WatchHandle>,
    default_bounds: Rect,
    /// Bounds to return to when un-maximizing.
    restore_bounds: Option<Rect>,
}

impl FloatingDecorator {
    pub fn new(
        id: ToolWindowId,
        mut window: Box<dyn HostWindow>,
        default_bounds: Rect,
        events: &DecoratorEventSender,
    ) -> Result<Self, PlatformError> {
        let watch = subscribe(window.as_mut(), &id, events, true)?;
        Ok(Self {
            id,
            window,
            watch: Some(watch),
            default_bounds,
            restore_bounds: None,
        })
    }

    pub fn is_maximized(&self) -> bool {
        self.restore_bounds.is_some()
    }

    /// Toggle between covering `frame_bounds` and the previous bounds.
    pub fn toggle_maximized(&mut self, frame_bounds: Rect) {
        match self.restore_bounds.take() {
            Some(restore) => self.window.set_bounds(restore),
            None => {
                self.restore_bounds = Some(self.window.bounds());
                self.window.set_bounds(frame_bounds);
            }
        }
        debug!(id = %self.id, maximized = self.is_maximized(), "floating window maximize toggled");
    }
}

impl Decorator for FloatingDecorator {
    fn apply(&mut self, info: &WindowInfo) {
        self.restore_bounds = None;
        self.window.set_bounds(initial_bounds(info, self.default_bounds));
        self.window.set_visible(true);
    }

    fn tool_window_type(&self) -> ToolWindowType {
        ToolWindowType::Floating
    }

    fn bounds(&self) -> Option<Rect> {
        Some(self.window.bounds())
    }

    fn set_bounds(&mut self, bounds: Rect) {
        self.window.set_bounds(bounds);
    }

    fn bounds_to_persist(&mut self) -> Option<(Rect, bool)> {
        Some((self.restore_bounds.unwrap_or_else(|| self.window.bounds()), false))
    }

    fn dispose(&mut self) {
        self.watch = None;
        self.window.dispose();
    }
}

/// A tool window in a regular, separately managed frame.
pub struct WindowedDecorator {
    id: ToolWindowId,
    window: Box<dyn HostWindow>,
    watch: Option<WatchHandle>,
    default_bounds: Rect,
}

impl WindowedDecorator {
    /// Resizes are handled by the content inside the frame, so only moves
    /// are reported.
    pub fn new(
        id: ToolWindowId,
        mut window: Box<dyn HostWindow>,
        default_bounds: Rect,
        events: &DecoratorEventSender,
    ) -> Result<Self, PlatformError> {
        let watch = subscribe(window.as_mut(), &id, events, false)?;
        Ok(Self {
            id,
            window,
            watch: Some(watch),
            default_bounds,
        })
    }

    pub fn is_maximized(&self) -> bool {
        self.window.extended_state() == ExtendedState::MAXIMIZED_BOTH
    }

    /// Switch the frame between normal and maximized. Other states
    /// (iconified, maximized along one axis) are left alone.
    pub fn toggle_maximized(&mut self) {
        let state = self.window.extended_state();
        if state == ExtendedState::NORMAL {
            self.window.set_extended_state(ExtendedState::MAXIMIZED_BOTH);
        } else if state == ExtendedState::MAXIMIZED_BOTH {
            self.window.set_extended_state(ExtendedState::NORMAL);
        }
        debug!(id = %self.id, maximized = self.is_maximized(), "windowed frame maximize toggled");
    }
}

impl Decorator for WindowedDecorator {
    fn apply(&mut self, info: &WindowInfo) {
        self.window.set_bounds(initial_bounds(info, self.default_bounds));
        if info.is_maximized {
            self.window.set_extended_state(ExtendedState::MAXIMIZED_BOTH);
        }
        self.window.set_visible(true);
    }

    fn tool_window_type(&self) -> ToolWindowType {
        ToolWindowType::Windowed
    }

    fn bounds(&self) -> Option<Rect> {
        Some(self.window.bounds())
    }

    fn set_bounds(&mut self, bounds: Rect) {
        self.window.set_bounds(bounds);
    }

    /// Normal bounds plus whether the frame was maximized. The frame is
    /// restored first so the bounds are not the maximized ones.
    fn bounds_to_persist(&mut self) -> Option<(Rect, bool)> {
        let maximized = self.window.extended_state().is_maximized();
        if maximized {
            self.window.set_extended_state(ExtendedState::NORMAL);
        }
        Some((self.window.bounds(), maximized))
    }

    fn dispose(&mut self) {
        self.watch = None;
        self.window.dispose();
    }
}
