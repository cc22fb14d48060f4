//! Presentation strategies for tool windows.
//!
//! A tool window is shown by exactly one decorator matching its
//! [`ToolWindowType`]. Changing the type disposes the current decorator and
//! creates a new one; decorators never morph into another kind.

mod external;
mod internal;

use enum_dispatch::enum_dispatch;
use tokio::sync::mpsc;
use toolwin_common::errors::PlatformError;
use toolwin_common::{Rect, ToolWindowId, ToolWindowType};

use crate::model::WindowInfo;
use crate::platform::{FrameService, WindowEvent};

pub use external::{FloatingDecorator, WindowedDecorator};
pub use internal::{DockedDecorator, SlidingDecorator};

/// Geometry change of a decorator's host window.
#[derive(Debug, Clone, PartialEq)]
pub struct DecoratorEvent {
    pub id: ToolWindowId,
    pub event: WindowEvent,
}

pub type DecoratorEventSender = mpsc::UnboundedSender<DecoratorEvent>;
pub type DecoratorEventReceiver = mpsc::UnboundedReceiver<DecoratorEvent>;

#[enum_dispatch]
pub trait Decorator {
    /// Apply the persisted geometry and state of `info`.
    fn apply(&mut self, info: &WindowInfo);
    fn tool_window_type(&self) -> ToolWindowType;
    fn bounds(&self) -> Option<Rect>;
    fn set_bounds(&mut self, bounds: Rect);
    /// Bounds and maximized flag to write back into the window info when
    /// the decorator goes away. `None` for decorators inside the pane.
    fn bounds_to_persist(&mut self) -> Option<(Rect, bool)>;
    /// Release the host window and unsubscribe listeners.
    fn dispose(&mut self);
}

#[enum_dispatch(Decorator)]
pub enum ToolWindowDecorator {
    Docked(DockedDecorator),
    Sliding(SlidingDecorator),
    Floating(FloatingDecorator),
    Windowed(WindowedDecorator),
}

impl ToolWindowDecorator {
    /// Build the decorator for `info.window_type` and apply `info` to it.
    ///
    /// `default_bounds` is used by external decorators when the info has no
    /// floating bounds yet.
    pub fn create(
        info: &WindowInfo,
        frames: &dyn FrameService,
        default_bounds: Rect,
        events: &DecoratorEventSender,
    ) -> Result<Self, PlatformError> {
        let mut decorator: ToolWindowDecorator = match info.window_type {
            ToolWindowType::Docked => DockedDecorator::new(info.id.clone()).into(),
            ToolWindowType::Sliding => SlidingDecorator::new(info.id.clone()).into(),
            ToolWindowType::Floating => {
                let window = frames.create_window(&info.id, info.window_type)?;
                FloatingDecorator::new(info.id.clone(), window, default_bounds, events)?.into()
            }
            ToolWindowType::Windowed => {
                let window = frames.create_window(&info.id, info.window_type)?;
                WindowedDecorator::new(info.id.clone(), window, default_bounds, events)?.into()
            }
        };
        decorator.apply(info);
        Ok(decorator)
    }

    pub fn is_external(&self) -> bool {
        !self.tool_window_type().is_internal()
    }
}

impl std::fmt::Debug for ToolWindowDecorator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolWindowDecorator")
            .field("type", &self.tool_window_type())
            .field("bounds", &self.bounds())
            .finish()
    }
}
