//! Decorators living inside the tool-window pane.

use toolwin_common::{Anchor, Rect, ToolWindowId, ToolWindowType};

use super::Decorator;
use crate::model::WindowInfo;

/// Region of the pane assigned to a docked or sliding window.
#[derive(Debug, Clone, PartialEq)]
struct PaneSlot {
    id: ToolWindowId,
    anchor: Anchor,
    is_split: bool,
    bounds: Option<Rect>,
}

impl PaneSlot {
    fn new(id: ToolWindowId) -> Self {
        Self {
            id,
            anchor: Anchor::Left,
            is_split: false,
            bounds: None,
        }
    }

    fn apply(&mut self, info: &WindowInfo) {
        self.anchor = info.anchor;
        self.is_split = info.is_split;
    }
}

/// Docked windows take space from the editor area.
#[derive(Debug, Clone, PartialEq)]
pub struct DockedDecorator(PaneSlot);

impl DockedDecorator {
    pub fn new(id: ToolWindowId) -> Self {
        Self(PaneSlot::new(id))
    }

    pub fn id(&self) -> &ToolWindowId {
        &self.0.id
    }

    pub fn anchor(&self) -> Anchor {
        self.0.anchor
    }
}

impl Decorator for DockedDecorator {
    fn apply(&mut self, info: &WindowInfo) {
        self.0.apply(info);
    }

    fn tool_window_type(&self) -> ToolWindowType {
        ToolWindowType::Docked
    }

    fn bounds(&self) -> Option<Rect> {
        self.0.bounds
    }

    fn set_bounds(&mut self, bounds: Rect) {
        self.0.bounds = Some(bounds);
    }

    fn bounds_to_persist(&mut self) -> Option<(Rect, bool)> {
        None
    }

    fn dispose(&mut self) {
        self.0.bounds = None;
    }
}

/// Sliding windows overlap the editor area without resizing it.
#[derive(Debug, Clone, PartialEq)]
pub struct SlidingDecorator(PaneSlot);

impl SlidingDecorator {
    pub fn new(id: ToolWindowId) -> Self {
        Self(PaneSlot::new(id))
    }

    pub fn id(&self) -> &ToolWindowId {
        &self.0.id
    }

    pub fn anchor(&self) -> Anchor {
        self.0.anchor
    }
}

impl Decorator for SlidingDecorator {
    fn apply(&mut self, info: &WindowInfo) {
        self.0.apply(info);
    }

    fn tool_window_type(&self) -> ToolWindowType {
        ToolWindowType::Sliding
    }

    fn bounds(&self) -> Option<Rect> {
        self.0.bounds
    }

    fn set_bounds(&mut self, bounds: Rect) {
        self.0.bounds = Some(bounds);
    }

    fn bounds_to_persist(&mut self) -> Option<(Rect, bool)> {
        None
    }

    fn dispose(&mut self) {
        self.0.bounds = None;
    }
}
