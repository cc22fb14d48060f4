//! Sizing, maximizing, external window geometry and notifications.

use std::time::Duration;

use toolwin_common::{Cancelled, Event, Rect, ToolWindowId, ToolWindowType, ToolwinError};
use tracing::{debug, trace, warn};

use super::types::ToolWindowManager;
use crate::decorator::{Decorator, ToolWindowDecorator};
use crate::frame::FrameInfo;
use crate::model::{clamp_side_weight, WindowInfo};
use crate::platform::background::compute_with_deadline;
use crate::platform::FrameHandle;

impl ToolWindowManager {
    /// Maximize or restore a visible window. Returns `false` if the window
    /// is hidden or already in the requested state.
    pub fn set_maximized(&mut self, id: &ToolWindowId, maximized: bool) -> Result<bool, ToolwinError> {
        let info = self.registered_info(id)?;
        if !info.is_visible {
            warn!(id = %id, "cannot maximize a hidden tool window");
            return Ok(false);
        }
        if self.is_maximized(id) == maximized {
            return Ok(false);
        }

        match info.window_type {
            ToolWindowType::Floating => {
                let frame_bounds = self.services.frames.frame_bounds(&info.pane_id);
                if let Some(ToolWindowDecorator::Floating(d)) =
                    self.entries.get_mut(id).and_then(|e| e.decorator.as_mut())
                {
                    d.toggle_maximized(frame_bounds);
                }
            }
            ToolWindowType::Windowed => {
                if let Some(ToolWindowDecorator::Windowed(d)) =
                    self.entries.get_mut(id).and_then(|e| e.decorator.as_mut())
                {
                    d.toggle_maximized();
                }
                self.layout.require_mut(id)?.is_maximized = maximized;
            }
            ToolWindowType::Docked | ToolWindowType::Sliding => {
                if maximized {
                    let restore = self
                        .layout
                        .effective_weight(id)
                        .unwrap_or(self.config.default_weight);
                    let pane = self.pane_mut(&info.pane_id)?;
                    if let Some((previous, weight)) = pane.state.set_maximized(id.clone(), restore) {
                        self.layout.set_weight(&previous, weight)?;
                    }
                    self.layout.set_weight(id, 1.0)?;
                } else {
                    let pane = self.pane_mut(&info.pane_id)?;
                    if let Some((_, weight)) = pane.state.take_maximized() {
                        self.layout.set_weight(id, weight)?;
                    }
                }
                self.update_docked_bounds(&info.pane_id);
            }
        }

        debug!(id = %id, maximized, "tool window maximize changed");
        self.publish(Event::LayoutChanged);
        Ok(true)
    }

    pub fn is_maximized(&self, id: &ToolWindowId) -> bool {
        let Some(info) = self.layout.get_info(id) else {
            return false;
        };
        match self.entries.get(id).and_then(|e| e.decorator.as_ref()) {
            Some(ToolWindowDecorator::Floating(d)) => d.is_maximized(),
            Some(ToolWindowDecorator::Windowed(d)) => d.is_maximized(),
            _ => self
                .pane(&info.pane_id)
                .is_some_and(|p| p.state.is_maximized(id)),
        }
    }

    /// Grow (or shrink, for negative `px`) a window docked left or right.
    pub fn stretch_width(&mut self, id: &ToolWindowId, px: f64) -> Result<bool, ToolwinError> {
        let info = self.registered_info(id)?;
        if info.anchor.is_horizontal() {
            return Ok(false);
        }
        self.stretch(&info, px)
    }

    /// Grow (or shrink, for negative `px`) a window docked top or bottom.
    pub fn stretch_height(&mut self, id: &ToolWindowId, px: f64) -> Result<bool, ToolwinError> {
        let info = self.registered_info(id)?;
        if !info.anchor.is_horizontal() {
            return Ok(false);
        }
        self.stretch(&info, px)
    }

    fn stretch(&mut self, info: &WindowInfo, px: f64) -> Result<bool, ToolwinError> {
        if !info.is_visible || !info.window_type.is_internal() {
            return Ok(false);
        }
        let extent = self
            .pane(&info.pane_id)
            .map_or(0.0, |p| p.extent_for(info.anchor));
        if extent <= 0.0 {
            return Ok(false);
        }

        let old = self
            .layout
            .effective_weight(&info.id)
            .unwrap_or(self.config.default_weight);
        let new = (old + px / extent).clamp(self.config.min_weight, 1.0);
        if (new - old).abs() < f64::EPSILON {
            return Ok(false);
        }

        self.layout.set_weight(&info.id, new)?;
        self.layout.unified_weights_mut().set(info.anchor, new);
        self.update_docked_bounds(&info.pane_id);
        trace!(id = %info.id, old, new, "tool window stretched");
        self.publish(Event::LayoutChanged);
        Ok(true)
    }

    /// Set the share `id` takes of its anchor region while the other half
    /// of the anchor is shown too. A visible window in the other half gets
    /// the rest. Returns `false` if the side weight is unchanged.
    pub fn set_side_weight(&mut self, id: &ToolWindowId, side_weight: f64) -> Result<bool, ToolwinError> {
        let info = self.registered_info(id)?;
        if info.side_weight == Some(clamp_side_weight(side_weight)) {
            return Ok(false);
        }
        let own = self.layout.set_side_weight(id, side_weight)?;
        let partners: Vec<ToolWindowId> = self
            .layout
            .infos()
            .filter(|o| {
                o.is_visible
                    && o.pane_id == info.pane_id
                    && o.anchor == info.anchor
                    && o.is_split != info.is_split
            })
            .map(|o| o.id.clone())
            .collect();
        for partner in &partners {
            self.layout.set_side_weight(partner, 1.0 - own)?;
        }

        self.seed_pane_state(&info.pane_id);
        self.update_docked_bounds(&info.pane_id);
        debug!(id = %id, side_weight = own, "side weight changed");
        self.publish(Event::LayoutChanged);
        Ok(true)
    }

    /// Drain move/resize events of floating and windowed decorators into
    /// `WindowInfo::floating_bounds`. Returns how many infos were updated.
    pub fn dispatch_decorator_events(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(event) = self.decorator_rx.try_recv() {
            let bounds = match self.entries.get(&event.id).and_then(|e| e.decorator.as_ref()) {
                Some(ToolWindowDecorator::Floating(d)) if !d.is_maximized() => d.bounds(),
                Some(ToolWindowDecorator::Windowed(d)) if !d.is_maximized() => d.bounds(),
                _ => None,
            };
            let Some(bounds) = bounds else {
                trace!(id = %event.id, "decorator event dropped");
                continue;
            };
            if let Some(info) = self.layout.info_mut(&event.id) {
                info.floating_bounds = Some(bounds);
                applied += 1;
            }
        }
        applied
    }

    /// Show `text` in a balloon next to the window's stripe button, or over
    /// the window itself when it has no visible button. Returns `false`
    /// when there is nothing to attach the balloon to.
    pub fn notify_by_balloon(&mut self, id: &ToolWindowId, text: &str) -> Result<bool, ToolwinError> {
        let info = self.registered_info(id)?;
        let target = self
            .visible_button_bounds(id, &info)
            .or_else(|| {
                self.entries
                    .get(id)
                    .and_then(|e| e.decorator.as_ref())
                    .and_then(|d| d.bounds())
            });
        let Some(target) = target else {
            debug!(id = %id, "no anchor for balloon");
            return Ok(false);
        };
        self.services.popups.show_balloon(target, text)?;
        Ok(true)
    }

    pub fn can_show_notification(&self, id: &ToolWindowId) -> bool {
        self.layout
            .get_info(id)
            .filter(|_| self.entries.contains_key(id))
            .and_then(|info| self.visible_button_bounds(id, info))
            .is_some()
    }

    fn visible_button_bounds(&self, id: &ToolWindowId, info: &WindowInfo) -> Option<Rect> {
        let pane = self.pane(&info.pane_id)?;
        let stripe = pane.buttons.get_stripe_for(info.anchor);
        if !stripe.is_visible() {
            return None;
        }
        stripe.get_button_for(id).filter(|b| b.visible).map(|b| b.bounds)
    }

    /// Fetch a stripe button icon in the background. A slow or failing
    /// fetch leaves the button without an icon.
    pub async fn load_icon<F>(&mut self, id: &ToolWindowId, fetch: F) -> Result<bool, ToolwinError>
    where
        F: FnOnce() -> Result<Vec<u8>, ToolwinError> + Send + 'static,
    {
        let info = self.registered_info(id)?;
        let deadline = Duration::from_millis(self.config.resource_fetch_timeout_ms);
        let Some(icon) = compute_with_deadline(deadline, fetch).await? else {
            debug!(id = %id, "icon not loaded");
            return Ok(false);
        };
        let pane = self.pane_mut(&info.pane_id)?;
        Ok(pane.buttons.set_icon(id, Some(icon)))
    }

    /// Record a frame move or resize. `None` flags a state change only.
    pub fn on_frame_bounds_changed(&mut self, bounds: Option<Rect>) {
        self.frame.mark_dirty(bounds);
    }

    /// Current frame record in device pixels, recomputed if stale.
    pub fn frame_info(&mut self, frame: &dyn FrameHandle) -> Result<FrameInfo, Cancelled> {
        self.frame
            .get_actual_frame_info_in_device_space(frame, self.services.windows.as_ref())
    }
}
