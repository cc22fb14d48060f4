//! Registration, visibility and activation of tool windows.

use toolwin_common::{
    Anchor, Event, LayoutError, PaneId, Rect, ToolWindowId, ToolWindowType, ToolwinError,
};
use tracing::{debug, error, info, warn};

use super::types::{ToolWindowEntry, ToolWindowManager};
use crate::decorator::{Decorator, ToolWindowDecorator};
use crate::model::{RegisterToolWindowTask, WindowInfo};

impl ToolWindowManager {
    /// Register a tool window. A persisted info is reused as-is; otherwise
    /// a new one is appended to the end of its stripe group. A window that
    /// was visible when the layout was saved is shown again.
    pub fn register_tool_window(&mut self, task: RegisterToolWindowTask) -> Result<(), ToolwinError> {
        if self.entries.contains_key(&task.id) {
            error!(id = %task.id, "tool window is already registered");
            return Err(LayoutError::AlreadyRegistered(task.id).into());
        }

        let (info, created) = self.layout.get_or_create(&task);
        let restore_visible = info.is_visible;
        info.is_visible = false;
        info.is_active = false;
        let (pane_id, anchor, split) = (info.pane_id.clone(), info.anchor, info.is_split);

        if self.pane(&pane_id).is_none() {
            warn!(id = %task.id, pane = %pane_id, "pane of saved layout is gone, docking to main pane");
            self.layout.place(&task.id, PaneId::main(), anchor, split, -1)?;
        }

        let info = self.layout.require(&task.id)?.clone();
        let pane = self.pane_mut(&info.pane_id)?;
        if let Some(side_weight) = info.side_weight {
            pane.state.set_split_proportion(&info.id, side_weight);
        }
        pane.buttons.on_stripe_button_added(&info);
        pane.refresh_stripes();
        pane.relayout();

        self.entries.insert(
            task.id.clone(),
            ToolWindowEntry {
                id: task.id.clone(),
                decorator: None,
            },
        );
        info!(id = %task.id, anchor = %info.anchor, order = info.order, created, "tool window registered");
        self.publish(Event::ToolWindowRegistered(task.id.clone()));
        self.publish(Event::StripesChanged(info.anchor));

        if restore_visible {
            self.show_tool_window(&task.id)?;
        }
        Ok(())
    }

    /// Dispose the window's decorator and stripe button. Its info stays in
    /// the layout so a later registration restores it.
    pub fn unregister_tool_window(&mut self, id: &ToolWindowId) -> Result<(), ToolwinError> {
        let Some(entry) = self.entries.remove(id) else {
            error!(id = %id, "tool window is not registered");
            return Err(LayoutError::UnknownToolWindow(id.clone()).into());
        };
        if let Some(decorator) = entry.decorator {
            self.release_decorator(id, decorator);
        }
        if self.drag.as_ref().is_some_and(|d| &d.id == id) {
            self.cancel_drag();
        }

        let pane_id = self.layout.require(id)?.pane_id.clone();
        let pane = self.pane_mut(&pane_id)?;
        let anchor = pane.buttons.on_stripe_button_removed(id);
        let restore_weight = pane.state.forget(id);
        pane.refresh_stripes();
        pane.relayout();

        if let Some(weight) = restore_weight {
            self.layout.set_weight(id, weight)?;
        }
        if let Some(info) = self.layout.info_mut(id) {
            info.is_active = false;
        }
        self.side_stack.remove(id);
        self.active_stack.remove(id);
        self.update_docked_bounds(&pane_id);

        info!(id = %id, "tool window unregistered");
        self.publish(Event::ToolWindowUnregistered(id.clone()));
        if let Some(anchor) = anchor {
            self.publish(Event::StripesChanged(anchor));
        }
        Ok(())
    }

    /// Show a registered window. Docked and sliding windows replace the
    /// window occupying the same slot; a replaced docked window is
    /// remembered on the side stack. Returns `false` if already shown.
    pub fn show_tool_window(&mut self, id: &ToolWindowId) -> Result<bool, ToolwinError> {
        let info = self.registered_info(id)?;
        let has_decorator = self.entries.get(id).is_some_and(|e| e.decorator.is_some());
        if info.is_visible && has_decorator {
            return Ok(false);
        }

        if info.window_type.is_internal() {
            let displaced: Vec<WindowInfo> = self
                .layout
                .infos()
                .filter(|o| {
                    o.id != info.id
                        && o.is_visible
                        && o.shares_slot_with(&info)
                        && self.entries.contains_key(&o.id)
                })
                .cloned()
                .collect();
            for other in displaced {
                debug!(id = %other.id, by = %id, "tool window replaced");
                self.hide_impl(&other.id);
                if other.is_docked() && self.config.side_stack_enabled {
                    self.side_stack.push(other);
                }
            }
        }

        if let Some(old) = self.entries.get_mut(id).and_then(|e| e.decorator.take()) {
            self.release_decorator(id, old);
        }
        let info = self.layout.require(id)?.clone();
        let default_bounds = self.default_floating_bounds(&info.pane_id);
        let decorator = ToolWindowDecorator::create(
            &info,
            self.services.frames.as_ref(),
            default_bounds,
            &self.decorator_tx,
        )?;
        if let Some(entry) = self.entries.get_mut(id) {
            entry.decorator = Some(decorator);
        }

        self.layout.require_mut(id)?.is_visible = true;
        self.update_docked_bounds(&info.pane_id);
        debug!(id = %id, kind = ?info.window_type, "tool window shown");
        self.publish(Event::ToolWindowShown(id.clone()));
        Ok(true)
    }

    /// Hide a window. With `hide_side` every window on the same anchor is
    /// hidden too and the side stack of that anchor is cleared. Otherwise
    /// the window this one replaced comes back. Returns `false` if the
    /// window was already hidden.
    pub fn hide_tool_window(&mut self, id: &ToolWindowId, hide_side: bool) -> Result<bool, ToolwinError> {
        let info = self.registered_info(id)?;
        if !info.is_visible {
            return Ok(false);
        }
        let was_active = info.is_active;
        self.hide_impl(id);
        self.active_stack.remove(id);

        if hide_side && info.window_type.is_internal() {
            let others: Vec<ToolWindowId> = self
                .layout
                .visible_on(&info.pane_id, info.anchor)
                .into_iter()
                .filter(|o| self.entries.contains_key(o))
                .collect();
            for other in others {
                self.active_stack.remove(&other);
                self.hide_impl(&other);
            }
            self.side_stack.clear(info.anchor);
        } else if info.is_docked() && self.config.side_stack_enabled {
            self.restore_from_side_stack(&info)?;
        }

        if was_active {
            self.activate_previous()?;
        }
        Ok(true)
    }

    /// Show the window and make it the only active one.
    pub fn activate_tool_window(&mut self, id: &ToolWindowId) -> Result<bool, ToolwinError> {
        self.show_tool_window(id)?;
        let already = self.layout.get_info(id).is_some_and(|i| i.is_active);

        let active: Vec<ToolWindowId> = self
            .layout
            .infos()
            .filter(|i| i.is_active && &i.id != id)
            .map(|i| i.id.clone())
            .collect();
        for other in active {
            if let Some(info) = self.layout.info_mut(&other) {
                info.is_active = false;
            }
        }

        self.layout.require_mut(id)?.is_active = true;
        self.active_stack.push(id.clone());
        Ok(!already)
    }

    /// Apply plugin-declared defaults. Ignored for windows whose info was
    /// restored from saved state, so user choices win.
    pub fn set_default_state(
        &mut self,
        id: &ToolWindowId,
        anchor: Option<Anchor>,
        window_type: Option<ToolWindowType>,
        floating_bounds: Option<Rect>,
    ) -> Result<bool, ToolwinError> {
        let info = self.registered_info(id)?;
        if info.is_from_persistent_settings {
            debug!(id = %id, "default state ignored, layout was restored");
            return Ok(false);
        }
        if let Some(bounds) = floating_bounds {
            self.layout.require_mut(id)?.floating_bounds = Some(bounds);
        }
        if let Some(anchor) = anchor.filter(|a| *a != info.anchor) {
            self.set_tool_window_anchor(id, anchor, -1)?;
        }
        if let Some(window_type) = window_type {
            self.set_tool_window_type(id, window_type)?;
        }
        Ok(true)
    }

    /// Hide without touching the stacks. Returns `false` if not visible.
    pub(super) fn hide_impl(&mut self, id: &ToolWindowId) -> bool {
        let Some(info) = self.layout.info_mut(id) else {
            return false;
        };
        if !info.is_visible {
            return false;
        }
        info.is_visible = false;
        info.is_active = false;
        let pane_id = info.pane_id.clone();

        if let Some(decorator) = self.entries.get_mut(id).and_then(|e| e.decorator.take()) {
            self.release_decorator(id, decorator);
        }
        let restore = match self.pane_mut(&pane_id) {
            Ok(pane) if pane.state.is_maximized(id) => pane.state.take_maximized(),
            _ => None,
        };
        if let Some((_, weight)) = restore {
            let _ = self.layout.set_weight(id, weight);
        }
        self.update_docked_bounds(&pane_id);

        debug!(id = %id, "tool window hidden");
        self.publish(Event::ToolWindowHidden(id.clone()));
        true
    }

    /// Write external bounds back into the info, then dispose.
    pub(super) fn release_decorator(&mut self, id: &ToolWindowId, mut decorator: ToolWindowDecorator) {
        let window_type = decorator.tool_window_type();
        if let Some((bounds, maximized)) = decorator.bounds_to_persist() {
            if let Some(info) = self.layout.info_mut(id) {
                info.floating_bounds = Some(bounds);
                if window_type == ToolWindowType::Windowed {
                    info.is_maximized = maximized;
                }
            }
        }
        decorator.dispose();
    }

    fn restore_from_side_stack(&mut self, hidden: &WindowInfo) -> Result<(), ToolwinError> {
        while let Some(stored) = self.side_stack.pop_matching(hidden.anchor, |i| {
            i.is_split == hidden.is_split && i.pane_id == hidden.pane_id
        }) {
            if !self.entries.contains_key(&stored.id) {
                continue;
            }
            let Some(current) = self.layout.get_info(&stored.id) else {
                continue;
            };
            if current.is_visible
                || current.anchor != stored.anchor
                || current.is_split != stored.is_split
                || current.window_type != stored.window_type
            {
                continue;
            }
            debug!(id = %stored.id, "restoring tool window from side stack");
            self.show_tool_window(&stored.id)?;
            break;
        }
        Ok(())
    }

    fn activate_previous(&mut self) -> Result<(), ToolwinError> {
        while let Some(prev) = self.active_stack.pop() {
            let visible = self.entries.contains_key(&prev)
                && self.layout.get_info(&prev).is_some_and(|i| i.is_visible);
            if visible {
                self.activate_tool_window(&prev)?;
                break;
            }
        }
        Ok(())
    }
}
