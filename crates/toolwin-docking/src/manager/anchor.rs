//! Moving tool windows between stripes and changing how they are shown.

use toolwin_common::{Anchor, Event, PaneId, ToolWindowId, ToolWindowType, ToolwinError};
use tracing::{debug, info, warn};

use super::types::ToolWindowManager;
use crate::button_manager::ButtonProperty;
use crate::model::{DesktopLayout, WindowInfo};

impl ToolWindowManager {
    /// Move a window to `order` on `anchor`, keeping its pane and split
    /// half. `-1` appends. Returns whether the window moved.
    pub fn set_tool_window_anchor(
        &mut self,
        id: &ToolWindowId,
        anchor: Anchor,
        order: i32,
    ) -> Result<bool, ToolwinError> {
        let info = self.registered_info(id)?;
        self.set_side_tool_and_anchor(id, info.pane_id, anchor, order, info.is_split)
    }

    /// Move a window to the other half of its anchor, appended.
    pub fn set_side_tool(&mut self, id: &ToolWindowId, split: bool) -> Result<bool, ToolwinError> {
        let info = self.registered_info(id)?;
        if info.is_split == split {
            return Ok(false);
        }
        self.set_side_tool_and_anchor(id, info.pane_id, info.anchor, -1, split)
    }

    /// Place a window in the (pane, anchor, split) group at `order`.
    ///
    /// Other windows of the target group at or after `order` move down by
    /// one; both the source and the target groups end up numbered `0..n`.
    /// A visible docked or sliding window is re-shown in its new slot.
    /// Returns `false` when the window already sits at that position.
    pub fn set_side_tool_and_anchor(
        &mut self,
        id: &ToolWindowId,
        pane: PaneId,
        anchor: Anchor,
        order: i32,
        split: bool,
    ) -> Result<bool, ToolwinError> {
        let old = self.registered_info(id)?;
        self.pane_mut(&pane)?;

        let relocated = old.pane_id != pane || old.anchor != anchor || old.is_split != split;
        if !relocated && self.rank_after_move(&old, order) == old.order {
            debug!(id = %id, order, "tool window already in place");
            return Ok(false);
        }

        let reshow = relocated && old.is_visible && old.window_type.is_internal();
        if reshow {
            self.hide_impl(id);
        }

        self.layout.place(id, pane.clone(), anchor, split, order)?;
        self.sync_buttons(&old.pane_id);
        if pane != old.pane_id {
            self.sync_buttons(&pane);
            self.seed_pane_state(&pane);
        }

        if reshow {
            self.show_tool_window(id)?;
            if old.is_active {
                self.layout.require_mut(id)?.is_active = true;
            }
        } else {
            self.update_docked_bounds(&old.pane_id);
        }
        if pane != old.pane_id {
            self.update_docked_bounds(&pane);
        }

        let new_order = self.layout.get_info(id).map_or(order, |i| i.order);
        info!(id = %id, anchor = %anchor, order = new_order, split, "tool window moved");
        self.publish(Event::LayoutChanged);
        self.publish(Event::StripesChanged(old.anchor));
        if anchor != old.anchor {
            self.publish(Event::StripesChanged(anchor));
        }
        Ok(true)
    }

    /// Rank `info` ends up with when placed at `order` in its own group:
    /// in front of the window currently holding `order`, or last for `-1`.
    fn rank_after_move(&self, info: &WindowInfo, order: i32) -> i32 {
        let others = self
            .layout
            .group(&info.pane_id, info.anchor, info.is_split)
            .into_iter()
            .filter(|o| o.id != info.id);
        let rank = if order < 0 {
            others.count()
        } else {
            others.filter(|o| o.order < order).count()
        };
        rank as i32
    }

    /// Swap the decorator of a window for one of `window_type`. Returns
    /// `false` if the type is unchanged.
    pub fn set_tool_window_type(
        &mut self,
        id: &ToolWindowId,
        window_type: ToolWindowType,
    ) -> Result<bool, ToolwinError> {
        let info = self.registered_info(id)?;
        if info.window_type == window_type {
            return Ok(false);
        }

        if info.is_visible {
            self.hide_impl(id);
        }
        self.layout.require_mut(id)?.window_type = window_type;
        if info.is_visible {
            self.show_tool_window(id)?;
            if info.is_active {
                self.layout.require_mut(id)?.is_active = true;
            }
        }

        info!(id = %id, from = ?info.window_type, to = ?window_type, "tool window type changed");
        self.publish(Event::LayoutChanged);
        Ok(true)
    }

    pub fn set_show_stripe_button(&mut self, id: &ToolWindowId, show: bool) -> Result<bool, ToolwinError> {
        let info = self.registered_info(id)?;
        if info.show_stripe_button == show {
            return Ok(false);
        }
        self.layout.require_mut(id)?.show_stripe_button = show;
        let info = self.registered_info(id)?;

        let pane = self.pane_mut(&info.pane_id)?;
        pane.buttons.on_stripe_button_updated(&info, ButtonProperty::Visibility);
        pane.refresh_stripes();
        pane.relayout();
        self.publish(Event::StripesChanged(info.anchor));
        Ok(true)
    }

    /// Replace the whole layout. Registered windows are re-docked and
    /// re-typed to match, windows hidden in `layout` are hidden, windows
    /// visible in `layout` are shown. Infos of unregistered windows are
    /// taken over as they are.
    pub fn set_layout(&mut self, layout: &DesktopLayout) -> Result<(), ToolwinError> {
        let old = std::mem::replace(&mut self.layout, layout.clone());
        let registered = self.registered_ids();

        let mut to_show = Vec::new();
        let mut to_hide = Vec::new();
        for id in &registered {
            let Some(current) = old.get_info(id) else {
                continue;
            };
            if self.layout.get_info(id).is_none() {
                self.layout.insert_info(current.clone());
                continue;
            }
            let Some(target) = self.layout.info_mut(id) else {
                continue;
            };
            let target_visible = target.is_visible;
            let moved = target.pane_id != current.pane_id
                || target.anchor != current.anchor
                || target.is_split != current.is_split
                || target.window_type != current.window_type;

            // Decorators still reflect the old layout.
            target.is_visible = current.is_visible;
            target.is_active = current.is_active;
            target.is_from_persistent_settings = current.is_from_persistent_settings;

            if current.is_visible && (!target_visible || moved) {
                to_hide.push(id.clone());
            }
            if target_visible && (!current.is_visible || moved) {
                to_show.push(id.clone());
            }
        }

        for id in &registered {
            let Some(info) = self.layout.get_info(id) else {
                continue;
            };
            if self.pane(&info.pane_id).is_none() {
                warn!(id = %id, pane = %info.pane_id, "pane of new layout is gone, docking to main pane");
                let (anchor, split) = (info.anchor, info.is_split);
                self.layout.place(id, PaneId::main(), anchor, split, -1)?;
            }
        }

        for id in &to_hide {
            self.active_stack.remove(id);
            self.hide_impl(id);
        }

        let pane_ids: Vec<PaneId> = self.panes.iter().map(|p| p.id().clone()).collect();
        for pane in &pane_ids {
            self.sync_buttons(pane);
        }
        for pane in &pane_ids {
            self.seed_pane_state(pane);
        }
        for id in &to_show {
            self.show_tool_window(id)?;
        }
        for pane in &pane_ids {
            self.update_docked_bounds(pane);
        }

        debug!(hidden = to_hide.len(), shown = to_show.len(), "layout applied");
        self.publish(Event::LayoutChanged);
        for anchor in Anchor::ALL {
            self.publish(Event::StripesChanged(anchor));
        }
        Ok(())
    }

    /// Swap the current layout with the one saved for later. Returns
    /// `false` if nothing was saved.
    pub fn restore_saved_layout(&mut self) -> Result<bool, ToolwinError> {
        let Some(saved) = self.layout_to_restore.take() else {
            return Ok(false);
        };
        let current = self.layout.clone();
        self.set_layout(&saved)?;
        self.layout_to_restore = Some(current);
        Ok(true)
    }
}
