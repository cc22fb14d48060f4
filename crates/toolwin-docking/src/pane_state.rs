//! Transient per-pane state. Not persisted; rebuilt from the layout when a
//! pane is created.

use std::collections::HashMap;

use toolwin_common::{Property, ToolWindowId};

use crate::model::clamp_side_weight;

pub struct ToolWindowPaneState {
    split_proportions: HashMap<ToolWindowId, f64>,
    default_split_proportion: f64,
    /// The maximized window and the weight to restore.
    maximized: Option<(ToolWindowId, f64)>,
    stripes_overlaid: Property<bool>,
}

impl ToolWindowPaneState {
    pub fn new(default_split_proportion: f64) -> Self {
        Self {
            split_proportions: HashMap::new(),
            default_split_proportion,
            maximized: None,
            stripes_overlaid: Property::new(false),
        }
    }

    /// Last proportion of the splitter next to `id`.
    pub fn split_proportion(&self, id: &ToolWindowId) -> f64 {
        self.split_proportions
            .get(id)
            .copied()
            .unwrap_or(self.default_split_proportion)
    }

    pub fn set_split_proportion(&mut self, id: &ToolWindowId, proportion: f64) {
        self.split_proportions
            .insert(id.clone(), clamp_side_weight(proportion));
    }

    /// Replace the recorded proportions with the side weights of a layout.
    pub fn seed_split_proportions<'a>(
        &mut self,
        weights: impl IntoIterator<Item = (&'a ToolWindowId, f64)>,
    ) {
        self.split_proportions.clear();
        for (id, proportion) in weights {
            self.set_split_proportion(id, proportion);
        }
    }

    /// Forget everything recorded for `id`. Returns the restore weight if
    /// `id` was the maximized window.
    pub fn forget(&mut self, id: &ToolWindowId) -> Option<f64> {
        self.split_proportions.remove(id);
        match &self.maximized {
            Some((max_id, _)) if max_id == id => self.maximized.take().map(|(_, w)| w),
            _ => None,
        }
    }

    pub fn maximized(&self) -> Option<&ToolWindowId> {
        self.maximized.as_ref().map(|(id, _)| id)
    }

    pub fn is_maximized(&self, id: &ToolWindowId) -> bool {
        self.maximized() == Some(id)
    }

    /// Weight `id` returns to when un-maximized.
    pub fn restore_weight(&self, id: &ToolWindowId) -> Option<f64> {
        match &self.maximized {
            Some((max_id, weight)) if max_id == id => Some(*weight),
            _ => None,
        }
    }

    /// Record `id` as maximized. Returns the previously maximized window
    /// and its restore weight.
    pub fn set_maximized(
        &mut self,
        id: ToolWindowId,
        restore_weight: f64,
    ) -> Option<(ToolWindowId, f64)> {
        self.maximized.replace((id, restore_weight))
    }

    pub fn take_maximized(&mut self) -> Option<(ToolWindowId, f64)> {
        self.maximized.take()
    }

    pub fn is_stripes_overlaid(&self) -> bool {
        self.stripes_overlaid.value()
    }

    /// Returns `true` if the flag changed.
    pub fn set_stripes_overlaid(&mut self, overlaid: bool) -> bool {
        self.stripes_overlaid.set(overlaid)
    }

    pub fn on_overlay_change(&mut self, listener: impl FnMut(&bool, &bool) + 'static) {
        self.stripes_overlaid.on_change(listener);
    }
}
