use std::collections::BTreeMap;

use toolwin_common::{Anchor, LayoutError, PaneId, ToolWindowId};
use tracing::error;

use super::{RegisterToolWindowTask, UnifiedToolWindowWeights, WindowInfo};

/// The set of all known `WindowInfo`s plus the unified weights.
///
/// Infos outlive registration: unregistering a tool window keeps its info
/// so the next session restores it where the user left it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DesktopLayout {
    infos: BTreeMap<ToolWindowId, WindowInfo>,
    unified_weights: UnifiedToolWindowWeights,
}

impl DesktopLayout {
    pub fn new(unified_weights: UnifiedToolWindowWeights) -> Self {
        Self {
            infos: BTreeMap::new(),
            unified_weights,
        }
    }

    /// Build a layout from persisted infos. Each (pane, anchor, split)
    /// group is renumbered, with `-1` entries moved to the end.
    pub fn from_infos(
        infos: impl IntoIterator<Item = WindowInfo>,
        unified_weights: UnifiedToolWindowWeights,
    ) -> Self {
        let mut layout = Self::new(unified_weights);
        for mut info in infos {
            info.is_from_persistent_settings = true;
            info.weight = info.weight.map(clamp_weight);
            info.side_weight = info.side_weight.map(clamp_side_weight);
            layout.infos.insert(info.id.clone(), info);
        }
        layout.normalize_all();
        layout
    }

    pub fn get_info(&self, id: &ToolWindowId) -> Option<&WindowInfo> {
        self.infos.get(id)
    }

    pub(crate) fn info_mut(&mut self, id: &ToolWindowId) -> Option<&mut WindowInfo> {
        self.infos.get_mut(id)
    }

    /// Like [`get_info`](Self::get_info) but treats a miss as a caller
    /// contract breach.
    pub fn require(&self, id: &ToolWindowId) -> Result<&WindowInfo, LayoutError> {
        self.infos.get(id).ok_or_else(|| {
            error!(id = %id, "no window info for tool window");
            LayoutError::UnknownToolWindow(id.clone())
        })
    }

    pub(crate) fn require_mut(&mut self, id: &ToolWindowId) -> Result<&mut WindowInfo, LayoutError> {
        match self.infos.get_mut(id) {
            Some(info) => Ok(info),
            None => {
                error!(id = %id, "no window info for tool window");
                Err(LayoutError::UnknownToolWindow(id.clone()))
            }
        }
    }

    /// Return the info for `task.id`, creating it at the end of its
    /// group when the layout has never seen this window. The flag is
    /// `true` when a new info was created.
    pub fn get_or_create(&mut self, task: &RegisterToolWindowTask) -> (&mut WindowInfo, bool) {
        let created = !self.infos.contains_key(&task.id);
        if created {
            let mut info = WindowInfo::new(task.id.clone(), task.anchor);
            info.is_split = task.side_tool;
            info.show_stripe_button = task.show_stripe_button;
            info.order = self.max_order(&info.pane_id, info.anchor, info.is_split) + 1;
            self.infos.insert(task.id.clone(), info);
        }

        let info = self
            .infos
            .entry(task.id.clone())
            .or_insert_with(|| WindowInfo::new(task.id.clone(), task.anchor));
        (info, created)
    }

    /// Add an info the layout does not know yet, appended to its group.
    pub(crate) fn insert_info(&mut self, mut info: WindowInfo) {
        if self.infos.contains_key(&info.id) {
            return;
        }
        info.order = self.max_order(&info.pane_id, info.anchor, info.is_split) + 1;
        self.infos.insert(info.id.clone(), info);
    }

    pub fn infos(&self) -> impl Iterator<Item = &WindowInfo> {
        self.infos.values()
    }

    pub fn len(&self) -> usize {
        self.infos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.infos.is_empty()
    }

    /// Infos of one stripe group, sorted by order.
    pub fn group(&self, pane: &PaneId, anchor: Anchor, split: bool) -> Vec<&WindowInfo> {
        let mut group: Vec<&WindowInfo> = self
            .infos
            .values()
            .filter(|i| i.group_key() == (pane, anchor, split))
            .collect();
        group.sort_by_key(|i| sort_key(i.order));
        group
    }

    /// Visible infos docked to `anchor` of `pane`, either split half.
    pub fn visible_on(&self, pane: &PaneId, anchor: Anchor) -> Vec<ToolWindowId> {
        self.infos
            .values()
            .filter(|i| i.is_visible && &i.pane_id == pane && i.anchor == anchor)
            .map(|i| i.id.clone())
            .collect()
    }

    /// Highest order in a group, `-1` when the group is empty.
    pub fn max_order(&self, pane: &PaneId, anchor: Anchor, split: bool) -> i32 {
        self.infos
            .values()
            .filter(|i| i.group_key() == (pane, anchor, split))
            .map(|i| i.order)
            .max()
            .unwrap_or(-1)
    }

    /// Move a window to `anchor` keeping its pane and split flag.
    pub fn set_anchor(&mut self, id: &ToolWindowId, anchor: Anchor, order: i32) -> Result<(), LayoutError> {
        let info = self.require(id)?;
        let (pane, split) = (info.pane_id.clone(), info.is_split);
        self.place(id, pane, anchor, split, order)
    }

    /// Move a window between the split and non-split halves of its
    /// anchor. The window is appended to the target group.
    pub fn set_split_mode(&mut self, id: &ToolWindowId, split: bool) -> Result<(), LayoutError> {
        let info = self.require(id)?;
        if info.is_split == split {
            return Ok(());
        }
        let (pane, anchor) = (info.pane_id.clone(), info.anchor);
        self.place(id, pane, anchor, split, -1)
    }

    /// Put a window at `order` in the (pane, anchor, split) group.
    ///
    /// Windows of the target group at or after `order` shift by one, then
    /// both the source and target groups are renumbered `0..n`. `-1`
    /// appends.
    pub fn place(
        &mut self,
        id: &ToolWindowId,
        pane: PaneId,
        anchor: Anchor,
        split: bool,
        order: i32,
    ) -> Result<(), LayoutError> {
        let old = {
            let info = self.require(id)?;
            (info.pane_id.clone(), info.anchor, info.is_split)
        };

        let order = if order < 0 {
            self.infos
                .values()
                .filter(|i| &i.id != id && i.group_key() == (&pane, anchor, split))
                .map(|i| i.order)
                .max()
                .unwrap_or(-1)
                + 1
        } else {
            order
        };

        for other in self.infos.values_mut() {
            if &other.id != id
                && other.group_key() == (&pane, anchor, split)
                && other.order >= order
            {
                other.order += 1;
            }
        }

        let info = self.require_mut(id)?;
        info.pane_id = pane.clone();
        info.anchor = anchor;
        info.is_split = split;
        info.order = order;

        self.normalize_group(&pane, anchor, split);
        if old != (pane.clone(), anchor, split) {
            self.normalize_group(&old.0, old.1, old.2);
        }
        Ok(())
    }

    pub fn unified_weights(&self) -> &UnifiedToolWindowWeights {
        &self.unified_weights
    }

    pub fn unified_weights_mut(&mut self) -> &mut UnifiedToolWindowWeights {
        &mut self.unified_weights
    }

    /// The weight a window is laid out with.
    pub fn effective_weight(&self, id: &ToolWindowId) -> Option<f64> {
        let info = self.infos.get(id)?;
        Some(
            info.weight
                .unwrap_or_else(|| self.unified_weights.get(info.anchor)),
        )
    }

    pub fn set_weight(&mut self, id: &ToolWindowId, weight: f64) -> Result<(), LayoutError> {
        self.require_mut(id)?.weight = Some(clamp_weight(weight));
        Ok(())
    }

    /// Record the side weight of `id`. Returns the clamped value stored.
    pub fn set_side_weight(&mut self, id: &ToolWindowId, side_weight: f64) -> Result<f64, LayoutError> {
        let side_weight = clamp_side_weight(side_weight);
        self.require_mut(id)?.side_weight = Some(side_weight);
        Ok(side_weight)
    }

    fn normalize_group(&mut self, pane: &PaneId, anchor: Anchor, split: bool) {
        let mut ids: Vec<(i32, ToolWindowId)> = self
            .infos
            .values()
            .filter(|i| i.group_key() == (pane, anchor, split))
            .map(|i| (i.order, i.id.clone()))
            .collect();
        ids.sort_by_key(|(order, id)| (sort_key(*order), id.clone()));
        for (rank, (_, id)) in ids.into_iter().enumerate() {
            if let Some(info) = self.infos.get_mut(&id) {
                info.order = rank as i32;
            }
        }
    }

    fn normalize_all(&mut self) {
        let mut groups: Vec<(PaneId, Anchor, bool)> = self
            .infos
            .values()
            .map(|i| (i.pane_id.clone(), i.anchor, i.is_split))
            .collect();
        groups.sort_by(|a, b| {
            (a.0.as_str(), a.1.index(), a.2).cmp(&(b.0.as_str(), b.1.index(), b.2))
        });
        groups.dedup();
        for (pane, anchor, split) in groups {
            self.normalize_group(&pane, anchor, split);
        }
    }
}

/// `-1` ("append") sorts after every concrete order.
fn sort_key(order: i32) -> (bool, i32) {
    (order < 0, order)
}

/// Side weights live in [0.05, 0.95] so neither half collapses.
pub(crate) fn clamp_side_weight(side_weight: f64) -> f64 {
    if side_weight.is_nan() {
        0.5
    } else {
        side_weight.clamp(0.05, 0.95)
    }
}

/// Weights live in (0, 1].
pub(crate) fn clamp_weight(weight: f64) -> f64 {
    if weight.is_nan() || weight <= 0.0 {
        f64::MIN_POSITIVE
    } else {
        weight.min(1.0)
    }
}
