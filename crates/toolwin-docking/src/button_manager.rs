//! Owner of the four stripes of a pane and the overflow ("more") button.
//!
//! All stripe membership changes go through the `on_stripe_button_*`
//! methods. Like the rest of the docking core this type is confined to one
//! thread; there is no internal locking.

use toolwin_common::{Anchor, LayoutError, PaneId, Point, Rect, Size, ToolWindowId};
use toolwin_config::StripesConfig;
use tracing::{debug, trace};

use crate::model::WindowInfo;
use crate::pane_state::ToolWindowPaneState;
use crate::stripe::{DragData, DropTarget, Stripe, StripeButton};

/// Which aspect of a window's stripe button changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonProperty {
    Anchor,
    Split,
    Order,
    Visibility,
}

/// Button listing the stripe buttons that did not fit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MoreButton {
    pub visible: bool,
    pub hidden: Vec<ToolWindowId>,
    pub bounds: Rect,
}

/// Result of [`ToolWindowButtonManager::layout`].
#[derive(Debug, Clone, PartialEq)]
pub struct StripesLayout {
    /// Area left for docked tool windows and the editor.
    pub content: Rect,
    pub overflow: Vec<ToolWindowId>,
}

pub struct ToolWindowButtonManager {
    pane: Option<PaneId>,
    stripes: [Stripe; 4],
    more: MoreButton,
    thickness: f64,
    button_length: f64,
    button_gap: f64,
    show_buttons: bool,
    drag_snapshot: Option<[bool; 4]>,
    bottom_height: f64,
}

impl ToolWindowButtonManager {
    pub fn new(config: &StripesConfig) -> Self {
        Self {
            pane: None,
            stripes: Anchor::ALL.map(|anchor| Stripe::new(anchor, config)),
            more: MoreButton::default(),
            thickness: config.thickness,
            button_length: config.button_length,
            button_gap: config.button_gap,
            show_buttons: true,
            drag_snapshot: None,
            bottom_height: 0.0,
        }
    }

    /// Attach the stripes to `pane`. Returns `false` when already attached
    /// to it.
    pub fn add_to_tool_window_pane(&mut self, pane: &PaneId) -> bool {
        if self.pane.as_ref() == Some(pane) {
            return false;
        }
        debug!(pane = %pane, "stripes attached to tool window pane");
        self.pane = Some(pane.clone());
        true
    }

    pub fn pane(&self) -> Option<&PaneId> {
        self.pane.as_ref()
    }

    pub fn get_stripe_for(&self, anchor: Anchor) -> &Stripe {
        &self.stripes[anchor.index()]
    }

    fn stripe_mut(&mut self, anchor: Anchor) -> &mut Stripe {
        &mut self.stripes[anchor.index()]
    }

    pub fn stripes(&self) -> impl Iterator<Item = &Stripe> {
        self.stripes.iter()
    }

    pub fn more_button(&self) -> &MoreButton {
        &self.more
    }

    /// Space reserved at the bottom edge: the bottom stripe, or a strip for
    /// the overflow button when something overflowed.
    pub fn bottom_height(&self) -> f64 {
        self.bottom_height
    }

    pub fn show_buttons(&self) -> bool {
        self.show_buttons
    }

    /// Stripe currently holding the button of `id`.
    pub fn stripe_of(&self, id: &ToolWindowId) -> Option<Anchor> {
        self.stripes
            .iter()
            .find(|s| s.get_button_for(id).is_some())
            .map(Stripe::anchor)
    }

    pub fn get_button_for(&self, id: &ToolWindowId) -> Option<&StripeButton> {
        self.stripes.iter().find_map(|s| s.get_button_for(id))
    }

    /// Place the stripes inside a pane of `size` and lay out their buttons.
    /// Stripes that are hidden collapse to zero thickness.
    pub fn layout(&mut self, size: Size) -> StripesLayout {
        let t = |stripe: &Stripe| {
            if stripe.is_visible() {
                self.thickness
            } else {
                0.0
            }
        };
        let top = t(self.get_stripe_for(Anchor::Top));
        let left = t(self.get_stripe_for(Anchor::Left));
        let bottom = t(self.get_stripe_for(Anchor::Bottom));
        let right = t(self.get_stripe_for(Anchor::Right));

        // First pass decides overflow with the plain stripe sizes.
        let side_height = (size.height - top - bottom).max(0.0);
        let mut overflow = Vec::new();
        for (anchor, length) in [
            (Anchor::Top, size.width),
            (Anchor::Bottom, size.width),
            (Anchor::Left, side_height),
            (Anchor::Right, side_height),
        ] {
            overflow.extend(self.overflowing(anchor, length));
        }

        self.bottom_height = if overflow.is_empty() {
            bottom
        } else {
            bottom.max(self.thickness)
        };
        let side_height = (size.height - top - self.bottom_height).max(0.0);

        self.stripe_mut(Anchor::Top)
            .set_bounds(Rect::new(0.0, 0.0, size.width, top));
        self.stripe_mut(Anchor::Bottom).set_bounds(Rect::new(
            0.0,
            size.height - bottom,
            size.width,
            bottom,
        ));
        self.stripe_mut(Anchor::Left)
            .set_bounds(Rect::new(0.0, top, left, side_height));
        self.stripe_mut(Anchor::Right).set_bounds(Rect::new(
            size.width - right,
            top,
            right,
            side_height,
        ));

        self.more = MoreButton {
            visible: !overflow.is_empty(),
            bounds: if overflow.is_empty() {
                Rect::ZERO
            } else {
                Rect::new(
                    size.width - self.thickness,
                    size.height - self.bottom_height,
                    self.thickness,
                    self.bottom_height,
                )
            },
            hidden: overflow.clone(),
        };
        if !overflow.is_empty() {
            debug!(count = overflow.len(), "stripe buttons overflowed");
        }

        StripesLayout {
            content: Rect::new(
                left,
                top,
                (size.width - left - right).max(0.0),
                side_height,
            ),
            overflow,
        }
    }

    fn overflowing(&self, anchor: Anchor, length: f64) -> Vec<ToolWindowId> {
        let pitch = self.button_length + self.button_gap;
        let capacity = ((length + self.button_gap) / pitch).floor().max(0.0) as usize;
        self.get_stripe_for(anchor)
            .buttons()
            .iter()
            .filter(|b| b.visible)
            .skip(capacity)
            .map(|b| b.id.clone())
            .collect()
    }

    /// Show or hide every stripe in one batch. Returns whether any stripe
    /// changed visibility. While stripes are overlaid (during a drag) all
    /// stripes stay visible.
    pub fn update_tool_stripes_visibility(
        &mut self,
        show_buttons: bool,
        state: &ToolWindowPaneState,
    ) -> bool {
        self.show_buttons = show_buttons;
        let overlaid = state.is_stripes_overlaid();
        let mut changed = false;
        for stripe in &mut self.stripes {
            let visible = overlaid || (show_buttons && stripe.visible_button_count() > 0);
            changed |= stripe.set_visible(visible);
        }
        changed
    }

    /// Hit-test the accept regions of all stripes. When several overlap,
    /// `preferred` wins if it is among them.
    pub fn get_stripe_for_point(&self, point: Point, preferred: Option<Anchor>) -> Option<&Stripe> {
        if let Some(anchor) = preferred {
            let stripe = self.get_stripe_for(anchor);
            if stripe.contains(point) {
                return Some(stripe);
            }
        }
        self.stripes.iter().find(|s| s.contains(point))
    }

    pub fn is_dragging(&self) -> bool {
        self.drag_snapshot.is_some()
    }

    /// Begin a drag session: remember stripe visibility, overlay and show
    /// all stripes. A second call while dragging is ignored.
    pub fn start_drag(&mut self, state: &mut ToolWindowPaneState) {
        if self.drag_snapshot.is_some() {
            return;
        }
        self.drag_snapshot = Some(Anchor::ALL.map(|a| self.get_stripe_for(a).is_visible()));
        state.set_stripes_overlaid(true);
        for stripe in &mut self.stripes {
            stripe.set_visible(true);
        }
    }

    /// Route a pointer position to the stripe under it; the other stripes
    /// drop their previews. The stripe with the current preview wins ties.
    pub fn drag_over(&mut self, data: &DragData) -> Option<DropTarget> {
        let preferred = self
            .stripes
            .iter()
            .find(|s| s.drop_target().is_some())
            .map(Stripe::anchor);
        let hit = self
            .get_stripe_for_point(data.point, preferred)
            .map(Stripe::anchor);
        trace!(x = data.point.x, y = data.point.y, stripe = ?hit, "drag over");

        let mut target = None;
        for stripe in &mut self.stripes {
            if Some(stripe.anchor()) == hit {
                target = stripe.try_dropping_on_gap(data);
            } else {
                stripe.clear_drop_target();
            }
        }
        target
    }

    /// End the drag session, restoring the visibility recorded by
    /// [`start_drag`](Self::start_drag) exactly. Returns the pending drop
    /// target, if any.
    pub fn stop_drag(
        &mut self,
        state: &mut ToolWindowPaneState,
    ) -> Result<Option<DropTarget>, LayoutError> {
        let snapshot = self.drag_snapshot.take().ok_or(LayoutError::NoDragInProgress)?;
        let mut target = None;
        for stripe in &mut self.stripes {
            if let Some(t) = stripe.take_drop_target() {
                target = Some(t);
            }
        }
        state.set_stripes_overlaid(false);
        for (stripe, visible) in self.stripes.iter_mut().zip(snapshot) {
            stripe.set_visible(visible);
        }
        Ok(target)
    }

    pub fn on_stripe_button_added(&mut self, info: &WindowInfo) {
        for stripe in &mut self.stripes {
            stripe.remove_button(&info.id);
        }
        self.stripe_mut(info.anchor).add_button(info);
        debug!(id = %info.id, anchor = %info.anchor, "stripe button added");
    }

    /// Returns the anchor the button was removed from.
    pub fn on_stripe_button_removed(&mut self, id: &ToolWindowId) -> Option<Anchor> {
        let anchor = self.stripe_of(id)?;
        self.stripe_mut(anchor).remove_button(id);
        debug!(id = %id, anchor = %anchor, "stripe button removed");
        Some(anchor)
    }

    /// Bring the button of `info` in line with the changed `property`.
    /// Returns `false` when the window has no button or nothing changed.
    pub fn on_stripe_button_updated(&mut self, info: &WindowInfo, property: ButtonProperty) -> bool {
        let Some(current) = self.stripe_of(&info.id) else {
            return false;
        };
        if current != info.anchor {
            let icon = self
                .get_button_for(&info.id)
                .and_then(|b| b.icon.clone());
            self.stripe_mut(current).remove_button(&info.id);
            let stripe = self.stripe_mut(info.anchor);
            stripe.add_button(info);
            if let Some(button) = stripe.button_mut(&info.id) {
                button.icon = icon;
            }
            return true;
        }

        let stripe = self.stripe_mut(current);
        let Some(button) = stripe.button_mut(&info.id) else {
            return false;
        };
        let changed = match property {
            ButtonProperty::Anchor | ButtonProperty::Split | ButtonProperty::Order => {
                let changed = button.is_split != info.is_split || button.order != info.order;
                button.is_split = info.is_split;
                button.order = info.order;
                changed
            }
            ButtonProperty::Visibility => {
                let changed = button.visible != info.show_stripe_button;
                button.visible = info.show_stripe_button;
                changed
            }
        };
        if changed {
            stripe.sort_buttons();
            stripe.layout_buttons();
        }
        changed
    }

    pub fn set_icon(&mut self, id: &ToolWindowId, icon: Option<Vec<u8>>) -> bool {
        self.stripes
            .iter_mut()
            .find_map(|s| s.button_mut(id))
            .map(|b| b.icon = icon)
            .is_some()
    }
}
