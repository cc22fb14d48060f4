//! Button stripes along the frame edges and their drop-zone geometry.
//!
//! One [`Stripe`] per anchor. Buttons of the non-split group are packed
//! from the start of the stripe, buttons of the split group from its end.
//! The main axis runs left to right for top/bottom stripes and top to
//! bottom for left/right stripes.

use toolwin_common::{Anchor, Point, Property, Rect, ToolWindowId};
use toolwin_config::StripesConfig;

use crate::model::WindowInfo;

#[derive(Debug, Clone, PartialEq)]
pub struct StripeButton {
    pub id: ToolWindowId,
    pub is_split: bool,
    pub order: i32,
    pub visible: bool,
    pub icon: Option<Vec<u8>>,
    /// Laid-out geometry in pane coordinates.
    pub bounds: Rect,
}

impl StripeButton {
    fn from_info(info: &WindowInfo) -> Self {
        Self {
            id: info.id.clone(),
            is_split: info.is_split,
            order: info.order,
            visible: info.show_stripe_button,
            icon: None,
            bounds: Rect::ZERO,
        }
    }
}

/// Payload of a drag gesture: the dragged window and the pointer in pane
/// coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct DragData {
    pub id: ToolWindowId,
    pub point: Point,
}

/// Where a drop would land.
#[derive(Debug, Clone, PartialEq)]
pub struct DropTarget {
    pub anchor: Anchor,
    pub is_split: bool,
    /// Rank among the group's other buttons.
    pub index: usize,
    /// Order to commit: the order of the button the drop lands in front
    /// of, or `-1` to append.
    pub order: i32,
    /// Slot highlighted while dragging.
    pub preview: Rect,
}

pub struct Stripe {
    anchor: Anchor,
    horizontal: bool,
    bounds: Rect,
    buttons: Vec<StripeButton>,
    visible: Property<bool>,
    drop_target: Option<DropTarget>,
    button_length: f64,
    button_gap: f64,
    collapsed_drop_width: f64,
}

impl Stripe {
    pub fn new(anchor: Anchor, config: &StripesConfig) -> Self {
        Self {
            anchor,
            horizontal: anchor.is_horizontal(),
            bounds: Rect::ZERO,
            buttons: Vec::new(),
            visible: Property::new(false),
            drop_target: None,
            button_length: config.button_length,
            button_gap: config.button_gap,
            collapsed_drop_width: config.collapsed_drop_width,
        }
    }

    pub fn anchor(&self) -> Anchor {
        self.anchor
    }

    pub fn is_horizontal(&self) -> bool {
        self.horizontal
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn buttons(&self) -> &[StripeButton] {
        &self.buttons
    }

    pub fn button_ids(&self) -> Vec<ToolWindowId> {
        self.buttons.iter().map(|b| b.id.clone()).collect()
    }

    pub fn visible_button_count(&self) -> usize {
        self.buttons.iter().filter(|b| b.visible).count()
    }

    pub fn get_button_for(&self, id: &ToolWindowId) -> Option<&StripeButton> {
        self.buttons.iter().find(|b| &b.id == id)
    }

    pub fn is_visible(&self) -> bool {
        self.visible.value()
    }

    /// Returns `true` if the visibility changed.
    pub fn set_visible(&mut self, visible: bool) -> bool {
        self.visible.set(visible)
    }

    pub fn on_visibility_change(&mut self, listener: impl FnMut(&bool, &bool) + 'static) {
        self.visible.on_change(listener);
    }

    pub fn drop_target(&self) -> Option<&DropTarget> {
        self.drop_target.as_ref()
    }

    pub(crate) fn take_drop_target(&mut self) -> Option<DropTarget> {
        self.drop_target.take()
    }

    pub(crate) fn clear_drop_target(&mut self) {
        self.drop_target = None;
    }

    pub(crate) fn add_button(&mut self, info: &WindowInfo) {
        self.buttons.retain(|b| b.id != info.id);
        self.buttons.push(StripeButton::from_info(info));
        self.sort_buttons();
        self.layout_buttons();
    }

    pub(crate) fn remove_button(&mut self, id: &ToolWindowId) -> bool {
        let before = self.buttons.len();
        self.buttons.retain(|b| &b.id != id);
        let removed = self.buttons.len() != before;
        if removed {
            self.layout_buttons();
        }
        removed
    }

    pub(crate) fn button_mut(&mut self, id: &ToolWindowId) -> Option<&mut StripeButton> {
        self.buttons.iter_mut().find(|b| &b.id == id)
    }

    pub(crate) fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
        self.layout_buttons();
    }

    pub(crate) fn sort_buttons(&mut self) {
        self.buttons
            .sort_by_key(|b| (b.is_split, b.order < 0, b.order));
    }

    /// Length of the stripe along its main axis.
    pub fn main_length(&self) -> f64 {
        if self.horizontal {
            self.bounds.width
        } else {
            self.bounds.height
        }
    }

    fn main_start(&self) -> f64 {
        if self.horizontal {
            self.bounds.x
        } else {
            self.bounds.y
        }
    }

    fn thickness(&self) -> f64 {
        if self.horizontal {
            self.bounds.height
        } else {
            self.bounds.width
        }
    }

    fn pitch(&self) -> f64 {
        self.button_length + self.button_gap
    }

    /// Rectangle of the `slot`-th button of a group with `count` buttons.
    fn slot_rect(&self, split: bool, slot: usize, count: usize) -> Rect {
        let offset = if split {
            let end = self.main_start() + self.main_length();
            end - (count - slot) as f64 * self.pitch() + self.button_gap
        } else {
            self.main_start() + slot as f64 * self.pitch()
        };
        let cross = self.thickness();
        if self.horizontal {
            Rect::new(offset, self.bounds.y, self.button_length, cross)
        } else {
            Rect::new(self.bounds.x, offset, cross, self.button_length)
        }
    }

    /// Main-axis coordinate dividing the non-split group from the split
    /// group: the middle of the free space between the end of the last
    /// non-split button and the start of the first split button, ignoring
    /// `dragged`. The stripe's midpoint when both groups are empty.
    fn split_boundary(&self, dragged: &ToolWindowId) -> f64 {
        let mut head_end = self.main_start();
        let mut tail_start = self.main_start() + self.main_length();
        for b in self.buttons.iter().filter(|b| b.visible && &b.id != dragged) {
            let (start, end) = self.span(&b.bounds);
            if b.is_split {
                tail_start = tail_start.min(start);
            } else {
                head_end = head_end.max(end);
            }
        }
        (head_end + tail_start) / 2.0
    }

    /// Start and end of `rect` along the main axis.
    fn span(&self, rect: &Rect) -> (f64, f64) {
        if self.horizontal {
            (rect.x, rect.right())
        } else {
            (rect.y, rect.bottom())
        }
    }

    pub(crate) fn layout_buttons(&mut self) {
        for split in [false, true] {
            let slots: Vec<usize> = self
                .buttons
                .iter()
                .enumerate()
                .filter(|(_, b)| b.is_split == split && b.visible)
                .map(|(i, _)| i)
                .collect();
            let count = slots.len();
            for (slot, index) in slots.into_iter().enumerate() {
                let rect = self.slot_rect(split, slot, count);
                self.buttons[index].bounds = rect;
            }
        }
        for button in self.buttons.iter_mut().filter(|b| !b.visible) {
            button.bounds = Rect::ZERO;
        }
    }

    /// Region accepting drops. A collapsed (zero-thickness) stripe still
    /// accepts drops within `collapsed_drop_width` of its edge, extended
    /// towards the pane interior.
    pub fn accept_region(&self) -> Rect {
        let b = self.bounds;
        if self.thickness() > 0.0 {
            return b;
        }
        let w = self.collapsed_drop_width;
        match self.anchor {
            Anchor::Left => Rect::new(b.x, b.y, w, b.height),
            Anchor::Right => Rect::new(b.x - w, b.y, w, b.height),
            Anchor::Top => Rect::new(b.x, b.y, b.width, w),
            Anchor::Bottom => Rect::new(b.x, b.y - w, b.width, w),
        }
    }

    pub fn contains(&self, point: Point) -> bool {
        self.accept_region().contains(point)
    }

    /// Resolve the drop position for `data` and remember it as this
    /// stripe's preview.
    ///
    /// The split group is chosen by which side of the free space between
    /// the two groups the pointer is on. The insertion index counts the group's other buttons whose midpoint
    /// lies before the pointer, so a pointer exactly on a midpoint inserts
    /// in front of that button. Returns `None` (and clears the preview)
    /// when the pointer is outside the accept region.
    pub fn try_dropping_on_gap(&mut self, data: &DragData) -> Option<DropTarget> {
        if !self.contains(data.point) {
            self.drop_target = None;
            return None;
        }

        let pointer = if self.horizontal {
            data.point.x
        } else {
            data.point.y
        };
        let split = pointer >= self.split_boundary(&data.id);

        let others: Vec<&StripeButton> = self
            .buttons
            .iter()
            .filter(|b| b.is_split == split && b.visible && b.id != data.id)
            .collect();

        let index = others
            .iter()
            .filter(|b| {
                let mid = if self.horizontal {
                    b.bounds.center().x
                } else {
                    b.bounds.center().y
                };
                mid < pointer
            })
            .count();
        let order = others.get(index).map_or(-1, |b| b.order);
        let preview = self.slot_rect(split, index, others.len() + 1);

        let target = DropTarget {
            anchor: self.anchor,
            is_split: split,
            index,
            order,
            preview,
        };
        self.drop_target = Some(target.clone());
        Some(target)
    }
}

impl std::fmt::Debug for Stripe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stripe")
            .field("anchor", &self.anchor)
            .field("bounds", &self.bounds)
            .field("buttons", &self.buttons)
            .field("visible", &self.visible.value())
            .field("drop_target", &self.drop_target)
            .finish()
    }
}
