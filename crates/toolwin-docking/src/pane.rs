//! A tool-window pane: the stripes of one frame plus its transient state.

use toolwin_common::{Anchor, PaneId, Rect, Size};
use toolwin_config::{DockingConfig, StripesConfig};

use crate::button_manager::{StripesLayout, ToolWindowButtonManager};
use crate::model::WindowInfo;
use crate::pane_state::ToolWindowPaneState;

pub struct ToolWindowPane {
    id: PaneId,
    size: Size,
    content: Rect,
    pub(crate) buttons: ToolWindowButtonManager,
    pub(crate) state: ToolWindowPaneState,
}

impl ToolWindowPane {
    pub fn new(id: PaneId, stripes: &StripesConfig, docking: &DockingConfig) -> Self {
        let mut buttons = ToolWindowButtonManager::new(stripes);
        buttons.add_to_tool_window_pane(&id);
        Self {
            id,
            size: Size::default(),
            content: Rect::ZERO,
            buttons,
            state: ToolWindowPaneState::new(docking.default_side_weight),
        }
    }

    pub fn id(&self) -> &PaneId {
        &self.id
    }

    pub fn size(&self) -> Size {
        self.size
    }

    /// Area between the stripes.
    pub fn content_area(&self) -> Rect {
        self.content
    }

    pub fn buttons(&self) -> &ToolWindowButtonManager {
        &self.buttons
    }

    pub fn state(&self) -> &ToolWindowPaneState {
        &self.state
    }

    pub fn set_size(&mut self, size: Size) -> StripesLayout {
        self.size = size;
        self.relayout()
    }

    pub fn relayout(&mut self) -> StripesLayout {
        let layout = self.buttons.layout(self.size);
        self.content = layout.content;
        layout
    }

    /// Re-evaluate stripe visibility after membership changed. Relayouts
    /// when any stripe appeared or disappeared.
    pub fn refresh_stripes(&mut self) -> bool {
        let show = self.buttons.show_buttons();
        self.set_stripes_shown(show)
    }

    pub fn set_stripes_shown(&mut self, show: bool) -> bool {
        let changed = self.buttons.update_tool_stripes_visibility(show, &self.state);
        if changed {
            self.relayout();
        }
        changed
    }

    /// Extent of the content area along the axis a window on `anchor`
    /// is sized in.
    pub fn extent_for(&self, anchor: Anchor) -> f64 {
        if anchor.is_horizontal() {
            self.content.height
        } else {
            self.content.width
        }
    }

    /// Region of a docked window with `weight` on its anchor. When both
    /// halves of the anchor are shown, each window takes its recorded side
    /// weight of the region: the non-split one from the start, the split
    /// one from the end.
    pub fn docked_bounds(&self, info: &WindowInfo, weight: f64, shares_anchor: bool) -> Rect {
        let c = self.content;
        let region = match info.anchor {
            Anchor::Left => Rect::new(c.x, c.y, c.width * weight, c.height),
            Anchor::Right => Rect::new(c.right() - c.width * weight, c.y, c.width * weight, c.height),
            Anchor::Top => Rect::new(c.x, c.y, c.width, c.height * weight),
            Anchor::Bottom => Rect::new(c.x, c.bottom() - c.height * weight, c.width, c.height * weight),
        };
        if !shares_anchor {
            return region;
        }

        let proportion = self.state.split_proportion(&info.id);
        if info.anchor.is_horizontal() {
            let own = region.width * proportion;
            if info.is_split {
                Rect::new(region.right() - own, region.y, own, region.height)
            } else {
                Rect::new(region.x, region.y, own, region.height)
            }
        } else {
            let own = region.height * proportion;
            if info.is_split {
                Rect::new(region.x, region.bottom() - own, region.width, own)
            } else {
                Rect::new(region.x, region.y, region.width, own)
            }
        }
    }
}
