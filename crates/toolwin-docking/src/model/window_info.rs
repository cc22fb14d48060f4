use serde::{Deserialize, Serialize};
use toolwin_common::{Anchor, PaneId, Rect, ToolWindowId, ToolWindowType};

/// Where a tool window lives and how it is presented.
///
/// `(pane_id, anchor, is_split, order)` fixes the slot of the window's
/// stripe button. `order == -1` means "append to the group"; the layout
/// renumbers groups to `0..n` after every mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowInfo {
    pub id: ToolWindowId,
    #[serde(default)]
    pub pane_id: PaneId,
    #[serde(default = "default_anchor")]
    pub anchor: Anchor,
    #[serde(default)]
    pub is_split: bool,
    #[serde(default = "append_order")]
    pub order: i32,
    #[serde(default, rename = "type")]
    pub window_type: ToolWindowType,
    /// Individual weight in (0, 1]. `None` follows the unified weight of
    /// the anchor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    /// Share of the anchor region taken while the other half of the anchor
    /// is shown too. `None` splits at the configured default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub side_weight: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub floating_bounds: Option<Rect>,
    #[serde(default)]
    pub is_maximized: bool,
    #[serde(default)]
    pub is_visible: bool,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default = "default_true")]
    pub show_stripe_button: bool,
    /// Set when the info was read from a saved layout rather than created
    /// at registration. Default-state requests leave such windows alone.
    #[serde(skip)]
    pub is_from_persistent_settings: bool,
}

fn default_anchor() -> Anchor {
    Anchor::Left
}

fn append_order() -> i32 {
    -1
}

fn default_true() -> bool {
    true
}

impl WindowInfo {
    pub fn new(id: ToolWindowId, anchor: Anchor) -> Self {
        Self {
            id,
            pane_id: PaneId::main(),
            anchor,
            is_split: false,
            order: -1,
            window_type: ToolWindowType::Docked,
            weight: None,
            side_weight: None,
            floating_bounds: None,
            is_maximized: false,
            is_visible: false,
            is_active: false,
            show_stripe_button: true,
            is_from_persistent_settings: false,
        }
    }

    pub fn is_docked(&self) -> bool {
        self.window_type == ToolWindowType::Docked
    }

    /// Whether `other` occupies the same visible slot: showing one docked
    /// or sliding window hides the other.
    pub fn shares_slot_with(&self, other: &WindowInfo) -> bool {
        self.pane_id == other.pane_id
            && self.anchor == other.anchor
            && self.is_split == other.is_split
            && self.window_type == other.window_type
    }

    pub(crate) fn group_key(&self) -> (&PaneId, Anchor, bool) {
        (&self.pane_id, self.anchor, self.is_split)
    }
}

/// Registration request for a tool window.
#[derive(Debug, Clone)]
pub struct RegisterToolWindowTask {
    pub id: ToolWindowId,
    pub anchor: Anchor,
    /// Secondary windows start in the split half of their anchor.
    pub side_tool: bool,
    pub show_stripe_button: bool,
}

impl RegisterToolWindowTask {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: ToolWindowId::new(id),
            anchor: Anchor::Left,
            side_tool: false,
            show_stripe_button: true,
        }
    }

    pub fn anchor(mut self, anchor: Anchor) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn side_tool(mut self, side_tool: bool) -> Self {
        self.side_tool = side_tool;
        self
    }

    pub fn show_stripe_button(mut self, show: bool) -> Self {
        self.show_stripe_button = show;
        self
    }
}
