use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique key of a registered tool window ("Project", "Terminal", ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ToolWindowId(String);

impl ToolWindowId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ToolWindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ToolWindowId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Identifies a tool-window pane. Every project frame owns one pane;
/// detached frames may own more.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PaneId(String);

impl PaneId {
    pub const MAIN: &'static str = "main";

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn main() -> Self {
        Self::new(Self::MAIN)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for PaneId {
    fn default() -> Self {
        Self::main()
    }
}

impl fmt::Display for PaneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The frame edge a tool window docks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Anchor {
    Top,
    Left,
    Bottom,
    Right,
}

impl Anchor {
    pub const ALL: [Anchor; 4] = [Anchor::Top, Anchor::Left, Anchor::Bottom, Anchor::Right];

    /// Stripes along the top and bottom edges lay their buttons out left
    /// to right; the side stripes lay them out top to bottom.
    pub fn is_horizontal(self) -> bool {
        matches!(self, Anchor::Top | Anchor::Bottom)
    }

    pub fn index(self) -> usize {
        match self {
            Anchor::Top => 0,
            Anchor::Left => 1,
            Anchor::Bottom => 2,
            Anchor::Right => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Anchor::Top => "top",
            Anchor::Left => "left",
            Anchor::Bottom => "bottom",
            Anchor::Right => "right",
        }
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Anchor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "top" => Ok(Anchor::Top),
            "left" => Ok(Anchor::Left),
            "bottom" => Ok(Anchor::Bottom),
            "right" => Ok(Anchor::Right),
            other => Err(format!("unknown anchor: {other}")),
        }
    }
}

/// How a tool window is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolWindowType {
    #[default]
    Docked,
    Sliding,
    Floating,
    Windowed,
}

impl ToolWindowType {
    /// Docked and sliding windows live inside the frame's tool-window pane.
    pub fn is_internal(self) -> bool {
        matches!(self, ToolWindowType::Docked | ToolWindowType::Sliding)
    }
}

impl std::str::FromStr for ToolWindowType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "docked" => Ok(ToolWindowType::Docked),
            "sliding" => Ok(ToolWindowType::Sliding),
            "floating" => Ok(ToolWindowType::Floating),
            "windowed" => Ok(ToolWindowType::Windowed),
            other => Err(format!("unknown tool window type: {other}")),
        }
    }
}

bitflags::bitflags! {
    /// Frame extended-state bitmask. Values match the persisted integers.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ExtendedState: i32 {
        const ICONIFIED = 1;
        const MAXIMIZED_HORIZ = 2;
        const MAXIMIZED_VERT = 4;
        const MAXIMIZED_BOTH = Self::MAXIMIZED_HORIZ.bits() | Self::MAXIMIZED_VERT.bits();
    }
}

impl ExtendedState {
    pub const NORMAL: ExtendedState = ExtendedState::empty();

    pub fn is_maximized(self) -> bool {
        self.intersects(ExtendedState::MAXIMIZED_BOTH)
    }

    pub fn is_iconified(self) -> bool {
        self.contains(ExtendedState::ICONIFIED)
    }
}
