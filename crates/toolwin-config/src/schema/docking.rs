//! Docking behavior configuration.

use serde::{Deserialize, Serialize};

/// Weight a tool window gets when nothing was persisted for it.
pub const DEFAULT_WEIGHT: f64 = 0.33;

/// Split proportion used when a pane has none recorded.
pub const DEFAULT_SIDE_WEIGHT: f64 = 0.5;

/// Tool-window docking settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DockingConfig {
    /// Weight of a newly registered tool window (valid range: (0, 1]).
    pub default_weight: f64,
    /// Split proportion between the two windows sharing an anchor (valid range: (0, 1)).
    pub default_side_weight: f64,
    /// Lower clamp for weights changed by stretching (valid range: (0, 0.5]).
    pub min_weight: f64,
    /// Re-show the window a same-side window replaced when the replacement hides.
    pub side_stack_enabled: bool,
    /// Size of a floating or windowed tool window without persisted bounds.
    pub default_floating_width: f64,
    pub default_floating_height: f64,
    /// Deadline for background resource fetches in milliseconds (valid range: 50-10000).
    pub resource_fetch_timeout_ms: u64,
}

impl Default for DockingConfig {
    fn default() -> Self {
        Self {
            default_weight: DEFAULT_WEIGHT,
            default_side_weight: DEFAULT_SIDE_WEIGHT,
            min_weight: 0.05,
            side_stack_enabled: true,
            default_floating_width: 400.0,
            default_floating_height: 300.0,
            resource_fetch_timeout_ms: 500,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
