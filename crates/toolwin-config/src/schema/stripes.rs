//! Stripe geometry configuration.

use serde::{Deserialize, Serialize};

/// Sizes used when laying out the button stripes along the frame edges.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StripesConfig {
    /// Cross-axis size of a visible stripe in pixels (valid range: 16-80).
    pub thickness: f64,
    /// Main-axis size of one stripe button in pixels (valid range: 16-200).
    pub button_length: f64,
    /// Space between neighbouring buttons in pixels (valid range: 0-20).
    pub button_gap: f64,
    /// How far a zero-thickness stripe still accepts drops, in pixels (valid range: 0-80).
    pub collapsed_drop_width: f64,
}

impl Default for StripesConfig {
    fn default() -> Self {
        Self {
            thickness: 40.0,
            button_length: 40.0,
            button_gap: 4.0,
            collapsed_drop_width: 20.0,
        }
    }
}
