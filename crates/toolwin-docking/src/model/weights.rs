use serde::{Deserialize, Serialize};
use toolwin_common::Anchor;
use toolwin_config::schema::DEFAULT_WEIGHT;

/// Per-anchor weight shared by every tool window without an individual
/// weight. A plain value: copies never alias the original.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UnifiedToolWindowWeights {
    pub top: f64,
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
}

impl UnifiedToolWindowWeights {
    pub fn with_default(weight: f64) -> Self {
        Self {
            top: weight,
            left: weight,
            bottom: weight,
            right: weight,
        }
    }

    pub fn get(&self, anchor: Anchor) -> f64 {
        match anchor {
            Anchor::Top => self.top,
            Anchor::Left => self.left,
            Anchor::Bottom => self.bottom,
            Anchor::Right => self.right,
        }
    }

    pub fn set(&mut self, anchor: Anchor, weight: f64) {
        let slot = match anchor {
            Anchor::Top => &mut self.top,
            Anchor::Left => &mut self.left,
            Anchor::Bottom => &mut self.bottom,
            Anchor::Right => &mut self.right,
        };
        *slot = weight;
    }
}

impl Default for UnifiedToolWindowWeights {
    fn default() -> Self {
        Self::with_default(DEFAULT_WEIGHT)
    }
}
