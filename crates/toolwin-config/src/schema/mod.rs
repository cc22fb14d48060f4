//! Configuration schema types for toolwin.
//!
//! All structs use `serde(default)` so partial configs work correctly.

mod docking;
mod logging;
mod stripes;

pub use docking::*;
pub use logging::*;
pub use stripes::*;

use serde::{Deserialize, Serialize};

/// Current config schema version.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Root configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ToolwinConfig {
    pub docking: DockingConfig,
    pub stripes: StripesConfig,
    pub logging: LoggingConfig,
}
