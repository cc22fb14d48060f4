//! Persistent per-tool-window state and the layout that owns it.

mod desktop_layout;
mod weights;
mod window_info;


pub use desktop_layout::DesktopLayout;
pub(crate) use desktop_layout::clamp_side_weight;
pub use weights::UnifiedToolWindowWeights;
pub use window_info::{RegisterToolWindowTask, WindowInfo};
