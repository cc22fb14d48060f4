pub mod button_manager;
pub mod commands;
pub mod decorator;
pub mod frame;
pub mod manager;
pub mod model;
pub mod pane;
pub mod pane_state;
pub mod platform;
pub mod stripe;

pub use button_manager::ToolWindowButtonManager;
pub use commands::DockCommand;
pub use decorator::ToolWindowDecorator;
pub use frame::{FrameBoundsStore, FrameInfo};
pub use manager::{Services, ToolWindowManager, WorkspaceState};
pub use model::{DesktopLayout, RegisterToolWindowTask, UnifiedToolWindowWeights, WindowInfo};
pub use pane::ToolWindowPane;
pub use pane_state::ToolWindowPaneState;
pub use stripe::Stripe;
