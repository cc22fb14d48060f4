//! The ToolWindowManager owns the layout, the panes and the decorators of
//! one project frame.

mod anchor;
mod dispatch;
mod drag;
mod geometry;
mod lifecycle;
mod stacks;
mod state;
mod types;

pub use stacks::{ActiveStack, SideStack};
pub use state::WorkspaceState;
pub use types::{Services, ToolWindowEntry, ToolWindowManager};

#[cfg(test)]
mod tests;
