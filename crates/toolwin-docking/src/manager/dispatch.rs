//! Command dispatch.

use toolwin_common::ToolwinError;
use tracing::debug;

use super::types::ToolWindowManager;
use crate::commands::DockCommand;

impl ToolWindowManager {
    /// Execute a docking command. Returns whether anything changed.
    pub fn execute(&mut self, cmd: DockCommand) -> Result<bool, ToolwinError> {
        debug!(?cmd, "executing dock command");
        match cmd {
            DockCommand::Show(id) => self.show_tool_window(&id),
            DockCommand::Hide { id, hide_side } => self.hide_tool_window(&id, hide_side),
            DockCommand::Activate(id) => self.activate_tool_window(&id),
            DockCommand::Move {
                id,
                anchor,
                order,
                split,
            } => {
                let info = self.registered_info(&id)?;
                let split = split.unwrap_or(info.is_split);
                self.set_side_tool_and_anchor(&id, info.pane_id, anchor, order, split)
            }
            DockCommand::SetType(id, window_type) => self.set_tool_window_type(&id, window_type),
            DockCommand::ToggleMaximized(id) => {
                let maximized = self.is_maximized(&id);
                self.set_maximized(&id, !maximized)
            }
            DockCommand::StretchWidth(id, px) => self.stretch_width(&id, px),
            DockCommand::StretchHeight(id, px) => self.stretch_height(&id, px),
            DockCommand::SetSideWeight(id, w) => self.set_side_weight(&id, w),
        }
    }
}
