//! Drag-and-drop of stripe buttons.

use toolwin_common::{LayoutError, Point, ToolWindowId, ToolwinError};
use tracing::debug;

use super::types::{DragSession, ToolWindowManager};
use crate::stripe::{DragData, DropTarget};

impl ToolWindowManager {
    /// Begin dragging the stripe button of `id`. Every stripe of its pane
    /// becomes visible until the drag ends. Returns `false` if a drag is
    /// already running.
    pub fn start_drag(&mut self, id: &ToolWindowId) -> Result<bool, ToolwinError> {
        let info = self.registered_info(id)?;
        if self.drag.is_some() {
            return Ok(false);
        }
        let pane = self.pane_mut(&info.pane_id)?;
        pane.buttons.start_drag(&mut pane.state);
        pane.relayout();

        debug!(id = %id, "drag started");
        self.drag = Some(DragSession {
            id: id.clone(),
            pane: info.pane_id,
        });
        Ok(true)
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Move the pointer to `point` (pane coordinates). Returns the drop
    /// preview of the stripe under the pointer.
    pub fn drag_to(&mut self, point: Point) -> Result<Option<DropTarget>, ToolwinError> {
        let Some(session) = self.drag.as_ref() else {
            return Err(LayoutError::NoDragInProgress.into());
        };
        let data = DragData {
            id: session.id.clone(),
            point,
        };
        let pane_id = session.pane.clone();
        let pane = self.pane_mut(&pane_id)?;
        Ok(pane.buttons.drag_over(&data))
    }

    /// Finish the drag. A pending drop target is committed through
    /// [`set_side_tool_and_anchor`](Self::set_side_tool_and_anchor).
    /// Returns whether the layout changed; `false` when the drop landed
    /// nowhere or on the window's own position.
    pub fn stop_drag(&mut self) -> Result<bool, ToolwinError> {
        let session = self.drag.take().ok_or(LayoutError::NoDragInProgress)?;
        let pane = self.pane_mut(&session.pane)?;
        let target = pane.buttons.stop_drag(&mut pane.state)?;
        pane.relayout();

        let Some(target) = target else {
            debug!(id = %session.id, "drag ended without drop");
            return Ok(false);
        };
        debug!(id = %session.id, anchor = %target.anchor, order = target.order, "drop");
        if !self.entries.contains_key(&session.id) {
            return Ok(false);
        }
        self.set_side_tool_and_anchor(
            &session.id,
            session.pane,
            target.anchor,
            target.order,
            target.is_split,
        )
    }

    /// Abort the drag without dropping.
    pub fn cancel_drag(&mut self) {
        let Some(session) = self.drag.take() else {
            return;
        };
        if let Ok(pane) = self.pane_mut(&session.pane) {
            if let Err(e) = pane.buttons.stop_drag(&mut pane.state) {
                debug!(id = %session.id, error = %e, "stripes had no drag to end");
            }
            pane.relayout();
        }
        debug!(id = %session.id, "drag cancelled");
    }
}
