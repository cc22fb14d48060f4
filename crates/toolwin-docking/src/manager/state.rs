//! Workspace state: what is written at session end and read at start.

use std::path::Path;

use serde::{Deserialize, Serialize};
use toolwin_common::{Event, PaneId, ToolwinError};
use tracing::info;

use super::types::ToolWindowManager;
use crate::decorator::{Decorator, ToolWindowDecorator};
use crate::frame::{FrameBoundsStore, FrameInfo};
use crate::model::{DesktopLayout, UnifiedToolWindowWeights, WindowInfo};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkspaceState {
    pub frame: FrameInfo,
    pub unified_weights: UnifiedToolWindowWeights,
    pub layout: Vec<WindowInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout_to_restore: Option<Vec<WindowInfo>>,
}

impl ToolWindowManager {
    /// Snapshot for persistence. Open floating and windowed windows
    /// contribute their live bounds; a maximized docked window is saved
    /// with the weight it returns to.
    ///
    /// The frame record is the cached one; call
    /// [`frame_info`](Self::frame_info) first to refresh it.
    pub fn state(&self) -> WorkspaceState {
        let layout = self.layout.infos().map(|info| self.persisted_info(info)).collect();
        let mut frame = self.frame.info().clone();
        frame.set_bounds(frame.bounds);
        WorkspaceState {
            frame,
            unified_weights: *self.layout.unified_weights(),
            layout,
            layout_to_restore: self
                .layout_to_restore
                .as_ref()
                .map(|l| l.infos().cloned().collect()),
        }
    }

    /// Replace the layout and frame record with `state`. With windows
    /// already registered the new layout is applied through
    /// [`set_layout`](Self::set_layout).
    pub fn load_state(&mut self, state: WorkspaceState) -> Result<(), ToolwinError> {
        self.frame = FrameBoundsStore::from_info(state.frame);
        let weights = state.unified_weights;
        let layout = DesktopLayout::from_infos(state.layout, weights);
        if self.entries.is_empty() {
            self.layout = layout;
            let pane_ids: Vec<PaneId> = self.panes.iter().map(|p| p.id().clone()).collect();
            for pane in &pane_ids {
                self.seed_pane_state(pane);
            }
        } else {
            self.set_layout(&layout)?;
        }
        self.layout_to_restore = state
            .layout_to_restore
            .map(|infos| DesktopLayout::from_infos(infos, weights));

        info!(windows = self.layout.len(), "workspace state loaded");
        self.publish(Event::StateChanged);
        Ok(())
    }

    pub fn save_state_to(&self, path: &Path) -> Result<(), ToolwinError> {
        toolwin_config::save_state(&self.state(), path)?;
        Ok(())
    }

    /// Load state from `path`. A missing file leaves the manager as is and
    /// returns `false`.
    pub fn load_state_from(&mut self, path: &Path) -> Result<bool, ToolwinError> {
        match toolwin_config::load_state::<WorkspaceState>(path)? {
            Some(state) => {
                self.load_state(state)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn persisted_info(&self, info: &WindowInfo) -> WindowInfo {
        let mut info = info.clone();
        match self.entries.get(&info.id).and_then(|e| e.decorator.as_ref()) {
            Some(ToolWindowDecorator::Floating(d)) if !d.is_maximized() => {
                info.floating_bounds = d.bounds().or(info.floating_bounds);
            }
            Some(ToolWindowDecorator::Windowed(d)) => {
                info.is_maximized = d.is_maximized();
                if !info.is_maximized {
                    info.floating_bounds = d.bounds().or(info.floating_bounds);
                }
            }
            _ => {}
        }
        if let Some(weight) = self
            .pane(&info.pane_id)
            .and_then(|p| p.state.restore_weight(&info.id))
        {
            info.weight = Some(weight);
        }
        info
    }
}
