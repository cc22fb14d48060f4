//! Core types and constructors for ToolWindowManager.

use std::collections::BTreeMap;
use std::sync::Arc;

use tokio::sync::{broadcast, mpsc};
use toolwin_common::{
    Event, EventBus, LayoutError, PaneId, Rect, Size, ToolWindowId, ToolwinError,
};
use toolwin_config::{DockingConfig, StripesConfig, ToolwinConfig};
use tracing::{debug, error};

use super::stacks::{ActiveStack, SideStack};
use crate::decorator::{DecoratorEventReceiver, DecoratorEventSender, ToolWindowDecorator};
use crate::frame::FrameBoundsStore;
use crate::model::{DesktopLayout, UnifiedToolWindowWeights, WindowInfo};
use crate::pane::ToolWindowPane;
use crate::platform::headless::{HeadlessFrameService, HeadlessWindowService, LoggingPopupService};
use crate::platform::{FrameService, PopupService, WindowService};

/// External collaborators of the manager.
#[derive(Clone)]
pub struct Services {
    pub frames: Arc<dyn FrameService>,
    pub windows: Arc<dyn WindowService>,
    pub popups: Arc<dyn PopupService>,
}

impl Services {
    /// In-memory services with a frame of the given bounds.
    pub fn headless(frame_bounds: Rect) -> Self {
        Self {
            frames: Arc::new(HeadlessFrameService::new(frame_bounds)),
            windows: Arc::new(HeadlessWindowService::default()),
            popups: Arc::new(LoggingPopupService::default()),
        }
    }
}

/// A registered tool window and its live decorator.
#[derive(Debug)]
pub struct ToolWindowEntry {
    pub(super) id: ToolWindowId,
    pub(super) decorator: Option<ToolWindowDecorator>,
}

impl ToolWindowEntry {
    pub fn id(&self) -> &ToolWindowId {
        &self.id
    }

    pub fn decorator(&self) -> Option<&ToolWindowDecorator> {
        self.decorator.as_ref()
    }
}

pub(super) struct DragSession {
    pub(super) id: ToolWindowId,
    pub(super) pane: PaneId,
}

/// Tracks every tool window of a project: where it is docked, how it is
/// presented, and which stripe shows its button.
///
/// All methods must be called from the UI thread.
pub struct ToolWindowManager {
    pub(super) layout: DesktopLayout,
    pub(super) layout_to_restore: Option<DesktopLayout>,
    pub(super) entries: BTreeMap<ToolWindowId, ToolWindowEntry>,
    pub(super) panes: Vec<ToolWindowPane>,
    pub(super) frame: FrameBoundsStore,
    pub(super) side_stack: SideStack,
    pub(super) active_stack: ActiveStack,
    pub(super) drag: Option<DragSession>,
    pub(super) config: DockingConfig,
    pub(super) stripes_config: StripesConfig,
    pub(super) services: Services,
    pub(super) events: EventBus,
    pub(super) decorator_tx: DecoratorEventSender,
    pub(super) decorator_rx: DecoratorEventReceiver,
}

impl ToolWindowManager {
    pub fn new(config: &ToolwinConfig, services: Services) -> Self {
        let (decorator_tx, decorator_rx) = mpsc::unbounded_channel();
        let main = ToolWindowPane::new(PaneId::main(), &config.stripes, &config.docking);
        Self {
            layout: DesktopLayout::new(UnifiedToolWindowWeights::with_default(
                config.docking.default_weight,
            )),
            layout_to_restore: None,
            entries: BTreeMap::new(),
            panes: vec![main],
            frame: FrameBoundsStore::new(),
            side_stack: SideStack::default(),
            active_stack: ActiveStack::default(),
            drag: None,
            config: config.docking.clone(),
            stripes_config: config.stripes.clone(),
            services,
            events: EventBus::default(),
            decorator_tx,
            decorator_rx,
        }
    }

    // -- Accessors --

    pub fn layout(&self) -> &DesktopLayout {
        &self.layout
    }

    pub fn get_info(&self, id: &ToolWindowId) -> Option<&WindowInfo> {
        self.layout.get_info(id)
    }

    pub fn is_registered(&self, id: &ToolWindowId) -> bool {
        self.entries.contains_key(id)
    }

    pub fn registered_ids(&self) -> Vec<ToolWindowId> {
        self.entries.keys().cloned().collect()
    }

    pub fn entry(&self, id: &ToolWindowId) -> Option<&ToolWindowEntry> {
        self.entries.get(id)
    }

    pub fn active_id(&self) -> Option<&ToolWindowId> {
        self.layout.infos().find(|i| i.is_active).map(|i| &i.id)
    }

    pub fn pane(&self, id: &PaneId) -> Option<&ToolWindowPane> {
        self.panes.iter().find(|p| p.id() == id)
    }

    pub fn main_pane(&self) -> &ToolWindowPane {
        &self.panes[0]
    }

    pub fn frame_store(&self) -> &FrameBoundsStore {
        &self.frame
    }

    pub fn config(&self) -> &DockingConfig {
        &self.config
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.events.subscribe()
    }

    pub fn layout_to_restore(&self) -> Option<&DesktopLayout> {
        self.layout_to_restore.as_ref()
    }

    pub fn set_layout_to_restore_later(&mut self, layout: Option<DesktopLayout>) {
        self.layout_to_restore = layout;
    }

    /// Add a pane for a detached frame. Returns `false` if it exists.
    pub fn add_pane(&mut self, id: PaneId) -> bool {
        if self.pane(&id).is_some() {
            return false;
        }
        debug!(pane = %id, "tool window pane added");
        self.panes
            .push(ToolWindowPane::new(id.clone(), &self.stripes_config, &self.config));
        self.seed_pane_state(&id);
        true
    }

    pub fn set_pane_size(&mut self, pane: &PaneId, size: Size) -> Result<(), ToolwinError> {
        self.pane_mut(pane)?.set_size(size);
        self.update_docked_bounds(pane);
        Ok(())
    }

    // -- Internal helpers --

    pub(super) fn pane_mut(&mut self, id: &PaneId) -> Result<&mut ToolWindowPane, LayoutError> {
        match self.panes.iter_mut().find(|p| p.id() == id) {
            Some(pane) => Ok(pane),
            None => {
                error!(pane = %id, "tool window pane does not exist");
                Err(LayoutError::UnknownPane(id.clone()))
            }
        }
    }

    /// The info of a registered window.
    pub(super) fn registered_info(&self, id: &ToolWindowId) -> Result<WindowInfo, LayoutError> {
        if !self.entries.contains_key(id) {
            error!(id = %id, "tool window is not registered");
            return Err(LayoutError::UnknownToolWindow(id.clone()));
        }
        self.layout.require(id).cloned()
    }

    pub(super) fn publish(&self, event: Event) {
        self.events.publish(event);
    }

    /// Where an external decorator opens when the window has no bounds.
    pub(super) fn default_floating_bounds(&self, pane: &PaneId) -> Rect {
        self.services.frames.frame_bounds(pane).centered(Size::new(
            self.config.default_floating_width,
            self.config.default_floating_height,
        ))
    }

    /// Bring the stripe buttons of `pane` in line with the layout: add
    /// missing buttons, move or reorder existing ones, drop buttons of
    /// windows that left the pane.
    pub(super) fn sync_buttons(&mut self, pane_id: &PaneId) {
        let infos: Vec<WindowInfo> = self
            .layout
            .infos()
            .filter(|i| &i.pane_id == pane_id && self.entries.contains_key(&i.id))
            .cloned()
            .collect();
        let Ok(pane) = self.pane_mut(pane_id) else {
            return;
        };

        let stale: Vec<ToolWindowId> = pane
            .buttons
            .stripes()
            .flat_map(|s| s.button_ids())
            .filter(|id| !infos.iter().any(|i| &i.id == id))
            .collect();
        for id in stale {
            pane.buttons.on_stripe_button_removed(&id);
        }

        for info in &infos {
            if pane.buttons.stripe_of(&info.id).is_none() {
                pane.buttons.on_stripe_button_added(info);
            } else {
                pane.buttons
                    .on_stripe_button_updated(info, crate::button_manager::ButtonProperty::Anchor);
                pane.buttons
                    .on_stripe_button_updated(info, crate::button_manager::ButtonProperty::Visibility);
            }
        }
        pane.refresh_stripes();
        pane.relayout();
    }

    /// Load the side weights recorded in the layout into the state of
    /// `pane_id`.
    pub(super) fn seed_pane_state(&mut self, pane_id: &PaneId) {
        let weights: Vec<(ToolWindowId, f64)> = self
            .layout
            .infos()
            .filter(|i| &i.pane_id == pane_id)
            .filter_map(|i| i.side_weight.map(|w| (i.id.clone(), w)))
            .collect();
        if let Ok(pane) = self.pane_mut(pane_id) {
            pane.state
                .seed_split_proportions(weights.iter().map(|(id, w)| (id, *w)));
        }
    }

    /// Recompute the regions of visible docked and sliding windows.
    pub(super) fn update_docked_bounds(&mut self, pane_id: &PaneId) {
        let Some(pane) = self.panes.iter().find(|p| p.id() == pane_id) else {
            return;
        };
        let visible: Vec<&WindowInfo> = self
            .layout
            .infos()
            .filter(|i| &i.pane_id == pane_id && i.is_visible && i.window_type.is_internal())
            .collect();

        let mut regions = Vec::new();
        for info in &visible {
            let shares = visible.iter().any(|o| {
                o.id != info.id && o.anchor == info.anchor && o.is_split != info.is_split
            });
            let weight = self.layout.effective_weight(&info.id).unwrap_or(self.config.default_weight);
            regions.push((info.id.clone(), pane.docked_bounds(info, weight, shares)));
        }

        for (id, bounds) in regions {
            if let Some(decorator) = self.entries.get_mut(&id).and_then(|e| e.decorator.as_mut()) {
                use crate::decorator::Decorator;
                decorator.set_bounds(bounds);
            }
        }
    }
}
