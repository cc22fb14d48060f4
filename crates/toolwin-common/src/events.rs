use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::types::{Anchor, ToolWindowId};

/// Notifications published by the tool-window manager.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Event {
    ToolWindowRegistered(ToolWindowId),
    ToolWindowUnregistered(ToolWindowId),
    ToolWindowShown(ToolWindowId),
    ToolWindowHidden(ToolWindowId),
    /// Anchor, order, split or type of some window changed.
    LayoutChanged,
    /// Membership or visibility of the stripe on `Anchor` changed.
    StripesChanged(Anchor),
    StateChanged,
    #[serde(other)]
    Unknown,
}

pub struct EventBus {
    sender: broadcast::Sender<Event>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.sender.subscribe()
    }

    pub fn publish(&self, event: Event) -> usize {
        self.sender.send(event).unwrap_or(0)
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(64)
    }
}
