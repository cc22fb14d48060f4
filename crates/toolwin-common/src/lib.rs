pub mod errors;
pub mod events;
pub mod property;
pub mod types;

pub use errors::{Cancelled, ConfigError, LayoutError, PlatformError, ToolwinError};
pub use events::{Event, EventBus};
pub use property::Property;
pub use types::{Anchor, ExtendedState, PaneId, Point, Rect, Size, ToolWindowId, ToolWindowType};

pub type Result<T> = std::result::Result<T, ToolwinError>;
