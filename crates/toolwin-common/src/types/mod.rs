mod core;
mod geometry;

pub use self::core::*;
pub use geometry::*;
