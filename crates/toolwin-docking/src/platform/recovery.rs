//! Recovery of a window's normal bounds from the OS.
//!
//! Toolkits report unreliable bounds for minimized or snapped windows; the
//! OS keeps the restored placement separately.

use toolwin_common::errors::{Cancelled, PlatformError};
use toolwin_common::Rect;
use tracing::debug;

use super::{FrameHandle, WindowService};

/// Query the OS for the normal bounds of `frame`, in device pixels.
///
/// Every failure except cancellation yields `Ok(None)`: the caller falls
/// back to the toolkit bounds. Cancellation is returned as `Err`.
pub fn native_normal_bounds(
    service: &dyn WindowService,
    frame: &dyn FrameHandle,
) -> Result<Option<Rect>, Cancelled> {
    let Some(handle) = frame.native_handle() else {
        debug!("frame has no native handle, placement unknown");
        return Ok(None);
    };

    match service.window_placement(handle) {
        Ok(bounds) if bounds.is_empty_zero() => {
            debug!(handle = handle.0, "OS reported empty placement");
            Ok(None)
        }
        Ok(bounds) => Ok(Some(bounds)),
        Err(PlatformError::Cancelled) => Err(Cancelled),
        Err(e) => {
            debug!(handle = handle.0, error = %e, "window placement query failed");
            Ok(None)
        }
    }
}
