//! Frame state persistence: bounds, extended state and full-screen flag.
//!
//! Frame move/resize events arrive at a high rate while the user drags the
//! frame. They only record pending bounds; the persisted [`FrameInfo`] is
//! recomputed when somebody reads it.

use serde::{Deserialize, Deserializer, Serialize};
use toolwin_common::errors::Cancelled;
use toolwin_common::{ExtendedState, Rect};
use tracing::debug;

use crate::platform::{native_normal_bounds, FrameHandle, WindowService};

/// Persisted frame record. Bounds are in device pixels.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameInfo {
    #[serde(
        skip_serializing_if = "is_missing_bounds",
        deserialize_with = "deserialize_bounds"
    )]
    pub bounds: Option<Rect>,
    pub extended_state: i32,
    pub full_screen: bool,
}

fn is_missing_bounds(bounds: &Option<Rect>) -> bool {
    bounds.map_or(true, |b| b.is_empty_zero())
}

fn deserialize_bounds<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Rect>, D::Error> {
    Ok(Option::<Rect>::deserialize(d)?.filter(|b| !b.is_empty_zero()))
}

impl FrameInfo {
    /// Store `bounds`, treating an all-zero rectangle as "no bounds".
    pub fn set_bounds(&mut self, bounds: Option<Rect>) {
        self.bounds = bounds.filter(|b| !b.is_empty_zero());
    }

    pub fn extended_state(&self) -> ExtendedState {
        ExtendedState::from_bits_truncate(self.extended_state)
    }

    pub fn is_maximized(&self) -> bool {
        self.extended_state().is_maximized()
    }
}

/// Tracks the frame of one project and produces its [`FrameInfo`].
#[derive(Debug, Default)]
pub struct FrameBoundsStore {
    info: FrameInfo,
    /// Last reported bounds in user coordinates.
    pending_bounds: Option<Rect>,
    dirty: bool,
    modification_count: u64,
}

impl FrameBoundsStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with a persisted record.
    pub fn from_info(mut info: FrameInfo) -> Self {
        info.set_bounds(info.bounds);
        Self {
            info,
            ..Self::default()
        }
    }

    /// Last computed record, possibly stale while dirty.
    pub fn info(&self) -> &FrameInfo {
        &self.info
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn modification_count(&self) -> u64 {
        self.modification_count
    }

    /// Record a frame change. `Some(bounds)` comes from move/resize events;
    /// `None` flags a state change (maximize, full screen) without bounds.
    /// All-zero bounds are discarded.
    pub fn mark_dirty(&mut self, bounds: Option<Rect>) {
        match bounds {
            Some(b) if b.is_empty_zero() => {
                debug!("ignoring all-zero frame bounds");
                return;
            }
            Some(b) => self.pending_bounds = Some(b),
            None => {}
        }
        self.dirty = true;
        self.modification_count += 1;
    }

    /// Recompute the record from the live frame when dirty, clearing the
    /// dirty flag and the pending bounds.
    ///
    /// Maximized frames keep their previous normal bounds when the frame
    /// still covers them, so restoring later lands where the user left
    /// it. An iconified frame without pending bounds asks the OS for its
    /// normal placement.
    pub fn get_actual_frame_info_in_device_space(
        &mut self,
        frame: &dyn FrameHandle,
        service: &dyn WindowService,
    ) -> Result<FrameInfo, Cancelled> {
        if !self.dirty {
            return Ok(self.info.clone());
        }

        let state = frame.extended_state();
        let scale = frame.scale_factor();
        let current = Some(frame.bounds())
            .filter(|b| !b.is_empty_zero())
            .map(|b| b.scaled(scale));

        let bounds = match self.pending_bounds.take() {
            Some(pending) => Some(pending.scaled(scale)),
            None if state.is_iconified() => native_normal_bounds(service, frame)?.or(current),
            None if state.is_maximized() => match (self.info.bounds, current) {
                (Some(old), Some(now)) if now.contains(old.center()) => Some(old),
                (_, now) => now,
            },
            None => current,
        };

        self.info.set_bounds(bounds.or(self.info.bounds));
        self.info.extended_state = state.bits();
        self.info.full_screen = service.is_full_screen_supported() && frame.is_in_full_screen();
        self.dirty = false;
        Ok(self.info.clone())
    }
}
