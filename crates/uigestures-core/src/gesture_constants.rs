//! Default gesture thresholds.
//!
//! Distances are in logical pixels and times in milliseconds. They match the
//! stock Android `ViewConfiguration` values at baseline density; use
//! [`GestureConfiguration::scaled`](crate::GestureConfiguration::scaled) for
//! high-density screens.

/// Distance a pointer may travel before a press turns into a drag.
///
/// Pan begins beyond it; tap and long press fail beyond it.
pub const TOUCH_SLOP: f32 = 8.0;

/// Maximum distance between the first and a subsequent tap of a multi-tap.
pub const DOUBLE_TAP_SLOP: f32 = 100.0;

/// Longest a pointer may stay down and still count as a tap.
pub const TAP_TIMEOUT: u64 = 100;

/// Longest gap between the lift of one tap and the press of the next.
pub const DOUBLE_TAP_TIMEOUT: u64 = 300;

/// Press duration after which a long press begins.
pub const LONG_PRESS_TIMEOUT: u64 = 500;

/// Minimum fling velocity in logical pixels per second.
pub const MIN_FLING_VELOCITY: f32 = 50.0;

/// Maximum fling velocity in logical pixels per second.
pub const MAX_FLING_VELOCITY: f32 = 8_000.0;

/// Minimum travel along the dominant axis for a swipe.
pub const SWIPE_MIN_DISTANCE: f32 = 96.0;

/// Longest a swipe may take from press to lift.
pub const SWIPE_MAX_DURATION: u64 = 550;

/// Required ratio between the dominant and the other axis of a swipe.
pub const SWIPE_AXIS_DOMINANCE: f32 = 1.4;

/// Span change after which a pinch begins.
pub const PINCH_SLOP: f32 = 2.0 * TOUCH_SLOP;

/// Rotation in radians (about 5 degrees) after which a rotation begins.
pub const ROTATION_SLOP: f32 = 0.087;
