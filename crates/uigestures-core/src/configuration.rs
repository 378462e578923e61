//! Per-delegate gesture thresholds.

use crate::error::GestureError;
use crate::gesture_constants::*;

/// Thresholds consulted by the recognizers.
///
/// A delegate holds one and copies it into every recognizer it creates, so a
/// recognizer can still be tuned individually after creation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureConfiguration {
    pub touch_slop: f32,
    pub double_tap_slop: f32,
    pub tap_timeout: u64,
    pub double_tap_timeout: u64,
    pub long_press_timeout: u64,
    pub minimum_fling_velocity: f32,
    pub maximum_fling_velocity: f32,
    pub swipe_minimum_distance: f32,
    pub swipe_maximum_duration: u64,
    pub pinch_slop: f32,
    pub rotation_slop: f32,
}

impl Default for GestureConfiguration {
    fn default() -> Self {
        Self {
            touch_slop: TOUCH_SLOP,
            double_tap_slop: DOUBLE_TAP_SLOP,
            tap_timeout: TAP_TIMEOUT,
            double_tap_timeout: DOUBLE_TAP_TIMEOUT,
            long_press_timeout: LONG_PRESS_TIMEOUT,
            minimum_fling_velocity: MIN_FLING_VELOCITY,
            maximum_fling_velocity: MAX_FLING_VELOCITY,
            swipe_minimum_distance: SWIPE_MIN_DISTANCE,
            swipe_maximum_duration: SWIPE_MAX_DURATION,
            pinch_slop: PINCH_SLOP,
            rotation_slop: ROTATION_SLOP,
        }
    }
}

impl GestureConfiguration {
    /// Default thresholds with every distance and velocity multiplied by
    /// `density`.
    pub fn scaled(density: f32) -> Self {
        let base = Self::default();
        Self {
            touch_slop: base.touch_slop * density,
            double_tap_slop: base.double_tap_slop * density,
            minimum_fling_velocity: base.minimum_fling_velocity * density,
            maximum_fling_velocity: base.maximum_fling_velocity * density,
            swipe_minimum_distance: base.swipe_minimum_distance * density,
            pinch_slop: base.pinch_slop * density,
            ..base
        }
    }

    pub fn with_touch_slop(mut self, touch_slop: f32) -> Self {
        self.touch_slop = touch_slop;
        self
    }

    pub fn with_tap_timeout(mut self, tap_timeout: u64) -> Self {
        self.tap_timeout = tap_timeout;
        self
    }

    pub fn with_double_tap_timeout(mut self, double_tap_timeout: u64) -> Self {
        self.double_tap_timeout = double_tap_timeout;
        self
    }

    pub fn with_long_press_timeout(mut self, long_press_timeout: u64) -> Self {
        self.long_press_timeout = long_press_timeout;
        self
    }

    pub fn with_swipe_thresholds(mut self, minimum_distance: f32, maximum_duration: u64) -> Self {
        self.swipe_minimum_distance = minimum_distance;
        self.swipe_maximum_duration = maximum_duration;
        self
    }

    /// Rejects negative or non-finite distances, zero timeouts and an
    /// inverted fling velocity range.
    pub fn validate(&self) -> Result<(), GestureError> {
        let distances = [
            ("touch_slop", self.touch_slop),
            ("double_tap_slop", self.double_tap_slop),
            ("swipe_minimum_distance", self.swipe_minimum_distance),
            ("pinch_slop", self.pinch_slop),
            ("rotation_slop", self.rotation_slop),
            ("minimum_fling_velocity", self.minimum_fling_velocity),
        ];
        for (field, value) in distances {
            if !value.is_finite() || value < 0.0 {
                return Err(GestureError::InvalidConfiguration {
                    field,
                    reason: "must be finite and non-negative",
                });
            }
        }

        let timeouts = [
            ("tap_timeout", self.tap_timeout),
            ("double_tap_timeout", self.double_tap_timeout),
            ("long_press_timeout", self.long_press_timeout),
            ("swipe_maximum_duration", self.swipe_maximum_duration),
        ];
        for (field, value) in timeouts {
            if value == 0 {
                return Err(GestureError::InvalidConfiguration {
                    field,
                    reason: "must be greater than zero",
                });
            }
        }

        if self.maximum_fling_velocity.is_nan()
            || self.maximum_fling_velocity <= self.minimum_fling_velocity
        {
            return Err(GestureError::InvalidConfiguration {
                field: "maximum_fling_velocity",
                reason: "must exceed minimum_fling_velocity",
            });
        }

        Ok(())
    }
}
