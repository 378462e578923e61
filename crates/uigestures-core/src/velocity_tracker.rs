//! Velocity estimation from timestamped focus-point samples.
//!
//! Uses the impulse strategy: velocity is derived from the kinetic energy the
//! pointer imparted over the recent samples, which is less sensitive to a
//! single noisy sample than a plain last-two-points difference.

use crate::geometry::Point;

/// Ring buffer size for velocity tracking samples.
const HISTORY_SIZE: usize = 20;

/// Only use samples within the last 100ms for velocity calculation.
const HORIZON_MS: u64 = 100;

/// If no movement for this duration, assume the pointer has stopped.
pub const ASSUME_STOPPED_MS: u64 = 40;

#[derive(Clone, Copy, Debug, Default)]
struct Sample {
    time_ms: u64,
    value: f32,
}

/// Impulse velocity tracker for a single axis.
#[derive(Clone, Debug)]
pub struct AxisVelocityTracker {
    samples: [Option<Sample>; HISTORY_SIZE],
    index: usize,
}

impl Default for AxisVelocityTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl AxisVelocityTracker {
    pub fn new() -> Self {
        Self {
            samples: [None; HISTORY_SIZE],
            index: 0,
        }
    }

    /// Records the absolute position `value` at `time_ms`.
    pub fn add_data_point(&mut self, time_ms: u64, value: f32) {
        self.index = (self.index + 1) % HISTORY_SIZE;
        self.samples[self.index] = Some(Sample { time_ms, value });
    }

    /// Velocity in units per second, or 0 without at least two recent samples.
    pub fn calculate_velocity(&self) -> f32 {
        let mut values = [0.0f32; HISTORY_SIZE];
        let mut times = [0.0f32; HISTORY_SIZE];
        let mut sample_count = 0;

        let Some(newest) = self.samples[self.index] else {
            return 0.0;
        };

        let mut current_index = self.index;

        while let Some(sample) = self.samples[current_index] {
            // Positions are absolute, so the stop check also measures from
            // the newest sample.
            let age = newest.time_ms.saturating_sub(sample.time_ms);
            if age > HORIZON_MS || age > ASSUME_STOPPED_MS {
                break;
            }

            values[sample_count] = sample.value;
            times[sample_count] = -(age as f32);

            current_index = if current_index == 0 {
                HISTORY_SIZE - 1
            } else {
                current_index - 1
            };

            sample_count += 1;
            if sample_count >= HISTORY_SIZE {
                break;
            }
        }

        if sample_count < 2 {
            return 0.0;
        }

        impulse_velocity(&values[..sample_count], &times[..sample_count]) * 1000.0
    }

    /// Velocity in units per second, clamped to `±max_velocity`.
    pub fn calculate_velocity_with_max(&self, max_velocity: f32) -> f32 {
        if !max_velocity.is_finite() || max_velocity <= 0.0 {
            return 0.0;
        }

        let velocity = self.calculate_velocity();
        if velocity == 0.0 || velocity.is_nan() {
            return 0.0;
        }

        velocity.clamp(-max_velocity, max_velocity)
    }

    pub fn reset(&mut self) {
        self.samples = [None; HISTORY_SIZE];
        self.index = 0;
    }
}

/// Two-axis tracker fed with focus points.
#[derive(Clone, Debug, Default)]
pub struct VelocityTracker {
    x: AxisVelocityTracker,
    y: AxisVelocityTracker,
}

impl VelocityTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_position(&mut self, time_ms: u64, position: Point) {
        self.x.add_data_point(time_ms, position.x);
        self.y.add_data_point(time_ms, position.y);
    }

    /// Velocity in pixels per second on both axes, each clamped to
    /// `±max_velocity`.
    pub fn calculate_velocity(&self, max_velocity: f32) -> Point {
        Point::new(
            self.x.calculate_velocity_with_max(max_velocity),
            self.y.calculate_velocity_with_max(max_velocity),
        )
    }

    pub fn reset(&mut self) {
        self.x.reset();
        self.y.reset();
    }
}

// `values` and `times` are ordered newest first; times are non-positive ages.
fn impulse_velocity(values: &[f32], times: &[f32]) -> f32 {
    let start = values.len() - 1;
    let mut work = 0.0f32;
    let mut next_time = times[start];

    for i in (1..=start).rev() {
        let current_time = next_time;
        next_time = times[i - 1];
        if current_time == next_time {
            continue;
        }

        let v_curr = (values[i - 1] - values[i]) / (next_time - current_time);
        let v_prev = kinetic_energy_to_velocity(work);
        work += (v_curr - v_prev) * v_curr.abs();
        if i == start {
            work *= 0.5;
        }
    }

    kinetic_energy_to_velocity(work)
}

/// E = 0.5 * m * v^2 with m = 1.
#[inline]
fn kinetic_energy_to_velocity(kinetic_energy: f32) -> f32 {
    kinetic_energy.signum() * (2.0 * kinetic_energy.abs()).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_tracker_returns_zero() {
        let tracker = AxisVelocityTracker::new();
        assert_eq!(tracker.calculate_velocity(), 0.0);
    }

    #[test]
    fn single_point_returns_zero() {
        let mut tracker = AxisVelocityTracker::new();
        tracker.add_data_point(0, 100.0);
        assert_eq!(tracker.calculate_velocity(), 0.0);
    }

    #[test]
    fn constant_velocity() {
        let mut tracker = AxisVelocityTracker::new();
        // 100 px per 10ms = 10000 px/s
        tracker.add_data_point(0, 0.0);
        tracker.add_data_point(10, 100.0);
        tracker.add_data_point(20, 200.0);
        tracker.add_data_point(30, 300.0);

        let velocity = tracker.calculate_velocity();
        assert!(
            (velocity - 10000.0).abs() < 1000.0,
            "Expected ~10000, got {}",
            velocity
        );
    }

    #[test]
    fn negative_velocity() {
        let mut tracker = AxisVelocityTracker::new();
        tracker.add_data_point(0, 300.0);
        tracker.add_data_point(10, 200.0);
        tracker.add_data_point(20, 100.0);

        let velocity = tracker.calculate_velocity();
        assert!(velocity < 0.0, "Expected negative velocity, got {}", velocity);
    }

    #[test]
    fn velocity_capped() {
        let mut tracker = AxisVelocityTracker::new();
        tracker.add_data_point(0, 0.0);
        tracker.add_data_point(1, 10_000.0);
        assert_eq!(tracker.calculate_velocity_with_max(8_000.0), 8_000.0);

        tracker.reset();
        tracker.add_data_point(0, 10_000.0);
        tracker.add_data_point(1, 0.0);
        assert_eq!(tracker.calculate_velocity_with_max(8_000.0), -8_000.0);
    }

    #[test]
    fn gap_over_stopped_threshold_returns_zero() {
        let mut tracker = AxisVelocityTracker::new();
        tracker.add_data_point(0, 0.0);
        tracker.add_data_point(ASSUME_STOPPED_MS + 1, 100.0);
        assert_eq!(tracker.calculate_velocity(), 0.0);
    }

    #[test]
    fn only_recent_samples_count() {
        let mut tracker = AxisVelocityTracker::new();
        // 0.1 px/ms up to 60ms, then 10 px/ms.
        for time in (0..=60u64).step_by(10) {
            tracker.add_data_point(time, time as f32 / 10.0);
        }
        for time in (70..=100u64).step_by(10) {
            tracker.add_data_point(time, 6.0 + (time - 60) as f32 * 10.0);
        }

        let velocity = tracker.calculate_velocity();
        assert!((velocity - 10_000.0).abs() < 1.0, "got {}", velocity);
    }

    #[test]
    fn two_axis_tracker_follows_focus() {
        let mut tracker = VelocityTracker::new();
        for step in 0..5u64 {
            tracker.add_position(step * 10, Point::new(step as f32 * -50.0, 0.0));
        }
        let velocity = tracker.calculate_velocity(8_000.0);
        assert!(velocity.x < -4_000.0, "got {:?}", velocity);
        assert_eq!(velocity.y, 0.0);

        tracker.reset();
        assert_eq!(tracker.calculate_velocity(8_000.0), Point::ZERO);
    }
}
