//! Assertion helpers for recognizer tests.

use uigestures_core::{Point, Rect, State};

/// Assert that a value is within `tolerance` of the expected one.
pub fn assert_approx_eq(actual: f32, expected: f32, tolerance: f32, msg: &str) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tolerance,
        "{}: expected {} (±{}), got {} (diff: {})",
        msg,
        expected,
        tolerance,
        actual,
        diff
    );
}

pub fn assert_point_approx_eq(actual: Point, expected: Point, tolerance: f32, msg: &str) {
    assert_approx_eq(actual.x, expected.x, tolerance, &format!("{} - x", msg));
    assert_approx_eq(actual.y, expected.y, tolerance, &format!("{} - y", msg));
}

pub fn assert_rect_contains_point(rect: Rect, point: Point, msg: &str) {
    assert!(
        rect.contains(point.x, point.y),
        "{}: point {:?} not in rect {:?}",
        msg,
        point,
        rect
    );
}

/// Assert that `states` contains `state` exactly `expected` times.
pub fn assert_state_count(states: &[State], state: State, expected: usize, msg: &str) {
    let count = states.iter().filter(|&&recorded| recorded == state).count();
    assert_eq!(
        count, expected,
        "{}: expected {} x {:?}, got {} in {:?}",
        msg, expected, state, count, states
    );
}

/// Assert that `states` is one `Began`, at least one `Changed`, then
/// `Ended`.
pub fn assert_continuous_gesture(states: &[State], msg: &str) {
    assert!(
        states.len() >= 3,
        "{}: too few transitions in {:?}",
        msg,
        states
    );
    assert_eq!(states.first(), Some(&State::Began), "{}: {:?}", msg, states);
    assert_eq!(states.last(), Some(&State::Ended), "{}: {:?}", msg, states);
    assert!(
        states[1..states.len() - 1]
            .iter()
            .all(|&state| state == State::Changed),
        "{}: expected only Changed between Began and Ended in {:?}",
        msg,
        states
    );
}
