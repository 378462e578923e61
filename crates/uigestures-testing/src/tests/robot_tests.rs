use super::*;
use crate::testing::TransitionRecorder;
use uigestures_core::{LongPressGesture, PanGesture, State};

fn robot() -> GestureRobot {
    GestureRobot::new(Rect::new(0.0, 0.0, 400.0, 800.0))
}

#[test]
fn swipe_sends_down_moves_and_up() {
    let mut robot = robot();
    let start = robot.clock().now();
    robot.swipe(Point::new(0.0, 0.0), Point::new(60.0, 0.0), 6);

    assert_eq!(robot.consumed().len(), 8);
    assert_eq!(robot.clock().now(), start + 8 * DEFAULT_STEP_MILLIS);
    assert_eq!(robot.delegate().touched_pointer_count(), 0);
}

#[test]
fn multi_touch_swipe_lands_and_lifts_every_finger() {
    let mut robot = robot();
    robot.swipe_left_multi_touch(3, 4);

    // 3 downs, 4 moves, 3 ups.
    assert_eq!(robot.consumed().len(), 10);
    assert_eq!(robot.delegate().touched_pointer_count(), 0);
}

#[test]
fn swipe_left_stays_inside_bounds() {
    let mut robot = robot();
    let mut pan = robot.create(PanGesture::new());
    let recorder = TransitionRecorder::new();
    recorder.attach(&mut pan);
    let pan = robot.add_recognizer(pan).unwrap();

    robot.swipe_left(5);

    let recognizer = robot.recognizer(pan).unwrap();
    assert_eq!(recognizer.state(), State::Ended);
    assert!(robot.visible_bounds().contains(
        recognizer.focus_point().x,
        recognizer.focus_point().y
    ));
    assert!(recognizer.as_pan().unwrap().translation().x < 0.0);
}

#[test]
fn advancing_time_fires_timers() {
    let mut robot = robot();
    let press = robot.add(LongPressGesture::new()).unwrap();

    robot.touch_down(Point::new(10.0, 10.0));
    robot.advance_time_by(499);
    assert_eq!(robot.recognizer(press).unwrap().state(), State::Possible);
    robot.advance_time_by(1);
    assert_eq!(robot.recognizer(press).unwrap().state(), State::Began);
}

#[test]
fn manual_clock_clones_share_time() {
    let clock = ManualClock::new();
    let shared = clock.clone();
    clock.advance(25);
    assert_eq!(shared.now(), 25);
}
