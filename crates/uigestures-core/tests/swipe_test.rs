use uigestures_core::prelude::*;
use uigestures_testing::prelude::*;

fn robot() -> GestureRobot {
    GestureRobot::new(Rect::new(0.0, 0.0, 600.0, 1000.0))
}

fn add_swipe(
    robot: &mut GestureRobot,
    swipe: SwipeGesture,
) -> (RecognizerId, TransitionRecorder) {
    let mut recognizer = robot.create(swipe);
    let recorder = TransitionRecorder::new();
    recorder.attach(&mut recognizer);
    (robot.add_recognizer(recognizer).unwrap(), recorder)
}

#[test]
fn quick_stroke_right_is_a_swipe() {
    let mut robot = robot();
    let (swipe, recorder) = add_swipe(&mut robot, SwipeGesture::new());

    robot.swipe(Point::new(100.0, 500.0), Point::new(400.0, 520.0), 6);

    assert_eq!(recorder.actions(), vec![State::Ended]);
    let recognizer = robot.recognizer(swipe).unwrap();
    assert_eq!(
        recognizer.as_swipe().unwrap().recognized_direction(),
        Some(SwipeDirection::RIGHT)
    );
    assert_point_approx_eq(recognizer.location(), Point::new(100.0, 500.0), 0.01, "location");
}

#[test]
fn default_direction_rejects_left_swipe() {
    let mut robot = robot();
    let (swipe, recorder) = add_swipe(&mut robot, SwipeGesture::new());

    robot.swipe_left(6);

    assert!(recorder.actions().is_empty());
    assert_eq!(robot.recognizer(swipe).unwrap().state(), State::Failed);
}

#[test]
fn every_direction_is_classified() {
    let cases = [
        (Point::new(300.0, 800.0), Point::new(300.0, 300.0), SwipeDirection::UP),
        (Point::new(300.0, 300.0), Point::new(300.0, 800.0), SwipeDirection::DOWN),
        (Point::new(500.0, 500.0), Point::new(100.0, 500.0), SwipeDirection::LEFT),
        (Point::new(100.0, 500.0), Point::new(500.0, 500.0), SwipeDirection::RIGHT),
    ];
    for (from, to, expected) in cases {
        let mut robot = robot();
        let (swipe, _recorder) = add_swipe(
            &mut robot,
            SwipeGesture::new().with_direction(SwipeDirection::ALL),
        );

        robot.swipe(from, to, 5);

        let recognizer = robot.recognizer(swipe).unwrap();
        assert_eq!(recognizer.state(), State::Ended, "{:?}", expected);
        assert_eq!(
            recognizer.as_swipe().unwrap().recognized_direction(),
            Some(expected)
        );
    }
}

#[test]
fn diagonal_stroke_fails() {
    let mut robot = robot();
    let (swipe, _recorder) = add_swipe(
        &mut robot,
        SwipeGesture::new().with_direction(SwipeDirection::ALL),
    );

    robot.swipe(Point::new(100.0, 100.0), Point::new(300.0, 280.0), 6);

    assert_eq!(robot.recognizer(swipe).unwrap().state(), State::Failed);
}

#[test]
fn short_stroke_fails() {
    let mut robot = robot();
    let (swipe, _recorder) = add_swipe(&mut robot, SwipeGesture::new());

    robot.swipe(Point::new(100.0, 500.0), Point::new(160.0, 500.0), 6);

    assert_eq!(robot.recognizer(swipe).unwrap().state(), State::Failed);
}

#[test]
fn slow_stroke_times_out() {
    let mut robot = robot();
    let (swipe, recorder) = add_swipe(&mut robot, SwipeGesture::new());
    robot.set_step_millis(100);

    robot.touch_down(Point::new(100.0, 500.0));
    for step in 1..=5 {
        robot.touch_move(Point::new(100.0 + step as f32 * 60.0, 500.0));
    }
    assert_eq!(robot.recognizer(swipe).unwrap().state(), State::Possible);
    // The timer falls due before the lift is delivered.
    robot.touch_up(Point::new(400.0, 500.0));
    assert_eq!(robot.recognizer(swipe).unwrap().state(), State::Failed);

    assert!(recorder.actions().is_empty());
    assert_eq!(recorder.states(), vec![State::Failed]);
}

#[test]
fn two_finger_swipe() {
    let mut robot = robot();
    let gesture = SwipeGesture::new()
        .with_direction(SwipeDirection::LEFT)
        .with_touches_required(2)
        .unwrap();
    let (swipe, recorder) = add_swipe(&mut robot, gesture);

    robot.swipe_left_multi_touch(2, 4);

    assert_eq!(recorder.actions(), vec![State::Ended]);
    assert_eq!(
        robot.recognizer(swipe).unwrap().as_swipe().unwrap().recognized_direction(),
        Some(SwipeDirection::LEFT)
    );
}

#[test]
fn single_finger_swipe_rejects_second_finger() {
    let mut robot = robot();
    let (swipe, _recorder) = add_swipe(
        &mut robot,
        SwipeGesture::new().with_direction(SwipeDirection::LEFT),
    );

    robot.swipe_left_multi_touch(2, 4);

    assert_eq!(robot.recognizer(swipe).unwrap().state(), State::Failed);
}

#[test]
fn direction_set_operations() {
    let mut direction = SwipeDirection::LEFT | SwipeDirection::UP;
    assert!(direction.contains(SwipeDirection::LEFT));
    assert!(!direction.contains(SwipeDirection::HORIZONTAL));

    direction |= SwipeDirection::RIGHT;
    assert!(direction.contains(SwipeDirection::HORIZONTAL));

    direction.remove(SwipeDirection::HORIZONTAL | SwipeDirection::UP);
    assert!(direction.is_empty());
    assert_eq!(SwipeDirection::default(), SwipeDirection::RIGHT);
    assert_eq!(SwipeDirection::ALL.bits(), 0b1111);
}

#[test]
fn pan_requiring_swipe_failure_takes_over_slow_drags() {
    let mut robot = robot();
    let mut swipe = robot.create(SwipeGesture::new().with_direction(SwipeDirection::ALL));
    let mut pan = robot.create(PanGesture::new());
    let recorder = TransitionRecorder::new();
    recorder.attach(&mut pan);
    pan.set_require_failure_of(Some(&swipe));
    swipe.set_cancels_touches_in_view(false);
    let swipe = robot.add_recognizer(swipe).unwrap();
    let pan = robot.add_recognizer(pan).unwrap();
    robot.set_step_millis(60);

    robot.touch_down(Point::new(100.0, 100.0));
    robot.touch_move(Point::new(100.0, 140.0));
    assert!(recorder.actions().is_empty());
    for step in 1..=10 {
        robot.touch_move(Point::new(100.0, 140.0 + step as f32 * 20.0));
    }
    robot.touch_up(Point::new(100.0, 340.0));

    assert_eq!(robot.recognizer(swipe).unwrap().state(), State::Failed);
    assert_continuous_gesture(&recorder.actions(), "pan after swipe timeout");
    assert_eq!(robot.recognizer(pan).unwrap().state(), State::Ended);
}
