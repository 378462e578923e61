use super::*;
use crate::motion_event::MotionAction;
use crate::geometry::Point;
use std::cell::RefCell;
use std::rc::Rc;

fn pan(id: u64) -> GestureRecognizer {
    GestureRecognizer::new(
        RecognizerId::new(id),
        GestureConfiguration::default(),
        PanGesture::new(),
    )
}

fn record_states(recognizer: &mut GestureRecognizer) -> (Rc<RefCell<Vec<State>>>, Rc<RefCell<Vec<State>>>) {
    let actions = Rc::new(RefCell::new(Vec::new()));
    let states = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&actions);
    recognizer.set_action_listener(move |recognizer| sink.borrow_mut().push(recognizer.state()));
    let sink = Rc::clone(&states);
    recognizer.set_state_listener(move |recognizer| sink.borrow_mut().push(recognizer.state()));
    (actions, states)
}

#[test]
fn changed_is_announced_every_time() {
    let mut recognizer = pan(1);
    let (actions, states) = record_states(&mut recognizer);

    recognizer.core.set_state(State::Began);
    recognizer.core.set_state(State::Began);
    recognizer.core.set_state(State::Changed);
    recognizer.core.set_state(State::Changed);
    recognizer.core.set_state(State::Ended);
    recognizer.dispatch_transitions();

    let expected = vec![State::Began, State::Changed, State::Changed, State::Ended];
    assert_eq!(*actions.borrow(), expected);
    assert_eq!(*states.borrow(), expected);
    assert_eq!(recognizer.state(), State::Ended);
    assert!(recognizer.has_began_firing());
}

#[test]
fn failed_reaches_state_listener_only() {
    let mut recognizer = pan(1);
    let (actions, states) = record_states(&mut recognizer);

    recognizer.core.set_state(State::Failed);
    recognizer.dispatch_transitions();

    assert!(actions.borrow().is_empty());
    assert_eq!(*states.borrow(), vec![State::Failed]);
    assert!(!recognizer.has_began_firing());
}

#[test]
fn reset_is_silent_and_idempotent() {
    let mut recognizer = pan(1);
    let (actions, states) = record_states(&mut recognizer);
    recognizer.core.set_state(State::Began);
    recognizer.dispatch_transitions();

    recognizer.reset();
    recognizer.reset();
    assert!(recognizer.dispatch_transitions().is_empty());

    assert_eq!(recognizer.state(), State::Possible);
    assert!(!recognizer.has_began_firing());
    assert_eq!(*actions.borrow(), vec![State::Began]);
    assert_eq!(*states.borrow(), vec![State::Began]);
}

#[test]
fn disabling_resets_but_enabling_does_not() {
    let mut recognizer = pan(1);
    recognizer.core.set_state(State::Changed);
    recognizer.dispatch_transitions();

    recognizer.set_enabled(false);
    assert_eq!(recognizer.state(), State::Possible);
    assert!(!recognizer.is_enabled());

    recognizer.core.set_state(State::Began);
    recognizer.set_enabled(true);
    assert_eq!(recognizer.state(), State::Began);
}

#[test]
fn listening_registers_in_target_dependents() {
    let mut tap = GestureRecognizer::new(
        RecognizerId::new(1),
        GestureConfiguration::default(),
        TapGesture::new(),
    );
    let mut other_tap = GestureRecognizer::new(
        RecognizerId::new(3),
        GestureConfiguration::default(),
        TapGesture::new(),
    );
    let mut watcher = pan(2);

    watcher.set_require_failure_of(Some(&tap));
    assert_eq!(watcher.require_failure_of(), Some(tap.id()));
    assert!(tap.core().dependents().is_empty());

    watcher.core.start_listening();
    assert!(watcher.core().is_waiting_for_failure());
    assert_eq!(tap.core().dependents(), vec![RecognizerId::new(2)]);

    watcher.set_require_failure_of(Some(&other_tap));
    assert!(tap.core().dependents().is_empty());
    assert!(!watcher.core().is_waiting_for_failure());

    watcher.core.start_listening();
    assert_eq!(other_tap.core().dependents(), vec![RecognizerId::new(2)]);
    watcher.reset();
    assert!(other_tap.core().dependents().is_empty());

    tap.reset();
    other_tap.reset();
}

#[test]
fn transition_notifies_dependents_in_id_order() {
    let mut target = pan(1);
    let mut first = pan(5);
    let mut second = pan(3);
    first.set_require_failure_of(Some(&target));
    second.set_require_failure_of(Some(&target));
    first.core.start_listening();
    second.core.start_listening();

    target.core.set_state(State::Failed);
    let notifications = target.dispatch_transitions();

    let watchers: Vec<_> = notifications.iter().map(|n| n.watcher).collect();
    assert_eq!(watchers, vec![RecognizerId::new(3), RecognizerId::new(5)]);
    assert!(notifications
        .iter()
        .all(|n| n.source == RecognizerId::new(1) && n.state == State::Failed));
}

#[test]
fn dependency_success_fails_waiting_recognizer() {
    let target = pan(1);
    let mut watcher = pan(2);
    let (actions, states) = record_states(&mut watcher);
    watcher.set_require_failure_of(Some(&target));
    watcher.core.start_listening();

    watcher.on_state_changed(target.id(), State::Began, &Arbiter::detached());
    watcher.dispatch_transitions();

    assert_eq!(watcher.state(), State::Failed);
    assert!(!watcher.core().is_waiting_for_failure());
    assert!(target.core().dependents().is_empty());
    assert!(actions.borrow().is_empty());
    assert_eq!(*states.borrow(), vec![State::Failed]);
}

#[test]
fn notifications_from_other_sources_are_ignored() {
    let target = pan(1);
    let mut watcher = pan(2);
    watcher.set_require_failure_of(Some(&target));
    watcher.core.start_listening();

    watcher.on_state_changed(RecognizerId::new(9), State::Began, &Arbiter::detached());
    assert_eq!(watcher.state(), State::Possible);
    assert!(watcher.core().is_waiting_for_failure());
}

#[test]
fn dropped_requirement_is_never_waited_for() {
    let target = pan(1);
    let mut watcher = pan(2);
    watcher.set_require_failure_of(Some(&target));
    drop(target);

    watcher.core.start_listening();
    assert!(!watcher.core().is_waiting_for_failure());
    assert_eq!(watcher.require_failure_of(), Some(RecognizerId::new(1)));
}

#[test]
fn listeners_observe_the_announced_state() {
    let mut recognizer = pan(1);
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    recognizer.set_state_listener(move |recognizer| sink.borrow_mut().push(recognizer.state()));

    recognizer.core.set_state(State::Began);
    recognizer.core.set_state(State::Cancelled);
    recognizer.dispatch_transitions();

    assert_eq!(*seen.borrow(), vec![State::Began, State::Cancelled]);
    assert_eq!(recognizer.state(), State::Cancelled);
}

#[test]
fn base_event_handling_records_focus() {
    let mut recognizer = pan(1);
    let event = MotionEvent::new(
        MotionAction::Down,
        0,
        [
            crate::motion_event::PointerCoords::new(0, 0.0, 0.0),
            crate::motion_event::PointerCoords::new(1, 10.0, 20.0),
        ],
        0,
        0,
    );
    recognizer.on_touch_event(&event, &Arbiter::detached());

    assert_eq!(recognizer.focus_point(), Point::new(5.0, 10.0));
    assert_eq!(recognizer.core().last_event(), Some(&event));
}

#[test]
fn variant_accessors_match_gesture_type() {
    let recognizer = pan(1);
    assert_eq!(recognizer.gesture_type(), GestureType::Pan);
    assert!(recognizer.as_pan().is_some());
    assert!(recognizer.as_tap().is_none());
    assert_eq!(recognizer.gesture().gesture_type(), GestureType::Pan);
}
