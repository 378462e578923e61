//! Virtual time and transition recording for recognizer tests.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use uigestures_core::{Clock, GestureRecognizer, State};

/// A clock that only moves when told to.
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    now: Rc<Cell<u64>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn starting_at(millis: u64) -> Self {
        let clock = Self::new();
        clock.now.set(millis);
        clock
    }

    pub fn now(&self) -> u64 {
        self.now.get()
    }

    pub fn advance(&self, millis: u64) -> u64 {
        let now = self.now.get().saturating_add(millis);
        self.now.set(now);
        now
    }
}

impl Clock for ManualClock {
    fn uptime_millis(&self) -> u64 {
        self.now.get()
    }
}

/// Collects the states a recognizer announces.
///
/// Clones share the same log, so a clone can be moved into the listeners
/// while the test keeps its own handle.
#[derive(Clone, Debug, Default)]
pub struct TransitionRecorder {
    actions: Rc<RefCell<Vec<State>>>,
    states: Rc<RefCell<Vec<State>>>,
}

impl TransitionRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs both listeners on `recognizer`, replacing existing ones.
    pub fn attach(&self, recognizer: &mut GestureRecognizer) {
        let actions = Rc::clone(&self.actions);
        recognizer.set_action_listener(move |recognizer| {
            actions.borrow_mut().push(recognizer.state());
        });
        let states = Rc::clone(&self.states);
        recognizer.set_state_listener(move |recognizer| {
            states.borrow_mut().push(recognizer.state());
        });
    }

    /// States delivered to the action listener, in order.
    pub fn actions(&self) -> Vec<State> {
        self.actions.borrow().clone()
    }

    /// States delivered to the state listener, in order.
    pub fn states(&self) -> Vec<State> {
        self.states.borrow().clone()
    }

    pub fn action_count(&self, state: State) -> usize {
        self.actions
            .borrow()
            .iter()
            .filter(|&&recorded| recorded == state)
            .count()
    }

    pub fn last_state(&self) -> Option<State> {
        self.states.borrow().last().copied()
    }

    pub fn clear(&self) {
        self.actions.borrow_mut().clear();
        self.states.borrow_mut().clear();
    }
}
