use crate::arbiter::Arbiter;
use crate::geometry::compute_span;
use crate::motion_event::{MotionAction, MotionEvent};
use crate::recognizer::{GestureBehavior, RecognizerCore, State};

/// Two-finger pinch reporting the scale relative to the initial span.
///
/// Begins once the span between the fingers changes by more than
/// `pinch_slop`; lifting either finger ends it.
#[derive(Clone, Debug)]
pub struct PinchGesture {
    number_of_touches: usize,
    initial_span: f32,
    scale: f32,
    velocity: f32,
    last_time: u64,
    deferred_began: bool,
}

impl Default for PinchGesture {
    fn default() -> Self {
        Self::new()
    }
}

impl PinchGesture {
    pub fn new() -> Self {
        Self {
            number_of_touches: 0,
            initial_span: 0.0,
            scale: 1.0,
            velocity: 0.0,
            last_time: 0,
            deferred_began: false,
        }
    }

    /// Current span divided by the span when the second finger landed.
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Scale change per second.
    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    fn tracking_pair(&self) -> bool {
        self.number_of_touches == 2 && self.initial_span > 0.0
    }

    fn start_pair(&mut self, core: &RecognizerCore, event: &MotionEvent) {
        self.initial_span = compute_span(event, core.focus_point());
        self.scale = 1.0;
        self.velocity = 0.0;
        self.last_time = event.event_time();
    }

    fn on_move(
        &mut self,
        core: &mut RecognizerCore,
        event: &MotionEvent,
        arbiter: &Arbiter<'_>,
    ) -> bool {
        if !self.tracking_pair() {
            return false;
        }
        let span = compute_span(event, core.focus_point());
        let scale = span / self.initial_span;
        let elapsed = event.event_time().saturating_sub(self.last_time);
        if elapsed > 0 {
            self.velocity = (scale - self.scale) * 1000.0 / elapsed as f32;
        }
        self.scale = scale;
        self.last_time = event.event_time();

        match core.state() {
            State::Possible => {
                if self.deferred_began
                    || (span - self.initial_span).abs() <= core.configuration().pinch_slop
                {
                    return false;
                }
                if core.is_waiting_for_failure() {
                    self.deferred_began = true;
                    return false;
                }
                core.recognize(arbiter, State::Began);
            }
            State::Began | State::Changed => core.set_state(State::Changed),
            _ => {}
        }
        core.state().is_active()
    }
}

impl GestureBehavior for PinchGesture {
    fn on_touch_event(
        &mut self,
        core: &mut RecognizerCore,
        event: &MotionEvent,
        arbiter: &Arbiter<'_>,
    ) -> bool {
        let count = event.active_pointer_count();
        match event.action() {
            MotionAction::Down => {
                self.number_of_touches = count;
                false
            }
            MotionAction::PointerDown => {
                self.number_of_touches = count;
                match (core.state(), count) {
                    (State::Possible, 2) => self.start_pair(core, event),
                    (State::Possible, _) => {
                        self.deferred_began = false;
                        core.set_state(State::Failed);
                    }
                    (State::Began | State::Changed, _) => core.set_state(State::Cancelled),
                    _ => {}
                }
                false
            }
            MotionAction::PointerUp => {
                self.number_of_touches = count;
                if core.state().is_active() {
                    core.set_state(State::Ended);
                    return true;
                }
                // The pair is gone before pinching; wait for a new one.
                self.initial_span = 0.0;
                self.deferred_began = false;
                false
            }
            MotionAction::Move => self.on_move(core, event, arbiter),
            MotionAction::Up | MotionAction::Cancel => {
                self.number_of_touches = 0;
                self.deferred_began = false;
                match core.state() {
                    State::Began | State::Changed if event.action() == MotionAction::Up => {
                        core.set_state(State::Ended)
                    }
                    State::Began | State::Changed => core.set_state(State::Cancelled),
                    _ => core.set_state(State::Failed),
                }
                false
            }
        }
    }

    fn on_failure_requirement_met(&mut self, core: &mut RecognizerCore, arbiter: &Arbiter<'_>) {
        if self.deferred_began && self.tracking_pair() && core.state() == State::Possible {
            self.deferred_began = false;
            core.recognize(arbiter, State::Began);
        }
    }

    fn reset(&mut self) {
        self.number_of_touches = 0;
        self.initial_span = 0.0;
        self.scale = 1.0;
        self.velocity = 0.0;
        self.last_time = 0;
        self.deferred_began = false;
    }

    fn number_of_touches(&self) -> usize {
        self.number_of_touches
    }
}
