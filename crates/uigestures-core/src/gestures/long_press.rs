use crate::arbiter::Arbiter;
use crate::error::GestureError;
use crate::geometry::{distance, Point};
use crate::handler::Message;
use crate::motion_event::{MotionAction, MotionEvent};
use crate::recognizer::{GestureBehavior, RecognizerCore, State};

/// Continuous press held in place.
///
/// Begins when the required fingers stay down for the minimum press
/// duration without moving further than the allowable movement; reports
/// `Changed` for every move afterwards and ends on lift.
#[derive(Clone, Debug)]
pub struct LongPressGesture {
    minimum_press_duration: Option<u64>,
    allowable_movement: Option<f32>,
    number_of_touches_required: usize,
    number_of_touches: usize,
    pressing: bool,
    deferred_began: bool,
    start_point: Point,
}

impl Default for LongPressGesture {
    fn default() -> Self {
        Self::new()
    }
}

impl LongPressGesture {
    pub fn new() -> Self {
        Self {
            minimum_press_duration: None,
            allowable_movement: None,
            number_of_touches_required: 1,
            number_of_touches: 0,
            pressing: false,
            deferred_began: false,
            start_point: Point::ZERO,
        }
    }

    /// Overrides the configuration's `long_press_timeout`.
    pub fn with_minimum_press_duration(mut self, millis: u64) -> Self {
        self.minimum_press_duration = Some(millis);
        self
    }

    /// Overrides the configuration's `touch_slop`.
    pub fn with_allowable_movement(mut self, distance: f32) -> Self {
        self.allowable_movement = Some(distance);
        self
    }

    pub fn with_touches_required(mut self, touches: usize) -> Result<Self, GestureError> {
        if touches == 0 {
            return Err(GestureError::InvalidTouchRange {
                minimum: touches,
                maximum: touches,
            });
        }
        self.number_of_touches_required = touches;
        Ok(self)
    }

    pub fn minimum_press_duration(&self, core: &RecognizerCore) -> u64 {
        self.minimum_press_duration
            .unwrap_or(core.configuration().long_press_timeout)
    }

    pub fn allowable_movement(&self, core: &RecognizerCore) -> f32 {
        self.allowable_movement
            .unwrap_or(core.configuration().touch_slop)
    }

    pub fn number_of_touches_required(&self) -> usize {
        self.number_of_touches_required
    }

    fn schedule(&self, core: &RecognizerCore) {
        core.remove_messages(Message::LongPress);
        if self.number_of_touches == self.number_of_touches_required {
            core.send_message_delayed(Message::LongPress, self.minimum_press_duration(core));
        }
    }

    fn end_press(&mut self) {
        self.pressing = false;
        self.deferred_began = false;
        self.number_of_touches = 0;
    }
}

impl GestureBehavior for LongPressGesture {
    fn on_touch_event(
        &mut self,
        core: &mut RecognizerCore,
        event: &MotionEvent,
        _arbiter: &Arbiter<'_>,
    ) -> bool {
        let focus = core.focus_point();
        match event.action() {
            MotionAction::Down => {
                self.pressing = true;
                self.start_point = focus;
                self.number_of_touches = event.active_pointer_count();
                self.schedule(core);
                false
            }
            _ if !self.pressing => false,
            MotionAction::PointerDown | MotionAction::PointerUp => {
                self.number_of_touches = event.active_pointer_count();
                self.start_point = focus;
                match core.state() {
                    State::Possible if self.number_of_touches > self.number_of_touches_required => {
                        self.deferred_began = false;
                        core.set_state(State::Failed);
                    }
                    State::Possible => {
                        self.deferred_began = false;
                        self.schedule(core);
                    }
                    State::Began | State::Changed
                        if self.number_of_touches != self.number_of_touches_required =>
                    {
                        core.set_state(State::Cancelled);
                    }
                    _ => {}
                }
                core.state().is_active()
            }
            MotionAction::Move => match core.state() {
                State::Possible => {
                    if distance(self.start_point, focus) > self.allowable_movement(core) {
                        self.deferred_began = false;
                        core.set_state(State::Failed);
                    }
                    false
                }
                State::Began | State::Changed => {
                    core.set_state(State::Changed);
                    true
                }
                _ => false,
            },
            MotionAction::Up => {
                self.end_press();
                if core.state().is_active() {
                    core.set_state(State::Ended);
                    true
                } else {
                    core.set_state(State::Failed);
                    false
                }
            }
            MotionAction::Cancel => {
                self.end_press();
                if core.state().is_active() {
                    core.set_state(State::Cancelled);
                } else {
                    core.set_state(State::Failed);
                }
                false
            }
        }
    }

    fn on_message(&mut self, core: &mut RecognizerCore, message: Message, arbiter: &Arbiter<'_>) {
        if message != Message::LongPress
            || !self.pressing
            || core.state() != State::Possible
            || self.number_of_touches != self.number_of_touches_required
        {
            return;
        }
        if core.is_waiting_for_failure() {
            self.deferred_began = true;
            return;
        }
        core.recognize(arbiter, State::Began);
    }

    fn on_failure_requirement_met(&mut self, core: &mut RecognizerCore, arbiter: &Arbiter<'_>) {
        if self.deferred_began && self.pressing && core.state() == State::Possible {
            self.deferred_began = false;
            core.recognize(arbiter, State::Began);
        }
    }

    fn reset(&mut self) {
        self.end_press();
        self.start_point = Point::ZERO;
    }

    fn number_of_touches(&self) -> usize {
        self.number_of_touches
    }
}
