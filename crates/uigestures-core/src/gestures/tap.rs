use crate::arbiter::Arbiter;
use crate::error::GestureError;
use crate::geometry::{distance, Point};
use crate::handler::{Message, MessageToken};
use crate::motion_event::{MotionAction, MotionEvent};
use crate::recognizer::{GestureBehavior, RecognizerCore, State};

/// Discrete tap, optionally repeated and with several fingers.
///
/// Each press must lift within `tap_timeout` without leaving the touch slop.
/// For multi-taps the next press must land within `double_tap_timeout` of
/// the previous lift and within `double_tap_slop` of the first tap.
#[derive(Clone, Debug)]
pub struct TapGesture {
    number_of_taps_required: usize,
    number_of_touches_required: usize,
    taps_completed: usize,
    pressing: bool,
    touches_in_press: usize,
    number_of_touches: usize,
    press_point: Point,
    centroid: Point,
    first_tap_point: Point,
    location: Point,
    deferred_ended: bool,
    tap_timeout: Option<MessageToken>,
    multi_tap_timeout: Option<MessageToken>,
}

impl Default for TapGesture {
    fn default() -> Self {
        Self::new()
    }
}

impl TapGesture {
    pub fn new() -> Self {
        Self {
            number_of_taps_required: 1,
            number_of_touches_required: 1,
            taps_completed: 0,
            pressing: false,
            touches_in_press: 0,
            number_of_touches: 0,
            press_point: Point::ZERO,
            centroid: Point::ZERO,
            first_tap_point: Point::ZERO,
            location: Point::ZERO,
            deferred_ended: false,
            tap_timeout: None,
            multi_tap_timeout: None,
        }
    }

    pub fn with_taps_required(mut self, taps: usize) -> Result<Self, GestureError> {
        self.set_number_of_taps_required(taps)?;
        Ok(self)
    }

    pub fn with_touches_required(mut self, touches: usize) -> Result<Self, GestureError> {
        self.set_number_of_touches_required(touches)?;
        Ok(self)
    }

    pub fn number_of_taps_required(&self) -> usize {
        self.number_of_taps_required
    }

    pub fn set_number_of_taps_required(&mut self, taps: usize) -> Result<(), GestureError> {
        if taps == 0 {
            return Err(GestureError::InvalidConfiguration {
                field: "number_of_taps_required",
                reason: "must be greater than zero",
            });
        }
        self.number_of_taps_required = taps;
        Ok(())
    }

    pub fn number_of_touches_required(&self) -> usize {
        self.number_of_touches_required
    }

    pub fn set_number_of_touches_required(&mut self, touches: usize) -> Result<(), GestureError> {
        if touches == 0 {
            return Err(GestureError::InvalidTouchRange {
                minimum: touches,
                maximum: touches,
            });
        }
        self.number_of_touches_required = touches;
        Ok(())
    }

    /// Taps finished so far in the current attempt.
    pub fn taps_completed(&self) -> usize {
        self.taps_completed
    }

    fn fail(&mut self, core: &mut RecognizerCore) {
        self.pressing = false;
        self.deferred_ended = false;
        core.set_state(State::Failed);
    }

    fn on_down(&mut self, core: &mut RecognizerCore, event: &MotionEvent) {
        let focus = core.focus_point();
        if self.taps_completed == 0 {
            self.first_tap_point = focus;
        } else {
            core.cancel_message(&mut self.multi_tap_timeout);
            if distance(self.first_tap_point, focus) > core.configuration().double_tap_slop {
                self.fail(core);
                return;
            }
        }
        self.pressing = true;
        self.press_point = focus;
        self.centroid = focus;
        self.touches_in_press = event.active_pointer_count();
        self.number_of_touches = self.touches_in_press;
        let timeout = core.configuration().tap_timeout;
        self.tap_timeout = core.send_message_delayed(Message::TapTimeout, timeout);
    }

    fn on_up(&mut self, core: &mut RecognizerCore, arbiter: &Arbiter<'_>) -> bool {
        core.cancel_message(&mut self.tap_timeout);
        self.pressing = false;
        self.number_of_touches = 0;
        if self.touches_in_press != self.number_of_touches_required {
            self.fail(core);
            return false;
        }

        self.taps_completed += 1;
        if self.taps_completed < self.number_of_taps_required {
            let timeout = core.configuration().double_tap_timeout;
            self.multi_tap_timeout = core.send_message_delayed(Message::MultiTapTimeout, timeout);
            return false;
        }

        self.location = self.centroid;
        if core.is_waiting_for_failure() {
            self.deferred_ended = true;
            return false;
        }
        core.recognize(arbiter, State::Ended);
        core.state() == State::Ended
    }
}

impl GestureBehavior for TapGesture {
    fn on_touch_event(
        &mut self,
        core: &mut RecognizerCore,
        event: &MotionEvent,
        arbiter: &Arbiter<'_>,
    ) -> bool {
        let focus = core.focus_point();
        match event.action() {
            MotionAction::Down => {
                self.on_down(core, event);
                false
            }
            _ if !self.pressing => false,
            MotionAction::PointerDown => {
                let count = event.active_pointer_count();
                self.number_of_touches = count;
                self.touches_in_press = self.touches_in_press.max(count);
                if count > self.number_of_touches_required {
                    self.fail(core);
                } else {
                    self.press_point = focus;
                    self.centroid = focus;
                }
                false
            }
            MotionAction::PointerUp => {
                self.number_of_touches = event.active_pointer_count();
                self.press_point = focus;
                false
            }
            MotionAction::Move => {
                if distance(self.press_point, focus) > core.configuration().touch_slop {
                    self.fail(core);
                }
                false
            }
            MotionAction::Up => self.on_up(core, arbiter),
            MotionAction::Cancel => {
                self.fail(core);
                false
            }
        }
    }

    fn on_message(&mut self, core: &mut RecognizerCore, message: Message, _arbiter: &Arbiter<'_>) {
        match message {
            Message::TapTimeout => self.tap_timeout = None,
            Message::MultiTapTimeout => self.multi_tap_timeout = None,
            _ => {}
        }
        match message {
            Message::TapTimeout if self.pressing => self.fail(core),
            Message::MultiTapTimeout if !self.pressing && !self.deferred_ended => {
                self.fail(core)
            }
            _ => {}
        }
    }

    fn on_failure_requirement_met(&mut self, core: &mut RecognizerCore, arbiter: &Arbiter<'_>) {
        if self.deferred_ended && core.state() == State::Possible {
            self.deferred_ended = false;
            core.recognize(arbiter, State::Ended);
        }
    }

    fn continues_attempt(&self) -> bool {
        self.taps_completed > 0 && self.taps_completed < self.number_of_taps_required
    }

    fn reset(&mut self) {
        self.taps_completed = 0;
        self.pressing = false;
        self.touches_in_press = 0;
        self.number_of_touches = 0;
        self.press_point = Point::ZERO;
        self.centroid = Point::ZERO;
        self.first_tap_point = Point::ZERO;
        self.deferred_ended = false;
        self.tap_timeout = None;
        self.multi_tap_timeout = None;
    }

    fn number_of_touches(&self) -> usize {
        self.number_of_touches
    }

    fn location(&self, _core: &RecognizerCore) -> Point {
        self.location
    }
}
