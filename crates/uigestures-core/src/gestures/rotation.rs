use crate::arbiter::Arbiter;
use crate::geometry::{angle, normalize_angle};
use crate::motion_event::{MotionAction, MotionEvent};
use crate::recognizer::{GestureBehavior, RecognizerCore, State};

/// Two-finger rotation reporting the accumulated angle in radians.
///
/// The angle is summed from wrapped per-event deltas, so it keeps growing
/// past a half turn. Positive values rotate from the x axis towards the y
/// axis.
#[derive(Clone, Debug)]
pub struct RotationGesture {
    number_of_touches: usize,
    tracking_pair: bool,
    last_angle: f32,
    rotation: f32,
    velocity: f32,
    last_time: u64,
    deferred_began: bool,
}

impl Default for RotationGesture {
    fn default() -> Self {
        Self::new()
    }
}

impl RotationGesture {
    pub fn new() -> Self {
        Self {
            number_of_touches: 0,
            tracking_pair: false,
            last_angle: 0.0,
            rotation: 0.0,
            velocity: 0.0,
            last_time: 0,
            deferred_began: false,
        }
    }

    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    /// Radians per second.
    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    fn pair_angle(event: &MotionEvent) -> Option<f32> {
        let first = event.pointer(0)?;
        let second = event.pointer(1)?;
        Some(angle(first.position, second.position))
    }

    fn on_move(
        &mut self,
        core: &mut RecognizerCore,
        event: &MotionEvent,
        arbiter: &Arbiter<'_>,
    ) -> bool {
        if !self.tracking_pair || self.number_of_touches != 2 {
            return false;
        }
        let Some(current) = Self::pair_angle(event) else {
            return false;
        };
        let delta = normalize_angle(current - self.last_angle);
        self.last_angle = current;
        self.rotation += delta;
        let elapsed = event.event_time().saturating_sub(self.last_time);
        if elapsed > 0 {
            self.velocity = delta * 1000.0 / elapsed as f32;
        }
        self.last_time = event.event_time();

        match core.state() {
            State::Possible => {
                if self.deferred_began || self.rotation.abs() <= core.configuration().rotation_slop
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

impl GestureBehavior for RotationGesture {
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
                match core.state() {
                    State::Possible if count == 2 => {
                        if let Some(angle) = Self::pair_angle(event) {
                            self.tracking_pair = true;
                            self.last_angle = angle;
                            self.rotation = 0.0;
                            self.velocity = 0.0;
                            self.last_time = event.event_time();
                        }
                    }
                    State::Possible => {
                        self.deferred_began = false;
                        core.set_state(State::Failed);
                    }
                    State::Began | State::Changed => core.set_state(State::Cancelled),
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
                self.tracking_pair = false;
                self.deferred_began = false;
                false
            }
            MotionAction::Move => self.on_move(core, event, arbiter),
            MotionAction::Up | MotionAction::Cancel => {
                self.number_of_touches = 0;
                self.tracking_pair = false;
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
        if self.deferred_began && self.tracking_pair && core.state() == State::Possible {
            self.deferred_began = false;
            core.recognize(arbiter, State::Began);
        }
    }

    fn reset(&mut self) {
        self.number_of_touches = 0;
        self.tracking_pair = false;
        self.last_angle = 0.0;
        self.rotation = 0.0;
        self.velocity = 0.0;
        self.last_time = 0;
        self.deferred_began = false;
    }

    fn number_of_touches(&self) -> usize {
        self.number_of_touches
    }
}
