use crate::arbiter::Arbiter;
use crate::error::GestureError;
use crate::geometry::Point;
use crate::gesture_constants::SWIPE_AXIS_DOMINANCE;
use crate::handler::Message;
use crate::motion_event::{MotionAction, MotionEvent};
use crate::recognizer::{GestureBehavior, RecognizerCore, State};
use std::ops::{BitOr, BitOrAssign};

/// Set of swipe directions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SwipeDirection(u8);

impl SwipeDirection {
    pub const NONE: Self = Self(0);
    pub const RIGHT: Self = Self(1 << 0);
    pub const LEFT: Self = Self(1 << 1);
    pub const UP: Self = Self(1 << 2);
    pub const DOWN: Self = Self(1 << 3);
    pub const HORIZONTAL: Self = Self(Self::RIGHT.0 | Self::LEFT.0);
    pub const VERTICAL: Self = Self(Self::UP.0 | Self::DOWN.0);
    pub const ALL: Self = Self(Self::HORIZONTAL.0 | Self::VERTICAL.0);

    pub fn insert(&mut self, direction: SwipeDirection) {
        self.0 |= direction.0;
    }

    pub fn remove(&mut self, direction: SwipeDirection) {
        self.0 &= !direction.0;
    }

    /// True if every direction in `direction` is in the set.
    pub fn contains(&self, direction: SwipeDirection) -> bool {
        self.0 & direction.0 == direction.0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn bits(&self) -> u8 {
        self.0
    }
}

impl Default for SwipeDirection {
    fn default() -> Self {
        Self::RIGHT
    }
}

impl BitOr for SwipeDirection {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for SwipeDirection {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

/// Discrete, quick straight stroke in one of the allowed directions.
///
/// Evaluated when the last finger lifts: the dominant axis must beat the
/// other by [`SWIPE_AXIS_DOMINANCE`], travel at least the minimum distance
/// at the minimum fling velocity, and do so within the maximum duration.
#[derive(Clone, Debug)]
pub struct SwipeGesture {
    direction: SwipeDirection,
    number_of_touches_required: usize,
    number_of_touches: usize,
    touches_in_swipe: usize,
    tracking: bool,
    deferred_ended: bool,
    start_point: Point,
    last_focus: Point,
    start_time: u64,
    recognized_direction: Option<SwipeDirection>,
    location: Point,
}

impl Default for SwipeGesture {
    fn default() -> Self {
        Self::new()
    }
}

impl SwipeGesture {
    pub fn new() -> Self {
        Self {
            direction: SwipeDirection::default(),
            number_of_touches_required: 1,
            number_of_touches: 0,
            touches_in_swipe: 0,
            tracking: false,
            deferred_ended: false,
            start_point: Point::ZERO,
            last_focus: Point::ZERO,
            start_time: 0,
            recognized_direction: None,
            location: Point::ZERO,
        }
    }

    pub fn with_direction(mut self, direction: SwipeDirection) -> Self {
        self.direction = direction;
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

    /// Directions this recognizer accepts.
    pub fn direction(&self) -> SwipeDirection {
        self.direction
    }

    pub fn set_direction(&mut self, direction: SwipeDirection) {
        self.direction = direction;
    }

    pub fn number_of_touches_required(&self) -> usize {
        self.number_of_touches_required
    }

    /// The single direction of the last recognized swipe.
    pub fn recognized_direction(&self) -> Option<SwipeDirection> {
        self.recognized_direction
    }

    fn fail(&mut self, core: &mut RecognizerCore) {
        self.tracking = false;
        self.deferred_ended = false;
        core.set_state(State::Failed);
    }

    fn classify(&self, core: &RecognizerCore, end_point: Point, end_time: u64) -> Option<SwipeDirection> {
        let config = core.configuration();
        let duration = end_time.saturating_sub(self.start_time);
        if duration > config.swipe_maximum_duration {
            return None;
        }

        let delta = end_point - self.start_point;
        let (abs_dx, abs_dy) = (delta.x.abs(), delta.y.abs());
        let major = abs_dx.max(abs_dy);
        let minor = abs_dx.min(abs_dy);
        if major < config.swipe_minimum_distance || major < minor * SWIPE_AXIS_DOMINANCE {
            return None;
        }

        let velocity = major * 1000.0 / duration.max(1) as f32;
        if velocity < config.minimum_fling_velocity {
            return None;
        }

        let direction = if abs_dx >= abs_dy {
            if delta.x >= 0.0 {
                SwipeDirection::RIGHT
            } else {
                SwipeDirection::LEFT
            }
        } else if delta.y >= 0.0 {
            SwipeDirection::DOWN
        } else {
            SwipeDirection::UP
        };
        self.direction.contains(direction).then_some(direction)
    }

    fn on_up(&mut self, core: &mut RecognizerCore, event: &MotionEvent, arbiter: &Arbiter<'_>) -> bool {
        core.remove_messages(Message::SwipeTimeout);
        self.number_of_touches = 0;
        if self.touches_in_swipe != self.number_of_touches_required {
            self.fail(core);
            return false;
        }
        let Some(direction) = self.classify(core, self.last_focus, event.event_time()) else {
            self.fail(core);
            return false;
        };

        self.tracking = false;
        self.recognized_direction = Some(direction);
        self.location = self.start_point;
        if core.is_waiting_for_failure() {
            self.deferred_ended = true;
            return false;
        }
        core.recognize(arbiter, State::Ended);
        core.state() == State::Ended
    }
}

impl GestureBehavior for SwipeGesture {
    fn on_touch_event(
        &mut self,
        core: &mut RecognizerCore,
        event: &MotionEvent,
        arbiter: &Arbiter<'_>,
    ) -> bool {
        let focus = core.focus_point();
        match event.action() {
            MotionAction::Down => {
                self.tracking = true;
                self.start_point = focus;
                self.last_focus = focus;
                self.start_time = event.event_time();
                self.number_of_touches = event.active_pointer_count();
                self.touches_in_swipe = self.number_of_touches;
                let timeout = core.configuration().swipe_maximum_duration;
                core.send_message_delayed(Message::SwipeTimeout, timeout);
                false
            }
            _ if !self.tracking => false,
            MotionAction::PointerDown | MotionAction::PointerUp => {
                self.number_of_touches = event.active_pointer_count();
                self.touches_in_swipe = self.touches_in_swipe.max(self.number_of_touches);
                if self.number_of_touches > self.number_of_touches_required {
                    self.fail(core);
                } else {
                    self.start_point += focus - self.last_focus;
                    self.last_focus = focus;
                }
                false
            }
            MotionAction::Move => {
                self.last_focus = focus;
                false
            }
            MotionAction::Up => self.on_up(core, event, arbiter),
            MotionAction::Cancel => {
                self.fail(core);
                false
            }
        }
    }

    fn on_message(&mut self, core: &mut RecognizerCore, message: Message, _arbiter: &Arbiter<'_>) {
        if message == Message::SwipeTimeout && self.tracking {
            self.fail(core);
        }
    }

    fn on_failure_requirement_met(&mut self, core: &mut RecognizerCore, arbiter: &Arbiter<'_>) {
        if self.deferred_ended && core.state() == State::Possible {
            self.deferred_ended = false;
            core.recognize(arbiter, State::Ended);
        }
    }

    fn reset(&mut self) {
        self.tracking = false;
        self.deferred_ended = false;
        self.number_of_touches = 0;
        self.touches_in_swipe = 0;
        self.start_point = Point::ZERO;
        self.last_focus = Point::ZERO;
        self.start_time = 0;
        self.recognized_direction = None;
    }

    fn number_of_touches(&self) -> usize {
        self.number_of_touches
    }

    fn location(&self, _core: &RecognizerCore) -> Point {
        self.location
    }
}
