use crate::arbiter::Arbiter;
use crate::error::GestureError;
use crate::geometry::{distance, Point};
use crate::motion_event::{MotionAction, MotionEvent};
use crate::recognizer::{GestureBehavior, RecognizerCore, State};
use crate::velocity_tracker::VelocityTracker;

/// Continuous drag of one or more fingers.
///
/// Begins once the focus point leaves the touch slop with a pointer count
/// inside `minimum..=maximum` touches. Translation is measured from the
/// focus point at the start of the touch sequence; pointer count changes
/// re-anchor it so the translation does not jump.
///
/// Exceeding the maximum fails the pan before it begins and cancels it
/// afterwards. Lifting fingers ends it once fewer than the minimum remain.
#[derive(Clone, Debug)]
pub struct PanGesture {
    minimum_number_of_touches: usize,
    maximum_number_of_touches: usize,
    tracking: bool,
    deferred_began: bool,
    number_of_touches: usize,
    start_focus: Point,
    last_focus: Point,
    scroll: Point,
    velocity: Point,
    velocity_tracker: VelocityTracker,
}

impl Default for PanGesture {
    fn default() -> Self {
        Self::new()
    }
}

impl PanGesture {
    pub fn new() -> Self {
        Self {
            minimum_number_of_touches: 1,
            maximum_number_of_touches: usize::MAX,
            tracking: false,
            deferred_began: false,
            number_of_touches: 0,
            start_focus: Point::ZERO,
            last_focus: Point::ZERO,
            scroll: Point::ZERO,
            velocity: Point::ZERO,
            velocity_tracker: VelocityTracker::new(),
        }
    }

    /// Builder form of [`PanGesture::set_number_of_touches_range`].
    pub fn with_number_of_touches(
        mut self,
        minimum: usize,
        maximum: usize,
    ) -> Result<Self, GestureError> {
        self.set_number_of_touches_range(minimum, maximum)?;
        Ok(self)
    }

    pub fn minimum_number_of_touches(&self) -> usize {
        self.minimum_number_of_touches
    }

    pub fn maximum_number_of_touches(&self) -> usize {
        self.maximum_number_of_touches
    }

    /// Requires `1 <= minimum <= maximum`.
    pub fn set_number_of_touches_range(
        &mut self,
        minimum: usize,
        maximum: usize,
    ) -> Result<(), GestureError> {
        if minimum == 0 || minimum > maximum {
            return Err(GestureError::InvalidTouchRange { minimum, maximum });
        }
        self.minimum_number_of_touches = minimum;
        self.maximum_number_of_touches = maximum;
        Ok(())
    }

    /// Displacement of the focus point since the gesture started.
    pub fn translation(&self) -> Point {
        self.last_focus - self.start_focus
    }

    /// Makes the current translation read `translation`; later movement
    /// accumulates on top of it.
    pub fn set_translation(&mut self, translation: Point) {
        self.start_focus = self.last_focus - translation;
    }

    /// Focus point movement since the previous `Changed`.
    pub fn scroll(&self) -> Point {
        self.scroll
    }

    /// Focus point velocity in pixels per second.
    pub fn velocity(&self) -> Point {
        self.velocity
    }

    fn in_range(&self, count: usize) -> bool {
        (self.minimum_number_of_touches..=self.maximum_number_of_touches).contains(&count)
    }

    fn begin_tracking(&mut self, event: &MotionEvent, focus: Point) {
        self.reset();
        self.tracking = true;
        self.number_of_touches = event.active_pointer_count();
        self.start_focus = focus;
        self.last_focus = focus;
        self.velocity_tracker.add_position(event.event_time(), focus);
    }

    fn reanchor(&mut self, event: &MotionEvent, focus: Point) {
        self.start_focus += focus - self.last_focus;
        self.last_focus = focus;
        self.scroll = Point::ZERO;
        self.velocity_tracker.reset();
        self.velocity_tracker.add_position(event.event_time(), focus);
    }

    /// Too many fingers fail or cancel the pan; lifting below the minimum
    /// after it began ends it.
    fn on_pointer_count_changed(
        &mut self,
        core: &mut RecognizerCore,
        action: MotionAction,
        count: usize,
    ) {
        match core.state() {
            State::Possible if count > self.maximum_number_of_touches => {
                self.deferred_began = false;
                core.set_state(State::Failed);
            }
            State::Began | State::Changed if count > self.maximum_number_of_touches => {
                core.set_state(State::Cancelled);
            }
            State::Began | State::Changed
                if action == MotionAction::PointerUp && count < self.minimum_number_of_touches =>
            {
                core.set_state(State::Ended);
            }
            _ => {}
        }
    }

    fn on_move(
        &mut self,
        core: &mut RecognizerCore,
        event: &MotionEvent,
        arbiter: &Arbiter<'_>,
    ) -> bool {
        let count = event.active_pointer_count();
        self.number_of_touches = count;
        if !self.in_range(count) {
            if core.state() == State::Possible && count > self.maximum_number_of_touches {
                self.deferred_began = false;
                core.set_state(State::Failed);
            }
            return false;
        }

        let focus = core.focus_point();
        self.velocity_tracker.add_position(event.event_time(), focus);
        self.scroll = focus - self.last_focus;
        self.last_focus = focus;
        self.velocity = self
            .velocity_tracker
            .calculate_velocity(core.configuration().maximum_fling_velocity);

        match core.state() {
            State::Possible => {
                if self.deferred_began
                    || distance(self.start_focus, focus) <= core.configuration().touch_slop
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

impl GestureBehavior for PanGesture {
    fn on_touch_event(
        &mut self,
        core: &mut RecognizerCore,
        event: &MotionEvent,
        arbiter: &Arbiter<'_>,
    ) -> bool {
        let focus = core.focus_point();
        match event.action() {
            MotionAction::Down => {
                self.begin_tracking(event, focus);
                false
            }
            _ if !self.tracking => false,
            MotionAction::PointerDown | MotionAction::PointerUp => {
                let was_active = core.state().is_active();
                let count = event.active_pointer_count();
                self.number_of_touches = count;
                self.reanchor(event, focus);
                self.on_pointer_count_changed(core, event.action(), count);
                was_active
            }
            MotionAction::Move => self.on_move(core, event, arbiter),
            MotionAction::Up => {
                self.tracking = false;
                self.number_of_touches = 0;
                self.deferred_began = false;
                if core.state().is_active() {
                    self.velocity = self
                        .velocity_tracker
                        .calculate_velocity(core.configuration().maximum_fling_velocity);
                    core.set_state(State::Ended);
                    true
                } else {
                    core.set_state(State::Failed);
                    false
                }
            }
            MotionAction::Cancel => {
                self.tracking = false;
                self.number_of_touches = 0;
                self.deferred_began = false;
                if core.state().is_active() {
                    core.set_state(State::Cancelled);
                } else {
                    core.set_state(State::Failed);
                }
                false
            }
        }
    }

    fn on_failure_requirement_met(&mut self, core: &mut RecognizerCore, arbiter: &Arbiter<'_>) {
        if self.deferred_began && self.tracking && core.state() == State::Possible {
            self.deferred_began = false;
            core.recognize(arbiter, State::Began);
        }
    }

    fn reset(&mut self) {
        self.tracking = false;
        self.deferred_began = false;
        self.number_of_touches = 0;
        self.start_focus = Point::ZERO;
        self.last_focus = Point::ZERO;
        self.scroll = Point::ZERO;
        self.velocity = Point::ZERO;
        self.velocity_tracker.reset();
    }

    fn number_of_touches(&self) -> usize {
        self.number_of_touches
    }
}
