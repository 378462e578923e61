//! The recognizer state machine shared by every gesture.
//!
//! A [`GestureRecognizer`] pairs a [`RecognizerCore`] (state, listeners,
//! failure dependency, timers) with a [`Gesture`] variant holding the
//! gesture-specific tracking. Transitions recorded while handling an event
//! are announced by the delegate once the hook returns, so listeners always
//! see a recognizer that is not mutably borrowed.

mod base;
mod state;

pub use self::base::RecognizerCore;
pub(crate) use self::base::{FailureRequirement, StateNotification};
pub use self::state::{GestureType, IdAllocator, RecognizerId, State};

use crate::arbiter::Arbiter;
use crate::configuration::GestureConfiguration;
use crate::geometry::Point;
use crate::gestures::{
    LongPressGesture, PanGesture, PinchGesture, RotationGesture, SwipeGesture, TapGesture,
};
use crate::handler::{Handler, Message};
use crate::motion_event::MotionEvent;
use smallvec::SmallVec;

/// Touch handling hooks implemented by each gesture variant.
///
/// The core has already recorded the event and updated the focus point when
/// `on_touch_event` runs, and terminal states never reach the hooks.
pub(crate) trait GestureBehavior {
    /// Returns whether the event was handled as part of a gesture.
    fn on_touch_event(
        &mut self,
        core: &mut RecognizerCore,
        event: &MotionEvent,
        arbiter: &Arbiter<'_>,
    ) -> bool;

    fn on_message(&mut self, core: &mut RecognizerCore, message: Message, arbiter: &Arbiter<'_>) {
        let _ = (core, message, arbiter);
    }

    /// The recognizer this one waited for failed; emit what was withheld.
    fn on_failure_requirement_met(&mut self, core: &mut RecognizerCore, arbiter: &Arbiter<'_>);

    /// A `Down` arriving in `Possible` continues the current attempt
    /// instead of starting a new one.
    fn continues_attempt(&self) -> bool {
        false
    }

    fn reset(&mut self);

    fn number_of_touches(&self) -> usize;

    fn location(&self, core: &RecognizerCore) -> Point {
        core.focus_point()
    }
}

/// The closed set of gestures a recognizer can detect.
#[derive(Debug)]
pub enum Gesture {
    Pan(PanGesture),
    Tap(TapGesture),
    LongPress(LongPressGesture),
    Swipe(SwipeGesture),
    Pinch(PinchGesture),
    Rotation(RotationGesture),
}

impl Gesture {
    pub fn gesture_type(&self) -> GestureType {
        match self {
            Gesture::Pan(_) => GestureType::Pan,
            Gesture::Tap(_) => GestureType::Tap,
            Gesture::LongPress(_) => GestureType::LongPress,
            Gesture::Swipe(_) => GestureType::Swipe,
            Gesture::Pinch(_) => GestureType::Pinch,
            Gesture::Rotation(_) => GestureType::Rotation,
        }
    }

    fn behavior(&self) -> &dyn GestureBehavior {
        match self {
            Gesture::Pan(gesture) => gesture,
            Gesture::Tap(gesture) => gesture,
            Gesture::LongPress(gesture) => gesture,
            Gesture::Swipe(gesture) => gesture,
            Gesture::Pinch(gesture) => gesture,
            Gesture::Rotation(gesture) => gesture,
        }
    }

    fn behavior_mut(&mut self) -> &mut dyn GestureBehavior {
        match self {
            Gesture::Pan(gesture) => gesture,
            Gesture::Tap(gesture) => gesture,
            Gesture::LongPress(gesture) => gesture,
            Gesture::Swipe(gesture) => gesture,
            Gesture::Pinch(gesture) => gesture,
            Gesture::Rotation(gesture) => gesture,
        }
    }
}

macro_rules! gesture_variants {
    ($($variant:ident($ty:ty) => $as_ref:ident, $as_mut:ident;)*) => {
        $(
            impl From<$ty> for Gesture {
                fn from(gesture: $ty) -> Self {
                    Gesture::$variant(gesture)
                }
            }
        )*

        impl GestureRecognizer {
            $(
                pub fn $as_ref(&self) -> Option<&$ty> {
                    match &self.gesture {
                        Gesture::$variant(gesture) => Some(gesture),
                        _ => None,
                    }
                }

                pub fn $as_mut(&mut self) -> Option<&mut $ty> {
                    match &mut self.gesture {
                        Gesture::$variant(gesture) => Some(gesture),
                        _ => None,
                    }
                }
            )*
        }
    };
}

gesture_variants! {
    Pan(PanGesture) => as_pan, as_pan_mut;
    Tap(TapGesture) => as_tap, as_tap_mut;
    LongPress(LongPressGesture) => as_long_press, as_long_press_mut;
    Swipe(SwipeGesture) => as_swipe, as_swipe_mut;
    Pinch(PinchGesture) => as_pinch, as_pinch_mut;
    Rotation(RotationGesture) => as_rotation, as_rotation_mut;
}

/// One gesture detector: shared state machine plus a gesture variant.
#[derive(Debug)]
pub struct GestureRecognizer {
    core: RecognizerCore,
    gesture: Gesture,
}

impl GestureRecognizer {
    pub fn new(
        id: RecognizerId,
        config: GestureConfiguration,
        gesture: impl Into<Gesture>,
    ) -> Self {
        let gesture = gesture.into();
        Self {
            core: RecognizerCore::new(id, gesture.gesture_type(), config),
            gesture,
        }
    }

    pub fn core(&self) -> &RecognizerCore {
        &self.core
    }

    pub fn gesture(&self) -> &Gesture {
        &self.gesture
    }

    pub fn gesture_mut(&mut self) -> &mut Gesture {
        &mut self.gesture
    }

    pub fn id(&self) -> RecognizerId {
        self.core.id
    }

    pub fn gesture_type(&self) -> GestureType {
        self.core.gesture_type
    }

    pub fn state(&self) -> State {
        self.core.state
    }

    pub fn is_enabled(&self) -> bool {
        self.core.enabled
    }

    /// Disabling resets the recognizer; enabling has no other effect.
    pub fn set_enabled(&mut self, enabled: bool) {
        if self.core.enabled && !enabled {
            self.reset();
            self.core.receives_touches = false;
        }
        self.core.enabled = enabled;
    }

    pub fn tag(&self) -> Option<&str> {
        self.core.tag()
    }

    pub fn set_tag(&mut self, tag: impl Into<String>) {
        self.core.tag = Some(tag.into());
    }

    pub fn clear_tag(&mut self) {
        self.core.tag = None;
    }

    pub fn cancels_touches_in_view(&self) -> bool {
        self.core.cancels_touches_in_view
    }

    pub fn set_cancels_touches_in_view(&mut self, cancels: bool) {
        self.core.cancels_touches_in_view = cancels;
    }

    pub fn configuration(&self) -> &GestureConfiguration {
        &self.core.config
    }

    pub fn set_configuration(&mut self, config: GestureConfiguration) {
        self.core.config = config;
    }

    pub fn has_began_firing(&self) -> bool {
        self.core.began_firing
    }

    pub fn focus_point(&self) -> Point {
        self.core.focus_point
    }

    /// Location of the gesture: the focus point for continuous gestures, the
    /// recognized position for discrete ones.
    pub fn location(&self) -> Point {
        self.gesture.behavior().location(&self.core)
    }

    pub fn number_of_touches(&self) -> usize {
        self.gesture.behavior().number_of_touches()
    }

    /// Called on every observable transition with a gesture payload:
    /// `Began`, `Changed`, `Ended` and `Cancelled`.
    pub fn set_action_listener(&mut self, listener: impl FnMut(&GestureRecognizer) + 'static) {
        self.core.action_listener = Some(Box::new(listener));
    }

    pub fn clear_action_listener(&mut self) {
        self.core.action_listener = None;
    }

    /// Called on every observable transition, `Failed` included.
    pub fn set_state_listener(&mut self, listener: impl FnMut(&GestureRecognizer) + 'static) {
        self.core.state_listener = Some(Box::new(listener));
    }

    pub fn clear_state_listener(&mut self) {
        self.core.state_listener = None;
    }

    pub fn require_failure_of(&self) -> Option<RecognizerId> {
        self.core.require_failure_of()
    }

    /// Makes this recognizer withhold its recognition until `other` fails.
    ///
    /// Stops waiting on the previous requirement. Waiting starts with the
    /// next touch sequence. Both recognizers must be dispatched by the same
    /// delegate for the failure to be noticed; cycles are not detected.
    pub fn set_require_failure_of(&mut self, other: Option<&GestureRecognizer>) {
        let requirement = other.map(|other| other.core.failure_requirement());
        self.core.set_require_failure_of(requirement);
    }

    /// Returns to `Possible` without notifying anyone, stops waiting on the
    /// failure requirement and drops pending timers. Idempotent.
    pub fn reset(&mut self) {
        self.core.reset();
        self.gesture.behavior_mut().reset();
    }

    pub(crate) fn set_failure_requirement(&mut self, requirement: Option<FailureRequirement>) {
        self.core.set_require_failure_of(requirement);
    }

    pub(crate) fn failure_requirement(&self) -> FailureRequirement {
        self.core.failure_requirement()
    }

    pub(crate) fn attach(&mut self, handler: Handler) {
        self.core.handler = Some(handler);
        self.core.receives_touches = false;
    }

    pub(crate) fn detach(&mut self) {
        self.reset();
        self.core.handler = None;
        self.core.receives_touches = false;
        self.core.clear_dependents();
    }

    pub(crate) fn receives_touches(&self) -> bool {
        self.core.receives_touches
    }

    pub(crate) fn set_receives_touches(&mut self, receives: bool) {
        self.core.receives_touches = receives;
    }

    /// Prepares for a new touch sequence: resets unless a multi-step attempt
    /// continues, then waits on the failure requirement. The delegate runs
    /// this on every recognizer before any of them sees the `Down`, so a
    /// requirement failing on that `Down` is heard.
    pub(crate) fn begin_sequence(&mut self) {
        let behavior = self.gesture.behavior();
        if self.core.state != State::Possible || !behavior.continues_attempt() {
            self.reset();
        }
        self.core.start_listening();
    }

    pub(crate) fn on_touch_event(&mut self, event: &MotionEvent, arbiter: &Arbiter<'_>) -> bool {
        self.core.record_event(event);
        if self.core.state.is_finished() {
            return false;
        }
        self.gesture
            .behavior_mut()
            .on_touch_event(&mut self.core, event, arbiter)
    }

    pub(crate) fn on_message(&mut self, message: Message, arbiter: &Arbiter<'_>) {
        if !self.core.enabled || self.core.state.is_finished() {
            return;
        }
        log::trace!("{} {} handles {:?}", self.core.gesture_type, self.core.id, message);
        self.gesture
            .behavior_mut()
            .on_message(&mut self.core, message, arbiter);
    }

    /// Reacts to the recognizer this one requires to fail reaching `state`.
    pub(crate) fn on_state_changed(
        &mut self,
        source: RecognizerId,
        state: State,
        arbiter: &Arbiter<'_>,
    ) {
        if !self.core.listening || self.core.require_failure_of() != Some(source) {
            return;
        }
        match state {
            State::Failed | State::Cancelled => {
                self.core.stop_listening();
                if !self.core.state.is_finished() {
                    self.gesture
                        .behavior_mut()
                        .on_failure_requirement_met(&mut self.core, arbiter);
                }
            }
            State::Began | State::Ended => {
                self.core.stop_listening();
                if self.core.state == State::Possible {
                    log::debug!(
                        "{} {} fails because {} recognized",
                        self.core.gesture_type,
                        self.core.id,
                        source
                    );
                    self.core.set_state(State::Failed);
                }
            }
            State::Possible | State::Changed => {}
        }
    }

    /// Announces the transitions recorded since the last call: action
    /// listener, then state listener, for each in order. Returns the
    /// notifications owed to the recognizers waiting on this one.
    pub(crate) fn dispatch_transitions(&mut self) -> SmallVec<[StateNotification; 4]> {
        let mut notifications = SmallVec::new();
        if self.core.transitions.is_empty() {
            return notifications;
        }

        let transitions = std::mem::take(&mut self.core.transitions);
        let mut action_listener = self.core.action_listener.take();
        let mut state_listener = self.core.state_listener.take();
        let current = self.core.state;
        let source = self.core.id;

        for transition in transitions {
            // Listeners observe the state the transition announced.
            self.core.state = transition.state;
            if transition.state.carries_payload() {
                if let Some(listener) = action_listener.as_mut() {
                    listener(&*self);
                }
            }
            if let Some(listener) = state_listener.as_mut() {
                listener(&*self);
            }
            notifications.extend(transition.dependents.iter().map(|&watcher| {
                StateNotification {
                    watcher,
                    source,
                    state: transition.state,
                }
            }));
        }

        self.core.state = current;
        self.core.action_listener = action_listener;
        self.core.state_listener = state_listener;
        notifications
    }
}

#[cfg(test)]
#[path = "tests/recognizer_tests.rs"]
mod tests;
