use super::state::{GestureType, RecognizerId, State};
use super::GestureRecognizer;
use crate::arbiter::Arbiter;
use crate::collections::map::HashSet;
use crate::configuration::GestureConfiguration;
use crate::geometry::{compute_focus_point, Point};
use crate::handler::{Handler, Message, MessageToken};
use crate::motion_event::MotionEvent;
use smallvec::SmallVec;
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

pub(crate) type Listener = Box<dyn FnMut(&GestureRecognizer)>;

/// Ids of the recognizers currently waiting for the owner to fail.
pub(crate) type DependentSet = Rc<RefCell<HashSet<RecognizerId>>>;

/// Non-owning link from a watcher to the recognizer it requires to fail.
#[derive(Clone, Debug)]
pub(crate) struct FailureRequirement {
    pub(crate) id: RecognizerId,
    pub(crate) dependents: Weak<RefCell<HashSet<RecognizerId>>>,
}

/// One observable transition waiting to be announced.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Transition {
    pub(crate) state: State,
    pub(crate) dependents: SmallVec<[RecognizerId; 2]>,
}

/// Announcement of `source` reaching `state`, addressed to `watcher`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct StateNotification {
    pub(crate) watcher: RecognizerId,
    pub(crate) source: RecognizerId,
    pub(crate) state: State,
}

/// State shared by every gesture variant.
pub struct RecognizerCore {
    pub(crate) id: RecognizerId,
    pub(crate) gesture_type: GestureType,
    pub(crate) state: State,
    pub(crate) enabled: bool,
    pub(crate) tag: Option<String>,
    pub(crate) cancels_touches_in_view: bool,
    pub(crate) began_firing: bool,
    pub(crate) receives_touches: bool,
    pub(crate) focus_point: Point,
    pub(crate) last_event: Option<MotionEvent>,
    pub(crate) config: GestureConfiguration,
    pub(crate) require_failure_of: Option<FailureRequirement>,
    pub(crate) listening: bool,
    pub(crate) dependents: DependentSet,
    pub(crate) handler: Option<Handler>,
    pub(crate) transitions: SmallVec<[Transition; 2]>,
    pub(crate) action_listener: Option<Listener>,
    pub(crate) state_listener: Option<Listener>,
}

impl RecognizerCore {
    pub(crate) fn new(
        id: RecognizerId,
        gesture_type: GestureType,
        config: GestureConfiguration,
    ) -> Self {
        Self {
            id,
            gesture_type,
            state: State::Possible,
            enabled: true,
            tag: None,
            cancels_touches_in_view: true,
            began_firing: false,
            receives_touches: false,
            focus_point: Point::ZERO,
            last_event: None,
            config,
            require_failure_of: None,
            listening: false,
            dependents: Rc::new(RefCell::new(HashSet::default())),
            handler: None,
            transitions: SmallVec::new(),
            action_listener: None,
            state_listener: None,
        }
    }

    pub fn id(&self) -> RecognizerId {
        self.id
    }

    pub fn gesture_type(&self) -> GestureType {
        self.gesture_type
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    pub fn cancels_touches_in_view(&self) -> bool {
        self.cancels_touches_in_view
    }

    /// Whether the current attempt reached `Began`, `Changed` or `Ended`.
    pub fn has_began_firing(&self) -> bool {
        self.began_firing
    }

    /// Centroid of the pointers that were down after the last event.
    pub fn focus_point(&self) -> Point {
        self.focus_point
    }

    pub fn last_event(&self) -> Option<&MotionEvent> {
        self.last_event.as_ref()
    }

    pub fn configuration(&self) -> &GestureConfiguration {
        &self.config
    }

    pub fn require_failure_of(&self) -> Option<RecognizerId> {
        self.require_failure_of.as_ref().map(|requirement| requirement.id)
    }

    /// True while this recognizer withholds its recognition until the
    /// recognizer it requires to fail has decided.
    pub fn is_waiting_for_failure(&self) -> bool {
        self.listening
    }

    /// Recognizers currently waiting for this one to fail, in id order.
    pub fn dependents(&self) -> Vec<RecognizerId> {
        let mut ids: Vec<_> = self.dependents.borrow().iter().copied().collect();
        ids.sort_unstable();
        ids
    }

    pub(crate) fn failure_requirement(&self) -> FailureRequirement {
        FailureRequirement {
            id: self.id,
            dependents: Rc::downgrade(&self.dependents),
        }
    }

    pub(crate) fn record_event(&mut self, event: &MotionEvent) {
        self.focus_point = compute_focus_point(event);
        self.last_event = Some(event.clone());
        log::trace!(
            "{} {} focus {:?} after {:?}",
            self.gesture_type,
            self.id,
            self.focus_point,
            event.action()
        );
    }

    /// Moves to `state` and queues the announcement if it is observable:
    /// any change, and every `Changed` even when already changed.
    pub(crate) fn set_state(&mut self, state: State) {
        let previous = self.state;
        if previous == state && state != State::Changed {
            return;
        }
        self.state = state;
        log::debug!(
            "{} {} {} -> {}",
            self.gesture_type,
            self.id,
            previous,
            state
        );

        if matches!(state, State::Began | State::Changed | State::Ended) {
            self.began_firing = true;
        }
        if state.is_finished() {
            self.remove_all_messages();
        }

        let mut dependents: SmallVec<[RecognizerId; 2]> =
            self.dependents.borrow().iter().copied().collect();
        dependents.sort_unstable();
        self.transitions.push(Transition { state, dependents });
    }

    /// Takes the recognizing transition to `state` if the delegate policy
    /// allows this recognizer to begin alongside the active ones, or fails.
    pub(crate) fn recognize(&mut self, arbiter: &Arbiter<'_>, state: State) {
        if arbiter.should_begin(self) && arbiter.should_recognize_simultaneously(self) {
            self.set_state(state);
        } else {
            log::debug!("{} {} refused by delegate policy", self.gesture_type, self.id);
            self.set_state(State::Failed);
        }
    }

    pub(crate) fn start_listening(&mut self) {
        if self.listening {
            return;
        }
        let Some(requirement) = self.require_failure_of.as_ref() else {
            return;
        };
        // A dropped requirement can no longer succeed.
        if let Some(dependents) = requirement.dependents.upgrade() {
            dependents.borrow_mut().insert(self.id);
            self.listening = true;
            log::trace!("{} waits for {} to fail", self.id, requirement.id);
        }
    }

    pub(crate) fn stop_listening(&mut self) {
        if !self.listening {
            return;
        }
        self.listening = false;
        if let Some(dependents) = self
            .require_failure_of
            .as_ref()
            .and_then(|requirement| requirement.dependents.upgrade())
        {
            dependents.borrow_mut().remove(&self.id);
        }
    }

    pub(crate) fn set_require_failure_of(&mut self, requirement: Option<FailureRequirement>) {
        self.stop_listening();
        self.require_failure_of = requirement;
    }

    pub(crate) fn reset(&mut self) {
        if self.state != State::Possible {
            log::debug!("{} {} reset from {}", self.gesture_type, self.id, self.state);
        }
        self.state = State::Possible;
        self.stop_listening();
        self.began_firing = false;
        self.transitions.clear();
        self.remove_all_messages();
    }

    /// Drops every watcher of this recognizer.
    pub(crate) fn clear_dependents(&mut self) {
        self.dependents.borrow_mut().clear();
    }

    pub(crate) fn send_message_delayed(
        &self,
        message: Message,
        delay: u64,
    ) -> Option<MessageToken> {
        self.handler
            .as_ref()
            .and_then(|handler| handler.send_message_delayed(message, delay))
    }

    /// Cancels the timer behind `token` and clears it.
    pub(crate) fn cancel_message(&self, token: &mut Option<MessageToken>) {
        if let (Some(handler), Some(token)) = (&self.handler, token.take()) {
            handler.remove_token(token);
        }
    }

    pub(crate) fn remove_messages(&self, message: Message) {
        if let Some(handler) = &self.handler {
            handler.remove_messages(message);
        }
    }

    pub(crate) fn remove_all_messages(&self) {
        if let Some(handler) = &self.handler {
            handler.remove_all_messages();
        }
    }

    #[cfg(test)]
    pub(crate) fn has_messages(&self, message: Message) -> bool {
        self.handler
            .as_ref()
            .is_some_and(|handler| handler.has_messages(message))
    }
}

impl fmt::Debug for RecognizerCore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecognizerCore")
            .field("id", &self.id)
            .field("gesture_type", &self.gesture_type)
            .field("state", &self.state)
            .field("enabled", &self.enabled)
            .field("tag", &self.tag)
            .field("cancels_touches_in_view", &self.cancels_touches_in_view)
            .field("began_firing", &self.began_firing)
            .field("focus_point", &self.focus_point)
            .field("require_failure_of", &self.require_failure_of())
            .field("listening", &self.listening)
            .field("dependents", &self.dependents())
            .field("attached", &self.handler.is_some())
            .finish_non_exhaustive()
    }
}
