//! Owner of a set of recognizers fed by one event stream.

use crate::arbiter::{Arbiter, DelegateCallback};
use crate::clock::Clock;
use crate::collections::map::HashSet;
use crate::configuration::GestureConfiguration;
use crate::error::GestureError;
use crate::handler::{Handler, MessageQueue};
use crate::motion_event::{MotionAction, MotionEvent, PointerId};
use crate::recognizer::{
    Gesture, GestureRecognizer, IdAllocator, RecognizerId, StateNotification,
};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;

/// Dispatches pointer events to its recognizers in insertion order and
/// fires their timers.
///
/// Every recognizer sees the same event stream. Transitions are announced
/// right after the hook that caused them, and the recognizers waiting on a
/// transition react before the next recognizer sees the event.
pub struct GestureRecognizerDelegate {
    recognizers: Vec<GestureRecognizer>,
    touched: HashSet<PointerId>,
    ids: IdAllocator,
    config: GestureConfiguration,
    queue: Rc<RefCell<MessageQueue>>,
    callback: Option<Box<dyn DelegateCallback>>,
    enabled: bool,
}

impl Default for GestureRecognizerDelegate {
    fn default() -> Self {
        Self::new()
    }
}

impl GestureRecognizerDelegate {
    pub fn new() -> Self {
        Self {
            recognizers: Vec::new(),
            touched: HashSet::default(),
            ids: IdAllocator::new(),
            config: GestureConfiguration::default(),
            queue: Rc::new(RefCell::new(MessageQueue::new())),
            callback: None,
            enabled: true,
        }
    }

    pub fn with_configuration(config: GestureConfiguration) -> Result<Self, GestureError> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::new()
        })
    }

    pub fn configuration(&self) -> &GestureConfiguration {
        &self.config
    }

    pub fn set_callback(&mut self, callback: impl DelegateCallback + 'static) {
        self.callback = Some(Box::new(callback));
    }

    pub fn clear_callback(&mut self) {
        self.callback = None;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// A disabled delegate absorbs every event and resets its recognizers.
    pub fn set_enabled(&mut self, enabled: bool) {
        if self.enabled && !enabled {
            for recognizer in &mut self.recognizers {
                recognizer.reset();
                recognizer.set_receives_touches(false);
            }
            self.touched.clear();
        }
        self.enabled = enabled;
    }

    /// Builds a recognizer with a fresh id and this delegate's configuration.
    /// It is not attached until passed to
    /// [`add_gesture_recognizer`](Self::add_gesture_recognizer).
    pub fn create_recognizer(&mut self, gesture: impl Into<Gesture>) -> GestureRecognizer {
        GestureRecognizer::new(self.ids.allocate(), self.config, gesture)
    }

    pub fn add_gesture_recognizer(
        &mut self,
        mut recognizer: GestureRecognizer,
    ) -> Result<RecognizerId, GestureError> {
        let id = recognizer.id();
        if self.index_of(id).is_some() {
            return Err(GestureError::DuplicateRecognizer { id });
        }
        self.ids.reserve(id);
        recognizer.attach(Handler::new(&self.queue, id));
        log::debug!("{} {} added", recognizer.gesture_type(), id);
        self.recognizers.push(recognizer);
        Ok(id)
    }

    /// Detaches and returns the recognizer, reset and with no watchers left.
    /// Recognizers that required it to fail lose that requirement.
    pub fn remove_gesture_recognizer(&mut self, id: RecognizerId) -> Option<GestureRecognizer> {
        let index = self.index_of(id)?;
        let mut recognizer = self.recognizers.remove(index);
        recognizer.detach();
        self.release_watchers_of(id);
        log::debug!("{} {} removed", recognizer.gesture_type(), id);
        Some(recognizer)
    }

    /// Removes every recognizer, in insertion order.
    pub fn clear(&mut self) -> Vec<GestureRecognizer> {
        let mut removed = std::mem::take(&mut self.recognizers);
        for recognizer in &mut removed {
            recognizer.detach();
        }
        self.touched.clear();
        log::debug!("cleared {} recognizers", removed.len());
        removed
    }

    pub fn recognizer(&self, id: RecognizerId) -> Option<&GestureRecognizer> {
        self.recognizers.iter().find(|recognizer| recognizer.id() == id)
    }

    pub fn recognizer_mut(&mut self, id: RecognizerId) -> Option<&mut GestureRecognizer> {
        self.recognizers
            .iter_mut()
            .find(|recognizer| recognizer.id() == id)
    }

    pub fn recognizers(&self) -> &[GestureRecognizer] {
        &self.recognizers
    }

    pub fn len(&self) -> usize {
        self.recognizers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recognizers.is_empty()
    }

    /// Makes `id` wait for `other` to fail, or clears its requirement.
    pub fn set_require_failure_of(
        &mut self,
        id: RecognizerId,
        other: Option<RecognizerId>,
    ) -> Result<(), GestureError> {
        let index = self
            .index_of(id)
            .ok_or(GestureError::UnknownRecognizer { id })?;
        let requirement = match other {
            Some(other) => {
                let other_index = self
                    .index_of(other)
                    .ok_or(GestureError::UnknownRecognizer { id: other })?;
                Some(self.recognizers[other_index].failure_requirement())
            }
            None => None,
        };
        self.recognizers[index].set_failure_requirement(requirement);
        Ok(())
    }

    /// Pointers currently down, as seen by this delegate.
    pub fn touched_pointer_count(&self) -> usize {
        self.touched.len()
    }

    /// Deadline of the earliest pending timer, in event-time milliseconds.
    pub fn next_pending_deadline(&self) -> Option<u64> {
        self.queue.borrow().next_deadline()
    }

    /// Feeds one pointer event to the recognizers.
    ///
    /// Timers due at or before the event time fire first. Returns true when
    /// a recognizer that cancels touches in view handled the event, telling
    /// the host not to deliver it to the underlying content.
    pub fn on_touch_event(&mut self, event: &MotionEvent) -> bool {
        if !self.enabled {
            return false;
        }
        self.dispatch_pending(event.event_time());
        if !self.track_pointers(event) {
            log::debug!(
                "absorbed {:?} for untracked pointer {:?}",
                event.action(),
                event.action_pointer_id()
            );
            return false;
        }

        if event.action() == MotionAction::Down {
            self.begin_sequence();
        }

        let mut consumed = false;
        for index in 0..self.recognizers.len() {
            let (before, rest) = self.recognizers.split_at_mut(index);
            let Some((recognizer, after)) = rest.split_first_mut() else {
                break;
            };
            if !recognizer.is_enabled() || !recognizer.receives_touches() {
                continue;
            }

            let arbiter = Arbiter::new(self.callback.as_deref(), before, after);
            let handled = recognizer.on_touch_event(event, &arbiter);
            consumed |= handled && recognizer.cancels_touches_in_view();
            self.flush(index);
        }
        consumed
    }

    /// Fires every timer due at or before `now`, in deadline order.
    pub fn dispatch_pending(&mut self, now: u64) {
        loop {
            let due = self.queue.borrow_mut().pop_due(now);
            let Some((owner, message, _)) = due else {
                break;
            };
            let Some(index) = self.index_of(owner) else {
                continue;
            };
            {
                let (before, rest) = self.recognizers.split_at_mut(index);
                let Some((recognizer, after)) = rest.split_first_mut() else {
                    continue;
                };
                let arbiter = Arbiter::new(self.callback.as_deref(), before, after);
                recognizer.on_message(message, &arbiter);
            }
            self.flush(index);
        }
        self.queue.borrow_mut().set_now(now);
    }

    /// Fires the timers that are due according to `clock`.
    pub fn pump(&mut self, clock: &impl Clock) {
        self.dispatch_pending(clock.uptime_millis());
    }

    /// Picks the recognizers that take part in the sequence starting with a
    /// `Down` and has them all waiting on their requirements before any of
    /// them handles it.
    fn begin_sequence(&mut self) {
        for recognizer in &mut self.recognizers {
            if !recognizer.is_enabled() {
                continue;
            }
            let receives = self
                .callback
                .as_deref()
                .map_or(true, |callback| callback.should_receive_touch(recognizer.core()));
            recognizer.set_receives_touches(receives);
            if receives {
                recognizer.begin_sequence();
            }
        }
    }

    /// Drops the requirements pointing at a recognizer leaving the delegate.
    fn release_watchers_of(&mut self, id: RecognizerId) {
        for recognizer in &mut self.recognizers {
            if recognizer.require_failure_of() == Some(id) {
                log::debug!("{} no longer waits for removed {}", recognizer.id(), id);
                recognizer.set_failure_requirement(None);
            }
        }
    }

    fn index_of(&self, id: RecognizerId) -> Option<usize> {
        self.recognizers
            .iter()
            .position(|recognizer| recognizer.id() == id)
    }

    /// Updates the touched-pointer set; false means the event is malformed
    /// and must not reach the recognizers.
    fn track_pointers(&mut self, event: &MotionEvent) -> bool {
        let pointer = event.action_pointer_id();
        match event.action() {
            MotionAction::Down => {
                self.touched.clear();
                pointer.is_some_and(|id| self.touched.insert(id))
            }
            MotionAction::PointerDown => pointer.is_some_and(|id| self.touched.insert(id)),
            MotionAction::Move => !self.touched.is_empty(),
            MotionAction::PointerUp => pointer.is_some_and(|id| self.touched.remove(&id)),
            MotionAction::Up => {
                let tracked = pointer.is_some_and(|id| self.touched.contains(&id));
                if tracked {
                    self.touched.clear();
                }
                tracked
            }
            MotionAction::Cancel => {
                let tracked = !self.touched.is_empty();
                self.touched.clear();
                tracked
            }
        }
    }

    /// Announces the transitions recorded by the recognizer at `index`, then
    /// lets the recognizers waiting on them react, until nothing is pending.
    fn flush(&mut self, index: usize) {
        let mut pending: VecDeque<StateNotification> =
            self.recognizers[index].dispatch_transitions().into_iter().collect();

        while let Some(notification) = pending.pop_front() {
            let Some(watcher) = self.index_of(notification.watcher) else {
                continue;
            };
            {
                let (before, rest) = self.recognizers.split_at_mut(watcher);
                let Some((recognizer, after)) = rest.split_first_mut() else {
                    continue;
                };
                let arbiter = Arbiter::new(self.callback.as_deref(), before, after);
                recognizer.on_state_changed(notification.source, notification.state, &arbiter);
            }
            pending.extend(self.recognizers[watcher].dispatch_transitions());
        }
    }
}

impl fmt::Debug for GestureRecognizerDelegate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GestureRecognizerDelegate")
            .field("recognizers", &self.recognizers)
            .field("touched", &self.touched.len())
            .field("config", &self.config)
            .field("pending_messages", &self.queue.borrow().len())
            .field("has_callback", &self.callback.is_some())
            .field("enabled", &self.enabled)
            .finish()
    }
}
