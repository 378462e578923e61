//! Cancellable deferred callbacks for timed transitions.
//!
//! The delegate owns one [`MessageQueue`]; each attached recognizer holds a
//! [`Handler`] scoped to its own id. Messages fire on the delivery thread
//! when the delegate is pumped past their deadline, never from a sleep.
//! Removing a message takes it out of the queue, so nothing stale can fire
//! after a reset.

use crate::recognizer::RecognizerId;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::{Rc, Weak};

/// Identifies one scheduled message so it can be cancelled on its own.
pub type MessageToken = u64;

/// Timed events a recognizer can schedule for itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Message {
    /// A press lasted longer than a tap may.
    TapTimeout,
    /// The window for the next tap of a multi-tap elapsed.
    MultiTapTimeout,
    /// A press lasted long enough to become a long press.
    LongPress,
    /// A swipe took longer than its maximum duration.
    SwipeTimeout,
}

#[derive(Debug)]
struct PendingMessage {
    token: MessageToken,
    owner: RecognizerId,
    message: Message,
    deadline: u64,
}

/// Deadline-ordered queue of pending messages.
#[derive(Debug)]
pub(crate) struct MessageQueue {
    entries: VecDeque<PendingMessage>,
    next_token: MessageToken,
    now: u64,
}

impl MessageQueue {
    pub(crate) fn new() -> Self {
        Self {
            entries: VecDeque::new(),
            next_token: 1,
            now: 0,
        }
    }

    #[cfg(test)]
    pub(crate) fn now(&self) -> u64 {
        self.now
    }

    /// Advances the queue's notion of the current time; never moves backwards.
    pub(crate) fn set_now(&mut self, now: u64) {
        self.now = self.now.max(now);
    }

    fn enqueue(&mut self, owner: RecognizerId, message: Message, delay: u64) -> MessageToken {
        let token = self.next_token;
        self.next_token += 1;
        let deadline = self.now.saturating_add(delay);
        // Equal deadlines keep scheduling order.
        let position = self.entries.partition_point(|entry| entry.deadline <= deadline);
        self.entries.insert(
            position,
            PendingMessage {
                token,
                owner,
                message,
                deadline,
            },
        );
        log::trace!("message {message:?} for {owner} scheduled at {deadline} (token {token})");
        token
    }

    fn remove_where(&mut self, mut predicate: impl FnMut(&PendingMessage) -> bool) {
        self.entries.retain(|entry| !predicate(entry));
    }

    /// Pops the earliest message whose deadline is at or before `now`.
    pub(crate) fn pop_due(&mut self, now: u64) -> Option<(RecognizerId, Message, u64)> {
        if self.entries.front()?.deadline > now {
            return None;
        }
        let entry = self.entries.pop_front()?;
        self.set_now(entry.deadline);
        Some((entry.owner, entry.message, entry.deadline))
    }

    pub(crate) fn next_deadline(&self) -> Option<u64> {
        self.entries.front().map(|entry| entry.deadline)
    }

    pub(crate) fn remove_owner(&mut self, owner: RecognizerId) {
        self.remove_where(|entry| entry.owner == owner);
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

/// A recognizer's view onto the delegate's message queue.
///
/// Holds the queue weakly: once the delegate is gone, scheduling is a no-op.
#[derive(Clone, Debug)]
pub(crate) struct Handler {
    queue: Weak<RefCell<MessageQueue>>,
    owner: RecognizerId,
}

impl Handler {
    pub(crate) fn new(queue: &Rc<RefCell<MessageQueue>>, owner: RecognizerId) -> Self {
        Self {
            queue: Rc::downgrade(queue),
            owner,
        }
    }

    /// Schedules `message` `delay` milliseconds after the queue's current
    /// time. Returns `None` once the delegate is gone.
    pub(crate) fn send_message_delayed(
        &self,
        message: Message,
        delay: u64,
    ) -> Option<MessageToken> {
        let queue = self.queue.upgrade()?;
        let token = queue.borrow_mut().enqueue(self.owner, message, delay);
        Some(token)
    }

    pub(crate) fn remove_messages(&self, message: Message) {
        if let Some(queue) = self.queue.upgrade() {
            let owner = self.owner;
            queue
                .borrow_mut()
                .remove_where(|entry| entry.owner == owner && entry.message == message);
        }
    }

    /// Cancels the one message scheduled under `token`, if still pending.
    pub(crate) fn remove_token(&self, token: MessageToken) {
        if let Some(queue) = self.queue.upgrade() {
            let owner = self.owner;
            queue
                .borrow_mut()
                .remove_where(|entry| entry.owner == owner && entry.token == token);
        }
    }

    pub(crate) fn remove_all_messages(&self) {
        if let Some(queue) = self.queue.upgrade() {
            queue.borrow_mut().remove_owner(self.owner);
        }
    }

    #[cfg(test)]
    pub(crate) fn has_messages(&self, message: Message) -> bool {
        self.queue.upgrade().is_some_and(|queue| {
            queue
                .borrow()
                .entries
                .iter()
                .any(|entry| entry.owner == self.owner && entry.message == message)
        })
    }
}

#[cfg(test)]
#[path = "tests/handler_tests.rs"]
mod tests;
