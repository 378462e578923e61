use std::fmt;

/// Lifecycle of a single gesture attempt.
///
/// Continuous gestures go `Possible → Began → Changed* → Ended` or end in
/// `Cancelled` after beginning; discrete gestures go `Possible → Ended`.
/// Either kind may end in `Failed` before recognizing. Only a reset returns
/// a recognizer to `Possible`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum State {
    #[default]
    Possible,
    Began,
    Changed,
    Failed,
    Cancelled,
    Ended,
}

impl State {
    /// `Began` or `Changed`: a continuous gesture is in progress.
    pub fn is_active(self) -> bool {
        matches!(self, State::Began | State::Changed)
    }

    /// No transition leaves this state until the next reset.
    pub fn is_finished(self) -> bool {
        matches!(self, State::Failed | State::Cancelled | State::Ended)
    }

    /// States that carry gesture geometry and are reported to the action
    /// listener. `Failed` and `Possible` never are.
    pub fn carries_payload(self) -> bool {
        matches!(
            self,
            State::Began | State::Changed | State::Ended | State::Cancelled
        )
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            State::Possible => "possible",
            State::Began => "began",
            State::Changed => "changed",
            State::Failed => "failed",
            State::Cancelled => "cancelled",
            State::Ended => "ended",
        };
        f.write_str(name)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GestureType {
    Pan,
    Tap,
    LongPress,
    Swipe,
    Pinch,
    Rotation,
}

impl fmt::Display for GestureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GestureType::Pan => "pan",
            GestureType::Tap => "tap",
            GestureType::LongPress => "long-press",
            GestureType::Swipe => "swipe",
            GestureType::Pinch => "pinch",
            GestureType::Rotation => "rotation",
        };
        f.write_str(name)
    }
}

/// Identity of a recognizer within the delegate that dispatches to it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecognizerId(u64);

impl RecognizerId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RecognizerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Hands out increasing recognizer ids, starting at 1.
#[derive(Debug)]
pub struct IdAllocator {
    next: u64,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    pub fn allocate(&mut self) -> RecognizerId {
        let id = RecognizerId(self.next);
        self.next += 1;
        id
    }

    /// Makes sure ids handed out later never collide with `id`.
    pub fn reserve(&mut self, id: RecognizerId) {
        self.next = self.next.max(id.0.saturating_add(1));
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}
