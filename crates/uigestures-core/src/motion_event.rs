//! Raw pointer event snapshots as delivered by the host platform.

use crate::geometry::Point;
use smallvec::SmallVec;

pub type PointerId = u32;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MotionAction {
    /// First pointer went down; starts a new touch sequence.
    Down,
    /// Last pointer went up; ends the touch sequence.
    Up,
    Move,
    /// The host aborted the touch sequence.
    Cancel,
    /// An additional pointer went down.
    PointerDown,
    /// A non-last pointer went up.
    PointerUp,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerCoords {
    pub id: PointerId,
    pub position: Point,
}

impl PointerCoords {
    pub const fn new(id: PointerId, x: f32, y: f32) -> Self {
        Self {
            id,
            position: Point::new(x, y),
        }
    }
}

/// One pointer event with the coordinates of every pointer currently down.
///
/// For `PointerUp` and `Up` the lifting pointer is still part of
/// [`MotionEvent::pointers`], at [`MotionEvent::action_index`].
/// Times are in milliseconds of the host's monotonic uptime clock.
#[derive(Clone, Debug, PartialEq)]
pub struct MotionEvent {
    action: MotionAction,
    action_index: usize,
    pointers: SmallVec<[PointerCoords; 4]>,
    down_time: u64,
    event_time: u64,
}

impl MotionEvent {
    pub fn new(
        action: MotionAction,
        action_index: usize,
        pointers: impl IntoIterator<Item = PointerCoords>,
        down_time: u64,
        event_time: u64,
    ) -> Self {
        Self {
            action,
            action_index,
            pointers: pointers.into_iter().collect(),
            down_time,
            event_time,
        }
    }

    /// Single-pointer event for pointer id 0.
    pub fn single(action: MotionAction, position: Point, down_time: u64, event_time: u64) -> Self {
        Self::new(
            action,
            0,
            [PointerCoords {
                id: 0,
                position,
            }],
            down_time,
            event_time,
        )
    }

    pub fn action(&self) -> MotionAction {
        self.action
    }

    pub fn action_index(&self) -> usize {
        self.action_index
    }

    /// Id of the pointer the action refers to, if the index is valid.
    pub fn action_pointer_id(&self) -> Option<PointerId> {
        self.pointers.get(self.action_index).map(|pointer| pointer.id)
    }

    pub fn pointers(&self) -> &[PointerCoords] {
        &self.pointers
    }

    pub fn pointer(&self, index: usize) -> Option<&PointerCoords> {
        self.pointers.get(index)
    }

    pub fn pointer_count(&self) -> usize {
        self.pointers.len()
    }

    /// Number of pointers still down once this event has been applied.
    pub fn active_pointer_count(&self) -> usize {
        match self.action {
            MotionAction::Up | MotionAction::PointerUp => self.pointers.len().saturating_sub(1),
            MotionAction::Cancel => 0,
            MotionAction::Down | MotionAction::Move | MotionAction::PointerDown => {
                self.pointers.len()
            }
        }
    }

    pub fn down_time(&self) -> u64 {
        self.down_time
    }

    pub fn event_time(&self) -> u64 {
        self.event_time
    }
}
