//! Geometric primitives and the pointer geometry shared by every recognizer.

use crate::motion_event::{MotionAction, MotionEvent};
use std::f32::consts::PI;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    /// Euclidean distance between two points.
    pub fn distance_to(self, other: Point) -> f32 {
        distance(self, other)
    }

    /// Length of the vector from the origin to this point.
    pub fn length(self) -> f32 {
        self.x.hypot(self.y)
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for Point {
    type Output = Point;

    fn neg(self) -> Point {
        Point::new(-self.x, -self.y)
    }
}

impl AddAssign for Point {
    fn add_assign(&mut self, rhs: Point) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl SubAssign for Point {
    fn sub_assign(&mut self, rhs: Point) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

/// Axis-aligned rectangle, used by hosts and test robots to describe the
/// visible bounds of the view that owns a delegate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_ltrb(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            x: left,
            y: top,
            width: right - left,
            height: bottom - top,
        }
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    pub fn center_y(&self) -> f32 {
        self.y + self.height / 2.0
    }

    pub fn center(&self) -> Point {
        Point::new(self.center_x(), self.center_y())
    }

    /// Shrinks the rectangle by `dx` on the left and right edges and by `dy`
    /// on the top and bottom edges. Negative values grow it.
    pub fn inset(&self, dx: f32, dy: f32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            width: (self.width - 2.0 * dx).max(0.0),
            height: (self.height - 2.0 * dy).max(0.0),
        }
    }

    pub fn translate(&self, dx: f32, dy: f32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            width: self.width,
            height: self.height,
        }
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && y >= self.y && x <= self.right() && y <= self.bottom()
    }
}

/// Computes the centroid of the pointers that remain down after `event`.
///
/// On a `PointerUp` the pointer at the action index is leaving, so it is
/// skipped and the sum is divided by `count - 1`.
pub fn compute_focus_point(event: &MotionEvent) -> Point {
    let pointer_up = event.action() == MotionAction::PointerUp;
    let skip_index = pointer_up.then(|| event.action_index());

    let mut sum = Point::ZERO;
    for (index, pointer) in event.pointers().iter().enumerate() {
        if skip_index == Some(index) {
            continue;
        }
        sum += pointer.position;
    }

    let count = event.pointer_count();
    let div = if pointer_up {
        count.saturating_sub(1)
    } else {
        count
    };
    if div == 0 {
        return Point::ZERO;
    }
    Point::new(sum.x / div as f32, sum.y / div as f32)
}

/// Average distance of the remaining pointers from `focus`, doubled so that
/// for two pointers it equals the distance between them.
pub fn compute_span(event: &MotionEvent, focus: Point) -> f32 {
    let pointer_up = event.action() == MotionAction::PointerUp;
    let skip_index = pointer_up.then(|| event.action_index());

    let mut total = 0.0f32;
    let mut count = 0usize;
    for (index, pointer) in event.pointers().iter().enumerate() {
        if skip_index == Some(index) {
            continue;
        }
        total += distance(pointer.position, focus);
        count += 1;
    }

    if count == 0 {
        return 0.0;
    }
    total / count as f32 * 2.0
}

pub fn distance(a: Point, b: Point) -> f32 {
    (b - a).length()
}

/// Angle in radians of the vector from `from` to `to`, in `(-π, π]`.
pub fn angle(from: Point, to: Point) -> f32 {
    let delta = to - from;
    delta.y.atan2(delta.x)
}

/// Wraps an angle in radians into `(-π, π]`.
pub fn normalize_angle(radians: f32) -> f32 {
    let mut value = radians % (2.0 * PI);
    if value <= -PI {
        value += 2.0 * PI;
    } else if value > PI {
        value -= 2.0 * PI;
    }
    value
}

#[cfg(test)]
#[path = "tests/geometry_tests.rs"]
mod tests;
