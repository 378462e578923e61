//! Robot that plays synthetic touch sequences into a delegate.
//!
//! Every emitted event advances a [`ManualClock`] by the step interval, and
//! the delegate fires its timers against that clock, so timeouts behave
//! exactly as on a device without any real waiting.
//!
//! # Example
//!
//! ```
//! use uigestures_core::{PanGesture, Point, Rect, State};
//! use uigestures_testing::GestureRobot;
//!
//! let mut robot = GestureRobot::new(Rect::new(0.0, 0.0, 400.0, 800.0));
//! let pan = robot.add(PanGesture::new()).unwrap();
//! robot.swipe(Point::new(300.0, 500.0), Point::new(100.0, 500.0), 6);
//! assert_eq!(robot.recognizer(pan).unwrap().state(), State::Ended);
//! ```

use crate::testing::ManualClock;
use smallvec::SmallVec;
use uigestures_core::{
    Gesture, GestureError, GestureRecognizer, GestureRecognizerDelegate, MotionAction,
    MotionEvent, Point, PointerCoords, RecognizerId, Rect,
};

/// Default interval between synthesized events.
pub const DEFAULT_STEP_MILLIS: u64 = 10;

pub struct GestureRobot {
    delegate: GestureRecognizerDelegate,
    clock: ManualClock,
    bounds: Rect,
    step_millis: u64,
    down_time: u64,
    consumed: Vec<bool>,
}

impl GestureRobot {
    pub fn new(bounds: Rect) -> Self {
        Self::with_delegate(GestureRecognizerDelegate::new(), bounds)
    }

    pub fn with_delegate(delegate: GestureRecognizerDelegate, bounds: Rect) -> Self {
        Self {
            delegate,
            clock: ManualClock::starting_at(1_000),
            bounds,
            step_millis: DEFAULT_STEP_MILLIS,
            down_time: 0,
            consumed: Vec::new(),
        }
    }

    pub fn delegate(&self) -> &GestureRecognizerDelegate {
        &self.delegate
    }

    pub fn delegate_mut(&mut self) -> &mut GestureRecognizerDelegate {
        &mut self.delegate
    }

    pub fn clock(&self) -> &ManualClock {
        &self.clock
    }

    /// Bounds of the simulated view; gesture helpers without explicit
    /// coordinates stay inside them.
    pub fn visible_bounds(&self) -> Rect {
        self.bounds
    }

    pub fn set_step_millis(&mut self, step_millis: u64) {
        self.step_millis = step_millis;
    }

    /// Builds a recognizer with the delegate's id allocator and configuration.
    pub fn create(&mut self, gesture: impl Into<Gesture>) -> GestureRecognizer {
        self.delegate.create_recognizer(gesture)
    }

    pub fn add(&mut self, gesture: impl Into<Gesture>) -> Result<RecognizerId, GestureError> {
        let recognizer = self.delegate.create_recognizer(gesture);
        self.delegate.add_gesture_recognizer(recognizer)
    }

    pub fn add_recognizer(
        &mut self,
        recognizer: GestureRecognizer,
    ) -> Result<RecognizerId, GestureError> {
        self.delegate.add_gesture_recognizer(recognizer)
    }

    pub fn recognizer(&self, id: RecognizerId) -> Option<&GestureRecognizer> {
        self.delegate.recognizer(id)
    }

    pub fn recognizer_mut(&mut self, id: RecognizerId) -> Option<&mut GestureRecognizer> {
        self.delegate.recognizer_mut(id)
    }

    /// Results of `on_touch_event` for every event sent so far.
    pub fn consumed(&self) -> &[bool] {
        &self.consumed
    }

    /// Lets virtual time pass, firing the timers that fall due.
    pub fn advance_time_by(&mut self, millis: u64) {
        self.clock.advance(millis);
        self.delegate.pump(&self.clock);
    }

    /// Sends an event built from `pointers` after one step of virtual time.
    pub fn send(
        &mut self,
        action: MotionAction,
        action_index: usize,
        pointers: &[PointerCoords],
    ) -> bool {
        let now = self.clock.advance(self.step_millis);
        if action == MotionAction::Down {
            self.down_time = now;
        }
        let event = MotionEvent::new(
            action,
            action_index,
            pointers.iter().copied(),
            self.down_time,
            now,
        );
        log::trace!("robot sends {:?} at {}", action, now);
        let consumed = self.delegate.on_touch_event(&event);
        self.consumed.push(consumed);
        consumed
    }

    pub fn touch_down(&mut self, point: Point) -> bool {
        self.send(MotionAction::Down, 0, &[coords(0, point)])
    }

    pub fn touch_move(&mut self, point: Point) -> bool {
        self.send(MotionAction::Move, 0, &[coords(0, point)])
    }

    pub fn touch_up(&mut self, point: Point) -> bool {
        self.send(MotionAction::Up, 0, &[coords(0, point)])
    }

    pub fn tap(&mut self, point: Point) {
        self.touch_down(point);
        self.touch_up(point);
    }

    /// Presses at `point`, waits `duration` and lifts.
    pub fn long_press(&mut self, point: Point, duration: u64) {
        self.touch_down(point);
        self.advance_time_by(duration);
        self.touch_up(point);
    }

    /// One finger from `from` to `to` in `steps` evenly spaced moves.
    pub fn swipe(&mut self, from: Point, to: Point, steps: usize) {
        self.multi_pointer_gesture(&[(from, to)], steps);
    }

    /// Right-to-left swipe across the middle of the visible bounds.
    pub fn swipe_left(&mut self, steps: usize) {
        let (from, to) = self.horizontal_track(0.0);
        self.swipe(from, to, steps);
    }

    /// Right-to-left swipe of `fingers` parallel fingers, 40px apart.
    pub fn swipe_left_multi_touch(&mut self, fingers: usize, steps: usize) {
        let tracks: Vec<(Point, Point)> = (0..fingers)
            .map(|finger| self.horizontal_track(finger as f32 * 40.0))
            .collect();
        self.multi_pointer_gesture(&tracks, steps);
    }

    /// Two fingers on a horizontal line through `center`, moving from
    /// `start_span` to `end_span` apart.
    pub fn pinch(&mut self, center: Point, start_span: f32, end_span: f32, steps: usize) {
        let (start_half, end_half) = (start_span / 2.0, end_span / 2.0);
        let tracks = [
            (
                Point::new(center.x - start_half, center.y),
                Point::new(center.x - end_half, center.y),
            ),
            (
                Point::new(center.x + start_half, center.y),
                Point::new(center.x + end_half, center.y),
            ),
        ];
        self.multi_pointer_gesture(&tracks, steps);
    }

    /// Two fingers `radius` from `center`, turning by `radians`.
    pub fn rotate(&mut self, center: Point, radius: f32, radians: f32, steps: usize) {
        let steps = steps.max(1);
        let frames: Vec<SmallVec<[Point; 4]>> = (0..=steps)
            .map(|step| {
                let angle = radians * step as f32 / steps as f32;
                let offset = Point::new(radius * angle.cos(), radius * angle.sin());
                SmallVec::from_slice(&[center - offset, center + offset])
            })
            .collect();
        self.play_frames(&frames);
    }

    /// Every finger moves along its straight track in lockstep: the fingers
    /// land one after another, move `steps` times and lift in reverse order.
    pub fn multi_pointer_gesture(&mut self, tracks: &[(Point, Point)], steps: usize) {
        let steps = steps.max(1);
        let frames: Vec<SmallVec<[Point; 4]>> = (0..=steps)
            .map(|step| {
                let fraction = step as f32 / steps as f32;
                tracks
                    .iter()
                    .map(|&(from, to)| lerp(from, to, fraction))
                    .collect()
            })
            .collect();
        self.play_frames(&frames);
    }

    /// Plays pointer positions frame by frame; the first frame is where the
    /// fingers land and the last is where they lift.
    pub fn play_frames(&mut self, frames: &[SmallVec<[Point; 4]>]) {
        let (Some(first), Some(last)) = (frames.first(), frames.last()) else {
            return;
        };
        let fingers = first.len();
        if fingers == 0 {
            return;
        }

        for index in 0..fingers {
            let pointers = pointer_coords(&first[..=index]);
            let action = if index == 0 {
                MotionAction::Down
            } else {
                MotionAction::PointerDown
            };
            self.send(action, index, &pointers);
        }

        for frame in &frames[1..] {
            self.send(MotionAction::Move, 0, &pointer_coords(frame));
        }

        for index in (0..fingers).rev() {
            let pointers = pointer_coords(&last[..=index]);
            let action = if index == 0 {
                MotionAction::Up
            } else {
                MotionAction::PointerUp
            };
            self.send(action, index, &pointers);
        }
    }

    fn horizontal_track(&self, y_offset: f32) -> (Point, Point) {
        let track = self.bounds.inset(self.bounds.width / 8.0, 0.0);
        let y = self.bounds.center_y() + y_offset;
        (Point::new(track.right(), y), Point::new(track.left(), y))
    }
}

fn lerp(from: Point, to: Point, fraction: f32) -> Point {
    from + Point::new((to.x - from.x) * fraction, (to.y - from.y) * fraction)
}

fn coords(id: u32, point: Point) -> PointerCoords {
    PointerCoords::new(id, point.x, point.y)
}

fn pointer_coords(points: &[Point]) -> SmallVec<[PointerCoords; 4]> {
    points
        .iter()
        .enumerate()
        .map(|(id, &point)| coords(id as u32, point))
        .collect()
}

#[cfg(test)]
#[path = "tests/robot_tests.rs"]
mod tests;
