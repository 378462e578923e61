//! UIKit-style gesture recognizers driven by raw multi-touch events.
//!
//! A [`GestureRecognizerDelegate`] owns a list of [`GestureRecognizer`]s and
//! is the single entry point for [`MotionEvent`]s. Each recognizer runs the
//! shared state machine (see [`State`]) with one of the [`Gesture`]
//! variants: pan, tap, long press, swipe, pinch or rotation.
//!
//! ```
//! use uigestures_core::prelude::*;
//!
//! let mut delegate = GestureRecognizerDelegate::new();
//! let mut pan = delegate.create_recognizer(PanGesture::new());
//! pan.set_action_listener(|recognizer| {
//!     if let Some(pan) = recognizer.as_pan() {
//!         println!("{} {:?}", recognizer.state(), pan.translation());
//!     }
//! });
//! let pan = delegate.add_gesture_recognizer(pan).unwrap();
//!
//! delegate.on_touch_event(&MotionEvent::single(MotionAction::Down, Point::new(0.0, 0.0), 0, 0));
//! delegate.on_touch_event(&MotionEvent::single(MotionAction::Move, Point::new(40.0, 0.0), 0, 16));
//! assert_eq!(delegate.recognizer(pan).unwrap().state(), State::Began);
//! ```
//!
//! Timers (tap timeouts, long presses) fire when the delegate is pumped
//! with [`GestureRecognizerDelegate::dispatch_pending`] or
//! [`GestureRecognizerDelegate::pump`], and before every touch event.

pub mod arbiter;
pub mod clock;
pub mod collections;
pub mod configuration;
pub mod delegate;
pub mod error;
pub mod geometry;
pub mod gesture_constants;
pub mod gestures;
mod handler;
pub mod motion_event;
pub mod recognizer;
pub mod velocity_tracker;

pub use arbiter::DelegateCallback;
pub use clock::{Clock, SystemClock};
pub use configuration::GestureConfiguration;
pub use delegate::GestureRecognizerDelegate;
pub use error::GestureError;
pub use geometry::{Point, Rect};
pub use gestures::{
    LongPressGesture, PanGesture, PinchGesture, RotationGesture, SwipeDirection, SwipeGesture,
    TapGesture,
};
pub use motion_event::{MotionAction, MotionEvent, PointerCoords, PointerId};
pub use recognizer::{
    Gesture, GestureRecognizer, GestureType, IdAllocator, RecognizerCore, RecognizerId, State,
};
pub use velocity_tracker::VelocityTracker;

pub mod prelude {
    pub use crate::{
        Clock, DelegateCallback, Gesture, GestureConfiguration, GestureError, GestureRecognizer,
        GestureRecognizerDelegate, GestureType, LongPressGesture, MotionAction, MotionEvent,
        PanGesture, PinchGesture, Point, PointerCoords, Rect, RecognizerCore, RecognizerId,
        RotationGesture, State, SwipeDirection, SwipeGesture, TapGesture,
    };
}
