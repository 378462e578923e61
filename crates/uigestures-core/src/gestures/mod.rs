//! Concrete gesture variants.

mod long_press;
mod pan;
mod pinch;
mod rotation;
mod swipe;
mod tap;

pub use long_press::LongPressGesture;
pub use pan::PanGesture;
pub use pinch::PinchGesture;
pub use rotation::RotationGesture;
pub use swipe::{SwipeDirection, SwipeGesture};
pub use tap::TapGesture;
