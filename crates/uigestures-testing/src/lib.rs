//! Testing utilities and gesture robot for uigestures

pub mod robot;
pub mod robot_assertions;
pub mod testing;

pub use robot::*;
pub use testing::*;

pub mod prelude {
    pub use crate::robot::*;
    pub use crate::robot_assertions;
    pub use crate::robot_assertions::{
        assert_approx_eq, assert_continuous_gesture, assert_point_approx_eq, assert_state_count,
    };
    pub use crate::testing::*;
}
