//! Environments: stateful physical worlds stepped by the task driver.
//!
//! - `NavigationEnvironment`: a robot with ranging sensors in an arena
//! - `PointNavigationEnvironment`: a point robot with a velocity cap
//! - `PaddleBallEnvironment`: two paddles and a ball in a bounding box
//!
//! Each environment *has* an arena or box and a kinematic model, and owns
//! its own `SimRng`.

pub mod navigation;
pub mod paddle_ball;
pub mod point_navigation;
pub mod traits;

pub use navigation::{
    CollisionResponse, NavigationConfig, NavigationEnvironment, NavigationState, VelocityModel,
};
pub use paddle_ball::{PaddleBallConfig, PaddleBallEnvironment, PaddleBallState, PaddleState, Side};
pub use point_navigation::{PointNavigationConfig, PointNavigationEnvironment};
pub use traits::Environment;
