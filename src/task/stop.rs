//! Stop predicates for [`with_stop_condition`](super::SingleAgentTask::with_stop_condition).

use crate::environment::{NavigationState, PaddleBallState};

/// Never stops; runs last until `t_max`.
pub fn never<S>() -> impl Fn(&S) -> bool {
    |_| false
}

/// Stops once the robot is within `radius` of the target.
pub fn target_reached(radius: f64) -> impl Fn(&NavigationState) -> bool {
    move |state| state.distance_to_target() <= radius
}

/// Stops once either paddle has scored `points`.
pub fn score_reached(points: u32) -> impl Fn(&PaddleBallState) -> bool {
    move |state| state.left.score >= points || state.right.score >= points
}
