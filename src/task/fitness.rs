//! Fitness measures over finished outcomes.
//!
//! These only read the recorded states, so they work on any outcome whose
//! state type matches, including a [`subset`](super::Outcome::subset).

use super::Outcome;
use crate::environment::{NavigationState, PaddleBallState};

/// Robot-target distance in the last recorded state.
#[must_use]
pub fn final_distance_to_target<O: Clone, A: Clone>(
    outcome: &Outcome<O, A, NavigationState>,
) -> Option<f64> {
    outcome.last().map(|step| step.state.distance_to_target())
}

/// Mean robot-target distance over all recorded states.
#[must_use]
pub fn average_distance_to_target<O: Clone, A: Clone>(
    outcome: &Outcome<O, A, NavigationState>,
) -> Option<f64> {
    if outcome.is_empty() {
        return None;
    }
    let total: f64 = outcome.states().map(NavigationState::distance_to_target).sum();
    Some(total / outcome.len() as f64)
}

/// Fraction of steps in which the robot collided. Zero for an empty outcome.
#[must_use]
pub fn collision_fraction<O: Clone, A: Clone>(outcome: &Outcome<O, A, NavigationState>) -> f64 {
    if outcome.is_empty() {
        return 0.0;
    }
    let collisions = outcome.states().filter(|state| state.collided).count();
    collisions as f64 / outcome.len() as f64
}

/// Left score minus right score at the end of the run.
#[must_use]
pub fn score_difference<O: Clone, A: Clone>(outcome: &Outcome<O, A, PaddleBallState>) -> i64 {
    outcome.last().map_or(0, |step| {
        i64::from(step.state.left.score) - i64::from(step.state.right.score)
    })
}

/// Ball hits on both paddles at the end of the run.
#[must_use]
pub fn total_paddle_collisions<O: Clone, A: Clone>(
    outcome: &Outcome<O, A, PaddleBallState>,
) -> u32 {
    outcome.last().map_or(0, |step| {
        step.state.left.collisions + step.state.right.collisions
    })
}
