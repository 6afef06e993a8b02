//! The stepping contract environments expose to the task driver.

use crate::core::SimResult;

/// A stateful physical world driven one time step at a time.
///
/// ## Implementation Notes
///
/// - `reset`: restore the initial configuration, reseeding any randomness so
///   repeated resets are reproducible
/// - `step`: apply the action at time `t` and return the next observation;
///   fails only on contract violations such as a wrongly sized action
/// - `state`: read-only snapshot, cheap enough to record every step
/// - `default_action`: the "do nothing" action used to obtain the first
///   observation of a run
///
/// Instances are exclusively owned by one run at a time.
pub trait Environment {
    type Observation: Clone;
    type Action: Clone;
    type State: Clone;

    /// Restore the initial configuration.
    fn reset(&mut self);

    /// Advance the world to time `t` under `action`.
    fn step(&mut self, t: f64, action: &Self::Action) -> SimResult<Self::Observation>;

    /// Snapshot of the current state.
    fn state(&self) -> Self::State;

    /// Neutral action.
    fn default_action(&self) -> Self::Action;
}
