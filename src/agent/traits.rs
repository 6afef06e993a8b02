//! Agent traits.
//!
//! The simulation only talks to a controller through these traits: it resets
//! it, feeds it one input per step and reads back one output. What happens
//! inside (network evaluation, plasticity, gradient updates) is opaque.

/// A stateful controller stepped once per simulation step.
pub trait Agent {
    /// What the agent receives each step, usually an environment observation.
    type Input;

    /// What the agent emits each step, usually an environment action.
    type Output;

    /// Read-only snapshot of the agent's internals.
    type State;

    /// Return to the initial internal state.
    fn reset(&mut self);

    /// Compute the output for time `t`.
    fn step(&mut self, t: f64, input: &Self::Input) -> Self::Output;

    fn state(&self) -> Self::State;
}

/// An agent that is also handed the reward earned by its previous output.
pub trait ReinforcementAgent {
    type Input;
    type Output;
    type State;

    fn reset(&mut self);

    /// Compute the output for time `t`, given the reward that followed the
    /// last output (zero on the first step).
    fn step(&mut self, t: f64, input: &Self::Input, reward: f64) -> Self::Output;

    fn state(&self) -> Self::State;
}

/// Snapshot a controller into an immutable, pure-function value.
///
/// The frozen value is decoupled from the live controller: later updates to
/// the controller do not affect it.
pub trait Freeze {
    type Frozen;

    fn freeze(&self) -> Self::Frozen;
}
