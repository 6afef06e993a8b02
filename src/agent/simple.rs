//! Baseline agents and adapters.

use std::fmt;
use std::marker::PhantomData;

use super::{Agent, ReinforcementAgent};

/// Emits the same output regardless of input.
#[derive(Clone, Debug, PartialEq)]
pub struct ConstantAgent<I, O> {
    output: O,
    _input: PhantomData<fn(&I)>,
}

impl<I, O: Clone> ConstantAgent<I, O> {
    pub fn new(output: O) -> Self {
        Self {
            output,
            _input: PhantomData,
        }
    }

    #[must_use]
    pub fn output(&self) -> &O {
        &self.output
    }
}

impl<I, O: Clone> Agent for ConstantAgent<I, O> {
    type Input = I;
    type Output = O;
    type State = ();

    fn reset(&mut self) {}

    fn step(&mut self, _t: f64, _input: &I) -> O {
        self.output.clone()
    }

    fn state(&self) -> Self::State {}
}

/// Stateless agent backed by a closure of `(t, input)`.
pub struct FnAgent<I, O, F> {
    f: F,
    _marker: PhantomData<fn(&I) -> O>,
}

impl<I, O, F> FnAgent<I, O, F>
where
    F: FnMut(f64, &I) -> O,
{
    pub fn new(f: F) -> Self {
        Self {
            f,
            _marker: PhantomData,
        }
    }
}

impl<I, O, F> fmt::Debug for FnAgent<I, O, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnAgent").finish_non_exhaustive()
    }
}

impl<I, O, F> Agent for FnAgent<I, O, F>
where
    F: FnMut(f64, &I) -> O,
{
    type Input = I;
    type Output = O;
    type State = ();

    fn reset(&mut self) {}

    fn step(&mut self, t: f64, input: &I) -> O {
        (self.f)(t, input)
    }

    fn state(&self) -> Self::State {}
}

/// Runs a plain [`Agent`] where a [`ReinforcementAgent`] is expected,
/// dropping the reward.
#[derive(Clone, Debug, PartialEq)]
pub struct RewardIgnoring<A>(pub A);

impl<A> RewardIgnoring<A> {
    pub fn into_inner(self) -> A {
        self.0
    }
}

impl<A: Agent> ReinforcementAgent for RewardIgnoring<A> {
    type Input = A::Input;
    type Output = A::Output;
    type State = A::State;

    fn reset(&mut self) {
        self.0.reset();
    }

    fn step(&mut self, t: f64, input: &A::Input, _reward: f64) -> A::Output {
        self.0.step(t, input)
    }

    fn state(&self) -> A::State {
        self.0.state()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_agent() {
        let mut agent: ConstantAgent<Vec<f64>, Vec<f64>> = ConstantAgent::new(vec![0.5, -0.5]);
        assert_eq!(agent.step(0.0, &vec![1.0]), vec![0.5, -0.5]);
        assert_eq!(agent.step(3.0, &vec![]), vec![0.5, -0.5]);
        assert_eq!(agent.output(), &vec![0.5, -0.5]);
    }

    #[test]
    fn test_fn_agent_sees_time_and_input() {
        let mut agent = FnAgent::new(|t: f64, input: &Vec<f64>| vec![t + input[0]]);
        assert_eq!(agent.step(1.5, &vec![2.0]), vec![3.5]);
    }

    #[test]
    fn test_fn_agent_may_keep_closure_state() {
        let mut calls = 0;
        let mut agent = FnAgent::new(|_t: f64, _input: &()| {
            calls += 1;
            calls
        });
        agent.step(0.0, &());
        assert_eq!(agent.step(0.1, &()), 2);
    }

    #[test]
    fn test_reward_ignoring_delegates() {
        let mut agent = RewardIgnoring(FnAgent::new(|_t: f64, input: &f64| input * 2.0));
        assert_eq!(agent.step(0.0, &1.5, 100.0), 3.0);
        assert_eq!(agent.step(0.0, &1.5, -100.0), 3.0);
    }
}
