//! Run drivers.
//!
//! All three task shapes share one loop:
//!
//! 1. build a fresh environment from the factory and reset it,
//!    optionally reset the agent;
//! 2. prime the first observation by stepping the environment once at
//!    `t_min` with its default action (not recorded);
//! 3. at `t = t_min + k * dt`, while `t <= t_max` and the stop predicate is
//!    false on the current state: ask the agent for an action, step the
//!    environment, record a [`Step`] at `t`.
//!
//! An environment error aborts the run and no partial outcome is returned.

use std::mem;

use super::config::TaskConfig;
use super::outcome::{Outcome, Step, Termination};
use crate::agent::{Agent, ReinforcementAgent};
use crate::core::SimResult;
use crate::environment::Environment;

/// Predicate over environment state that ends a run early.
pub type StopCondition<S> = Box<dyn Fn(&S) -> bool>;

/// Reward computed from the post-step state and the action that produced it.
pub type RewardFunction<S, A> = Box<dyn Fn(&S, &A) -> f64>;

/// Outcome type produced by running environment `E`.
pub type EnvOutcome<E> = Outcome<
    <E as Environment>::Observation,
    <E as Environment>::Action,
    <E as Environment>::State,
>;

fn run_loop<E, D, R>(
    env: &mut E,
    config: &TaskConfig,
    stop: &dyn Fn(&E::State) -> bool,
    mut decide: D,
    mut reward: R,
) -> SimResult<EnvOutcome<E>>
where
    E: Environment,
    D: FnMut(f64, &E::Observation, f64) -> E::Action,
    R: FnMut(&E::State, &E::Action) -> Option<f64>,
{
    let t_min = config.t_range.min();
    let priming = env.default_action();
    let mut observation = env.step(t_min, &priming)?;
    let mut state = env.state();
    let mut last_reward = 0.0;
    let mut outcome = Outcome::new();

    let mut k = 0;
    let termination = loop {
        let t = config.time_at(k);
        if !config.includes(t) {
            break Termination::TimeExhausted;
        }
        if stop(&state) {
            break Termination::StopCondition;
        }

        let action = decide(t, &observation, last_reward);
        let next = env.step(t, &action)?;
        state = env.state();
        let step_reward = reward(&state, &action);
        if let Some(r) = step_reward {
            last_reward = r;
        }

        outcome.push(Step {
            time: t,
            observation: mem::replace(&mut observation, next),
            action,
            state: state.clone(),
            reward: step_reward,
        });
        k += 1;
    };

    tracing::debug!(steps = outcome.len(), ?termination, "run finished");
    outcome.set_termination(termination);
    Ok(outcome)
}

fn never_stop<S>(_: &S) -> bool {
    false
}

/// One agent against one environment.
pub struct SingleAgentTask<E: Environment, F> {
    factory: F,
    config: TaskConfig,
    stop: StopCondition<E::State>,
}

impl<E, F> SingleAgentTask<E, F>
where
    E: Environment,
    E::State: 'static,
    F: Fn() -> E,
{
    /// Create a task that only stops when time runs out.
    pub fn new(factory: F, config: TaskConfig) -> Self {
        Self {
            factory,
            config,
            stop: Box::new(never_stop),
        }
    }

    /// Stop as soon as `stop` holds on the environment state.
    #[must_use]
    pub fn with_stop_condition(mut self, stop: impl Fn(&E::State) -> bool + 'static) -> Self {
        self.stop = Box::new(stop);
        self
    }

    #[must_use]
    pub fn config(&self) -> &TaskConfig {
        &self.config
    }

    /// Run one episode with `agent`.
    pub fn run<A>(&self, agent: &mut A) -> SimResult<EnvOutcome<E>>
    where
        A: Agent<Input = E::Observation, Output = E::Action>,
    {
        self.config.validate()?;
        let mut env = (self.factory)();
        env.reset();
        if self.config.reset_agent {
            agent.reset();
        }
        tracing::debug!(t_range = %self.config.t_range, dt = self.config.dt, "single agent run");

        run_loop(
            &mut env,
            &self.config,
            &*self.stop,
            |t, observation, _| agent.step(t, observation),
            |_, _| None,
        )
    }
}

/// Two agents of the same type sharing one environment.
///
/// The environment consumes and produces `(first, second)` pairs; each agent
/// only sees its own half of the observation.
pub struct HomogeneousPairTask<E: Environment, F> {
    factory: F,
    config: TaskConfig,
    stop: StopCondition<E::State>,
}

impl<E, F> HomogeneousPairTask<E, F>
where
    E: Environment,
    E::State: 'static,
    F: Fn() -> E,
{
    pub fn new(factory: F, config: TaskConfig) -> Self {
        Self {
            factory,
            config,
            stop: Box::new(never_stop),
        }
    }

    #[must_use]
    pub fn with_stop_condition(mut self, stop: impl Fn(&E::State) -> bool + 'static) -> Self {
        self.stop = Box::new(stop);
        self
    }

    #[must_use]
    pub fn config(&self) -> &TaskConfig {
        &self.config
    }

    /// Run one episode with `first` and `second` acting independently.
    pub fn run<A>(&self, first: &mut A, second: &mut A) -> SimResult<EnvOutcome<E>>
    where
        A: Agent,
        A::Input: Clone,
        A::Output: Clone,
        E: Environment<Observation = (A::Input, A::Input), Action = (A::Output, A::Output)>,
    {
        self.config.validate()?;
        let mut env = (self.factory)();
        env.reset();
        if self.config.reset_agent {
            first.reset();
            second.reset();
        }
        tracing::debug!(t_range = %self.config.t_range, dt = self.config.dt, "pair run");

        run_loop(
            &mut env,
            &self.config,
            &*self.stop,
            |t, observation: &(A::Input, A::Input), _| {
                (first.step(t, &observation.0), second.step(t, &observation.1))
            },
            |_, _| None,
        )
    }
}

/// One reinforcement agent that receives the reward of its previous action.
pub struct RewardTask<E: Environment, F> {
    factory: F,
    config: TaskConfig,
    stop: StopCondition<E::State>,
    reward: RewardFunction<E::State, E::Action>,
}

impl<E, F> RewardTask<E, F>
where
    E: Environment,
    E::State: 'static,
    F: Fn() -> E,
{
    pub fn new(
        factory: F,
        config: TaskConfig,
        reward: impl Fn(&E::State, &E::Action) -> f64 + 'static,
    ) -> Self {
        Self {
            factory,
            config,
            stop: Box::new(never_stop),
            reward: Box::new(reward),
        }
    }

    #[must_use]
    pub fn with_stop_condition(mut self, stop: impl Fn(&E::State) -> bool + 'static) -> Self {
        self.stop = Box::new(stop);
        self
    }

    #[must_use]
    pub fn config(&self) -> &TaskConfig {
        &self.config
    }

    /// Run one episode. The first action is computed with reward zero.
    pub fn run<A>(&self, agent: &mut A) -> SimResult<EnvOutcome<E>>
    where
        A: ReinforcementAgent<Input = E::Observation, Output = E::Action>,
    {
        self.config.validate()?;
        let mut env = (self.factory)();
        env.reset();
        if self.config.reset_agent {
            agent.reset();
        }
        tracing::debug!(t_range = %self.config.t_range, dt = self.config.dt, "reward run");

        let reward = &self.reward;
        run_loop(
            &mut env,
            &self.config,
            &*self.stop,
            |t, observation, r| agent.step(t, observation, r),
            |state, action| Some(reward(state, action)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::{ConstantAgent, FnAgent, RewardIgnoring};
    use crate::core::{check_action_size, SimError};

    /// Counter environment: the state accumulates the actions.
    #[derive(Clone, Debug, Default)]
    struct Counter {
        total: f64,
    }

    impl Environment for Counter {
        type Observation = Vec<f64>;
        type Action = Vec<f64>;
        type State = f64;

        fn reset(&mut self) {
            *self = Counter::default();
        }

        fn step(&mut self, _t: f64, action: &Vec<f64>) -> SimResult<Vec<f64>> {
            check_action_size(action, 1)?;
            self.total += action[0];
            Ok(vec![self.total])
        }

        fn state(&self) -> f64 {
            self.total
        }

        fn default_action(&self) -> Vec<f64> {
            vec![0.0]
        }
    }

    /// Pair version: the state is `(left total, right total)`.
    #[derive(Clone, Debug, Default)]
    struct PairCounter {
        totals: (f64, f64),
    }

    impl Environment for PairCounter {
        type Observation = (f64, f64);
        type Action = (f64, f64);
        type State = (f64, f64);

        fn reset(&mut self) {
            self.totals = (0.0, 0.0);
        }

        fn step(&mut self, _t: f64, action: &(f64, f64)) -> SimResult<(f64, f64)> {
            self.totals.0 += action.0;
            self.totals.1 += action.1;
            Ok((self.totals.0, self.totals.1))
        }

        fn state(&self) -> (f64, f64) {
            self.totals
        }

        fn default_action(&self) -> (f64, f64) {
            (0.0, 0.0)
        }
    }

    #[test]
    fn test_single_run_records_every_step() {
        let task = SingleAgentTask::new(Counter::default, TaskConfig::default());
        let mut agent = ConstantAgent::new(vec![1.0]);
        let outcome = task.run(&mut agent).unwrap();

        assert_eq!(outcome.len(), 11);
        assert_eq!(outcome.termination(), Termination::TimeExhausted);
        assert_eq!(outcome.last().unwrap().state, 11.0);
        assert!((outcome.last().unwrap().time - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_step_holds_observation_acted_on() {
        let task = SingleAgentTask::new(Counter::default, TaskConfig::default());
        let mut agent = ConstantAgent::new(vec![1.0]);
        let outcome = task.run(&mut agent).unwrap();

        // First observation comes from the priming step with the zero action
        assert_eq!(outcome.first().unwrap().observation, vec![0.0]);
        assert_eq!(outcome.first().unwrap().state, 1.0);
        assert_eq!(outcome.nth(3).unwrap().observation, vec![3.0]);
    }

    #[test]
    fn test_stop_condition() {
        let task = SingleAgentTask::new(Counter::default, TaskConfig::default())
            .with_stop_condition(|total: &f64| *total >= 3.0);
        let mut agent = ConstantAgent::new(vec![1.0]);
        let outcome = task.run(&mut agent).unwrap();

        assert_eq!(outcome.len(), 3);
        assert_eq!(outcome.termination(), Termination::StopCondition);
    }

    #[test]
    fn test_stop_at_start_gives_empty_outcome() {
        let task = SingleAgentTask::new(Counter::default, TaskConfig::default())
            .with_stop_condition(|_: &f64| true);
        let mut agent = ConstantAgent::new(vec![1.0]);
        let outcome = task.run(&mut agent).unwrap();

        assert!(outcome.is_empty());
        assert_eq!(outcome.termination(), Termination::StopCondition);
    }

    #[test]
    fn test_wrong_action_size_aborts() {
        let task = SingleAgentTask::new(Counter::default, TaskConfig::default());
        let mut agent = ConstantAgent::new(vec![1.0, 2.0]);
        assert_eq!(
            task.run(&mut agent).unwrap_err(),
            SimError::ActionSize { expected: 1, actual: 2 }
        );
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = TaskConfig::default();
        config.dt = 0.0;
        let task = SingleAgentTask::new(Counter::default, config);
        let mut agent = ConstantAgent::new(vec![1.0]);
        assert_eq!(task.run(&mut agent).unwrap_err(), SimError::InvalidTimeStep(0.0));
    }

    #[test]
    fn test_agent_sees_step_times() {
        let task = SingleAgentTask::new(Counter::default, TaskConfig::new(1.0, 1.3, 0.1).unwrap());
        let mut seen = Vec::new();
        let mut agent = FnAgent::new(|t: f64, _: &Vec<f64>| {
            seen.push(t);
            vec![0.0]
        });
        task.run(&mut agent).unwrap();
        drop(agent);

        assert_eq!(seen.len(), 4);
        assert!((seen[0] - 1.0).abs() < 1e-12);
        assert!((seen[3] - 1.3).abs() < 1e-12);
    }

    #[test]
    fn test_reset_agent_flag() {
        /// Counts steps since the last reset.
        struct Steps(usize);

        impl Agent for Steps {
            type Input = Vec<f64>;
            type Output = Vec<f64>;
            type State = usize;

            fn reset(&mut self) {
                self.0 = 0;
            }

            fn step(&mut self, _t: f64, _input: &Vec<f64>) -> Vec<f64> {
                self.0 += 1;
                vec![0.0]
            }

            fn state(&self) -> usize {
                self.0
            }
        }

        let resetting = SingleAgentTask::new(Counter::default, TaskConfig::default());
        let mut agent = Steps(0);
        resetting.run(&mut agent).unwrap();
        resetting.run(&mut agent).unwrap();
        assert_eq!(agent.state(), 11);

        let persistent = SingleAgentTask::new(
            Counter::default,
            TaskConfig::default().with_reset_agent(false),
        );
        let mut agent = Steps(0);
        persistent.run(&mut agent).unwrap();
        persistent.run(&mut agent).unwrap();
        assert_eq!(agent.state(), 22);
    }

    #[test]
    fn test_pair_agents_see_own_half() {
        let task = HomogeneousPairTask::new(PairCounter::default, TaskConfig::new(0.0, 0.4, 0.1).unwrap());
        let policy = |_t: f64, _obs: &f64| 1.0;
        let mut first = FnAgent::new(policy);
        let mut second = FnAgent::new(policy);
        let outcome = task.run(&mut first, &mut second).unwrap();

        assert_eq!(outcome.len(), 5);
        assert_eq!(outcome.last().unwrap().state, (5.0, 5.0));
        assert_eq!(outcome.nth(2).unwrap().observation, (2.0, 2.0));
    }

    #[test]
    fn test_reward_threaded() {
        let task = RewardTask::new(
            Counter::default,
            TaskConfig::new(0.0, 0.3, 0.1).unwrap(),
            |total: &f64, _action: &Vec<f64>| *total * 10.0,
        );
        let mut rewards_seen = Vec::new();
        let mut agent = RewardIgnoring(ConstantAgent::new(vec![1.0]));
        let outcome = task.run(&mut agent).unwrap();

        for step in &outcome {
            rewards_seen.push(step.reward.unwrap());
        }
        assert_eq!(rewards_seen, vec![10.0, 20.0, 30.0, 40.0]);
        assert_eq!(outcome.total_reward(), 100.0);
    }

    #[test]
    fn test_reward_reaches_agent_one_step_late() {
        struct Echo(Vec<f64>);

        impl ReinforcementAgent for Echo {
            type Input = Vec<f64>;
            type Output = Vec<f64>;
            type State = ();

            fn reset(&mut self) {
                self.0.clear();
            }

            fn step(&mut self, _t: f64, _input: &Vec<f64>, reward: f64) -> Vec<f64> {
                self.0.push(reward);
                vec![1.0]
            }

            fn state(&self) -> Self::State {}
        }

        let task = RewardTask::new(
            Counter::default,
            TaskConfig::new(0.0, 0.2, 0.1).unwrap(),
            |total: &f64, _action: &Vec<f64>| *total,
        );
        let mut agent = Echo(Vec::new());
        task.run(&mut agent).unwrap();
        assert_eq!(agent.0, vec![0.0, 1.0, 2.0]);
    }
}
