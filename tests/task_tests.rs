//! Integration tests for the task drivers and outcomes.

use std::sync::Arc;

use rust_agentsim::task::{fitness, stop};
use rust_agentsim::{
    ConstantAgent, Freeze, LinearAgent, NavigationArena, NavigationState, Outcome,
    PointNavigationConfig, PointNavigationEnvironment, ReinforcementAgent, RewardIgnoring,
    RewardTask, SimRng, SingleAgentTask, TaskConfig, Termination,
};

type NavOutcome = Outcome<Vec<f64>, Vec<f64>, NavigationState>;

fn point_task(config: TaskConfig) -> SingleAgentTask<PointNavigationEnvironment, impl Fn() -> PointNavigationEnvironment> {
    let arena = Arc::new(NavigationArena::preset("a-barrier").unwrap());
    SingleAgentTask::new(
        move || PointNavigationEnvironment::new(Arc::clone(&arena), PointNavigationConfig::default(), 11),
        config,
    )
}

fn negative_distance(state: &NavigationState, _action: &Vec<f64>) -> f64 {
    -state.distance_to_target()
}

// =============================================================================
// Single Agent
// =============================================================================

#[test]
fn test_fresh_environment_per_run() {
    let task = point_task(TaskConfig::default());
    let mut agent = ConstantAgent::new(vec![0.5, -1.0]);

    let first = task.run(&mut agent).unwrap();
    let second = task.run(&mut agent).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_stop_holding_at_start_gives_empty_outcome() {
    let task = point_task(TaskConfig::default()).with_stop_condition(stop::target_reached(10.0));
    let mut agent = ConstantAgent::new(vec![0.0, 0.0]);
    let outcome = task.run(&mut agent).unwrap();

    assert!(outcome.is_empty());
    assert_eq!(outcome.termination(), Termination::StopCondition);
    assert!(fitness::final_distance_to_target(&outcome).is_none());
}

#[test]
fn test_times_are_strictly_increasing_steps_of_dt() {
    let task = point_task(TaskConfig::new(0.5, 3.0, 0.25).unwrap());
    let mut agent = ConstantAgent::new(vec![0.0, -1.0]);
    let outcome = task.run(&mut agent).unwrap();

    let times: Vec<f64> = outcome.times().collect();
    assert_eq!(times.len(), 11);
    assert_eq!(times[0], 0.5);
    for pair in times.windows(2) {
        assert!((pair[1] - pair[0] - 0.25).abs() < 1e-12);
    }
    assert!(outcome.get(1.75).is_some());
}

#[test]
fn test_frozen_agent_replays_identically() {
    let mut live = LinearAgent::zeros(4, 2);
    live.perturb(&mut SimRng::new(5), 1.0);
    let mut frozen = live.freeze();

    let task = point_task(TaskConfig::default());
    let from_live = task.run(&mut live).unwrap();

    live.perturb(&mut SimRng::new(6), 1.0);
    let from_frozen = task.run(&mut frozen).unwrap();
    assert_eq!(from_live, from_frozen);
}

#[test]
fn test_outcome_bytes_roundtrip() {
    let task = point_task(TaskConfig::default());
    let mut agent = ConstantAgent::new(vec![1.0, 0.0]);
    let outcome = task.run(&mut agent).unwrap();

    let bytes = outcome.to_bytes().unwrap();
    assert_eq!(NavOutcome::from_bytes(&bytes).unwrap(), outcome);
}

#[test]
fn test_map_states_to_distances() {
    let task = point_task(TaskConfig::default());
    let mut agent = ConstantAgent::new(vec![0.0, -1.0]);
    let outcome = task.run(&mut agent).unwrap();

    let distances = outcome.map_states(NavigationState::distance_to_target);
    let values: Vec<f64> = distances.states().copied().collect();
    assert_eq!(values.len(), outcome.len());
    assert!(values.windows(2).all(|w| w[1] <= w[0] + 1e-12));
}

// =============================================================================
// Reward-Threaded Runs
// =============================================================================

/// Moves up and remembers every reward it was handed.
struct Recorder {
    rewards: Vec<f64>,
}

impl ReinforcementAgent for Recorder {
    type Input = Vec<f64>;
    type Output = Vec<f64>;
    type State = Vec<f64>;

    fn reset(&mut self) {
        self.rewards.clear();
    }

    fn step(&mut self, _t: f64, _input: &Vec<f64>, reward: f64) -> Vec<f64> {
        self.rewards.push(reward);
        vec![0.0, -1.0]
    }

    fn state(&self) -> Vec<f64> {
        self.rewards.clone()
    }
}

#[test]
fn test_reward_recorded_per_step() {
    let arena = Arc::new(NavigationArena::preset("empty").unwrap());
    let task = RewardTask::new(
        move || PointNavigationEnvironment::new(Arc::clone(&arena), PointNavigationConfig::default(), 3),
        TaskConfig::default(),
        negative_distance,
    );
    let mut agent = RewardIgnoring(ConstantAgent::new(vec![0.0, -1.0]));
    let outcome = task.run(&mut agent).unwrap();

    for step in &outcome {
        let reward = step.reward.unwrap();
        assert_eq!(reward, -step.state.distance_to_target());
    }
    assert!(outcome.total_reward() < 0.0);
}

#[test]
fn test_reward_reaches_agent() {
    let arena = Arc::new(NavigationArena::preset("empty").unwrap());
    let task = RewardTask::new(
        move || PointNavigationEnvironment::new(Arc::clone(&arena), PointNavigationConfig::default(), 3),
        TaskConfig::default(),
        negative_distance,
    );
    let mut agent = Recorder { rewards: vec![99.0] };
    let outcome = task.run(&mut agent).unwrap();

    // Each action sees the reward that followed the previous one
    let recorded: Vec<f64> = outcome.iter().map(|step| step.reward.unwrap()).collect();
    let seen = agent.state();
    assert_eq!(seen.len(), recorded.len());
    assert_eq!(seen[0], 0.0);
    assert_eq!(&seen[1..], &recorded[..recorded.len() - 1]);
}
