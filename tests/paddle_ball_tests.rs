//! End-to-end tests for the paddle/ball environment.

use rust_agentsim::task::{fitness, stop};
use rust_agentsim::{
    ConstantAgent, DoubleRange, Environment, FnAgent, HomogeneousPairTask, PaddleBallConfig,
    PaddleBallEnvironment, Point, TaskConfig, Termination,
};

const MAX_DELTA: f64 = 1.0;
const HEIGHT: f64 = 1.0;

fn tracking_config() -> PaddleBallConfig {
    PaddleBallConfig::default()
        .with_size(2.0, HEIGHT)
        .with_paddle_length(0.2)
        .with_max_delta(MAX_DELTA)
        .with_speeds(0.5, 0.8)
        .with_hit_speedup(1.05)
        .with_serve_angle_range(DoubleRange::new(-std::f64::consts::FRAC_PI_4, std::f64::consts::FRAC_PI_4))
}

/// Move the paddle onto the ball's current height.
fn track(_t: f64, observation: &Vec<f64>) -> Vec<f64> {
    let own_y = observation[0];
    let ball_y = observation[3];
    vec![(ball_y - own_y) * HEIGHT / MAX_DELTA]
}

// =============================================================================
// Perfect Tracking
// =============================================================================

#[test]
fn test_tracking_paddles_never_concede() {
    let task = HomogeneousPairTask::new(
        || PaddleBallEnvironment::new(tracking_config(), 2024),
        TaskConfig::new(0.0, 1000.0, 0.1).unwrap(),
    );
    let mut left = FnAgent::new(track);
    let mut right = FnAgent::new(track);
    let outcome = task.run(&mut left, &mut right).unwrap();

    assert_eq!(outcome.len(), 10_001);
    assert_eq!(outcome.termination(), Termination::TimeExhausted);
    for state in outcome.states() {
        assert!(state.ball_speed() <= 0.8 + 1e-9);
        assert_eq!(state.total_score(), 0);
    }
    assert_eq!(fitness::score_difference(&outcome), 0);
    assert!(fitness::total_paddle_collisions(&outcome) > 10);
}

#[test]
fn test_tracking_pair_sees_mirrored_views() {
    let task = HomogeneousPairTask::new(
        || PaddleBallEnvironment::new(tracking_config(), 5),
        TaskConfig::new(0.0, 1.0, 0.1).unwrap(),
    );
    let mut left = FnAgent::new(track);
    let mut right = FnAgent::new(track);
    let outcome = task.run(&mut left, &mut right).unwrap();

    for step in &outcome {
        let (l, r) = &step.observation;
        // Ball x is mirrored, ball y is shared
        assert!((l[2] + r[2] - 1.0).abs() < 1e-9);
        assert_eq!(l[3], r[3]);
        assert_eq!(l[0], r[1]);
    }
}

#[test]
fn test_first_recorded_step_holds_served_ball() {
    let task = HomogeneousPairTask::new(
        || PaddleBallEnvironment::new(tracking_config(), 11),
        TaskConfig::new(0.0, 0.2, 0.1).unwrap(),
    );
    let mut idle = ConstantAgent::new(vec![0.0]);
    let mut other = ConstantAgent::new(vec![0.0]);
    let outcome = task.run(&mut idle, &mut other).unwrap();

    // The priming step and the first recorded step share t = 0, so no time passes
    let first = &outcome.first().unwrap().state;
    assert_eq!(first.ball_position, Point::new(1.0, 0.5));

    let second = &outcome.nth(1).unwrap().state;
    let expected = first.ball_position + first.ball_velocity * 0.1;
    assert!(second.ball_position.distance(expected) < 1e-12);
}

// =============================================================================
// Scoring
// =============================================================================

#[test]
fn test_idle_paddles_concede() {
    let task = HomogeneousPairTask::new(
        || PaddleBallEnvironment::new(tracking_config(), 9),
        TaskConfig::new(0.0, 1000.0, 0.1).unwrap(),
    )
    .with_stop_condition(stop::score_reached(1));
    // Both paddles park at the bottom edge
    let mut left = ConstantAgent::new(vec![1.0]);
    let mut right = ConstantAgent::new(vec![1.0]);
    let outcome = task.run(&mut left, &mut right).unwrap();

    assert_eq!(outcome.termination(), Termination::StopCondition);
    let last = outcome.last().unwrap().state;
    assert_eq!(last.total_score(), 1);
    assert_eq!(fitness::score_difference(&outcome).abs(), 1);
}

#[test]
fn test_seeded_runs_are_reproducible() {
    let run = |seed| {
        let task = HomogeneousPairTask::new(
            move || PaddleBallEnvironment::new(tracking_config(), seed),
            TaskConfig::new(0.0, 50.0, 0.1).unwrap(),
        );
        let mut left = ConstantAgent::new(vec![0.3]);
        let mut right = ConstantAgent::new(vec![-0.3]);
        task.run(&mut left, &mut right).unwrap()
    };

    assert_eq!(run(1), run(1));
    assert_ne!(run(1).last().unwrap().state, run(2).last().unwrap().state);
}

#[test]
fn test_reset_idempotent() {
    let mut env = PaddleBallEnvironment::new(tracking_config(), 77);
    env.reset();
    env.reset();
    let first = env.step(0.0, &env.default_action()).unwrap();

    env.step(0.5, &(vec![1.0], vec![1.0])).unwrap();
    env.reset();
    env.reset();
    assert_eq!(env.step(0.0, &env.default_action()).unwrap(), first);
}
