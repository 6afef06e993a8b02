//! Task drivers: run an agent against an environment over a time range and
//! record the [`Outcome`].

mod config;
pub mod fitness;
mod outcome;
mod runner;
pub mod stop;

pub use config::TaskConfig;
pub use outcome::{Outcome, Step, Termination};
pub use runner::{
    EnvOutcome, HomogeneousPairTask, RewardFunction, RewardTask, SingleAgentTask, StopCondition,
};
