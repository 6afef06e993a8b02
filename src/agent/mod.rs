//! Agents: the controllers a task steps against an environment.

mod linear;
mod simple;
mod traits;

pub use linear::{Activation, FrozenLinearAgent, LinearAgent, LinearParameters};
pub use simple::{ConstantAgent, FnAgent, RewardIgnoring};
pub use traits::{Agent, Freeze, ReinforcementAgent};
