//! Outcome recording.
//!
//! An [`Outcome`] is the ordered time → [`Step`] trace of one run. It is the
//! only artifact a run hands to reward, fitness and visualization code.
//! Steps live in an `im::Vector`, so cloning an outcome for several
//! consumers is cheap.

use im::Vector;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::core::{DoubleRange, SimError, SimResult};

/// Tolerance used when looking a step up by its time.
const TIME_TOLERANCE: f64 = 1e-9;

/// Why a run ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Termination {
    /// The stop predicate held on the environment state.
    StopCondition,
    /// The next step time would exceed `t_max`.
    TimeExhausted,
}

/// One recorded instant.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Step<O, A, S> {
    /// Time the action was applied.
    pub time: f64,

    /// Observation the agent acted on.
    pub observation: O,

    /// Action the agent emitted.
    pub action: A,

    /// Environment state after applying the action.
    pub state: S,

    /// Reward computed from `state` and `action`, for reward-threaded runs.
    pub reward: Option<f64>,
}

/// Time-ordered steps of a finished run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound(
    serialize = "O: Serialize + Clone, A: Serialize + Clone, S: Serialize + Clone",
    deserialize = "O: Deserialize<'de> + Clone, A: Deserialize<'de> + Clone, S: Deserialize<'de> + Clone"
))]
pub struct Outcome<O: Clone, A: Clone, S: Clone> {
    steps: Vector<Step<O, A, S>>,
    termination: Termination,
}

impl<O: Clone, A: Clone, S: Clone> Outcome<O, A, S> {
    pub(crate) fn new() -> Self {
        Self {
            steps: Vector::new(),
            termination: Termination::TimeExhausted,
        }
    }

    pub(crate) fn push(&mut self, step: Step<O, A, S>) {
        debug_assert!(
            self.steps.last().map_or(true, |last| last.time < step.time),
            "Step times must be strictly increasing"
        );
        self.steps.push_back(step);
    }

    pub(crate) fn set_termination(&mut self, termination: Termination) {
        self.termination = termination;
    }

    #[must_use]
    pub fn termination(&self) -> Termination {
        self.termination
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Recorded times in increasing order.
    pub fn times(&self) -> impl Iterator<Item = f64> + '_ {
        self.steps.iter().map(|step| step.time)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Step<O, A, S>> {
        self.steps.iter()
    }

    pub fn states(&self) -> impl Iterator<Item = &S> {
        self.steps.iter().map(|step| &step.state)
    }

    /// Step recorded at time `t`, if any.
    #[must_use]
    pub fn get(&self, t: f64) -> Option<&Step<O, A, S>> {
        let index = self
            .steps
            .binary_search_by(|step| {
                if (step.time - t).abs() <= TIME_TOLERANCE {
                    std::cmp::Ordering::Equal
                } else if step.time < t {
                    std::cmp::Ordering::Less
                } else {
                    std::cmp::Ordering::Greater
                }
            })
            .ok()?;
        self.steps.get(index)
    }

    /// Step at position `index`.
    #[must_use]
    pub fn nth(&self, index: usize) -> Option<&Step<O, A, S>> {
        self.steps.get(index)
    }

    #[must_use]
    pub fn first(&self) -> Option<&Step<O, A, S>> {
        self.steps.front()
    }

    #[must_use]
    pub fn last(&self) -> Option<&Step<O, A, S>> {
        self.steps.back()
    }

    /// Steps whose time lies in `range` (inclusive).
    #[must_use]
    pub fn subset(&self, range: DoubleRange) -> Self {
        Self {
            steps: self
                .steps
                .iter()
                .filter(|step| range.contains(step.time))
                .cloned()
                .collect(),
            termination: self.termination,
        }
    }

    /// Replace every state with `f(state)`.
    pub fn map_states<T: Clone>(&self, mut f: impl FnMut(&S) -> T) -> Outcome<O, A, T> {
        Outcome {
            steps: self
                .steps
                .iter()
                .map(|step| Step {
                    time: step.time,
                    observation: step.observation.clone(),
                    action: step.action.clone(),
                    state: f(&step.state),
                    reward: step.reward,
                })
                .collect(),
            termination: self.termination,
        }
    }

    /// Sum of recorded rewards; steps without a reward count as zero.
    #[must_use]
    pub fn total_reward(&self) -> f64 {
        self.steps.iter().filter_map(|step| step.reward).sum()
    }
}

impl<O, A, S> Outcome<O, A, S>
where
    O: Clone + Serialize + DeserializeOwned,
    A: Clone + Serialize + DeserializeOwned,
    S: Clone + Serialize + DeserializeOwned,
{
    /// Encode with bincode.
    pub fn to_bytes(&self) -> SimResult<Vec<u8>> {
        bincode::serialize(self).map_err(|e| SimError::Encode(e.to_string()))
    }

    /// Decode bytes produced by [`Outcome::to_bytes`].
    pub fn from_bytes(bytes: &[u8]) -> SimResult<Self> {
        bincode::deserialize(bytes).map_err(|e| SimError::Encode(e.to_string()))
    }
}

impl<'a, O: Clone, A: Clone, S: Clone> IntoIterator for &'a Outcome<O, A, S> {
    type Item = &'a Step<O, A, S>;
    type IntoIter = im::vector::Iter<'a, Step<O, A, S>>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}
