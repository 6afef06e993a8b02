//! Linear controller and its frozen snapshot.
//!
//! `output = activation(W · input + b)`. The live [`LinearAgent`] exposes its
//! parameters for mutation by an outer optimiser; [`FrozenLinearAgent`] is a
//! copy that can be evaluated or replayed without being affected by later
//! updates.

use serde::{Deserialize, Serialize};

use super::{Agent, Freeze};
use crate::core::{DoubleRange, SimRng};

/// Output nonlinearity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Activation {
    #[default]
    Identity,
    Tanh,
}

impl Activation {
    #[must_use]
    pub fn apply(self, x: f64) -> f64 {
        match self {
            Activation::Identity => x,
            Activation::Tanh => x.tanh(),
        }
    }
}

/// Weights (one row per output), biases and activation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LinearParameters {
    pub weights: Vec<Vec<f64>>,
    pub bias: Vec<f64>,
    pub activation: Activation,
}

impl LinearParameters {
    /// Create parameters.
    ///
    /// # Panics
    ///
    /// Panics if the bias length differs from the number of weight rows or
    /// the rows have different lengths.
    pub fn new(weights: Vec<Vec<f64>>, bias: Vec<f64>, activation: Activation) -> Self {
        assert_eq!(weights.len(), bias.len(), "One bias per weight row required");
        if let Some(first) = weights.first() {
            assert!(
                weights.iter().all(|row| row.len() == first.len()),
                "Weight rows must have equal length"
            );
        }
        Self {
            weights,
            bias,
            activation,
        }
    }

    /// All-zero parameters.
    pub fn zeros(inputs: usize, outputs: usize) -> Self {
        Self::new(vec![vec![0.0; inputs]; outputs], vec![0.0; outputs], Activation::Identity)
    }

    #[must_use]
    pub fn input_size(&self) -> usize {
        self.weights.first().map_or(0, Vec::len)
    }

    #[must_use]
    pub fn output_size(&self) -> usize {
        self.bias.len()
    }

    /// Evaluate on `input`. Inputs beyond the weight row length are ignored;
    /// missing inputs count as zero.
    #[must_use]
    pub fn evaluate(&self, input: &[f64]) -> Vec<f64> {
        self.weights
            .iter()
            .zip(&self.bias)
            .map(|(row, b)| {
                let sum: f64 = row.iter().zip(input).map(|(w, x)| w * x).sum();
                self.activation.apply(sum + b)
            })
            .collect()
    }
}

/// Mutable linear controller.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LinearAgent {
    parameters: LinearParameters,
}

impl LinearAgent {
    pub fn new(parameters: LinearParameters) -> Self {
        Self { parameters }
    }

    /// Controller with zero weights, i.e. zero output under `Identity`.
    pub fn zeros(inputs: usize, outputs: usize) -> Self {
        Self::new(LinearParameters::zeros(inputs, outputs))
    }

    #[must_use]
    pub fn with_activation(mut self, activation: Activation) -> Self {
        self.parameters.activation = activation;
        self
    }

    #[must_use]
    pub fn parameters(&self) -> &LinearParameters {
        &self.parameters
    }

    pub fn parameters_mut(&mut self) -> &mut LinearParameters {
        &mut self.parameters
    }

    /// Add uniform noise in `[-scale, scale]` to every weight and bias.
    pub fn perturb(&mut self, rng: &mut SimRng, scale: f64) {
        let noise = DoubleRange::new(-scale.abs(), scale.abs());
        for w in self.parameters.weights.iter_mut().flatten() {
            *w += rng.gen_in(noise);
        }
        for b in &mut self.parameters.bias {
            *b += rng.gen_in(noise);
        }
    }
}

impl Agent for LinearAgent {
    type Input = Vec<f64>;
    type Output = Vec<f64>;
    type State = LinearParameters;

    /// Parameters persist across resets; there is no other internal state.
    fn reset(&mut self) {}

    fn step(&mut self, _t: f64, input: &Vec<f64>) -> Vec<f64> {
        self.parameters.evaluate(input)
    }

    fn state(&self) -> LinearParameters {
        self.parameters.clone()
    }
}

impl Freeze for LinearAgent {
    type Frozen = FrozenLinearAgent;

    fn freeze(&self) -> FrozenLinearAgent {
        FrozenLinearAgent {
            parameters: self.parameters.clone(),
        }
    }
}

/// Immutable snapshot of a [`LinearAgent`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FrozenLinearAgent {
    parameters: LinearParameters,
}

impl FrozenLinearAgent {
    #[must_use]
    pub fn parameters(&self) -> &LinearParameters {
        &self.parameters
    }

    #[must_use]
    pub fn evaluate(&self, input: &[f64]) -> Vec<f64> {
        self.parameters.evaluate(input)
    }
}

impl Agent for FrozenLinearAgent {
    type Input = Vec<f64>;
    type Output = Vec<f64>;
    type State = LinearParameters;

    fn reset(&mut self) {}

    fn step(&mut self, _t: f64, input: &Vec<f64>) -> Vec<f64> {
        self.evaluate(input)
    }

    fn state(&self) -> LinearParameters {
        self.parameters.clone()
    }
}
