//! Dense feed-forward baseline policy.

use crate::Policy;
use mazebots_core::{INPUT_SIZE, OUTPUT_SIZE};
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};

/// One fully connected layer with a tanh activation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
struct DenseLayer {
    inputs: usize,
    outputs: usize,
    /// Row-major `outputs x inputs` weight matrix.
    weights: Vec<f32>,
    biases: Vec<f32>,
}

impl DenseLayer {
    fn random(rng: &mut dyn RngCore, inputs: usize, outputs: usize) -> Self {
        let mut weights = Vec::with_capacity(inputs * outputs);
        for _ in 0..inputs * outputs {
            weights.push(rng.random_range(-1.0..1.0));
        }
        let mut biases = Vec::with_capacity(outputs);
        for _ in 0..outputs {
            biases.push(rng.random_range(-0.5..0.5));
        }
        Self {
            inputs,
            outputs,
            weights,
            biases,
        }
    }

    fn forward(&self, input: &[f32], output: &mut Vec<f32>) {
        output.clear();
        for row in 0..self.outputs {
            let offset = row * self.inputs;
            let mut acc = self.biases[row];
            for (weight, value) in self.weights[offset..offset + self.inputs].iter().zip(input) {
                acc += weight * value;
            }
            output.push(acc.tanh());
        }
    }
}

/// Small dense network from the sensor lanes to the four action lanes.
///
/// Parameters are serde-serializable so trained individuals can be stored and
/// reloaded by an external trainer; this crate does not mutate them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedForwardPolicy {
    layers: Vec<DenseLayer>,
    #[serde(skip)]
    scratch: (Vec<f32>, Vec<f32>),
}

impl PartialEq for FeedForwardPolicy {
    fn eq(&self, other: &Self) -> bool {
        // Scratch buffers are evaluation workspace, not identity.
        self.layers == other.layers
    }
}

impl FeedForwardPolicy {
    /// Identifier reported through [`Policy::kind`].
    pub const KIND: &'static str = "policy.feedforward";

    /// Construct a randomly initialized network with the given hidden layer
    /// widths between the fixed input and output arities.
    #[must_use]
    pub fn random(rng: &mut dyn RngCore, hidden: &[usize]) -> Self {
        let mut widths = Vec::with_capacity(hidden.len() + 2);
        widths.push(INPUT_SIZE);
        widths.extend_from_slice(hidden);
        widths.push(OUTPUT_SIZE);

        let layers = widths
            .windows(2)
            .map(|pair| DenseLayer::random(rng, pair[0], pair[1]))
            .collect();
        Self {
            layers,
            scratch: (Vec::new(), Vec::new()),
        }
    }

    /// Number of trainable parameters.
    #[must_use]
    pub fn parameter_count(&self) -> usize {
        self.layers
            .iter()
            .map(|layer| layer.weights.len() + layer.biases.len())
            .sum()
    }
}

impl Policy for FeedForwardPolicy {
    fn kind(&self) -> &'static str {
        Self::KIND
    }

    fn input_len(&self) -> usize {
        INPUT_SIZE
    }

    fn output_len(&self) -> usize {
        OUTPUT_SIZE
    }

    fn evaluate(&mut self, inputs: &[f32]) -> Vec<f32> {
        let (current, next) = &mut self.scratch;
        current.clear();
        current.extend_from_slice(inputs);
        for layer in &self.layers {
            layer.forward(current, next);
            std::mem::swap(current, next);
        }
        current.clone()
    }
}
