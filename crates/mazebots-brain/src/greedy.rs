//! Scripted pellet-chasing policy.

use crate::Policy;
use mazebots_core::{INPUT_SIZE, OUTPUT_SIZE};

/// Deterministic baseline that walks toward the nearest pellet.
///
/// Scores each relative lane as `mobility * (0.5 + proximity)`: blocked lanes
/// score zero, open lanes without a visible pellet tie at 0.5 (resolved to
/// the forward-most lane by the decision loop's tie break), and lanes with a
/// nearer pellet win outright. Useful as an integration-test driver and as a
/// floor for judging evolved policies.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedyPolicy;

impl Policy for GreedyPolicy {
    fn kind(&self) -> &'static str {
        "policy.greedy"
    }

    fn input_len(&self) -> usize {
        INPUT_SIZE
    }

    fn output_len(&self) -> usize {
        OUTPUT_SIZE
    }

    fn evaluate(&mut self, inputs: &[f32]) -> Vec<f32> {
        (0..OUTPUT_SIZE)
            .map(|lane| inputs[lane] * (0.5 + inputs[lane + OUTPUT_SIZE]))
            .collect()
    }
}
