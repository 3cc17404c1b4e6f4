//! Policy implementations and wiring for Mazebots agents.
//!
//! A [`Policy`] is an opaque float-vector evaluator with self-reported arity.
//! [`into_runner`] bridges it into the core's fixed-arity
//! [`PolicyRunner`] seam, validating the arity exactly once at wiring time —
//! the decision loop's index-selection contract is undefined for any output
//! length other than [`OUTPUT_SIZE`], so a mismatch is a fatal configuration
//! error, never a per-tick condition.

use mazebots_core::{INPUT_SIZE, OUTPUT_SIZE, PolicyRunner};
use thiserror::Error;

mod feedforward;
mod greedy;
mod worker;

pub use feedforward::FeedForwardPolicy;
pub use greedy::GreedyPolicy;
pub use worker::WorkerRunner;

/// Opaque evaluator mapping a feature vector to preference scores.
pub trait Policy: Send {
    /// Static identifier of the policy implementation.
    fn kind(&self) -> &'static str;

    /// Number of input features this policy expects.
    fn input_len(&self) -> usize;

    /// Number of preference scores this policy produces.
    fn output_len(&self) -> usize;

    /// Evaluate the policy. `inputs.len()` equals [`Policy::input_len`]; the
    /// returned vector must have length [`Policy::output_len`].
    fn evaluate(&mut self, inputs: &[f32]) -> Vec<f32>;
}

/// Fatal configuration errors detected when wiring a policy to the core.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PolicyWiringError {
    #[error("policy {kind} expects {actual} inputs, the sensor contract provides {expected}")]
    InputArity {
        kind: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("policy {kind} produces {actual} outputs, the action contract requires {expected}")]
    OutputArity {
        kind: &'static str,
        expected: usize,
        actual: usize,
    },
}

struct PolicyBridge<P> {
    policy: P,
}

impl<P: Policy> PolicyRunner for PolicyBridge<P> {
    fn kind(&self) -> &'static str {
        self.policy.kind()
    }

    fn evaluate(&mut self, inputs: &[f32; INPUT_SIZE]) -> [f32; OUTPUT_SIZE] {
        let raw = self.policy.evaluate(inputs);
        debug_assert_eq!(raw.len(), OUTPUT_SIZE, "arity was validated at wiring");
        let mut outputs = [0.0; OUTPUT_SIZE];
        for (lane, value) in outputs.iter_mut().zip(raw) {
            *lane = value;
        }
        outputs
    }
}

/// Wrap a [`Policy`] as a core [`PolicyRunner`], validating arity once.
pub fn into_runner<P>(policy: P) -> Result<Box<dyn PolicyRunner>, PolicyWiringError>
where
    P: Policy + 'static,
{
    if policy.input_len() != INPUT_SIZE {
        return Err(PolicyWiringError::InputArity {
            kind: policy.kind(),
            expected: INPUT_SIZE,
            actual: policy.input_len(),
        });
    }
    if policy.output_len() != OUTPUT_SIZE {
        return Err(PolicyWiringError::OutputArity {
            kind: policy.kind(),
            expected: OUTPUT_SIZE,
            actual: policy.output_len(),
        });
    }
    Ok(Box::new(PolicyBridge { policy }))
}
