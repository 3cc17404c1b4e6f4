//! Off-thread policy evaluation with a blocking submit-and-wait contract.

use crossfire::mpsc;
use crossfire::{MTx, Rx};
use mazebots_core::{INPUT_SIZE, OUTPUT_SIZE, PolicyRunner};
use std::io;
use std::thread::JoinHandle;
use tracing::{debug, warn};

/// Runs a wrapped policy on its own worker thread.
///
/// Each [`evaluate`](PolicyRunner::evaluate) call submits exactly one request
/// and blocks until that request's reply arrives; there is never a second
/// in-flight request and no cancellation. The decision loop therefore never
/// observes a stale or partially computed output. A hung policy blocks its
/// agent's tick indefinitely — bounding evaluator latency is the host's job.
pub struct WorkerRunner {
    kind: &'static str,
    request_tx: Option<MTx<[f32; INPUT_SIZE]>>,
    reply_rx: Rx<[f32; OUTPUT_SIZE]>,
    worker: Option<JoinHandle<()>>,
}

impl WorkerRunner {
    /// Move `runner` onto a dedicated worker thread.
    pub fn spawn(mut runner: Box<dyn PolicyRunner>) -> io::Result<Self> {
        let kind = runner.kind();
        let (request_tx, request_rx) = mpsc::bounded_blocking::<[f32; INPUT_SIZE]>(1);
        let (reply_tx, reply_rx) = mpsc::bounded_blocking::<[f32; OUTPUT_SIZE]>(1);

        let worker = std::thread::Builder::new()
            .name(format!("policy-{kind}"))
            .spawn(move || {
                while let Ok(inputs) = request_rx.recv() {
                    let outputs = runner.evaluate(&inputs);
                    if reply_tx.send(outputs).is_err() {
                        break;
                    }
                }
                debug!(kind, "policy worker stopped");
            })?;

        Ok(Self {
            kind,
            request_tx: Some(request_tx),
            reply_rx,
            worker: Some(worker),
        })
    }
}

impl PolicyRunner for WorkerRunner {
    fn kind(&self) -> &'static str {
        self.kind
    }

    fn evaluate(&mut self, inputs: &[f32; INPUT_SIZE]) -> [f32; OUTPUT_SIZE] {
        let Some(request_tx) = &self.request_tx else {
            return [0.0; OUTPUT_SIZE];
        };
        if request_tx.send(*inputs).is_err() {
            warn!(kind = self.kind, "policy worker gone; returning neutral outputs");
            return [0.0; OUTPUT_SIZE];
        }
        match self.reply_rx.recv() {
            Ok(outputs) => outputs,
            Err(_) => {
                warn!(kind = self.kind, "policy worker dropped a reply; returning neutral outputs");
                [0.0; OUTPUT_SIZE]
            }
        }
    }
}

impl Drop for WorkerRunner {
    fn drop(&mut self) {
        // Closing the request channel lets the worker loop exit.
        self.request_tx.take();
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}
