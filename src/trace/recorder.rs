// Trace recorder
// Append-only step sink a driver feeds while it executes

use crate::trace::snapshot::Snapshot;
use crate::trace::step::{Counters, Step, StepEvent};
use crate::trace::{AlgorithmId, Trace};

/// Records steps during one driver run and seals them into a trace
///
/// Sequence numbers are assigned here, never by the caller, so they come out
/// gap-free and strictly increasing. The snapshot handed to `record` must
/// already be an independent copy of the driver's working state; the recorder
/// stores it as given and never hands it back out mutably.
pub struct Recorder {
    algorithm: AlgorithmId,
    steps: Vec<Step>,
    counters: Counters,
}

impl Recorder {
    /// Start an empty recording for one driver invocation
    pub fn new(algorithm: AlgorithmId) -> Self {
        Recorder {
            algorithm,
            steps: Vec::new(),
            counters: Counters::default(),
        }
    }

    /// Count one decision point entered
    pub fn attempt(&mut self) {
        self.counters.attempts += 1;
    }

    /// Count one signature operation (backtrack, merge, union, rotation)
    pub fn key_op(&mut self) {
        self.counters.key_ops += 1;
    }

    /// Append a step with the next sequence number and the current counters
    pub fn record(&mut self, event: StepEvent, snapshot: Snapshot) {
        let seq = self.steps.len() as u64;
        self.steps.push(Step {
            seq,
            event,
            snapshot,
            counters: self.counters,
        });
    }

    /// Number of steps recorded so far
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Seal the recording into an immutable trace
    pub fn finish(self) -> Trace {
        Trace::new(self.algorithm, self.steps)
    }
}
