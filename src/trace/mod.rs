// Trace model
// Immutable step sequences produced by drivers and consumed read-only by playback

pub mod recorder;
pub mod snapshot;
pub mod step;

pub use recorder::Recorder;
pub use snapshot::{
    BoardSnapshot, ColoringSnapshot, HuffmanNodeView, HuffmanSnapshot, MstSnapshot, PathSnapshot,
    Snapshot, TableSnapshot, TreeNodeView, TreeSnapshot,
};
pub use step::{
    CellOp, Counters, EditOp, NodeId, RotationCase, Side, Step, StepEvent, StepKind, SymbolCode,
};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Which driver produced a trace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlgorithmId {
    Queens,
    Coloring,
    Hamiltonian,
    EditDistance,
    Huffman,
    KruskalMst,
    PrimMst,
    Avl,
}

impl AlgorithmId {
    /// Human-readable name for UI display
    pub fn display_name(&self) -> &'static str {
        match self {
            AlgorithmId::Queens => "N-Queens",
            AlgorithmId::Coloring => "Graph Coloring",
            AlgorithmId::Hamiltonian => "Hamiltonian Path",
            AlgorithmId::EditDistance => "Edit Distance",
            AlgorithmId::Huffman => "Huffman Coding",
            AlgorithmId::KruskalMst => "Kruskal MST",
            AlgorithmId::PrimMst => "Prim MST",
            AlgorithmId::Avl => "AVL Insertion",
        }
    }
}

/// Terminal disposition of a trace, derived from its final step
/// A negative result (exhausted search, disconnected graph) is information,
/// not an error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// First-solution search succeeded
    Solved,
    /// All-solutions enumeration finished with this many solutions
    SolutionsFound { count: usize },
    /// Search space exhausted without a solution
    Exhausted,
    /// Non-search driver ran to completion
    Complete,
    /// Driver stopped early (disconnected MST input)
    Incomplete,
}

impl Outcome {
    fn from_terminal(event: &StepEvent) -> Self {
        match event {
            StepEvent::SolutionFound { .. } => Outcome::Solved,
            StepEvent::EnumerationDone { solutions } => {
                Outcome::SolutionsFound { count: *solutions }
            }
            StepEvent::Exhausted => Outcome::Exhausted,
            StepEvent::ScriptReady { .. }
            | StepEvent::CodesReady { .. }
            | StepEvent::MstComplete { .. }
            | StepEvent::TreeComplete { .. } => Outcome::Complete,
            _ => Outcome::Incomplete,
        }
    }
}

/// Renderer-facing digest of a finished trace
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceSummary {
    pub algorithm: AlgorithmId,
    pub steps: usize,
    pub outcome: Outcome,
    pub attempts: u64,
    pub key_ops: u64,
}

/// Complete, immutable record of one driver run on one input
///
/// Produced in a single eager pass before any playback begins. The step
/// sequence can only be read, never edited; replacing the input replaces the
/// whole trace.
#[derive(Debug, Clone, Serialize)]
pub struct Trace {
    id: Uuid,
    algorithm: AlgorithmId,
    created_at: DateTime<Utc>,
    steps: Vec<Step>,
}

impl Trace {
    pub(crate) fn new(algorithm: AlgorithmId, steps: Vec<Step>) -> Self {
        Trace {
            id: Uuid::new_v4(),
            algorithm,
            created_at: Utc::now(),
            steps,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn algorithm(&self) -> AlgorithmId {
        self.algorithm
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Number of steps
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Step at `index`, if in bounds
    pub fn step(&self, index: usize) -> Option<&Step> {
        self.steps.get(index)
    }

    /// The full step sequence
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// The terminal step, if the trace has any steps
    pub fn last(&self) -> Option<&Step> {
        self.steps.last()
    }

    /// Digest of the run: outcome plus final counters
    pub fn summary(&self) -> TraceSummary {
        let (outcome, counters) = match self.steps.last() {
            Some(step) => (Outcome::from_terminal(&step.event), step.counters),
            None => (Outcome::Incomplete, Counters::default()),
        };
        TraceSummary {
            algorithm: self.algorithm,
            steps: self.steps.len(),
            outcome,
            attempts: counters.attempts,
            key_ops: counters.key_ops,
        }
    }

    /// SHA256 hash of the canonical JSON encoding of the step sequence
    ///
    /// `id` and `created_at` are deliberately excluded, so two runs of the
    /// same driver on the same input produce equal fingerprints.
    pub fn fingerprint(&self) -> Result<String, serde_json::Error> {
        let bytes = serde_json::to_vec(&self.steps)?;
        let mut hasher = Sha256::new();
        hasher.update(&bytes);
        Ok(hex::encode(hasher.finalize()))
    }
}
