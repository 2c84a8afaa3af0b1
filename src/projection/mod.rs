// Snapshot projection
// Turns one step of a trace into the renderer-facing view: scene, note, highlights

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::trace::{AlgorithmId, Counters, NodeId, Snapshot, StepEvent, StepKind, Trace};

/// Scene element the renderer should emphasize for the current step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "target", rename_all = "snake_case")]
pub enum Highlight {
    /// Board square (row, column)
    Square { row: usize, col: usize },
    /// Graph vertex by index
    Vertex { id: usize },
    /// Graph edge by endpoints
    Edge { u: usize, v: usize },
    /// DP table cell (row, column)
    Cell { row: usize, col: usize },
    /// Huffman forest node
    HuffmanNode { id: NodeId },
    /// AVL node by key
    TreeKey { key: i64 },
}

/// Everything the renderer needs to draw one step
///
/// Owns its scene outright; holding a projection never borrows from the
/// trace it came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectedState {
    pub trace_id: Uuid,
    pub algorithm: AlgorithmId,
    pub seq: u64,
    pub index: usize,
    pub total: usize,
    pub kind: StepKind,
    pub note: String,
    pub counters: Counters,
    pub scene: Snapshot,
    pub highlights: Vec<Highlight>,
}

/// Project the step at `index`, or `None` past the end of the trace
pub fn project(trace: &Trace, index: usize) -> Option<ProjectedState> {
    let step = trace.step(index)?;
    Some(ProjectedState {
        trace_id: trace.id(),
        algorithm: trace.algorithm(),
        seq: step.seq,
        index,
        total: trace.len(),
        kind: step.kind(),
        note: note_for(&step.event, &step.snapshot),
        counters: step.counters,
        scene: step.snapshot.clone(),
        highlights: highlights_for(&step.event, &step.snapshot),
    })
}

/// Wording for the step, specialized to the scene where the generic
/// positional phrasing would read poorly
fn note_for(event: &StepEvent, scene: &Snapshot) -> String {
    match (event, scene) {
        (StepEvent::Explore { position }, Snapshot::Board(_)) => {
            format!("Placing a queen in row {}", position)
        }
        (StepEvent::Try { position, candidate }, Snapshot::Board(_)) => {
            format!("Trying column {} for the queen in row {}", candidate, position)
        }
        (StepEvent::Accept { position, candidate }, Snapshot::Board(_)) => {
            format!("Column {} is safe in row {}", candidate, position)
        }
        (StepEvent::Reject { position, candidate }, Snapshot::Board(_)) => {
            format!("Column {} is attacked in row {}", candidate, position)
        }
        (StepEvent::Backtrack { position, candidate }, Snapshot::Board(_)) => {
            format!("Removing the queen from row {}, column {}", position, candidate)
        }
        (StepEvent::Explore { position }, Snapshot::Coloring(_)) => {
            format!("Coloring vertex {}", position)
        }
        (StepEvent::Try { position, candidate }, Snapshot::Coloring(_)) => {
            format!("Trying color {} on vertex {}", candidate, position)
        }
        (StepEvent::Accept { position, candidate }, Snapshot::Coloring(_)) => {
            format!("Vertex {} takes color {}", position, candidate)
        }
        (StepEvent::Reject { position, candidate }, Snapshot::Coloring(_)) => {
            format!("A neighbor of vertex {} already has color {}", position, candidate)
        }
        (StepEvent::Backtrack { position, .. }, Snapshot::Coloring(_)) => {
            format!("Clearing the color of vertex {}", position)
        }
        (StepEvent::Explore { position }, Snapshot::Path(_)) => {
            format!("Choosing stop {} of the path", position)
        }
        (StepEvent::Try { position, candidate }, Snapshot::Path(_)) => {
            format!("Trying vertex {} as stop {}", candidate, position)
        }
        (StepEvent::Accept { candidate, .. }, Snapshot::Path(_)) => {
            format!("Vertex {} extends the path", candidate)
        }
        (StepEvent::Reject { candidate, .. }, Snapshot::Path(_)) => {
            format!("Vertex {} cannot follow the current path", candidate)
        }
        (StepEvent::Backtrack { candidate, .. }, Snapshot::Path(_)) => {
            format!("Dropping vertex {} from the path", candidate)
        }
        _ => event.describe(),
    }
}

fn highlights_for(event: &StepEvent, scene: &Snapshot) -> Vec<Highlight> {
    match event {
        StepEvent::Try { position, candidate }
        | StepEvent::Accept { position, candidate }
        | StepEvent::Reject { position, candidate }
        | StepEvent::Backtrack { position, candidate } => {
            search_highlights(*position, *candidate, scene)
        }

        StepEvent::TableFill { row, col, .. } | StepEvent::TraceBack { row, col, .. } => {
            vec![Highlight::Cell { row: *row, col: *col }]
        }

        StepEvent::ExtractPair { first, second } => vec![
            Highlight::HuffmanNode { id: *first },
            Highlight::HuffmanNode { id: *second },
        ],
        StepEvent::MergeNodes { parent, left, right, .. } => vec![
            Highlight::HuffmanNode { id: *parent },
            Highlight::HuffmanNode { id: *left },
            Highlight::HuffmanNode { id: *right },
        ],
        StepEvent::CodeAssigned { symbol, .. } => match scene {
            Snapshot::Huffman(huffman) => huffman
                .leaf_id(*symbol)
                .map(|id| vec![Highlight::HuffmanNode { id }])
                .unwrap_or_default(),
            _ => Vec::new(),
        },

        StepEvent::FrontierStart { start } => vec![Highlight::Vertex { id: *start }],
        StepEvent::EdgeAccepted { u, v, .. } | StepEvent::EdgeRejected { u, v, .. } => {
            vec![Highlight::Edge { u: *u, v: *v }]
        }

        StepEvent::Descend { at, .. } | StepEvent::HeightUpdated { at, .. } => {
            vec![Highlight::TreeKey { key: *at }]
        }
        StepEvent::DuplicateKey { key }
        | StepEvent::LeafAttached { key, .. }
        | StepEvent::KeySettled { key } => vec![Highlight::TreeKey { key: *key }],
        StepEvent::Rotation { pivot, .. } => vec![Highlight::TreeKey { key: *pivot }],

        _ => Vec::new(),
    }
}

/// Candidate steps touch different scene elements depending on the search
/// problem: a board square, the vertex being colored, or the path edge
/// being extended
fn search_highlights(position: usize, candidate: usize, scene: &Snapshot) -> Vec<Highlight> {
    match scene {
        Snapshot::Board(_) => vec![Highlight::Square { row: position, col: candidate }],
        Snapshot::Coloring(_) => vec![Highlight::Vertex { id: position }],
        Snapshot::Path(path) => {
            let mut highlights = vec![Highlight::Vertex { id: candidate }];
            if position > 0 {
                if let Some(&previous) = path.path.get(position - 1) {
                    highlights.push(Highlight::Edge { u: previous, v: candidate });
                }
            }
            highlights
        }
        _ => Vec::new(),
    }
}
