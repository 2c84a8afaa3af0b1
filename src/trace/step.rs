// Step records
// The immutable unit of a trace: what happened, plus a deep copy of working state

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::trace::snapshot::Snapshot;

/// Stable identity for a node in the Huffman forest
/// Assigned in creation order so events and snapshots agree across steps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub u32);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

/// Left/right discriminator shared by tree descent and rotation events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Lowercase name for display
    pub fn label(&self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
        }
    }
}

/// The four AVL imbalance cases, in the priority order they are checked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RotationCase {
    LeftLeft,
    RightRight,
    LeftRight,
    RightLeft,
}

impl RotationCase {
    /// Textbook shorthand (LL, RR, LR, RL)
    pub fn label(&self) -> &'static str {
        match self {
            RotationCase::LeftLeft => "LL",
            RotationCase::RightRight => "RR",
            RotationCase::LeftRight => "LR",
            RotationCase::RightLeft => "RL",
        }
    }
}

/// The operation a DP cell was filled with (or followed during traceback)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellOp {
    Match,
    Replace,
    Insert,
    Delete,
}

impl CellOp {
    /// Lowercase name for display
    pub fn label(&self) -> &'static str {
        match self {
            CellOp::Match => "match",
            CellOp::Replace => "replace",
            CellOp::Insert => "insert",
            CellOp::Delete => "delete",
        }
    }
}

/// One operation of a reconstructed edit script, in source order
/// Replaying the script left to right transforms the source string into the target
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum EditOp {
    Keep { ch: char },
    Replace { from: char, to: char },
    Insert { ch: char },
    Delete { ch: char },
}

/// A symbol together with its assigned Huffman code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolCode {
    pub symbol: char,
    pub code: String,
}

/// Coarse classification of a step, for renderer color-coding and filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    Explore,
    Try,
    Accept,
    Reject,
    Backtrack,
    Solution,
    Exhausted,
    Init,
    Fill,
    TraceBack,
    Extract,
    Merge,
    Assign,
    Compare,
    Update,
    Rotate,
    Done,
    Incomplete,
}

/// Monotonic effort counters carried by every step
///
/// `attempts` counts decision points entered: positions explored, cells
/// filled, extraction rounds, edges considered, keys inserted. `key_ops`
/// counts the driver's signature operation: backtracks, traceback moves,
/// merges, unions, rotations. Both are non-decreasing within one trace.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counters {
    pub attempts: u64,
    pub key_ops: u64,
}

/// What happened at one step, with its full payload by value
/// No variant references driver-internal state; every field is self-contained
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StepEvent {
    // --- Backtracking search ---
    /// Entered a decision position (row, vertex, path slot)
    Explore { position: usize },
    /// Testing a candidate against the safety predicate
    Try { position: usize, candidate: usize },
    /// Candidate committed to the working state
    Accept { position: usize, candidate: usize },
    /// Candidate failed the safety predicate
    Reject { position: usize, candidate: usize },
    /// Candidate undone after the deeper search came back empty
    Backtrack { position: usize, candidate: usize },
    /// A complete assignment was reached
    SolutionFound { assignment: Vec<usize> },
    /// The whole space was searched without success
    Exhausted,
    /// All-solutions enumeration finished
    EnumerationDone { solutions: usize },

    // --- Tabulation ---
    /// Table allocated with boundary row and column filled
    TableInit { rows: usize, cols: usize },
    /// One interior cell computed from the recurrence
    TableFill { row: usize, col: usize, value: u32, op: CellOp },
    /// One move of the reconstruction walk from (m, n) toward (0, 0)
    TraceBack { row: usize, col: usize, op: CellOp },
    /// Reconstruction finished; the script replays source into target
    ScriptReady { distance: u32, script: Vec<EditOp> },

    // --- Huffman ---
    /// Priority queue seeded with one leaf per distinct symbol
    QueueSeeded { leaves: usize },
    /// The two minimum-weight nodes left the queue
    ExtractPair { first: NodeId, second: NodeId },
    /// Internal node created over the extracted pair
    MergeNodes { parent: NodeId, left: NodeId, right: NodeId, weight: u64 },
    /// A leaf received its code during the final traversal
    CodeAssigned { symbol: char, code: String },
    /// Every symbol has a code
    CodesReady { codes: Vec<SymbolCode> },

    // --- Minimum spanning tree ---
    /// Kruskal: edge indices in stable weight order
    EdgesSorted { order: Vec<usize> },
    /// Prim: the visited set starts from this vertex
    FrontierStart { start: usize },
    /// Edge joined the tree
    EdgeAccepted { index: usize, u: usize, v: usize, weight: u32 },
    /// Edge skipped because its endpoints were already connected
    EdgeRejected { index: usize, u: usize, v: usize, weight: u32 },
    /// All vertices connected
    MstComplete { total_weight: u64, accepted: usize },
    /// No spanning tree exists; the accepted edges form a forest
    MstIncomplete { total_weight: u64, accepted: usize, components: usize },

    // --- AVL insertion ---
    /// Insertion of one key begins
    KeyStart { key: i64 },
    /// Comparison at an ancestor decided the descent direction
    Descend { at: i64, toward: Side },
    /// Key already present; the tree is left untouched
    DuplicateKey { key: i64 },
    /// New leaf linked under its parent (`parent` is `None` for the root)
    LeafAttached { key: i64, parent: Option<i64>, side: Option<Side> },
    /// Ancestor height and balance factor recomputed on the unwind path
    HeightUpdated { at: i64, height: u32, balance: i32 },
    /// One elementary rotation (a double rotation records two of these)
    Rotation { pivot: i64, direction: Side, case: RotationCase },
    /// Insertion of this key is complete and the subtree is balanced again
    KeySettled { key: i64 },
    /// Every key processed
    TreeComplete { size: usize, height: u32 },
}

impl StepEvent {
    /// Coarse kind for renderer color-coding
    pub fn kind(&self) -> StepKind {
        match self {
            StepEvent::Explore { .. } => StepKind::Explore,
            StepEvent::Try { .. } => StepKind::Try,
            StepEvent::Accept { .. } => StepKind::Accept,
            StepEvent::Reject { .. } => StepKind::Reject,
            StepEvent::Backtrack { .. } => StepKind::Backtrack,
            StepEvent::SolutionFound { .. } => StepKind::Solution,
            StepEvent::Exhausted => StepKind::Exhausted,
            StepEvent::EnumerationDone { .. } => StepKind::Done,
            StepEvent::TableInit { .. } => StepKind::Init,
            StepEvent::TableFill { .. } => StepKind::Fill,
            StepEvent::TraceBack { .. } => StepKind::TraceBack,
            StepEvent::ScriptReady { .. } => StepKind::Done,
            StepEvent::QueueSeeded { .. } => StepKind::Init,
            StepEvent::ExtractPair { .. } => StepKind::Extract,
            StepEvent::MergeNodes { .. } => StepKind::Merge,
            StepEvent::CodeAssigned { .. } => StepKind::Assign,
            StepEvent::CodesReady { .. } => StepKind::Done,
            StepEvent::EdgesSorted { .. } => StepKind::Init,
            StepEvent::FrontierStart { .. } => StepKind::Init,
            StepEvent::EdgeAccepted { .. } => StepKind::Accept,
            StepEvent::EdgeRejected { .. } => StepKind::Reject,
            StepEvent::MstComplete { .. } => StepKind::Done,
            StepEvent::MstIncomplete { .. } => StepKind::Incomplete,
            StepEvent::KeyStart { .. } => StepKind::Explore,
            StepEvent::Descend { .. } => StepKind::Compare,
            StepEvent::DuplicateKey { .. } => StepKind::Reject,
            StepEvent::LeafAttached { .. } => StepKind::Accept,
            StepEvent::HeightUpdated { .. } => StepKind::Update,
            StepEvent::Rotation { .. } => StepKind::Rotate,
            StepEvent::KeySettled { .. } => StepKind::Solution,
            StepEvent::TreeComplete { .. } => StepKind::Done,
        }
    }

    /// Human-readable explanation of the step for display next to the scene
    pub fn describe(&self) -> String {
        match self {
            StepEvent::Explore { position } => format!("Exploring position {}", position),
            StepEvent::Try { position, candidate } => {
                format!("Trying candidate {} at position {}", candidate, position)
            }
            StepEvent::Accept { position, candidate } => {
                format!("Accepted candidate {} at position {}", candidate, position)
            }
            StepEvent::Reject { position, candidate } => {
                format!("Rejected candidate {} at position {}", candidate, position)
            }
            StepEvent::Backtrack { position, candidate } => {
                format!("Backtracked from candidate {} at position {}", candidate, position)
            }
            StepEvent::SolutionFound { assignment } => {
                format!("Found a solution: {:?}", assignment)
            }
            StepEvent::Exhausted => "Search space exhausted, no solution exists".to_string(),
            StepEvent::EnumerationDone { solutions } => {
                format!("Enumeration complete, {} solution(s) found", solutions)
            }
            StepEvent::TableInit { rows, cols } => {
                format!("Initialized a {}x{} table with boundary costs", rows, cols)
            }
            StepEvent::TableFill { row, col, value, op } => {
                format!("Cell ({}, {}) = {} via {}", row, col, value, op.label())
            }
            StepEvent::TraceBack { row, col, op } => {
                format!("Traceback at ({}, {}) chose {}", row, col, op.label())
            }
            StepEvent::ScriptReady { distance, script } => {
                format!("Edit distance {}, script has {} operations", distance, script.len())
            }
            StepEvent::QueueSeeded { leaves } => {
                format!("Seeded the queue with {} leaves", leaves)
            }
            StepEvent::ExtractPair { first, second } => {
                format!("Extracted {} and {} from the queue", first, second)
            }
            StepEvent::MergeNodes { parent, left, right, weight } => {
                format!("Merged {} and {} into {} (weight {})", left, right, parent, weight)
            }
            StepEvent::CodeAssigned { symbol, code } => {
                format!("Assigned code {:?} to {:?}", code, symbol)
            }
            StepEvent::CodesReady { codes } => {
                format!("Code table complete for {} symbols", codes.len())
            }
            StepEvent::EdgesSorted { order } => {
                format!("Sorted {} edges by ascending weight", order.len())
            }
            StepEvent::FrontierStart { start } => {
                format!("Growing the tree from vertex {}", start)
            }
            StepEvent::EdgeAccepted { u, v, weight, .. } => {
                format!("Accepted edge ({}, {}) with weight {}", u, v, weight)
            }
            StepEvent::EdgeRejected { u, v, .. } => {
                format!("Edge ({}, {}) closes a cycle, skipped", u, v)
            }
            StepEvent::MstComplete { total_weight, accepted } => {
                format!(
                    "Spanning tree complete: {} edges, total weight {}",
                    accepted, total_weight
                )
            }
            StepEvent::MstIncomplete { total_weight, accepted, components } => {
                format!(
                    "Graph is disconnected: {} components remain after {} edges (weight {})",
                    components, accepted, total_weight
                )
            }
            StepEvent::KeyStart { key } => format!("Inserting key {}", key),
            StepEvent::Descend { at, toward } => {
                format!("At node {}, descending {}", at, toward.label())
            }
            StepEvent::DuplicateKey { key } => {
                format!("Key {} already present, tree unchanged", key)
            }
            StepEvent::LeafAttached { key, parent, side } => match (parent, side) {
                (Some(parent), Some(side)) => {
                    format!("Attached {} as the {} child of {}", key, side.label(), parent)
                }
                _ => format!("Attached {} as the root", key),
            },
            StepEvent::HeightUpdated { at, height, balance } => {
                format!("Node {} now has height {} and balance {}", at, height, balance)
            }
            StepEvent::Rotation { pivot, direction, case } => {
                format!(
                    "Rotated {} at node {} ({} case)",
                    direction.label(),
                    pivot,
                    case.label()
                )
            }
            StepEvent::KeySettled { key } => {
                format!("Key {} settled, subtree balanced", key)
            }
            StepEvent::TreeComplete { size, height } => {
                format!("Tree complete: {} nodes, height {}", size, height)
            }
        }
    }
}

/// A single immutable record in a trace
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    /// 0-based index in the trace, assigned by the recorder, gap-free
    pub seq: u64,

    /// What happened
    pub event: StepEvent,

    /// Deep, independent copy of the driver's working state after the event
    pub snapshot: Snapshot,

    /// Counter values at the moment this step was recorded
    pub counters: Counters,
}

impl Step {
    /// Coarse kind of the underlying event
    pub fn kind(&self) -> StepKind {
        self.event.kind()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_kinds() {
        assert_eq!(StepEvent::Explore { position: 0 }.kind(), StepKind::Explore);
        assert_eq!(
            StepEvent::Backtrack { position: 1, candidate: 2 }.kind(),
            StepKind::Backtrack
        );
        assert_eq!(StepEvent::Exhausted.kind(), StepKind::Exhausted);
        assert_eq!(
            StepEvent::TableFill { row: 1, col: 1, value: 0, op: CellOp::Match }.kind(),
            StepKind::Fill
        );
        assert_eq!(
            StepEvent::MergeNodes {
                parent: NodeId(2),
                left: NodeId(0),
                right: NodeId(1),
                weight: 5,
            }
            .kind(),
            StepKind::Merge
        );
        assert_eq!(
            StepEvent::MstIncomplete { total_weight: 0, accepted: 0, components: 3 }.kind(),
            StepKind::Incomplete
        );
        assert_eq!(
            StepEvent::Rotation {
                pivot: 5,
                direction: Side::Right,
                case: RotationCase::LeftLeft,
            }
            .kind(),
            StepKind::Rotate
        );
        assert_eq!(StepEvent::KeySettled { key: 5 }.kind(), StepKind::Solution);
    }

    #[test]
    fn test_describe_includes_payload() {
        let event = StepEvent::Try { position: 2, candidate: 3 };
        assert_eq!(event.describe(), "Trying candidate 3 at position 2");

        let event = StepEvent::EdgeRejected { index: 4, u: 1, v: 4, weight: 9 };
        assert_eq!(event.describe(), "Edge (1, 4) closes a cycle, skipped");

        let event = StepEvent::Rotation {
            pivot: 5,
            direction: Side::Right,
            case: RotationCase::LeftLeft,
        };
        assert_eq!(event.describe(), "Rotated right at node 5 (LL case)");
    }

    #[test]
    fn test_event_serialization_tag() {
        let json = serde_json::to_string(&StepEvent::Exhausted).unwrap();
        assert_eq!(json, r#"{"type":"exhausted"}"#);

        let json = serde_json::to_string(&StepEvent::TableFill {
            row: 1,
            col: 2,
            value: 3,
            op: CellOp::Replace,
        })
        .unwrap();
        assert!(json.contains(r#""type":"table_fill""#));
        assert!(json.contains(r#""op":"replace""#));
    }

    #[test]
    fn test_rotation_case_labels() {
        assert_eq!(RotationCase::LeftLeft.label(), "LL");
        assert_eq!(RotationCase::RightLeft.label(), "RL");
    }

    #[test]
    fn test_node_id_display() {
        assert_eq!(NodeId(7).to_string(), "n7");
    }
}
