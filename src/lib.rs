// Lovelace - Instrumented classic-algorithm runner with deterministic replay
// Module declarations

pub mod api;
pub mod avl;
pub mod graph;
pub mod greedy;
pub mod playback;
pub mod projection;
pub mod search;
pub mod tabular;
pub mod trace;

pub use api::{compute_trace, AlgorithmInput, InputError};
pub use graph::{Edge, Graph, GraphError};
pub use playback::{PlaybackController, PlaybackStatus};
pub use projection::{project, Highlight, ProjectedState};
pub use search::SearchMode;
pub use trace::{AlgorithmId, Outcome, Step, StepEvent, StepKind, Trace, TraceSummary};
