// Input surface
// One tagged input enum per driver, validated before any trace is computed

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::avl::run_insertions;
use crate::graph::{Graph, GraphError};
use crate::greedy::{run_huffman, run_kruskal, run_prim};
use crate::search::{run_search, Coloring, Hamiltonian, Queens, SearchMode};
use crate::tabular::run_edit_distance;
use crate::trace::{AlgorithmId, Recorder, Trace};

/// Board sizes the queens driver accepts
pub const MIN_BOARD_SIZE: usize = 1;
pub const MAX_BOARD_SIZE: usize = 10;

/// Largest palette the coloring driver accepts (zero is legal and
/// exhausts immediately)
pub const MAX_COLORS: usize = 16;

/// Character limit for each edit-distance string
pub const MAX_STRING_CHARS: usize = 32;

/// Character limit for the Huffman input text
pub const MAX_TEXT_CHARS: usize = 512;

/// Largest key list the AVL driver accepts
pub const MAX_KEYS: usize = 64;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error("board size {0} is outside {MIN_BOARD_SIZE}..={MAX_BOARD_SIZE}")]
    BoardSize(usize),

    #[error("{0} colors requested, maximum is {MAX_COLORS}")]
    TooManyColors(usize),

    #[error("start vertex {start} is out of range for {vertices} vertices")]
    StartOutOfRange { start: usize, vertices: usize },

    #[error("a spanning tree needs at least two vertices")]
    MstTooSmall,

    #[error("source and target strings must be non-empty")]
    EmptyString,

    #[error("strings are limited to {MAX_STRING_CHARS} characters, got {0}")]
    StringTooLong(usize),

    #[error("text must be non-empty")]
    EmptyText,

    #[error("text is limited to {MAX_TEXT_CHARS} characters, got {0}")]
    TextTooLong(usize),

    #[error("key list must be non-empty")]
    NoKeys,

    #[error("key lists are limited to {MAX_KEYS} keys, got {0}")]
    TooManyKeys(usize),
}

/// Algorithm selection together with its input, as one tagged value
///
/// The tag doubles as the algorithm id, so a serialized input names the
/// driver it runs on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "algorithm", rename_all = "snake_case")]
pub enum AlgorithmInput {
    Queens {
        board_size: usize,
        mode: SearchMode,
    },
    Coloring {
        vertices: usize,
        edges: Vec<(usize, usize)>,
        colors: usize,
    },
    Hamiltonian {
        vertices: usize,
        edges: Vec<(usize, usize)>,
        #[serde(default)]
        start: Option<usize>,
    },
    EditDistance {
        source: String,
        target: String,
    },
    Huffman {
        text: String,
    },
    KruskalMst {
        vertices: usize,
        edges: Vec<(usize, usize, u32)>,
    },
    PrimMst {
        vertices: usize,
        edges: Vec<(usize, usize, u32)>,
        start: usize,
    },
    Avl {
        keys: Vec<i64>,
    },
}

impl AlgorithmInput {
    pub fn algorithm(&self) -> AlgorithmId {
        match self {
            AlgorithmInput::Queens { .. } => AlgorithmId::Queens,
            AlgorithmInput::Coloring { .. } => AlgorithmId::Coloring,
            AlgorithmInput::Hamiltonian { .. } => AlgorithmId::Hamiltonian,
            AlgorithmInput::EditDistance { .. } => AlgorithmId::EditDistance,
            AlgorithmInput::Huffman { .. } => AlgorithmId::Huffman,
            AlgorithmInput::KruskalMst { .. } => AlgorithmId::KruskalMst,
            AlgorithmInput::PrimMst { .. } => AlgorithmId::PrimMst,
            AlgorithmInput::Avl { .. } => AlgorithmId::Avl,
        }
    }
}

/// Validate the input and run its driver to completion
///
/// Pure with respect to playback: a validation failure returns before any
/// step is recorded, and the caller's controller is never touched. Negative
/// results (unsatisfiable search, disconnected MST graph) are traces, not
/// errors.
pub fn compute_trace(input: &AlgorithmInput) -> Result<Trace, InputError> {
    let algorithm = input.algorithm();
    log::info!("Computing {} trace", algorithm.display_name());

    let mut recorder = Recorder::new(algorithm);
    match input {
        AlgorithmInput::Queens { board_size, mode } => {
            if !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(board_size) {
                return Err(InputError::BoardSize(*board_size));
            }
            let mut board = Queens::new(*board_size);
            run_search(&mut board, *mode, &mut recorder);
        }
        AlgorithmInput::Coloring { vertices, edges, colors } => {
            if *colors > MAX_COLORS {
                return Err(InputError::TooManyColors(*colors));
            }
            let graph = Graph::new(*vertices, edges)?;
            let mut coloring = Coloring::new(graph, *colors);
            run_search(&mut coloring, SearchMode::FirstSolution, &mut recorder);
        }
        AlgorithmInput::Hamiltonian { vertices, edges, start } => {
            let graph = Graph::new(*vertices, edges)?;
            if let Some(start) = *start {
                if start >= graph.vertices() {
                    return Err(InputError::StartOutOfRange {
                        start,
                        vertices: graph.vertices(),
                    });
                }
            }
            let mut path = Hamiltonian::new(graph, *start);
            run_search(&mut path, SearchMode::FirstSolution, &mut recorder);
        }
        AlgorithmInput::EditDistance { source, target } => {
            check_string(source)?;
            check_string(target)?;
            run_edit_distance(source, target, &mut recorder);
        }
        AlgorithmInput::Huffman { text } => {
            if text.is_empty() {
                return Err(InputError::EmptyText);
            }
            let chars = text.chars().count();
            if chars > MAX_TEXT_CHARS {
                return Err(InputError::TextTooLong(chars));
            }
            run_huffman(text, &mut recorder);
        }
        AlgorithmInput::KruskalMst { vertices, edges } => {
            if *vertices < 2 {
                return Err(InputError::MstTooSmall);
            }
            let graph = Graph::weighted(*vertices, edges)?;
            run_kruskal(&graph, &mut recorder);
        }
        AlgorithmInput::PrimMst { vertices, edges, start } => {
            if *vertices < 2 {
                return Err(InputError::MstTooSmall);
            }
            let graph = Graph::weighted(*vertices, edges)?;
            if *start >= graph.vertices() {
                return Err(InputError::StartOutOfRange {
                    start: *start,
                    vertices: graph.vertices(),
                });
            }
            run_prim(&graph, *start, &mut recorder);
        }
        AlgorithmInput::Avl { keys } => {
            if keys.is_empty() {
                return Err(InputError::NoKeys);
            }
            if keys.len() > MAX_KEYS {
                return Err(InputError::TooManyKeys(keys.len()));
            }
            run_insertions(keys, &mut recorder);
        }
    }

    let trace = recorder.finish();
    log::info!(
        "{} trace complete: {} steps, {:?}",
        algorithm.display_name(),
        trace.len(),
        trace.summary().outcome
    );
    Ok(trace)
}

fn check_string(s: &str) -> Result<(), InputError> {
    if s.is_empty() {
        return Err(InputError::EmptyString);
    }
    let chars = s.chars().count();
    if chars > MAX_STRING_CHARS {
        return Err(InputError::StringTooLong(chars));
    }
    Ok(())
}
