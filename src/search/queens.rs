// N-Queens problem
// Row-by-row placement with the shared-column/diagonal safety predicate

use crate::search::engine::SearchSpace;
use crate::trace::{BoardSnapshot, Snapshot};

/// N-Queens as a search space: position = row, candidate = column
///
/// `queens[r]` holds the column of the queen committed in row `r`; the vector
/// always covers exactly the rows above the one being explored.
pub struct Queens {
    size: usize,
    queens: Vec<usize>,
}

impl Queens {
    pub fn new(size: usize) -> Self {
        Queens {
            size,
            queens: Vec::with_capacity(size),
        }
    }
}

impl SearchSpace for Queens {
    fn positions(&self) -> usize {
        self.size
    }

    fn domain_size(&self) -> usize {
        self.size
    }

    /// No earlier queen may share the column or either diagonal
    fn admissible(&self, position: usize, candidate: usize) -> bool {
        self.queens.iter().enumerate().all(|(row, &col)| {
            let dr = position - row;
            col != candidate && col + dr != candidate && candidate + dr != col
        })
    }

    fn place(&mut self, _position: usize, candidate: usize) {
        self.queens.push(candidate);
    }

    fn remove(&mut self, _position: usize, _candidate: usize) {
        self.queens.pop();
    }

    fn assignment(&self) -> Vec<usize> {
        self.queens.clone()
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot::Board(BoardSnapshot {
            size: self.size,
            queens: self.queens.clone(),
        })
    }
}
