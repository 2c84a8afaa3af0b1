// Graph coloring problem
// Vertex-by-vertex assignment with the adjacent-color safety predicate

use crate::graph::Graph;
use crate::search::engine::SearchSpace;
use crate::trace::{ColoringSnapshot, Snapshot};

/// Graph coloring as a search space: position = vertex, candidate = color
pub struct Coloring {
    graph: Graph,
    palette: usize,
    colors: Vec<Option<usize>>,
}

impl Coloring {
    /// `palette` is the number of colors available; zero is legal and
    /// exhausts immediately because every domain is empty
    pub fn new(graph: Graph, palette: usize) -> Self {
        let vertices = graph.vertices();
        Coloring {
            graph,
            palette,
            colors: vec![None; vertices],
        }
    }
}

impl SearchSpace for Coloring {
    fn positions(&self) -> usize {
        self.graph.vertices()
    }

    fn domain_size(&self) -> usize {
        self.palette
    }

    /// No neighbor may already carry the candidate color
    fn admissible(&self, position: usize, candidate: usize) -> bool {
        self.graph
            .neighbors(position)
            .iter()
            .all(|&n| self.colors[n] != Some(candidate))
    }

    fn place(&mut self, position: usize, candidate: usize) {
        self.colors[position] = Some(candidate);
    }

    fn remove(&mut self, position: usize, _candidate: usize) {
        self.colors[position] = None;
    }

    fn assignment(&self) -> Vec<usize> {
        self.colors.iter().flatten().copied().collect()
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot::Coloring(ColoringSnapshot {
            vertices: self.graph.vertices(),
            edges: self.graph.edge_pairs(),
            palette: self.palette,
            colors: self.colors.clone(),
        })
    }
}
