// Hamiltonian path problem
// Slot-by-slot path building; slot 0 chooses the start unless one is pinned

use crate::graph::Graph;
use crate::search::engine::SearchSpace;
use crate::trace::{PathSnapshot, Snapshot};

/// Hamiltonian path as a search space: position = path slot, candidate = vertex
pub struct Hamiltonian {
    graph: Graph,
    start: Option<usize>,
    path: Vec<usize>,
    visited: Vec<bool>,
}

impl Hamiltonian {
    /// With `start = None` every vertex is tried as the first slot, so
    /// "exhausted" means no Hamiltonian path exists from any start
    pub fn new(graph: Graph, start: Option<usize>) -> Self {
        let vertices = graph.vertices();
        Hamiltonian {
            graph,
            start,
            path: Vec::with_capacity(vertices),
            visited: vec![false; vertices],
        }
    }
}

impl SearchSpace for Hamiltonian {
    fn positions(&self) -> usize {
        self.graph.vertices()
    }

    fn domain_size(&self) -> usize {
        self.graph.vertices()
    }

    /// Later slots need an edge from the previous vertex to an unvisited one
    fn admissible(&self, position: usize, candidate: usize) -> bool {
        if self.visited[candidate] {
            return false;
        }
        if position == 0 {
            return self.start.map_or(true, |s| s == candidate);
        }
        self.graph.has_edge(self.path[position - 1], candidate)
    }

    fn place(&mut self, _position: usize, candidate: usize) {
        self.path.push(candidate);
        self.visited[candidate] = true;
    }

    fn remove(&mut self, _position: usize, candidate: usize) {
        self.path.pop();
        self.visited[candidate] = false;
    }

    fn assignment(&self) -> Vec<usize> {
        self.path.clone()
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot::Path(PathSnapshot {
            vertices: self.graph.vertices(),
            edges: self.graph.edge_pairs(),
            path: self.path.clone(),
            visited: self.visited.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::engine::{run_search, SearchMode};
    use crate::trace::{AlgorithmId, Outcome, Recorder, StepEvent, Trace};

    fn run(graph: Graph, start: Option<usize>) -> Trace {
        let mut problem = Hamiltonian::new(graph, start);
        let mut recorder = Recorder::new(AlgorithmId::Hamiltonian);
        run_search(&mut problem, SearchMode::FirstSolution, &mut recorder);
        recorder.finish()
    }

    fn found_path(trace: &Trace) -> Option<Vec<usize>> {
        match &trace.last().unwrap().event {
            StepEvent::SolutionFound { assignment } => Some(assignment.clone()),
            _ => None,
        }
    }

    #[test]
    fn test_path_graph_walks_end_to_end() {
        let graph = Graph::new(4, &[(0, 1), (1, 2), (2, 3)]).unwrap();
        let trace = run(graph, None);
        assert_eq!(found_path(&trace), Some(vec![0, 1, 2, 3]));
    }

    #[test]
    fn test_star_graph_has_no_hamiltonian_path() {
        // Five vertices, all edges through the center: any path visits the
        // center once, so it can cover at most three vertices.
        let star = Graph::new(5, &[(0, 1), (0, 2), (0, 3), (0, 4)]).unwrap();
        let trace = run(star, None);
        assert_eq!(trace.summary().outcome, Outcome::Exhausted);
    }

    #[test]
    fn test_pinned_start_is_respected() {
        let square = Graph::new(4, &[(0, 1), (1, 2), (2, 3), (3, 0)]).unwrap();
        let trace = run(square, Some(2));
        assert_eq!(found_path(&trace), Some(vec![2, 1, 0, 3]));
    }

    #[test]
    fn test_pinned_start_can_make_the_instance_unsolvable() {
        // On a path graph the middle vertex cannot start a Hamiltonian path.
        let graph = Graph::new(3, &[(0, 1), (1, 2)]).unwrap();
        let trace = run(graph, Some(1));
        assert_eq!(trace.summary().outcome, Outcome::Exhausted);
    }
}
