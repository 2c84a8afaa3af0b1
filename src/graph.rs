// Graph input type
// Validated undirected graph shared by the coloring, Hamiltonian, and MST drivers

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Largest vertex count the input surface accepts
/// Every step deep-copies graph state, so inputs stay renderer-sized
pub const MAX_VERTICES: usize = 64;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GraphError {
    #[error("graph must have at least one vertex")]
    NoVertices,

    #[error("graph has {0} vertices, maximum is {MAX_VERTICES}")]
    TooManyVertices(usize),

    #[error("edge ({0}, {1}) references a vertex outside 0..{2}")]
    VertexOutOfRange(usize, usize, usize),

    #[error("edge ({0}, {0}) is a self-loop")]
    SelfLoop(usize),

    #[error("edge ({0}, {1}) appears more than once")]
    DuplicateEdge(usize, usize),
}

/// One undirected weighted edge
/// Unweighted uses (coloring, Hamiltonian) carry weight 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub u: usize,
    pub v: usize,
    pub weight: u32,
}

/// Validated undirected graph
///
/// Construction rejects out-of-range endpoints, self-loops, and duplicate
/// edges in either orientation, so drivers can assume a well-formed edge
/// list. Edge order is preserved exactly as given; the MST tie-breaks
/// depend on it.
#[derive(Debug, Clone)]
pub struct Graph {
    vertices: usize,
    edges: Vec<Edge>,
    adjacency: Vec<Vec<usize>>,
}

impl Graph {
    /// Build an unweighted graph from vertex pairs (each edge gets weight 1)
    pub fn new(vertices: usize, pairs: &[(usize, usize)]) -> Result<Self, GraphError> {
        let edges: Vec<Edge> = pairs
            .iter()
            .map(|&(u, v)| Edge { u, v, weight: 1 })
            .collect();
        Self::from_edges(vertices, edges)
    }

    /// Build a weighted graph from `(u, v, weight)` triples
    pub fn weighted(vertices: usize, triples: &[(usize, usize, u32)]) -> Result<Self, GraphError> {
        let edges: Vec<Edge> = triples
            .iter()
            .map(|&(u, v, weight)| Edge { u, v, weight })
            .collect();
        Self::from_edges(vertices, edges)
    }

    fn from_edges(vertices: usize, edges: Vec<Edge>) -> Result<Self, GraphError> {
        if vertices == 0 {
            return Err(GraphError::NoVertices);
        }
        if vertices > MAX_VERTICES {
            return Err(GraphError::TooManyVertices(vertices));
        }

        let mut seen: Vec<(usize, usize)> = Vec::with_capacity(edges.len());
        let mut adjacency = vec![Vec::new(); vertices];

        for edge in &edges {
            if edge.u >= vertices || edge.v >= vertices {
                return Err(GraphError::VertexOutOfRange(edge.u, edge.v, vertices));
            }
            if edge.u == edge.v {
                return Err(GraphError::SelfLoop(edge.u));
            }

            let key = (edge.u.min(edge.v), edge.u.max(edge.v));
            if seen.contains(&key) {
                return Err(GraphError::DuplicateEdge(edge.u, edge.v));
            }
            seen.push(key);

            adjacency[edge.u].push(edge.v);
            adjacency[edge.v].push(edge.u);
        }

        Ok(Graph {
            vertices,
            edges,
            adjacency,
        })
    }

    pub fn vertices(&self) -> usize {
        self.vertices
    }

    /// Edges in input order
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Neighbors of `v`, in the order their edges were given
    pub fn neighbors(&self, v: usize) -> &[usize] {
        &self.adjacency[v]
    }

    pub fn has_edge(&self, u: usize, v: usize) -> bool {
        self.adjacency[u].contains(&v)
    }

    /// Edge list as plain vertex pairs, for snapshots
    pub fn edge_pairs(&self) -> Vec<(usize, usize)> {
        self.edges.iter().map(|e| (e.u, e.v)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_graph() {
        let graph = Graph::new(4, &[(0, 1), (1, 2), (2, 3)]).unwrap();
        assert_eq!(graph.vertices(), 4);
        assert_eq!(graph.edges().len(), 3);
        assert_eq!(graph.neighbors(1), &[0, 2]);
        assert!(graph.has_edge(2, 1));
        assert!(!graph.has_edge(0, 3));
    }

    #[test]
    fn test_rejects_empty_and_oversized() {
        assert_eq!(Graph::new(0, &[]).unwrap_err(), GraphError::NoVertices);
        assert_eq!(
            Graph::new(65, &[]).unwrap_err(),
            GraphError::TooManyVertices(65)
        );
    }

    #[test]
    fn test_rejects_out_of_range_vertex() {
        assert_eq!(
            Graph::new(3, &[(0, 3)]).unwrap_err(),
            GraphError::VertexOutOfRange(0, 3, 3)
        );
    }

    #[test]
    fn test_rejects_self_loop() {
        assert_eq!(
            Graph::new(3, &[(1, 1)]).unwrap_err(),
            GraphError::SelfLoop(1)
        );
    }

    #[test]
    fn test_rejects_duplicate_edge_in_either_orientation() {
        assert_eq!(
            Graph::new(3, &[(0, 1), (0, 1)]).unwrap_err(),
            GraphError::DuplicateEdge(0, 1)
        );
        assert_eq!(
            Graph::new(3, &[(0, 1), (1, 0)]).unwrap_err(),
            GraphError::DuplicateEdge(1, 0)
        );
    }

    #[test]
    fn test_weighted_edges_keep_input_order() {
        let graph = Graph::weighted(3, &[(0, 1, 5), (1, 2, 2)]).unwrap();
        assert_eq!(graph.edges()[0].weight, 5);
        assert_eq!(graph.edges()[1].weight, 2);
        assert_eq!(graph.edge_pairs(), vec![(0, 1), (1, 2)]);
    }
}
