// Minimum spanning tree drivers
// Kruskal over a stable edge sort plus union-find; Prim over a growing frontier

use crate::graph::Graph;
use crate::greedy::union_find::UnionFind;
use crate::trace::{MstSnapshot, Recorder, Snapshot, StepEvent};

/// Kruskal: scan edges in stable weight order, accept those joining two
/// components, stop after `|V| - 1` acceptances
///
/// The sort is stable, so edges of equal weight keep their input order and
/// the accepted set is fully determined by the input.
pub fn run_kruskal(graph: &Graph, recorder: &mut Recorder) {
    let vertices = graph.vertices();
    let edges = graph.edges();

    let mut order: Vec<usize> = (0..edges.len()).collect();
    order.sort_by_key(|&i| edges[i].weight);

    let mut uf = UnionFind::new(vertices);
    let mut accepted: Vec<usize> = Vec::new();
    let mut rejected: Vec<usize> = Vec::new();
    let mut total_weight: u64 = 0;

    recorder.record(
        StepEvent::EdgesSorted { order: order.clone() },
        kruskal_snapshot(graph, &uf, &accepted, &rejected),
    );

    for &index in &order {
        if accepted.len() == vertices - 1 {
            break;
        }

        let edge = edges[index];
        recorder.attempt();

        if uf.union(edge.u, edge.v) {
            accepted.push(index);
            total_weight += edge.weight as u64;
            recorder.key_op();
            recorder.record(
                StepEvent::EdgeAccepted {
                    index,
                    u: edge.u,
                    v: edge.v,
                    weight: edge.weight,
                },
                kruskal_snapshot(graph, &uf, &accepted, &rejected),
            );
        } else {
            rejected.push(index);
            recorder.record(
                StepEvent::EdgeRejected {
                    index,
                    u: edge.u,
                    v: edge.v,
                    weight: edge.weight,
                },
                kruskal_snapshot(graph, &uf, &accepted, &rejected),
            );
        }
    }

    let terminal = if accepted.len() == vertices - 1 {
        StepEvent::MstComplete {
            total_weight,
            accepted: accepted.len(),
        }
    } else {
        StepEvent::MstIncomplete {
            total_weight,
            accepted: accepted.len(),
            components: vertices - accepted.len(),
        }
    };
    recorder.record(terminal, kruskal_snapshot(graph, &uf, &accepted, &rejected));
}

/// Prim: grow a visited set from `start`, each round taking the first
/// minimal crossing edge in input order
pub fn run_prim(graph: &Graph, start: usize, recorder: &mut Recorder) {
    let vertices = graph.vertices();
    let edges = graph.edges();

    let mut visited = vec![false; vertices];
    visited[start] = true;
    let mut accepted: Vec<usize> = Vec::new();
    let mut total_weight: u64 = 0;

    recorder.record(
        StepEvent::FrontierStart { start },
        prim_snapshot(graph, start, &visited, &accepted),
    );

    while accepted.len() < vertices - 1 {
        recorder.attempt();

        // First minimal crossing edge wins; a later equal weight never
        // displaces an earlier one.
        let mut best: Option<usize> = None;
        for (index, edge) in edges.iter().enumerate() {
            if visited[edge.u] == visited[edge.v] {
                continue;
            }
            let better = match best {
                Some(b) => edge.weight < edges[b].weight,
                None => true,
            };
            if better {
                best = Some(index);
            }
        }

        let index = match best {
            Some(index) => index,
            // No crossing edge left: the rest of the graph is unreachable.
            None => break,
        };

        let edge = edges[index];
        let joined = if visited[edge.u] { edge.v } else { edge.u };
        visited[joined] = true;
        accepted.push(index);
        total_weight += edge.weight as u64;
        recorder.key_op();
        recorder.record(
            StepEvent::EdgeAccepted {
                index,
                u: edge.u,
                v: edge.v,
                weight: edge.weight,
            },
            prim_snapshot(graph, start, &visited, &accepted),
        );
    }

    let terminal = if accepted.len() == vertices - 1 {
        StepEvent::MstComplete {
            total_weight,
            accepted: accepted.len(),
        }
    } else {
        StepEvent::MstIncomplete {
            total_weight,
            accepted: accepted.len(),
            components: vertices - accepted.len(),
        }
    };
    recorder.record(terminal, prim_snapshot(graph, start, &visited, &accepted));
}

fn kruskal_snapshot(
    graph: &Graph,
    uf: &UnionFind,
    accepted: &[usize],
    rejected: &[usize],
) -> Snapshot {
    let components = (0..graph.vertices()).map(|v| uf.root_of(v)).collect();
    Snapshot::Mst(MstSnapshot {
        vertices: graph.vertices(),
        edges: graph.edges().to_vec(),
        accepted: accepted.to_vec(),
        rejected: rejected.to_vec(),
        components,
    })
}

fn prim_snapshot(graph: &Graph, start: usize, visited: &[bool], accepted: &[usize]) -> Snapshot {
    let components = (0..graph.vertices())
        .map(|v| if visited[v] { start } else { v })
        .collect();
    Snapshot::Mst(MstSnapshot {
        vertices: graph.vertices(),
        edges: graph.edges().to_vec(),
        accepted: accepted.to_vec(),
        rejected: Vec::new(),
        components,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::{AlgorithmId, Outcome, Trace};

    /// Five vertices, seven edges, spanning tree weight 10
    fn example_graph() -> Graph {
        Graph::weighted(
            5,
            &[
                (0, 1, 1),
                (0, 2, 2),
                (1, 2, 3),
                (1, 3, 3),
                (2, 3, 4),
                (3, 4, 4),
                (2, 4, 5),
            ],
        )
        .unwrap()
    }

    fn run_k(graph: &Graph) -> Trace {
        let mut recorder = Recorder::new(AlgorithmId::KruskalMst);
        run_kruskal(graph, &mut recorder);
        recorder.finish()
    }

    fn run_p(graph: &Graph, start: usize) -> Trace {
        let mut recorder = Recorder::new(AlgorithmId::PrimMst);
        run_prim(graph, start, &mut recorder);
        recorder.finish()
    }

    fn accepted_indices(trace: &Trace) -> Vec<usize> {
        trace
            .steps()
            .iter()
            .filter_map(|s| match s.event {
                StepEvent::EdgeAccepted { index, .. } => Some(index),
                _ => None,
            })
            .collect()
    }

    fn total_weight(trace: &Trace) -> u64 {
        match trace.last().unwrap().event {
            StepEvent::MstComplete { total_weight, .. } => total_weight,
            StepEvent::MstIncomplete { total_weight, .. } => total_weight,
            ref other => panic!("expected an MST terminal, got {:?}", other),
        }
    }

    #[test]
    fn test_kruskal_example_graph_weighs_ten() {
        let trace = run_k(&example_graph());
        assert_eq!(total_weight(&trace), 10);
        assert_eq!(accepted_indices(&trace), vec![0, 1, 3, 5]);
        assert_eq!(trace.summary().outcome, Outcome::Complete);
    }

    #[test]
    fn test_kruskal_stable_sort_keeps_input_order_on_ties() {
        // Edges 2 and 3 both weigh 3; edges 4 and 5 both weigh 4.
        let trace = run_k(&example_graph());
        match &trace.steps()[0].event {
            StepEvent::EdgesSorted { order } => {
                assert_eq!(order, &vec![0, 1, 2, 3, 4, 5, 6]);
            }
            other => panic!("expected EdgesSorted, got {:?}", other),
        }

        // Edge 2 (the earlier of the weight-3 pair) is scanned first and
        // rejected as a cycle.
        let first_rejected = trace
            .steps()
            .iter()
            .find_map(|s| match s.event {
                StepEvent::EdgeRejected { index, .. } => Some(index),
                _ => None,
            })
            .unwrap();
        assert_eq!(first_rejected, 2);
    }

    #[test]
    fn test_prim_matches_kruskal_on_the_example_graph() {
        let trace = run_p(&example_graph(), 0);
        assert_eq!(total_weight(&trace), 10);
        assert_eq!(accepted_indices(&trace), vec![0, 1, 3, 5]);
    }

    #[test]
    fn test_prim_tie_break_takes_the_first_crossing_edge() {
        let graph = Graph::weighted(3, &[(0, 1, 5), (0, 2, 5)]).unwrap();
        let trace = run_p(&graph, 0);
        assert_eq!(accepted_indices(&trace), vec![0, 1]);
    }

    #[test]
    fn test_disconnected_graph_is_incomplete_not_an_error() {
        let graph = Graph::weighted(4, &[(0, 1, 1), (2, 3, 1)]).unwrap();

        let kruskal = run_k(&graph);
        assert_eq!(kruskal.summary().outcome, Outcome::Incomplete);
        match kruskal.last().unwrap().event {
            StepEvent::MstIncomplete { accepted, components, .. } => {
                assert_eq!(accepted, 2);
                assert_eq!(components, 2);
            }
            ref other => panic!("expected MstIncomplete, got {:?}", other),
        }

        let prim = run_p(&graph, 0);
        match prim.last().unwrap().event {
            StepEvent::MstIncomplete { accepted, components, .. } => {
                assert_eq!(accepted, 1);
                assert_eq!(components, 3);
            }
            ref other => panic!("expected MstIncomplete, got {:?}", other),
        }
    }

    #[test]
    fn test_kruskal_stops_scanning_once_the_tree_is_complete() {
        // The weight-5 edge would be scanned last; with the tree already
        // complete it must not even be attempted.
        let trace = run_k(&example_graph());
        let considered = trace.last().unwrap().counters.attempts;
        assert_eq!(considered, 6);

        let touched_last_edge = trace.steps().iter().any(|s| {
            matches!(
                s.event,
                StepEvent::EdgeAccepted { index: 6, .. } | StepEvent::EdgeRejected { index: 6, .. }
            )
        });
        assert!(!touched_last_edge);
    }
}
