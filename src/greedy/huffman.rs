// Huffman coding driver
// Stable-queue merge rounds over a node arena, then code assignment by traversal

use crate::greedy::heap::StableMinHeap;
use crate::trace::{
    HuffmanNodeView, HuffmanSnapshot, NodeId, Recorder, Snapshot, StepEvent, SymbolCode,
};

/// One node of the working forest; ids are arena indices in creation order
struct ArenaNode {
    symbol: Option<char>,
    weight: u64,
    left: Option<NodeId>,
    right: Option<NodeId>,
}

/// Build a Huffman tree over `text` and assign codes, recording every round
///
/// The frequency table keeps first-occurrence order and the queue breaks
/// weight ties by insertion order, so repeated runs extract and merge the
/// same nodes in the same order. Children keep extraction order: the first
/// node out becomes the left child.
pub fn run_huffman(text: &str, recorder: &mut Recorder) {
    // Frequency table in first-occurrence order.
    let mut frequencies: Vec<(char, u64)> = Vec::new();
    for ch in text.chars() {
        match frequencies.iter_mut().find(|(c, _)| *c == ch) {
            Some((_, count)) => *count += 1,
            None => frequencies.push((ch, 1)),
        }
    }

    let mut nodes: Vec<ArenaNode> = Vec::new();
    let mut queue = StableMinHeap::new();
    let mut codes: Vec<SymbolCode> = Vec::new();

    for &(symbol, weight) in &frequencies {
        let id = NodeId(nodes.len() as u32);
        nodes.push(ArenaNode {
            symbol: Some(symbol),
            weight,
            left: None,
            right: None,
        });
        queue.push(id, weight);
    }

    recorder.record(
        StepEvent::QueueSeeded { leaves: frequencies.len() },
        snapshot(&nodes, &queue, &codes),
    );

    // Merge rounds: the two minimum nodes leave, their parent re-enters.
    while queue.len() > 1 {
        recorder.attempt();
        let (first, second) = match (queue.pop(), queue.pop()) {
            (Some(first), Some(second)) => (first, second),
            _ => break,
        };
        recorder.record(
            StepEvent::ExtractPair { first, second },
            snapshot(&nodes, &queue, &codes),
        );

        let weight = nodes[first.0 as usize].weight + nodes[second.0 as usize].weight;
        let parent = NodeId(nodes.len() as u32);
        nodes.push(ArenaNode {
            symbol: None,
            weight,
            left: Some(first),
            right: Some(second),
        });
        queue.push(parent, weight);

        recorder.key_op();
        recorder.record(
            StepEvent::MergeNodes {
                parent,
                left: first,
                right: second,
                weight,
            },
            snapshot(&nodes, &queue, &codes),
        );
    }

    // Code assignment by fixed traversal: left appends '0', right appends '1'.
    // A lone leaf root still gets "0" so no symbol ends up with an empty code.
    if let Some(root) = queue.peek() {
        assign_codes(&nodes, &queue, root, String::new(), &mut codes, recorder);
    }

    recorder.record(
        StepEvent::CodesReady { codes: codes.clone() },
        snapshot(&nodes, &queue, &codes),
    );
}

fn assign_codes(
    nodes: &[ArenaNode],
    queue: &StableMinHeap,
    node: NodeId,
    prefix: String,
    codes: &mut Vec<SymbolCode>,
    recorder: &mut Recorder,
) {
    let current = &nodes[node.0 as usize];

    if let Some(symbol) = current.symbol {
        let code = if prefix.is_empty() { "0".to_string() } else { prefix };
        codes.push(SymbolCode {
            symbol,
            code: code.clone(),
        });
        recorder.record(
            StepEvent::CodeAssigned { symbol, code },
            snapshot(nodes, queue, codes),
        );
        return;
    }

    if let Some(left) = current.left {
        assign_codes(nodes, queue, left, format!("{}0", prefix), codes, recorder);
    }
    if let Some(right) = current.right {
        assign_codes(nodes, queue, right, format!("{}1", prefix), codes, recorder);
    }
}

fn snapshot(nodes: &[ArenaNode], queue: &StableMinHeap, codes: &[SymbolCode]) -> Snapshot {
    Snapshot::Huffman(HuffmanSnapshot {
        nodes: nodes
            .iter()
            .enumerate()
            .map(|(i, n)| HuffmanNodeView {
                id: NodeId(i as u32),
                symbol: n.symbol,
                weight: n.weight,
                left: n.left,
                right: n.right,
            })
            .collect(),
        queue: queue.ids(),
        codes: codes.to_vec(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::{AlgorithmId, Outcome, Trace};

    fn run(text: &str) -> Trace {
        let mut recorder = Recorder::new(AlgorithmId::Huffman);
        run_huffman(text, &mut recorder);
        recorder.finish()
    }

    fn final_codes(trace: &Trace) -> Vec<SymbolCode> {
        match &trace.last().unwrap().event {
            StepEvent::CodesReady { codes } => codes.clone(),
            other => panic!("expected CodesReady, got {:?}", other),
        }
    }

    fn code_of(codes: &[SymbolCode], symbol: char) -> String {
        codes
            .iter()
            .find(|c| c.symbol == symbol)
            .map(|c| c.code.clone())
            .unwrap()
    }

    #[test]
    fn test_most_frequent_symbol_gets_the_shortest_code() {
        let trace = run("AAAAABBBCC");
        let codes = final_codes(&trace);
        assert_eq!(codes.len(), 3);

        let a = code_of(&codes, 'A');
        let b = code_of(&codes, 'B');
        let c = code_of(&codes, 'C');
        assert_eq!(a, "0");
        assert!(a.len() < b.len());
        assert!(a.len() < c.len());

        // Prefix-free: no code is a prefix of another.
        let all = [a, b, c];
        for (i, x) in all.iter().enumerate() {
            for (j, y) in all.iter().enumerate() {
                if i != j {
                    assert!(!y.starts_with(x.as_str()));
                }
            }
        }
    }

    #[test]
    fn test_single_symbol_text_gets_code_zero() {
        let trace = run("AAA");
        let codes = final_codes(&trace);
        assert_eq!(codes.len(), 1);
        assert_eq!(codes[0].symbol, 'A');
        assert_eq!(codes[0].code, "0");

        // One leaf, nothing to merge.
        assert!(trace
            .steps()
            .iter()
            .all(|s| !matches!(s.event, StepEvent::MergeNodes { .. })));
        assert_eq!(trace.summary().outcome, Outcome::Complete);
    }

    #[test]
    fn test_weight_ties_extract_in_first_occurrence_order() {
        // A and B both occur twice: the first extraction must take the leaf
        // seeded first.
        let trace = run("ABAB");
        let first_pair = trace
            .steps()
            .iter()
            .find_map(|s| match s.event {
                StepEvent::ExtractPair { first, second } => Some((first, second)),
                _ => None,
            })
            .unwrap();
        assert_eq!(first_pair, (NodeId(0), NodeId(1)));
    }

    #[test]
    fn test_merge_counters() {
        // Three distinct symbols mean exactly two merge rounds.
        let trace = run("AAAAABBBCC");
        let counters = trace.last().unwrap().counters;
        assert_eq!(counters.attempts, 2);
        assert_eq!(counters.key_ops, 2);
    }

    #[test]
    fn test_queue_snapshot_shrinks_to_the_root() {
        let trace = run("AAAAABBBCC");
        match &trace.last().unwrap().snapshot {
            Snapshot::Huffman(huffman) => {
                assert_eq!(huffman.queue.len(), 1);
                // 3 leaves + 2 internal nodes.
                assert_eq!(huffman.nodes.len(), 5);
                assert_eq!(huffman.codes.len(), 3);
            }
            other => panic!("expected huffman snapshot, got {:?}", other),
        }
    }
}
