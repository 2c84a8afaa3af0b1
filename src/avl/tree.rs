// AVL insertion driver
// Arena-backed tree with instrumented descent, height repair, and rotations

use std::cmp::Ordering;

use crate::trace::{
    Recorder, RotationCase, Side, Snapshot, StepEvent, TreeNodeView, TreeSnapshot,
};

struct Node {
    key: i64,
    height: u32,
    left: Option<usize>,
    right: Option<usize>,
}

struct Avl {
    nodes: Vec<Node>,
    root: Option<usize>,
}

/// Insert `keys` in order into an initially empty AVL tree, recording every
/// descent, height repair, and rotation
///
/// Duplicate keys are detected at the comparison that finds them and leave
/// the tree untouched; every key still gets its `KeyStart`/`KeySettled`
/// bracket so playback can show the whole input being processed.
pub fn run_insertions(keys: &[i64], recorder: &mut Recorder) {
    let mut tree = Avl {
        nodes: Vec::new(),
        root: None,
    };

    for &key in keys {
        recorder.attempt();
        recorder.record(StepEvent::KeyStart { key }, tree.snapshot());
        tree.insert(key, recorder);
        recorder.record(StepEvent::KeySettled { key }, tree.snapshot());
    }

    recorder.record(
        StepEvent::TreeComplete {
            size: tree.nodes.len(),
            height: tree.height_of(tree.root),
        },
        tree.snapshot(),
    );
}

impl Avl {
    fn insert(&mut self, key: i64, recorder: &mut Recorder) {
        let mut cursor = match self.root {
            Some(root) => root,
            None => {
                let leaf = self.new_leaf(key);
                self.root = Some(leaf);
                recorder.record(
                    StepEvent::LeafAttached {
                        key,
                        parent: None,
                        side: None,
                    },
                    self.snapshot(),
                );
                return;
            }
        };

        // Ancestors from the root down to the attach point, with the side
        // taken at each. The unwind pass pops it back to the root.
        let mut path: Vec<(usize, Side)> = Vec::new();

        loop {
            let at = self.nodes[cursor].key;
            let side = match key.cmp(&at) {
                Ordering::Equal => {
                    recorder.record(StepEvent::DuplicateKey { key }, self.snapshot());
                    return;
                }
                Ordering::Less => Side::Left,
                Ordering::Greater => Side::Right,
            };

            recorder.record(StepEvent::Descend { at, toward: side }, self.snapshot());

            let child = match side {
                Side::Left => self.nodes[cursor].left,
                Side::Right => self.nodes[cursor].right,
            };
            match child {
                Some(child) => {
                    path.push((cursor, side));
                    cursor = child;
                }
                None => {
                    let leaf = self.new_leaf(key);
                    match side {
                        Side::Left => self.nodes[cursor].left = Some(leaf),
                        Side::Right => self.nodes[cursor].right = Some(leaf),
                    }
                    recorder.record(
                        StepEvent::LeafAttached {
                            key,
                            parent: Some(at),
                            side: Some(side),
                        },
                        self.snapshot(),
                    );
                    path.push((cursor, side));
                    break;
                }
            }
        }

        // Unwind: recompute each ancestor's height, then repair any balance
        // factor outside {-1, 0, 1}. Rotated subtrees are relinked into
        // their parent before the rotation step is recorded, so every
        // snapshot shows a fully connected tree.
        while let Some((idx, _)) = path.pop() {
            self.fix_height(idx);
            let balance = self.balance_of(idx);
            recorder.record(
                StepEvent::HeightUpdated {
                    at: self.nodes[idx].key,
                    height: self.nodes[idx].height,
                    balance,
                },
                self.snapshot(),
            );

            if balance > 1 {
                self.repair_left_heavy(idx, key, path.last().copied(), recorder);
            } else if balance < -1 {
                self.repair_right_heavy(idx, key, path.last().copied(), recorder);
            }
        }
    }

    fn repair_left_heavy(
        &mut self,
        idx: usize,
        key: i64,
        parent: Option<(usize, Side)>,
        recorder: &mut Recorder,
    ) {
        let left = match self.nodes[idx].left {
            Some(left) => left,
            // A balance above +1 always comes with a left child.
            None => return,
        };

        if key < self.nodes[left].key {
            let pivot = self.nodes[idx].key;
            let new_sub = self.rotate_right(idx);
            self.relink(parent, new_sub);
            recorder.key_op();
            recorder.record(
                StepEvent::Rotation {
                    pivot,
                    direction: Side::Right,
                    case: RotationCase::LeftLeft,
                },
                self.snapshot(),
            );
        } else {
            let inner_pivot = self.nodes[left].key;
            let new_left = self.rotate_left(left);
            self.nodes[idx].left = Some(new_left);
            recorder.key_op();
            recorder.record(
                StepEvent::Rotation {
                    pivot: inner_pivot,
                    direction: Side::Left,
                    case: RotationCase::LeftRight,
                },
                self.snapshot(),
            );

            let pivot = self.nodes[idx].key;
            let new_sub = self.rotate_right(idx);
            self.relink(parent, new_sub);
            recorder.key_op();
            recorder.record(
                StepEvent::Rotation {
                    pivot,
                    direction: Side::Right,
                    case: RotationCase::LeftRight,
                },
                self.snapshot(),
            );
        }
    }

    fn repair_right_heavy(
        &mut self,
        idx: usize,
        key: i64,
        parent: Option<(usize, Side)>,
        recorder: &mut Recorder,
    ) {
        let right = match self.nodes[idx].right {
            Some(right) => right,
            None => return,
        };

        if key > self.nodes[right].key {
            let pivot = self.nodes[idx].key;
            let new_sub = self.rotate_left(idx);
            self.relink(parent, new_sub);
            recorder.key_op();
            recorder.record(
                StepEvent::Rotation {
                    pivot,
                    direction: Side::Left,
                    case: RotationCase::RightRight,
                },
                self.snapshot(),
            );
        } else {
            let inner_pivot = self.nodes[right].key;
            let new_right = self.rotate_right(right);
            self.nodes[idx].right = Some(new_right);
            recorder.key_op();
            recorder.record(
                StepEvent::Rotation {
                    pivot: inner_pivot,
                    direction: Side::Right,
                    case: RotationCase::RightLeft,
                },
                self.snapshot(),
            );

            let pivot = self.nodes[idx].key;
            let new_sub = self.rotate_left(idx);
            self.relink(parent, new_sub);
            recorder.key_op();
            recorder.record(
                StepEvent::Rotation {
                    pivot,
                    direction: Side::Left,
                    case: RotationCase::RightLeft,
                },
                self.snapshot(),
            );
        }
    }

    /// Local pointer surgery; heights of the two moved nodes are fixed
    /// innermost first
    fn rotate_right(&mut self, idx: usize) -> usize {
        let left = match self.nodes[idx].left {
            Some(left) => left,
            None => return idx,
        };
        self.nodes[idx].left = self.nodes[left].right;
        self.nodes[left].right = Some(idx);
        self.fix_height(idx);
        self.fix_height(left);
        left
    }

    fn rotate_left(&mut self, idx: usize) -> usize {
        let right = match self.nodes[idx].right {
            Some(right) => right,
            None => return idx,
        };
        self.nodes[idx].right = self.nodes[right].left;
        self.nodes[right].left = Some(idx);
        self.fix_height(idx);
        self.fix_height(right);
        right
    }

    fn relink(&mut self, parent: Option<(usize, Side)>, new_child: usize) {
        match parent {
            Some((parent, Side::Left)) => self.nodes[parent].left = Some(new_child),
            Some((parent, Side::Right)) => self.nodes[parent].right = Some(new_child),
            None => self.root = Some(new_child),
        }
    }

    fn new_leaf(&mut self, key: i64) -> usize {
        self.nodes.push(Node {
            key,
            height: 1,
            left: None,
            right: None,
        });
        self.nodes.len() - 1
    }

    fn height_of(&self, idx: Option<usize>) -> u32 {
        idx.map_or(0, |idx| self.nodes[idx].height)
    }

    fn fix_height(&mut self, idx: usize) {
        let left = self.height_of(self.nodes[idx].left);
        let right = self.height_of(self.nodes[idx].right);
        self.nodes[idx].height = 1 + left.max(right);
    }

    fn balance_of(&self, idx: usize) -> i32 {
        let left = self.height_of(self.nodes[idx].left) as i32;
        let right = self.height_of(self.nodes[idx].right) as i32;
        left - right
    }

    fn snapshot(&self) -> Snapshot {
        let mut nodes: Vec<TreeNodeView> = self
            .nodes
            .iter()
            .enumerate()
            .map(|(idx, node)| TreeNodeView {
                key: node.key,
                height: node.height,
                balance: self.balance_of(idx),
                left: node.left.map(|left| self.nodes[left].key),
                right: node.right.map(|right| self.nodes[right].key),
            })
            .collect();
        nodes.sort_by_key(|view| view.key);
        Snapshot::Tree(TreeSnapshot {
            root: self.root.map(|idx| self.nodes[idx].key),
            nodes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::{AlgorithmId, Trace};

    fn run(keys: &[i64]) -> Trace {
        let mut recorder = Recorder::new(AlgorithmId::Avl);
        run_insertions(keys, &mut recorder);
        recorder.finish()
    }

    fn rotations(trace: &Trace) -> Vec<(i64, Side, RotationCase)> {
        trace
            .steps()
            .iter()
            .filter_map(|s| match s.event {
                StepEvent::Rotation {
                    pivot,
                    direction,
                    case,
                } => Some((pivot, direction, case)),
                _ => None,
            })
            .collect()
    }

    fn final_tree(trace: &Trace) -> TreeSnapshot {
        match &trace.last().unwrap().snapshot {
            Snapshot::Tree(tree) => tree.clone(),
            other => panic!("expected a tree snapshot, got {:?}", other),
        }
    }

    #[test]
    fn test_left_left_case_rotates_right_once() {
        let trace = run(&[3, 2, 1]);
        assert_eq!(
            rotations(&trace),
            vec![(3, Side::Right, RotationCase::LeftLeft)]
        );

        let tree = final_tree(&trace);
        assert_eq!(tree.root, Some(2));
        assert_eq!(tree.node(2).unwrap().left, Some(1));
        assert_eq!(tree.node(2).unwrap().right, Some(3));
    }

    #[test]
    fn test_right_right_case_rotates_left_once() {
        let trace = run(&[1, 2, 3]);
        assert_eq!(
            rotations(&trace),
            vec![(1, Side::Left, RotationCase::RightRight)]
        );
        assert_eq!(final_tree(&trace).root, Some(2));
    }

    #[test]
    fn test_left_right_case_is_a_double_rotation() {
        let trace = run(&[3, 1, 2]);
        assert_eq!(
            rotations(&trace),
            vec![
                (1, Side::Left, RotationCase::LeftRight),
                (3, Side::Right, RotationCase::LeftRight),
            ]
        );
        assert_eq!(final_tree(&trace).root, Some(2));
    }

    #[test]
    fn test_right_left_case_is_a_double_rotation() {
        let trace = run(&[1, 3, 2]);
        assert_eq!(
            rotations(&trace),
            vec![
                (3, Side::Right, RotationCase::RightLeft),
                (1, Side::Left, RotationCase::RightLeft),
            ]
        );
        assert_eq!(final_tree(&trace).root, Some(2));
    }

    #[test]
    fn test_ascending_insertions_end_perfectly_balanced() {
        let trace = run(&[1, 2, 3, 4, 5, 6, 7]);

        match trace.last().unwrap().event {
            StepEvent::TreeComplete { size, height } => {
                assert_eq!(size, 7);
                assert_eq!(height, 3);
            }
            ref other => panic!("expected TreeComplete, got {:?}", other),
        }

        let tree = final_tree(&trace);
        assert_eq!(tree.root, Some(4));
        assert_eq!(tree.node(4).unwrap().left, Some(2));
        assert_eq!(tree.node(4).unwrap().right, Some(6));
    }

    #[test]
    fn test_every_settled_snapshot_is_balanced() {
        let trace = run(&[9, 4, 14, 2, 7, 12, 17, 1, 3, 6, 8, 5]);
        let mut settled = 0;

        for step in trace.steps() {
            if !matches!(step.event, StepEvent::KeySettled { .. }) {
                continue;
            }
            settled += 1;
            match &step.snapshot {
                Snapshot::Tree(tree) => {
                    for node in &tree.nodes {
                        assert!(
                            (-1..=1).contains(&node.balance),
                            "node {} has balance {} after settling",
                            node.key,
                            node.balance
                        );
                    }
                }
                other => panic!("expected a tree snapshot, got {:?}", other),
            }
        }

        assert_eq!(settled, 12);
    }

    #[test]
    fn test_duplicate_key_leaves_the_tree_untouched() {
        let trace = run(&[5, 3, 5]);

        // Steps between the second KeyStart{5} and its KeySettled.
        let start = trace
            .steps()
            .iter()
            .rposition(|s| matches!(s.event, StepEvent::KeyStart { key: 5 }))
            .unwrap();
        let end = trace
            .steps()
            .iter()
            .rposition(|s| matches!(s.event, StepEvent::KeySettled { key: 5 }))
            .unwrap();

        let structural = trace.steps()[start + 1..end].iter().any(|s| {
            matches!(
                s.event,
                StepEvent::LeafAttached { .. }
                    | StepEvent::HeightUpdated { .. }
                    | StepEvent::Rotation { .. }
            )
        });
        assert!(!structural);

        assert!(trace.steps()[start + 1..end]
            .iter()
            .any(|s| matches!(s.event, StepEvent::DuplicateKey { key: 5 })));

        match trace.last().unwrap().event {
            StepEvent::TreeComplete { size, .. } => assert_eq!(size, 2),
            ref other => panic!("expected TreeComplete, got {:?}", other),
        }
    }

    #[test]
    fn test_rotations_are_the_only_key_ops() {
        let trace = run(&[1, 2, 3, 4, 5, 6, 7]);
        let rotation_count = rotations(&trace).len() as u64;
        assert_eq!(trace.last().unwrap().counters.key_ops, rotation_count);
        assert_eq!(trace.last().unwrap().counters.attempts, 7);
    }
}
