// State snapshots
// Deep-copied scenes a renderer can draw in isolation, one shape per algorithm family

use serde::{Deserialize, Serialize};

use crate::graph::Edge;
use crate::trace::step::{NodeId, SymbolCode};

/// N-Queens board state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    /// Board dimension
    pub size: usize,

    /// Placed queens: `queens[r]` is the column of the queen in row `r`
    /// Rows beyond `queens.len()` are still empty
    pub queens: Vec<usize>,
}

/// Graph-coloring state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColoringSnapshot {
    pub vertices: usize,

    /// Undirected edges as vertex pairs
    pub edges: Vec<(usize, usize)>,

    /// Number of colors available
    pub palette: usize,

    /// Assigned color per vertex, `None` while unassigned
    pub colors: Vec<Option<usize>>,
}

/// Hamiltonian-path search state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathSnapshot {
    pub vertices: usize,

    /// Undirected edges as vertex pairs
    pub edges: Vec<(usize, usize)>,

    /// Vertices on the partial path, in visit order
    pub path: Vec<usize>,

    /// Visited flag per vertex
    pub visited: Vec<bool>,
}

/// Edit-distance table state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSnapshot {
    pub source: String,
    pub target: String,

    /// `(m+1) x (n+1)` cost table, `None` for cells not yet filled
    pub cells: Vec<Vec<Option<u32>>>,

    /// Cells visited by the reconstruction walk so far, from `(m, n)` downward
    pub traceback: Vec<(usize, usize)>,
}

impl TableSnapshot {
    /// Value of a filled cell, if any
    pub fn value(&self, row: usize, col: usize) -> Option<u32> {
        self.cells.get(row).and_then(|r| r.get(col)).copied().flatten()
    }
}

/// One node of the Huffman forest, identified by its creation-order id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HuffmanNodeView {
    pub id: NodeId,

    /// The symbol for leaves, `None` for internal nodes
    pub symbol: Option<char>,

    /// Frequency weight (sum of children for internal nodes)
    pub weight: u64,

    pub left: Option<NodeId>,
    pub right: Option<NodeId>,
}

/// Huffman forest, queue, and code table state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HuffmanSnapshot {
    /// Every node created so far, in creation order
    pub nodes: Vec<HuffmanNodeView>,

    /// Queue contents in heap array order (index 0 is the minimum)
    pub queue: Vec<NodeId>,

    /// Codes assigned so far, in assignment order
    pub codes: Vec<SymbolCode>,
}

impl HuffmanSnapshot {
    /// Id of the leaf carrying `symbol`, if it exists
    pub fn leaf_id(&self, symbol: char) -> Option<NodeId> {
        self.nodes
            .iter()
            .find(|n| n.symbol == Some(symbol))
            .map(|n| n.id)
    }
}

/// Minimum-spanning-tree state shared by Kruskal and Prim
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MstSnapshot {
    pub vertices: usize,

    /// The full weighted edge list, in input order
    pub edges: Vec<Edge>,

    /// Indices of accepted edges, in acceptance order
    pub accepted: Vec<usize>,

    /// Indices of rejected edges (Kruskal cycle edges)
    pub rejected: Vec<usize>,

    /// Component representative per vertex; vertices with equal entries
    /// are connected by the accepted edges
    pub components: Vec<usize>,
}

/// One AVL node, referenced by key rather than by address
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeNodeView {
    pub key: i64,
    pub height: u32,
    pub balance: i32,
    pub left: Option<i64>,
    pub right: Option<i64>,
}

/// AVL tree shape, nodes listed in ascending key order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeSnapshot {
    pub root: Option<i64>,
    pub nodes: Vec<TreeNodeView>,
}

impl TreeSnapshot {
    /// Node view for `key`, if present
    pub fn node(&self, key: i64) -> Option<&TreeNodeView> {
        self.nodes.iter().find(|n| n.key == key)
    }
}

/// Deep-copied working state captured inside a step
/// Owns plain data only; mutating one snapshot can never affect another
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "scene", rename_all = "snake_case")]
pub enum Snapshot {
    Board(BoardSnapshot),
    Coloring(ColoringSnapshot),
    Path(PathSnapshot),
    Table(TableSnapshot),
    Huffman(HuffmanSnapshot),
    Mst(MstSnapshot),
    Tree(TreeSnapshot),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_scene_tag() {
        let snapshot = Snapshot::Board(BoardSnapshot { size: 4, queens: vec![1] });
        let json = serde_json::to_string(&snapshot).unwrap();
        assert!(json.contains(r#""scene":"board""#));
        assert!(json.contains(r#""queens":[1]"#));
    }

    #[test]
    fn test_table_value_lookup() {
        let snapshot = TableSnapshot {
            source: "ab".to_string(),
            target: "b".to_string(),
            cells: vec![vec![Some(0), Some(1)], vec![Some(1), None]],
            traceback: Vec::new(),
        };
        assert_eq!(snapshot.value(0, 1), Some(1));
        assert_eq!(snapshot.value(1, 1), None);
        assert_eq!(snapshot.value(9, 9), None);
    }

    #[test]
    fn test_huffman_leaf_lookup() {
        let snapshot = HuffmanSnapshot {
            nodes: vec![
                HuffmanNodeView {
                    id: NodeId(0),
                    symbol: Some('a'),
                    weight: 3,
                    left: None,
                    right: None,
                },
                HuffmanNodeView {
                    id: NodeId(1),
                    symbol: None,
                    weight: 5,
                    left: Some(NodeId(0)),
                    right: None,
                },
            ],
            queue: vec![NodeId(1)],
            codes: Vec::new(),
        };
        assert_eq!(snapshot.leaf_id('a'), Some(NodeId(0)));
        assert_eq!(snapshot.leaf_id('z'), None);
    }
}
