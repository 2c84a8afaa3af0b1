// Greedy algorithm drivers
// Huffman coding and the two minimum spanning tree strategies

pub mod heap;
pub mod huffman;
pub mod mst;
pub mod union_find;

pub use heap::StableMinHeap;
pub use huffman::run_huffman;
pub use mst::{run_kruskal, run_prim};
pub use union_find::UnionFind;
