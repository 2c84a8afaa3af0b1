// Self-balancing insertion driver

pub mod tree;

pub use tree::run_insertions;
