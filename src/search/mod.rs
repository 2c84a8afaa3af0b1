// Backtracking search module
// Generic engine plus the three concrete problems it drives

pub mod coloring;
pub mod engine;
pub mod hamiltonian;
pub mod queens;

pub use coloring::Coloring;
pub use engine::{run_search, SearchMode, SearchSpace};
pub use hamiltonian::Hamiltonian;
pub use queens::Queens;
