// Tabulation module
// Dynamic-programming drivers that fill a table cell by cell

pub mod edit_distance;

pub use edit_distance::run_edit_distance;
