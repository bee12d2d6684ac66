//! Dataset loading and summary statistics for the charts screen.

pub mod housing;

pub use housing::*;
