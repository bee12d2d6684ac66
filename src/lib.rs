//! `homeval` library crate.
//!
//! The binary (`homeval`) is a thin wrapper around this library so that:
//!
//! - core logic is testable without spawning processes
//! - modules are reusable (e.g., future GUI front-end, batch scoring, etc.)
//! - code stays easy to navigate as the project grows

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod infer;
pub mod model;
pub mod report;
pub mod tui;
