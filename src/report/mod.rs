//! Reporting utilities: currency formatting and dataset summary text.
//!
//! We keep formatting code in one place so:
//! - the inference/dataset code stays clean and testable
//! - output changes are localized (important for future snapshot tests)

pub mod format;

pub use format::*;
