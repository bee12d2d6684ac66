//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the housing feature schema (`FieldSpec`, `FieldKind`, `FEATURE_SCHEMA`)
//! - request-scoped input records (`RawInput`, `InputRow`, `FeatureValue`)
//! - run configuration (`AppConfig`)

pub mod types;

pub use types::*;
