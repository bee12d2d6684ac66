//! Model artifact loading and inference.
//!
//! The artifact is an opaque, pre-trained regression predictor: we load it,
//! cross-check its declared input columns against the static feature schema,
//! and call `predict`. Nothing here trains or modifies a model.
//!
//! The `Predictor` trait is the seam between the inference shim and the
//! artifact, so tests can substitute a stub without touching the filesystem.

pub mod artifact;

pub use artifact::*;

use crate::domain::InputRow;

/// A loaded predictor over the housing feature schema.
///
/// Errors are plain messages; the inference shim wraps them into its own
/// prediction-error variant before they reach the user.
pub trait Predictor {
    fn predict(&self, row: &InputRow) -> Result<f64, String>;
}
