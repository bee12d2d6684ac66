//! The inference shim: validate raw input, transform it into the model's
//! schema, invoke the predictor, and map failures to user-facing messages.
//!
//! This is the full prediction workflow shared by every front-end:
//!
//! validate -> transform -> predict -> wrap result/error
//!
//! Each attempt is stateless and request-scoped; nothing is retained between
//! calls and the model handle is only ever read.

use crate::domain::{Prediction, RawInput};
use crate::model::Predictor;

mod transform;

pub use transform::{transform_input, validate_input};

/// A recoverable, user-facing prediction failure.
///
/// All three variants are surfaced synchronously as a blocking dialog; the
/// form keeps its field contents so the user can correct and retry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PredictError {
    /// Some field was blank after trimming. Deliberately does not say which
    /// one: a single generic message is the established behavior.
    MissingField,
    /// A numeric field failed to parse as a finite float.
    InvalidNumber { field: &'static str },
    /// The model layer failed during inference (e.g. an unknown categorical
    /// level). Carries the underlying message verbatim.
    Model { message: String },
}

impl std::fmt::Display for PredictError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PredictError::MissingField => write!(f, "All fields are required!"),
            PredictError::InvalidNumber { field } => {
                write!(f, "Invalid value for {field}. Please enter a number.")
            }
            PredictError::Model { message } => {
                write!(f, "An unexpected error occurred: {message}")
            }
        }
    }
}

impl std::error::Error for PredictError {}

impl PredictError {
    /// Dialog title, mirroring the two message-box classes of the original
    /// front-end (input errors vs everything else).
    pub fn title(&self) -> &'static str {
        match self {
            PredictError::MissingField | PredictError::InvalidNumber { .. } => "Input Error",
            PredictError::Model { .. } => "Error",
        }
    }
}

/// Run one prediction attempt end to end.
///
/// The model is only invoked once the row is fully validated and transformed;
/// the first failure short-circuits.
pub fn run_predict(raw: &RawInput, model: &dyn Predictor) -> Result<Prediction, PredictError> {
    validate_input(raw)?;
    let row = transform_input(raw)?;
    let price = model
        .predict(&row)
        .map_err(|message| PredictError::Model { message })?;
    Ok(Prediction { price })
}
