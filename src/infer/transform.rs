//! Raw-input validation and schema-order transformation.

use crate::domain::{FEATURE_SCHEMA, FIELD_COUNT, FeatureValue, FieldKind, InputRow, RawInput};
use crate::infer::PredictError;

/// Verify that all 12 fields are non-blank after trimming.
///
/// The error carries no indication of which field was blank; the single
/// generic message is the established front-end behavior.
pub fn validate_input(raw: &RawInput) -> Result<(), PredictError> {
    if raw.values().iter().any(|v| v.trim().is_empty()) {
        return Err(PredictError::MissingField);
    }
    Ok(())
}

/// Coerce a validated raw record into the model's input row, in schema order.
///
/// Categorical fields pass through as trimmed strings with no level
/// validation; numeric fields must parse as a finite float. The first failure
/// short-circuits.
pub fn transform_input(raw: &RawInput) -> Result<InputRow, PredictError> {
    let mut values = Vec::with_capacity(FIELD_COUNT);
    for (spec, value) in FEATURE_SCHEMA.iter().zip(raw.values()) {
        let trimmed = value.trim();
        match spec.kind {
            FieldKind::Categorical => values.push(FeatureValue::Text(trimmed.to_string())),
            FieldKind::Numeric => {
                let parsed = trimmed
                    .parse::<f64>()
                    .ok()
                    .filter(|v| v.is_finite())
                    .ok_or(PredictError::InvalidNumber { field: spec.name })?;
                values.push(FeatureValue::Number(parsed));
            }
        }
    }
    Ok(InputRow::new(values))
}
