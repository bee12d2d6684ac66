//! Shared domain types.
//!
//! These types are intentionally kept lightweight:
//!
//! - the schema is a static table (an external contract with the model
//!   artifact, not discoverable at runtime)
//! - input records are created fresh per prediction attempt and discarded
//!   after use; nothing here is mutated after construction

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Number of input fields the model expects.
pub const FIELD_COUNT: usize = 12;

/// How a field's raw text is coerced before it reaches the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// Free-text token passed through unchanged (e.g. "yes"/"no").
    ///
    /// Deliberately unvalidated: typos reach the model and fail there. See
    /// DESIGN.md for why we keep this quirk instead of rejecting client-side.
    Categorical,
    /// Parsed as a finite `f64`.
    Numeric,
}

/// One column of the feature schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    /// Short input hint shown for the focused form field.
    pub hint: &'static str,
}

/// The ordered input schema the model artifact was trained with.
///
/// Order is significant: the artifact declares the same columns in the same
/// order, and the two are cross-checked at startup (`LinearModel::check_schema`).
pub const FEATURE_SCHEMA: [FieldSpec; FIELD_COUNT] = [
    FieldSpec {
        name: "mainroad",
        kind: FieldKind::Categorical,
        hint: "Enter 'yes' or 'no' for mainroad.",
    },
    FieldSpec {
        name: "guestroom",
        kind: FieldKind::Categorical,
        hint: "Enter 'yes' or 'no' for guestroom.",
    },
    FieldSpec {
        name: "basement",
        kind: FieldKind::Categorical,
        hint: "Enter 'yes' or 'no' for basement.",
    },
    FieldSpec {
        name: "hotwaterheating",
        kind: FieldKind::Categorical,
        hint: "Enter 'yes' or 'no' for hotwaterheating.",
    },
    FieldSpec {
        name: "airconditioning",
        kind: FieldKind::Categorical,
        hint: "Enter 'yes' or 'no' for airconditioning.",
    },
    FieldSpec {
        name: "prefarea",
        kind: FieldKind::Categorical,
        hint: "Enter 'yes' or 'no' for prefarea.",
    },
    FieldSpec {
        name: "furnishingstatus",
        kind: FieldKind::Categorical,
        hint: "Enter 'furnished', 'semi-furnished', or 'unfurnished'.",
    },
    FieldSpec {
        name: "area",
        kind: FieldKind::Numeric,
        hint: "Enter the area in square feet.",
    },
    FieldSpec {
        name: "bedrooms",
        kind: FieldKind::Numeric,
        hint: "Enter the number of bedrooms.",
    },
    FieldSpec {
        name: "bathrooms",
        kind: FieldKind::Numeric,
        hint: "Enter the number of bathrooms.",
    },
    FieldSpec {
        name: "stories",
        kind: FieldKind::Numeric,
        hint: "Enter the number of stories.",
    },
    FieldSpec {
        name: "parking",
        kind: FieldKind::Numeric,
        hint: "Enter the parking capacity.",
    },
];

/// The 12 untyped text values as entered by the user, in schema order.
///
/// Created fresh per prediction attempt; never persisted.
#[derive(Debug, Clone, Default)]
pub struct RawInput {
    values: [String; FIELD_COUNT],
}

impl RawInput {
    pub fn new(values: [String; FIELD_COUNT]) -> Self {
        Self { values }
    }

    /// Convenience constructor for literals (tests, one-shot scoring).
    pub fn from_strs(values: [&str; FIELD_COUNT]) -> Self {
        Self {
            values: values.map(str::to_string),
        }
    }

    pub fn get(&self, idx: usize) -> &str {
        &self.values[idx]
    }

    pub fn values(&self) -> &[String; FIELD_COUNT] {
        &self.values
    }
}

/// A single coerced value in the transformed row.
#[derive(Debug, Clone, PartialEq)]
pub enum FeatureValue {
    Text(String),
    Number(f64),
}

impl FeatureValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FeatureValue::Text(s) => Some(s),
            FeatureValue::Number(_) => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            FeatureValue::Text(_) => None,
            FeatureValue::Number(v) => Some(*v),
        }
    }
}

/// The validated, coerced single-row input in schema order.
///
/// Construction is gated by the transformer: if this value exists, every field
/// was non-blank and every numeric field parsed as a finite float.
#[derive(Debug, Clone, PartialEq)]
pub struct InputRow {
    values: Vec<FeatureValue>,
}

impl InputRow {
    pub(crate) fn new(values: Vec<FeatureValue>) -> Self {
        debug_assert_eq!(values.len(), FIELD_COUNT);
        Self { values }
    }

    pub fn values(&self) -> &[FeatureValue] {
        &self.values
    }

    /// Look up a value by schema column name.
    pub fn get(&self, name: &str) -> Option<&FeatureValue> {
        let idx = FEATURE_SCHEMA.iter().position(|f| f.name == name)?;
        self.values.get(idx)
    }
}

/// A scalar price estimate, ephemeral (displayed and discarded).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    pub price: f64,
}

/// Resolved run configuration (from CLI flags plus defaults).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub model_path: PathBuf,
    pub data_path: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_groups_categorical_before_numeric() {
        // The artifact contract: 7 categorical columns followed by 5 numeric.
        let split = FEATURE_SCHEMA
            .iter()
            .position(|f| f.kind == FieldKind::Numeric)
            .unwrap();
        assert_eq!(split, 7);
        assert!(
            FEATURE_SCHEMA[split..]
                .iter()
                .all(|f| f.kind == FieldKind::Numeric)
        );
    }

    #[test]
    fn input_row_lookup_by_name() {
        let row = InputRow::new(
            FEATURE_SCHEMA
                .iter()
                .map(|f| match f.kind {
                    FieldKind::Categorical => FeatureValue::Text("yes".to_string()),
                    FieldKind::Numeric => FeatureValue::Number(1.0),
                })
                .collect(),
        );
        assert_eq!(row.get("mainroad").unwrap().as_text(), Some("yes"));
        assert_eq!(row.get("area").unwrap().as_number(), Some(1.0));
        assert!(row.get("price").is_none());
    }
}
