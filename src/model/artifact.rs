//! Serialized linear-regression artifact (JSON).
//!
//! The artifact file is the "portable" representation of the trained model:
//! an intercept plus one term per input column. Numeric columns carry a
//! single coefficient; categorical columns carry one coefficient per level.
//!
//! The file also declares its input columns (name + kind, in order), which
//! lets us fail fast at startup if the binary's schema and the artifact ever
//! drift apart, instead of silently producing wrong predictions.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::{FEATURE_SCHEMA, FeatureValue, FieldKind, InputRow};
use crate::error::AppError;
use crate::model::Predictor;

/// One column term of the regression.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ColumnTerm {
    /// Level-encoded categorical column: each known level maps to its
    /// contribution. Unknown levels are a model error at predict time.
    Categorical {
        name: String,
        levels: BTreeMap<String, f64>,
    },
    /// Numeric column: contribution is `coefficient * value`.
    Numeric { name: String, coefficient: f64 },
}

impl ColumnTerm {
    pub fn name(&self) -> &str {
        match self {
            ColumnTerm::Categorical { name, .. } => name,
            ColumnTerm::Numeric { name, .. } => name,
        }
    }

    pub fn kind(&self) -> FieldKind {
        match self {
            ColumnTerm::Categorical { .. } => FieldKind::Categorical,
            ColumnTerm::Numeric { .. } => FieldKind::Numeric,
        }
    }
}

/// A pre-trained linear model, loaded once at startup and never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearModel {
    pub name: String,
    pub intercept: f64,
    pub columns: Vec<ColumnTerm>,
}

impl LinearModel {
    /// Load the artifact from disk. Any failure here is fatal: the artifact
    /// is versionless and opaque, so a file we cannot deserialize is a file
    /// we cannot trust.
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let mut file = File::open(path).map_err(|e| {
            AppError::new(
                2,
                format!("Failed to open model artifact '{}': {e}", path.display()),
            )
        })?;
        let mut raw = String::new();
        file.read_to_string(&mut raw).map_err(|e| {
            AppError::new(
                2,
                format!("Failed to read model artifact '{}': {e}", path.display()),
            )
        })?;
        Self::from_json(&raw)
    }

    /// Parse an artifact from its JSON text.
    pub fn from_json(raw: &str) -> Result<Self, AppError> {
        let model: LinearModel = serde_json::from_str(raw)
            .map_err(|e| AppError::new(2, format!("Invalid model artifact: {e}")))?;
        if !model.intercept.is_finite() {
            return Err(AppError::new(2, "Invalid model artifact: non-finite intercept."));
        }
        Ok(model)
    }

    /// Cross-check the artifact's declared input columns against the static
    /// feature schema: same count, same names, same kinds, same order.
    ///
    /// A mismatch means the binary and the artifact were built against
    /// different training contracts, which must never reach prediction.
    pub fn check_schema(&self) -> Result<(), AppError> {
        if self.columns.len() != FEATURE_SCHEMA.len() {
            return Err(AppError::new(
                2,
                format!(
                    "Model artifact declares {} input columns, expected {}.",
                    self.columns.len(),
                    FEATURE_SCHEMA.len()
                ),
            ));
        }

        for (idx, (term, spec)) in self.columns.iter().zip(FEATURE_SCHEMA.iter()).enumerate() {
            if term.name() != spec.name {
                return Err(AppError::new(
                    2,
                    format!(
                        "Model artifact column {idx} is `{}`, expected `{}`.",
                        term.name(),
                        spec.name
                    ),
                ));
            }
            if term.kind() != spec.kind {
                return Err(AppError::new(
                    2,
                    format!(
                        "Model artifact column `{}` is {:?}, expected {:?}.",
                        spec.name,
                        term.kind(),
                        spec.kind
                    ),
                ));
            }
        }

        Ok(())
    }
}

impl Predictor for LinearModel {
    fn predict(&self, row: &InputRow) -> Result<f64, String> {
        let values = row.values();
        if values.len() != self.columns.len() {
            return Err(format!(
                "Input row has {} values, model expects {}.",
                values.len(),
                self.columns.len()
            ));
        }

        let mut y = self.intercept;
        for (term, value) in self.columns.iter().zip(values) {
            y += match (term, value) {
                (ColumnTerm::Categorical { name, levels }, FeatureValue::Text(token)) => {
                    *levels.get(token).ok_or_else(|| {
                        format!("Unknown level '{token}' for column `{name}`.")
                    })?
                }
                (ColumnTerm::Numeric { coefficient, .. }, FeatureValue::Number(v)) => {
                    coefficient * v
                }
                (term, _) => {
                    return Err(format!(
                        "Type mismatch for column `{}` (expected {:?}).",
                        term.name(),
                        term.kind()
                    ));
                }
            };
        }

        if !y.is_finite() {
            return Err("Model produced a non-finite prediction.".to_string());
        }
        Ok(y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RawInput;
    use crate::infer::transform_input;

    fn levels(pairs: &[(&str, f64)]) -> BTreeMap<String, f64> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), *v))
            .collect()
    }

    /// A small artifact matching the full 12-column schema.
    fn sample_model() -> LinearModel {
        let yes_no = |wt: f64| levels(&[("no", 0.0), ("yes", wt)]);
        LinearModel {
            name: "housing-ols".to_string(),
            intercept: 100_000.0,
            columns: vec![
                ColumnTerm::Categorical { name: "mainroad".to_string(), levels: yes_no(50_000.0) },
                ColumnTerm::Categorical { name: "guestroom".to_string(), levels: yes_no(30_000.0) },
                ColumnTerm::Categorical { name: "basement".to_string(), levels: yes_no(40_000.0) },
                ColumnTerm::Categorical { name: "hotwaterheating".to_string(), levels: yes_no(25_000.0) },
                ColumnTerm::Categorical { name: "airconditioning".to_string(), levels: yes_no(60_000.0) },
                ColumnTerm::Categorical { name: "prefarea".to_string(), levels: yes_no(45_000.0) },
                ColumnTerm::Categorical {
                    name: "furnishingstatus".to_string(),
                    levels: levels(&[
                        ("unfurnished", 0.0),
                        ("semi-furnished", 35_000.0),
                        ("furnished", 70_000.0),
                    ]),
                },
                ColumnTerm::Numeric { name: "area".to_string(), coefficient: 250.0 },
                ColumnTerm::Numeric { name: "bedrooms".to_string(), coefficient: 80_000.0 },
                ColumnTerm::Numeric { name: "bathrooms".to_string(), coefficient: 120_000.0 },
                ColumnTerm::Numeric { name: "stories".to_string(), coefficient: 90_000.0 },
                ColumnTerm::Numeric { name: "parking".to_string(), coefficient: 55_000.0 },
            ],
        }
    }

    fn valid_row() -> InputRow {
        let raw = RawInput::from_strs([
            "yes", "no", "no", "no", "yes", "yes", "semi-furnished", "3000", "3", "2", "2", "1",
        ]);
        transform_input(&raw).unwrap()
    }

    #[test]
    fn json_round_trip() {
        let model = sample_model();
        let raw = serde_json::to_string(&model).unwrap();
        let back = LinearModel::from_json(&raw).unwrap();
        assert_eq!(back.columns.len(), 12);
        assert_eq!(back.columns[0].name(), "mainroad");
        assert_eq!(back.columns[7].kind(), FieldKind::Numeric);
    }

    #[test]
    fn sample_model_matches_schema() {
        sample_model().check_schema().unwrap();
    }

    #[test]
    fn schema_check_rejects_reordered_columns() {
        let mut model = sample_model();
        model.columns.swap(0, 7);
        let err = model.check_schema().unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("column 0"));
    }

    #[test]
    fn schema_check_rejects_missing_column() {
        let mut model = sample_model();
        model.columns.pop();
        assert!(model.check_schema().is_err());
    }

    #[test]
    fn predict_sums_intercept_and_terms() {
        let model = sample_model();
        let y = model.predict(&valid_row()).unwrap();
        // 100k + 50k + 0 + 0 + 0 + 60k + 45k + 35k
        //      + 250*3000 + 80k*3 + 120k*2 + 90k*2 + 55k*1
        let expected = 100_000.0
            + 50_000.0
            + 60_000.0
            + 45_000.0
            + 35_000.0
            + 250.0 * 3000.0
            + 80_000.0 * 3.0
            + 120_000.0 * 2.0
            + 90_000.0 * 2.0
            + 55_000.0;
        assert!((y - expected).abs() < 1e-9);
    }

    #[test]
    fn predict_rejects_unknown_level() {
        let model = sample_model();
        let raw = RawInput::from_strs([
            "maybe", "no", "no", "no", "yes", "yes", "semi-furnished", "3000", "3", "2", "2", "1",
        ]);
        let row = transform_input(&raw).unwrap();
        let err = model.predict(&row).unwrap_err();
        assert!(err.contains("maybe"));
        assert!(err.contains("mainroad"));
    }

    #[test]
    fn load_reports_missing_file() {
        let err = LinearModel::load(Path::new("/nonexistent/model.json")).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("model artifact"));
    }

    #[test]
    fn from_json_rejects_garbage() {
        assert!(LinearModel::from_json("{not json").is_err());
    }
}
