//! Output normalization: turns a raw model scalar into a business-safe,
//! user-facing value.

use serde::Serialize;

use crate::error::ApiError;
use crate::registry::ModelEntry;
use crate::task::OutputKind;

/// The user-facing prediction: a decoded label for categorical tasks, a
/// non-negative two-decimal number for continuous ones.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Prediction {
    Label(String),
    Value(f64),
}

/// Clamp to the non-negative floor first, then round to two decimals.
/// Rounding first could leave a tiny negative on the wire.
fn business_safe(raw: f64) -> f64 {
    (raw.max(0.0) * 100.0).round() / 100.0
}

pub fn normalize(entry: &ModelEntry, raw: f64) -> Result<(Prediction, Option<String>), ApiError> {
    match entry.output_kind {
        OutputKind::Categorical => {
            let mismatch = || ApiError::DecoderMismatch {
                task: entry.task,
                index: raw,
                len: entry.labels.len(),
            };
            // The raw output must be an exact, in-range class index; anything
            // else signals an artifact/registry mismatch and must stay loud.
            if !raw.is_finite() || raw < 0.0 || raw.fract() != 0.0 {
                return Err(mismatch());
            }
            let label = *entry.labels.get(raw as usize).ok_or_else(mismatch)?;
            Ok((Prediction::Label(label.to_string()), Some(label.to_string())))
        }
        OutputKind::Continuous => Ok((Prediction::Value(business_safe(raw)), None)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifact::ModelArtifact;
    use crate::registry::ModelEntry;
    use crate::task::{Task, IRIS_LABELS};

    fn iris_entry() -> ModelEntry {
        ModelEntry {
            task: Task::Iris,
            artifact: ModelArtifact::LinearClassifier {
                coefficients: vec![vec![0.0; 4]; 3],
                intercepts: vec![0.0; 3],
            },
            expected_features: 4,
            output_kind: OutputKind::Categorical,
            labels: &IRIS_LABELS,
        }
    }

    fn housing_entry() -> ModelEntry {
        ModelEntry {
            task: Task::Housing,
            artifact: ModelArtifact::LinearRegressor {
                coefficients: vec![0.0; 8],
                intercept: 0.0,
            },
            expected_features: 8,
            output_kind: OutputKind::Continuous,
            labels: &[],
        }
    }

    #[test]
    fn decodes_in_range_index() {
        let entry = iris_entry();
        let (prediction, label) = normalize(&entry, 0.0).unwrap();
        assert_eq!(prediction, Prediction::Label("setosa".into()));
        assert_eq!(label.as_deref(), Some("setosa"));
    }

    #[test]
    fn out_of_range_index_is_decoder_mismatch() {
        let entry = iris_entry();
        let err = normalize(&entry, 3.0).unwrap_err();
        assert!(matches!(err, ApiError::DecoderMismatch { .. }));
    }

    #[test]
    fn non_integral_index_is_decoder_mismatch() {
        let entry = iris_entry();
        for raw in [1.5, -1.0, f64::NAN] {
            assert!(matches!(
                normalize(&entry, raw),
                Err(ApiError::DecoderMismatch { .. })
            ));
        }
    }

    #[test]
    fn continuous_clamps_then_rounds() {
        let entry = housing_entry();
        // A tiny negative must clamp to exactly zero, not round to -0.0.
        let (p, label) = normalize(&entry, -0.004).unwrap();
        assert_eq!(p, Prediction::Value(0.0));
        assert!(label.is_none());

        let (p, _) = normalize(&entry, -5.2).unwrap();
        assert_eq!(p, Prediction::Value(0.0));

        let (p, _) = normalize(&entry, 2.345_6).unwrap();
        assert_eq!(p, Prediction::Value(2.35));
    }
}
