//! On-disk model artifact codec.
//!
//! An artifact is a JSON document tagged by `kind`, deposited by the offline
//! training tooling. The gateway treats every kind behind the same surface:
//! `predict(features) -> raw scalar`. For classifiers the raw scalar is the
//! winning class index; decoding it into a label happens downstream.

use serde::Deserialize;
use sha2::{Digest, Sha256};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("artifact not found: {path}")]
    NotFound { path: String },
    #[error("failed to read artifact {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to decode artifact {path}: {source}")]
    Deserialize {
        path: String,
        source: serde_json::Error,
    },
    #[error("artifact {path} digest mismatch: expected {expected} got {got}")]
    DigestMismatch {
        path: String,
        expected: String,
        got: String,
    },
    #[error("artifact {path} has input dimension {artifact_dim}, task expects {expected}")]
    ShapeMismatch {
        path: String,
        artifact_dim: usize,
        expected: usize,
    },
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelArtifact {
    /// One coefficient row per class; prediction is the argmax score index.
    LinearClassifier {
        coefficients: Vec<Vec<f64>>,
        intercepts: Vec<f64>,
    },
    LinearRegressor {
        coefficients: Vec<f64>,
        intercept: f64,
    },
}

impl ModelArtifact {
    /// Feature count the artifact was trained against.
    pub fn input_dim(&self) -> usize {
        match self {
            ModelArtifact::LinearClassifier { coefficients, .. } => {
                coefficients.first().map(|row| row.len()).unwrap_or(0)
            }
            ModelArtifact::LinearRegressor { coefficients, .. } => coefficients.len(),
        }
    }

    /// Raw predictor surface. Callers must have validated the feature count.
    pub fn predict(&self, features: &[f64]) -> f64 {
        match self {
            ModelArtifact::LinearClassifier {
                coefficients,
                intercepts,
            } => {
                let mut best = 0usize;
                let mut best_score = f64::NEG_INFINITY;
                for (class, row) in coefficients.iter().enumerate() {
                    let bias = intercepts.get(class).copied().unwrap_or(0.0);
                    let score =
                        bias + row.iter().zip(features).map(|(w, x)| w * x).sum::<f64>();
                    if score > best_score {
                        best_score = score;
                        best = class;
                    }
                }
                best as f64
            }
            ModelArtifact::LinearRegressor {
                coefficients,
                intercept,
            } => intercept + coefficients.iter().zip(features).map(|(w, x)| w * x).sum::<f64>(),
        }
    }

    /// Reads and decodes an artifact, verifying the SHA-256 pin when one is
    /// configured. Digest verification happens before deserialization.
    pub fn load(path: &Path, sha256_pin: Option<&str>) -> Result<Self, LoadError> {
        let display = path.display().to_string();
        if !path.exists() {
            return Err(LoadError::NotFound { path: display });
        }
        let bytes = std::fs::read(path).map_err(|source| LoadError::Io {
            path: display.clone(),
            source,
        })?;
        if let Some(expected) = sha256_pin.filter(|p| !p.is_empty()) {
            let got = hex::encode(Sha256::digest(&bytes));
            if !expected.eq_ignore_ascii_case(&got) {
                return Err(LoadError::DigestMismatch {
                    path: display,
                    expected: expected.to_string(),
                    got,
                });
            }
        }
        serde_json::from_slice(&bytes).map_err(|source| LoadError::Deserialize {
            path: display,
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> ModelArtifact {
        ModelArtifact::LinearClassifier {
            coefficients: vec![
                vec![0.0, 0.0, -2.0, -2.0],
                vec![0.0, 0.0, 1.0, 0.0],
                vec![0.0, 0.0, 1.0, 1.0],
            ],
            intercepts: vec![8.0, -2.0, -5.0],
        }
    }

    #[test]
    fn classifier_argmax() {
        let m = classifier();
        assert_eq!(m.input_dim(), 4);
        // Short petal dominates the first row.
        assert_eq!(m.predict(&[5.1, 3.5, 1.4, 0.2]), 0.0);
        assert_eq!(m.predict(&[6.0, 2.9, 4.5, 1.5]), 1.0);
    }

    #[test]
    fn regressor_dot_product() {
        let m = ModelArtifact::LinearRegressor {
            coefficients: vec![2.0, -1.0],
            intercept: 0.5,
        };
        assert_eq!(m.input_dim(), 2);
        assert!((m.predict(&[3.0, 1.0]) - 5.5).abs() < 1e-12);
    }

    #[test]
    fn load_missing_is_not_found() {
        let err = ModelArtifact::load(Path::new("/nonexistent/model.json"), None).unwrap_err();
        assert!(matches!(err, LoadError::NotFound { .. }));
    }

    #[test]
    fn decode_round_trip() {
        let json = serde_json::json!({
            "kind": "linear_regressor",
            "coefficients": [0.4, 0.0],
            "intercept": 1.0,
        });
        let m: ModelArtifact = serde_json::from_value(json).unwrap();
        assert_eq!(m.input_dim(), 2);
    }

    #[test]
    fn decode_garbage_fails() {
        let res: Result<ModelArtifact, _> = serde_json::from_str("{\"kind\":\"mystery\"}");
        assert!(res.is_err());
    }
}
