//! Request validation. Runs before any model is touched; the first violation
//! wins and nothing later executes.

use crate::error::ApiError;
use crate::task::Task;

pub fn validate_features(task: Task, features: &[f64]) -> Result<(), ApiError> {
    let spec = task.spec();
    if features.len() != spec.expected_features {
        // Never truncate or pad; carry both counts for diagnosability.
        return Err(ApiError::FeatureCount {
            task,
            expected: spec.expected_features,
            received: features.len(),
        });
    }
    if let Some(index) = features.iter().position(|v| !v.is_finite()) {
        return Err(ApiError::NonFiniteFeature { index });
    }
    Ok(())
}
