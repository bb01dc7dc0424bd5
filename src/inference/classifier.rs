use std::path::Path;
use std::sync::Arc;

use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

use crate::models::Label;

#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("failed to read model artifact {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("invalid model artifact {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },

    #[error("model artifact has no coefficients")]
    EmptyModel,

    #[error("model expects {expected} features, got {actual}")]
    FeatureCountMismatch { expected: usize, actual: usize },

    #[error("input contains a non-finite value at row {row}, column {column}")]
    NonFinite { row: usize, column: usize },
}

/// A pre-trained binary classifier.
///
/// Implementations are immutable once loaded and shared across requests.
pub trait Classifier: Send + Sync {
    /// Number of columns every input row must have.
    fn n_features(&self) -> usize;

    /// One label per input row.
    fn predict(&self, matrix: &Array2<f64>) -> Result<Vec<Label>, ModelError>;
}

/// Serialized model artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "model", rename_all = "snake_case")]
pub enum ModelArtifact {
    LogisticRegression(LogisticRegression),
}

/// Linear decision function `x·w + b`; positive class when strictly above zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticRegression {
    pub coefficients: Vec<f64>,
    pub intercept: f64,
}

impl LogisticRegression {
    pub fn new(coefficients: Vec<f64>, intercept: f64) -> Self {
        Self {
            coefficients,
            intercept,
        }
    }

    /// Raw decision values, one per row.
    pub fn decision_function(&self, matrix: &Array2<f64>) -> Result<Array1<f64>, ModelError> {
        if matrix.ncols() != self.coefficients.len() {
            return Err(ModelError::FeatureCountMismatch {
                expected: self.coefficients.len(),
                actual: matrix.ncols(),
            });
        }

        if let Some(((row, column), _)) = matrix.indexed_iter().find(|(_, v)| !v.is_finite()) {
            return Err(ModelError::NonFinite { row, column });
        }

        let weights = Array1::from_vec(self.coefficients.clone());
        let scores = matrix.dot(&weights) + self.intercept;

        // Finite inputs can still overflow the dot product
        if let Some((row, _)) = scores.iter().enumerate().find(|(_, z)| !z.is_finite()) {
            return Err(ModelError::NonFinite { row, column: 0 });
        }

        Ok(scores)
    }
}

impl Classifier for LogisticRegression {
    fn n_features(&self) -> usize {
        self.coefficients.len()
    }

    fn predict(&self, matrix: &Array2<f64>) -> Result<Vec<Label>, ModelError> {
        let scores = self.decision_function(matrix)?;
        Ok(scores.iter().map(|z| Label::from(*z > 0.0)).collect())
    }
}

/// Load the classifier artifact from disk.
pub fn load_classifier(path: impl AsRef<Path>) -> Result<Arc<dyn Classifier>, ModelError> {
    let path = path.as_ref();
    let shown = path.display().to_string();

    let raw = std::fs::read_to_string(path).map_err(|source| ModelError::Io {
        path: shown.clone(),
        source,
    })?;

    let artifact: ModelArtifact = serde_json::from_str(&raw).map_err(|source| ModelError::Parse {
        path: shown.clone(),
        source,
    })?;

    match artifact {
        ModelArtifact::LogisticRegression(model) => {
            if model.coefficients.is_empty() {
                return Err(ModelError::EmptyModel);
            }
            tracing::info!(
                path = %shown,
                features = model.coefficients.len(),
                "Loaded logistic regression classifier"
            );
            Ok(Arc::new(model))
        }
    }
}
