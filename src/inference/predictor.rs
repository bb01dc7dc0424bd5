use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use metrics::{counter, histogram};
use ndarray::{arr2, Array2};

use crate::models::{
    DatasetDecision, DatasetSummary, Label, NameDecision, PlayerStats, PredictionResponse,
    EMPTY_DATASET_MESSAGE, FEATURE_COUNT,
};

use super::classifier::{load_classifier, Classifier, ModelError};
use super::dataset::{Dataset, DatasetError, ReferenceDataset};
use super::scaler::{min_max_global, min_max_per_column};

#[derive(Debug, thiserror::Error)]
pub enum PredictError {
    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Dataset(#[from] DatasetError),
}

/// Prediction pipeline shared by every request.
///
/// Holds the classifier loaded at startup and the location of the
/// reference dataset used for name lookups. Nothing is mutated after
/// construction.
#[derive(Clone)]
pub struct Predictor {
    model: Arc<dyn Classifier>,
    reference_path: PathBuf,
}

impl Predictor {
    pub fn new(model: Arc<dyn Classifier>, reference_path: impl Into<PathBuf>) -> Self {
        Self {
            model,
            reference_path: reference_path.into(),
        }
    }

    /// Load the model artifact. Failure here must abort startup.
    pub fn load(
        model_path: impl AsRef<Path>,
        reference_path: impl Into<PathBuf>,
    ) -> Result<Self, ModelError> {
        let model = load_classifier(model_path)?;
        if model.n_features() != FEATURE_COUNT {
            return Err(ModelError::FeatureCountMismatch {
                expected: FEATURE_COUNT,
                actual: model.n_features(),
            });
        }
        Ok(Self::new(model, reference_path))
    }

    pub fn reference_path(&self) -> &Path {
        &self.reference_path
    }

    /// Assemble a 1-row matrix in model column order.
    pub fn build_params(stats: &PlayerStats) -> Array2<f64> {
        arr2(&[stats.to_row()])
    }

    /// Run the classifier on an already normalized matrix.
    pub fn predict_vector(&self, matrix: &Array2<f64>) -> Result<Vec<Label>, PredictError> {
        Ok(self.model.predict(matrix)?)
    }

    /// Single-vector prediction, normalized against the row itself.
    pub fn predict_stats(&self, stats: &PlayerStats) -> Result<PredictionResponse, PredictError> {
        let start = Instant::now();

        let matrix = Self::build_params(stats);
        let scaled = min_max_global(&matrix);
        let prediction = self.predict_vector(&scaled)?;

        counter!("predictions_total", "mode" => "single").increment(1);
        histogram!("inference_latency_seconds", "mode" => "single")
            .record(start.elapsed().as_secs_f64());
        tracing::debug!(prediction = ?prediction, "Single-vector prediction");

        Ok(PredictionResponse { prediction })
    }

    /// Look a player up in the reference dataset.
    ///
    /// The dataset is re-read on every call and scaled per column over the
    /// whole population, and the model runs over every row before the
    /// first exact name match is picked.
    pub fn predict_by_name(&self, name: &str) -> Result<NameDecision, PredictError> {
        let start = Instant::now();

        let reference = ReferenceDataset::load(&self.reference_path)?;
        tracing::debug!(
            players = reference.names.len(),
            features = reference.feature_columns.len(),
            "Reference dataset loaded"
        );
        let scaled = min_max_per_column(&reference.features);
        let labels = self.predict_vector(&scaled)?;

        counter!("predictions_total", "mode" => "name").increment(1);
        histogram!("inference_latency_seconds", "mode" => "name")
            .record(start.elapsed().as_secs_f64());

        match reference.position(name) {
            Some(idx) => {
                let value = f64::from(labels[idx]);
                tracing::debug!(player = %name, decision = value, "Name lookup hit");
                Ok(NameDecision::Found {
                    decision: vec![value],
                })
            }
            None => {
                counter!("players_not_found_total").increment(1);
                tracing::info!(player = %name, "Player not found in reference dataset");
                Ok(NameDecision::not_found(name))
            }
        }
    }

    /// Batch prediction over an uploaded table, normalized matrix-wide.
    pub fn predict_dataset(&self, dataset: &Dataset) -> Result<DatasetDecision, PredictError> {
        if dataset.is_empty() {
            return Ok(DatasetDecision::Rejected {
                error: EMPTY_DATASET_MESSAGE.to_string(),
            });
        }

        let start = Instant::now();
        let scaled = min_max_global(&dataset.values);
        let labels = self.predict_vector(&scaled)?;
        let summary = DatasetSummary::from_labels(labels);

        counter!("predictions_total", "mode" => "dataset").increment(1);
        counter!("recruitable_players_total").increment(summary.recruitable_count as u64);
        histogram!("inference_latency_seconds", "mode" => "dataset")
            .record(start.elapsed().as_secs_f64());
        tracing::info!(
            players = summary.total_players,
            columns = dataset.columns.len(),
            recruitable = summary.recruitable_count,
            "Dataset classified"
        );

        Ok(DatasetDecision::Summary(summary))
    }
}
