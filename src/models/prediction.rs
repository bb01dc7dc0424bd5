use serde::{Deserialize, Serialize};

/// Binary model output: 1 = recruitable, 0 = not.
pub type Label = u8;

/// Response of the single-vector prediction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResponse {
    pub prediction: Vec<Label>,
}

/// Result of a lookup against the reference dataset.
///
/// A missing player is a regular result carrying an `error` message,
/// serialized side by side with the success shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NameDecision {
    Found { decision: Vec<f64> },
    NotFound { error: String },
}

impl NameDecision {
    pub fn not_found(name: &str) -> Self {
        NameDecision::NotFound {
            error: format!("Joueur '{name}' introuvable"),
        }
    }
}

/// Result of a batch prediction over an uploaded dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DatasetDecision {
    Summary(DatasetSummary),
    Rejected { error: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetSummary {
    pub total_players: usize,
    pub recruitable_count: usize,
    pub recruitable_positions: Vec<usize>,
    pub decision: Vec<Label>,
}

impl DatasetSummary {
    pub fn from_labels(labels: Vec<Label>) -> Self {
        let recruitable_positions: Vec<usize> = labels
            .iter()
            .enumerate()
            .filter(|(_, label)| **label == 1)
            .map(|(i, _)| i)
            .collect();

        Self {
            total_players: labels.len(),
            recruitable_count: recruitable_positions.len(),
            recruitable_positions,
            decision: labels,
        }
    }
}

pub const EMPTY_DATASET_MESSAGE: &str = "Le dataset est vide.";
pub const NOT_CSV_MESSAGE: &str = "Le fichier doit être un CSV.";
