pub mod player;
pub mod prediction;
pub mod request_log;

pub use player::{PlayerStats, FEATURE_COUNT, FEATURE_NAMES};
pub use prediction::{
    DatasetDecision, DatasetSummary, Label, NameDecision, PredictionResponse,
    EMPTY_DATASET_MESSAGE, NOT_CSV_MESSAGE,
};
pub use request_log::{NewRequestLog, RequestLog};
