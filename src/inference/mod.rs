pub mod classifier;
pub mod dataset;
pub mod predictor;
pub mod scaler;

pub use classifier::{load_classifier, Classifier, LogisticRegression, ModelError};
pub use dataset::{Dataset, DatasetError, ReferenceDataset};
pub use predictor::{PredictError, Predictor};
