//! Classifier
//!
//! Random forest of CART trees for binary placement outcome. Training is
//! deterministic for a fixed seed; the trained model is read-only.

mod errors;
mod forest;
mod trained;
mod tree;

pub use errors::{ModelError, ModelResult};
pub use forest::{ForestConfig, MaxFeatures, RandomForest};
pub use trained::{predict_proba, train, FeatureWeight, TrainedModel, TrainingReport};
