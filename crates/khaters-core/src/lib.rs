//! Core types for the K-HATERS severity inference runtime: model metadata,
//! sparse feature vectors, thresholds, and prediction results.

pub mod meta;
pub mod prediction;
pub mod sparse;

pub use meta::{Metadata, VectorizerConfig};
pub use prediction::{DebugInfo, PredictOptions, Prediction, Verdict};
pub use sparse::SparseVector;
