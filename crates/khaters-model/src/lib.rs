//! Inference runtime for the K-HATERS multi-head linear severity model.
//!
//! Layered strictly Loader → Extractor → Scoring → Composer:
//! [`artifacts`] fetches the exported model files, [`ModelState::load`]
//! joins them into an immutable value, [`vectorize`] turns one text into a
//! sparse bag of character n-grams, [`scoring`] provides the numerically
//! guarded primitives, and [`ModelState::predict`] runs the threshold
//! cascade.

pub mod artifacts;
mod error;
#[cfg(feature = "http")]
mod http;
pub mod scoring;
mod state;
pub mod vectorize;

pub use artifacts::{ArtifactSource, DirSource};
pub use error::LoadError;
#[cfg(feature = "http")]
pub use http::HttpSource;
pub use state::ModelState;
pub use vectorize::vectorize;
