//! Loaded model state and the decision cascade.
//!
//! [`ModelState::load`] joins the ten exported artifacts into one immutable
//! value; [`ModelState::predict`] is a pure function over that state. There
//! is no global singleton: holding a `ModelState` *is* the proof that the
//! model is loaded, so a "predict before load" error cannot arise. Multiple
//! independently-loaded models can coexist, and concurrent predictions on a
//! shared state are safe because it is only ever read.

use std::collections::HashMap;

use khaters_core::{DebugInfo, Metadata, PredictOptions, Prediction, SparseVector, Verdict};
use tracing::info;

use crate::artifacts::{ArtifactSource, names};
use crate::error::LoadError;
use crate::scoring::{argmax, score_row, sigmoid, softmax};
use crate::vectorize::vectorize;

/// Immutable in-memory model: metadata, vocabulary, and the four heads'
/// weights. Read-only for its entire lifetime after `load`.
#[derive(Debug)]
pub struct ModelState {
    meta: Metadata,
    vocab: HashMap<String, u32>,
    w_off: Vec<f32>,
    b_off: f32,
    w_target: Vec<f32>,
    b_target: Vec<f32>,
    w_fine: Vec<f32>,
    b_fine: Vec<f32>,
    w_label: Vec<f32>,
    b_label: Vec<f32>,
}

impl ModelState {
    /// Fetch and assemble all model artifacts from `source`.
    ///
    /// Metadata and vocabulary are fetched first (the weight shapes depend
    /// on `dim` and the head counts); the eight weight blobs are then
    /// fetched concurrently, since they are independent of one another.
    /// Any failure aborts the whole load — no partial state escapes.
    pub async fn load<S: ArtifactSource>(source: &S) -> Result<Self, LoadError> {
        let meta_bytes = fetch(source, names::META).await?;
        let meta: Metadata = serde_json::from_slice(&meta_bytes).map_err(|e| {
            LoadError::Malformed {
                name: names::META,
                reason: e.to_string(),
            }
        })?;

        let vocab_bytes = fetch(source, names::VOCAB).await?;
        let vocab: HashMap<String, u32> =
            serde_json::from_slice(&vocab_bytes).map_err(|e| LoadError::Malformed {
                name: names::VOCAB,
                reason: e.to_string(),
            })?;

        // Fail fast on out-of-range feature indices rather than letting a
        // bad export silently corrupt every dot product.
        let dim = meta.dim;
        if let Some((gram, &idx)) = vocab.iter().find(|&(_, &idx)| idx as usize >= dim) {
            return Err(LoadError::Malformed {
                name: names::VOCAB,
                reason: format!("n-gram {gram:?} has index {idx} >= dim {dim}"),
            });
        }

        let n_targets = meta.targets.len();
        let n_fine = meta.fine.len();
        let n_labels = meta.labels.len();

        let (w_off, b_off, w_target, b_target, w_fine, b_fine, w_label, b_label) = tokio::try_join!(
            fetch_f32(source, names::W_OFF, dim),
            fetch_f32(source, names::B_OFF, 1),
            fetch_f32(source, names::W_TARGET, n_targets * dim),
            fetch_f32(source, names::B_TARGET, n_targets),
            fetch_f32(source, names::W_FINE, n_fine * dim),
            fetch_f32(source, names::B_FINE, n_fine),
            fetch_f32(source, names::W_LABEL, n_labels * dim),
            fetch_f32(source, names::B_LABEL, n_labels),
        )?;

        info!(
            dim,
            vocab = vocab.len(),
            targets = n_targets,
            fine = n_fine,
            labels = n_labels,
            "loaded severity model"
        );

        Ok(Self {
            meta,
            vocab,
            w_off,
            b_off: b_off[0],
            w_target,
            b_target,
            w_fine,
            b_fine,
            w_label,
            b_label,
        })
    }

    /// Model metadata.
    pub fn meta(&self) -> &Metadata {
        &self.meta
    }

    /// Number of n-grams in the vocabulary.
    pub fn vocab_len(&self) -> usize {
        self.vocab.len()
    }

    /// Vectorize one text against the loaded vocabulary.
    pub fn vectorize(&self, text: &str) -> SparseVector {
        let (nmin, nmax) = self.meta.ngram_range();
        vectorize(text, &self.vocab, nmin, nmax)
    }

    /// Score one text through the full decision cascade.
    ///
    /// Synchronous and pure: same text, same thresholds, same result.
    ///
    /// 1. `p_off < offensive_threshold` → `normal` (equality routes onward).
    /// 2. `max(p_targets) < target_gate` → `offensive`.
    /// 3. `p_threat >= l2_threat_gate` → `L2_hate`, else `L1_hate`.
    ///
    /// The auxiliary 4-way softmax label is always computed alongside but
    /// never decides the verdict.
    pub fn predict(&self, text: &str, opts: &PredictOptions) -> Prediction {
        let x = self.vectorize(text);
        let dim = self.meta.dim;

        // (1) offensive head, single row.
        let p_off = sigmoid(score_row(&self.w_off, self.b_off, 0, dim, &x));

        // (2) target heads.
        let p_targets: Vec<f32> = (0..self.meta.targets.len())
            .map(|i| sigmoid(score_row(&self.w_target, self.b_target[i], i, dim, &x)))
            .collect();
        let top_target_idx = argmax(&p_targets);
        let max_target = p_targets[top_target_idx];

        // (3) fine-category heads.
        let p_fine: Vec<f32> = (0..self.meta.fine.len())
            .map(|i| sigmoid(score_row(&self.w_fine, self.b_fine[i], i, dim, &x)))
            .collect();
        let p_threat = self
            .meta
            .fine
            .iter()
            .position(|f| f == "threat")
            .map(|i| p_fine[i])
            .unwrap_or(0.0);

        // (4) auxiliary 4-class label distribution.
        let logits: Vec<f32> = (0..self.meta.labels.len())
            .map(|i| score_row(&self.w_label, self.b_label[i], i, dim, &x))
            .collect();
        let p_label = softmax(&logits);
        let label4 = self.meta.labels[argmax(&p_label)].clone();

        // (5) composite verdict.
        let label = if p_off < opts.offensive_threshold {
            Verdict::Normal
        } else if max_target < opts.target_gate {
            Verdict::Offensive
        } else if p_threat >= opts.l2_threat_gate {
            Verdict::L2Hate
        } else {
            Verdict::L1Hate
        };

        let debug = opts.debug.then(|| DebugInfo {
            max_target,
            top_target: self.meta.targets[top_target_idx].clone(),
            p_threat,
            p_label,
            token_count: x.len(),
        });

        Prediction {
            label,
            label4,
            p_off,
            targets: self.meta.targets.clone(),
            p_targets,
            fine: self.meta.fine.clone(),
            p_fine,
            debug,
        }
    }
}

async fn fetch<S: ArtifactSource>(source: &S, name: &'static str) -> Result<Vec<u8>, LoadError> {
    source
        .fetch(name)
        .await
        .map_err(|e| LoadError::Unavailable { name, source: e })
}

/// Fetch a flat little-endian float32 blob and check its element count.
async fn fetch_f32<S: ArtifactSource>(
    source: &S,
    name: &'static str,
    expected: usize,
) -> Result<Vec<f32>, LoadError> {
    let bytes = fetch(source, name).await?;
    if bytes.len() % 4 != 0 {
        return Err(LoadError::Malformed {
            name,
            reason: format!("byte length {} is not a multiple of 4", bytes.len()),
        });
    }
    let values: Vec<f32> = bytes
        .chunks_exact(4)
        .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect();
    if values.len() != expected {
        return Err(LoadError::Malformed {
            name,
            reason: format!("expected {expected} floats, got {}", values.len()),
        });
    }
    Ok(values)
}
