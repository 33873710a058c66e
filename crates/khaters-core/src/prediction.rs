//! Prediction results and the thresholds that steer the decision cascade.

use serde::Serialize;

/// Final categorical verdict produced by the decision cascade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Verdict {
    #[serde(rename = "normal")]
    Normal,
    #[serde(rename = "offensive")]
    Offensive,
    #[serde(rename = "L1_hate")]
    L1Hate,
    #[serde(rename = "L2_hate")]
    L2Hate,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Offensive => "offensive",
            Self::L1Hate => "L1_hate",
            Self::L2Hate => "L2_hate",
        }
    }
}

/// Thresholds and options for `ModelState::predict`.
///
/// Defaults follow the composite rule the weights were tuned against:
/// offensive 0.5, target gate 0.45, L2 threat gate 0.45, debug on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PredictOptions {
    /// Strict lower bound on `p_off` for the cascade to leave `normal`.
    pub offensive_threshold: f32,
    /// Strict lower bound on `max(p_targets)` for a hate verdict.
    pub target_gate: f32,
    /// Inclusive lower bound on `p_threat` for `L2_hate` over `L1_hate`.
    pub l2_threat_gate: f32,
    /// Populate [`DebugInfo`] on the result.
    pub debug: bool,
}

impl Default for PredictOptions {
    fn default() -> Self {
        Self {
            offensive_threshold: 0.5,
            target_gate: 0.45,
            l2_threat_gate: 0.45,
            debug: true,
        }
    }
}

/// Full per-text prediction: the cascade verdict plus every head's
/// probabilities and the auxiliary 4-class label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    /// Cascade verdict.
    pub label: Verdict,
    /// Auxiliary direct 4-class classification. Diagnostic only — never
    /// feeds into `label`.
    pub label4: String,
    /// Offensive-head probability.
    pub p_off: f32,
    /// Target-head names, in row order.
    pub targets: Vec<String>,
    /// Per-target probabilities, parallel to `targets`.
    pub p_targets: Vec<f32>,
    /// Fine-category head names, in row order.
    pub fine: Vec<String>,
    /// Per-fine-category probabilities, parallel to `fine`.
    pub p_fine: Vec<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug: Option<DebugInfo>,
}

/// Diagnostic fields populated when [`PredictOptions::debug`] is set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DebugInfo {
    /// Highest target-head probability.
    pub max_target: f32,
    /// Name of the first target head attaining `max_target`.
    pub top_target: String,
    /// Probability of the fine category named "threat" (0.0 if absent).
    pub p_threat: f32,
    /// Full auxiliary softmax distribution over the 4 labels.
    pub p_label: Vec<f32>,
    /// Number of distinct vocabulary n-grams matched in the input.
    pub token_count: usize,
}
