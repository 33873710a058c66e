//! Model metadata parsed from `meta.json`.
//!
//! The exporter writes the feature dimension, head label names, and the
//! vectorizer's n-gram range. It also dumps redundant copies of the bias
//! vectors into the same file; those are ignored here — the binary blobs
//! are authoritative.

use serde::Deserialize;

/// Model metadata: feature-space width and the label names of every head.
///
/// `targets` has 9 entries, `fine` and `labels` 4 each. The ordering is
/// significant — it defines the semantic meaning of each weight row.
#[derive(Debug, Clone, Deserialize)]
pub struct Metadata {
    /// Feature-space width; every weight row has exactly this many columns.
    pub dim: usize,
    /// Character n-gram range of the vectorizer. Absent in older exports.
    #[serde(default)]
    pub vectorizer: Option<VectorizerConfig>,
    /// Target-head names (gender, age, race, ...), in row order.
    pub targets: Vec<String>,
    /// Fine-category head names (insult, swear, obscenity, threat), in row order.
    pub fine: Vec<String>,
    /// Auxiliary 4-class label names, in the label classifier's class order.
    pub labels: Vec<String>,
}

/// Character n-gram range of the training vectorizer.
#[derive(Debug, Clone, Deserialize)]
pub struct VectorizerConfig {
    #[serde(default = "default_ngram_min")]
    pub ngram_min: usize,
    #[serde(default = "default_ngram_max")]
    pub ngram_max: usize,
}

fn default_ngram_min() -> usize {
    3
}

fn default_ngram_max() -> usize {
    5
}

impl Metadata {
    /// Inclusive n-gram range, falling back to char 3..=5 when the export
    /// predates the `vectorizer` block.
    pub fn ngram_range(&self) -> (usize, usize) {
        match &self.vectorizer {
            Some(v) => (v.ngram_min, v.ngram_max),
            None => (3, 5),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_exporter_output() {
        // Shape as written by the training exporter, including the
        // redundant bias dumps that must be ignored.
        let json = r#"{
            "dim": 65536,
            "labels": ["L1_hate", "L2_hate", "normal", "offensive"],
            "targets": ["gender", "age", "race", "religion", "politics",
                        "job", "disability", "individual", "others"],
            "fine": ["insult", "swear", "obscenity", "threat"],
            "b_off": -0.5,
            "b_target": [0.1, 0.2],
            "vocab_file": "vocab.json",
            "vectorizer": {
                "type": "CountVectorizer",
                "analyzer": "char",
                "ngram_min": 3,
                "ngram_max": 5,
                "max_features": 65536,
                "lowercase": true
            }
        }"#;

        let meta: Metadata = serde_json::from_str(json).unwrap();
        assert_eq!(meta.dim, 65536);
        assert_eq!(meta.targets.len(), 9);
        assert_eq!(meta.fine.len(), 4);
        assert_eq!(meta.labels.len(), 4);
        assert_eq!(meta.ngram_range(), (3, 5));
    }

    #[test]
    fn ngram_range_defaults_without_vectorizer() {
        let json = r#"{
            "dim": 16,
            "targets": ["a"],
            "fine": ["b"],
            "labels": ["c"]
        }"#;

        let meta: Metadata = serde_json::from_str(json).unwrap();
        assert_eq!(meta.ngram_range(), (3, 5));
    }

    #[test]
    fn ngram_range_from_vectorizer_block() {
        let json = r#"{
            "dim": 16,
            "targets": ["a"],
            "fine": ["b"],
            "labels": ["c"],
            "vectorizer": { "ngram_min": 2, "ngram_max": 4 }
        }"#;

        let meta: Metadata = serde_json::from_str(json).unwrap();
        assert_eq!(meta.ngram_range(), (2, 4));
    }
}
