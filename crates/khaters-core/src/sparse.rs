//! Sparse bag-of-n-grams feature vector.

/// A mostly-zero feature vector stored as parallel (index, value) arrays.
///
/// Indices are pairwise distinct and values are raw occurrence counts cast
/// to `f32`. Counts are deliberately unnormalized: the weights were trained
/// on raw counts, and inference must match training exactly.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    pub indices: Vec<u32>,
    pub values: Vec<f32>,
}

impl SparseVector {
    /// Number of distinct features present.
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Iterate over (index, value) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (u32, f32)> + '_ {
        self.indices.iter().copied().zip(self.values.iter().copied())
    }
}
