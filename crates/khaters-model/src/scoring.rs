//! Numerically guarded scoring primitives.
//!
//! Sparse dot products against row-major weight matrices, a clamped
//! logistic, an overflow-safe softmax, and first-max-wins argmax. The
//! sigmoid clamp boundaries (±35) are a hard contract: downstream
//! threshold comparisons are exact, so 1.0 and 0.0 must be returned
//! bit-exactly outside the clamp range.

use khaters_core::SparseVector;

/// Sparse dot product of one weight row against a feature vector, plus bias.
///
/// `w` is row-major with `dim` columns. Cost is proportional to the number
/// of matched n-grams, not to `dim`.
pub fn score_row(w: &[f32], bias: f32, row: usize, dim: usize, x: &SparseVector) -> f32 {
    let base = row * dim;
    let mut sum = bias;
    for (idx, val) in x.iter() {
        sum += w[base + idx as usize] * val;
    }
    sum
}

/// Logistic function, clamped for numerical stability.
///
/// Returns exactly 1.0 above 35 and exactly 0.0 below −35.
pub fn sigmoid(x: f32) -> f32 {
    if x > 35.0 {
        1.0
    } else if x < -35.0 {
        0.0
    } else {
        1.0 / (1.0 + (-x).exp())
    }
}

/// Softmax over a logit slice, shifted by the maximum for overflow safety.
pub fn softmax(logits: &[f32]) -> Vec<f32> {
    let max = logits.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let mut exps: Vec<f32> = logits.iter().map(|&v| (v - max).exp()).collect();
    let sum: f32 = exps.iter().sum();
    for e in &mut exps {
        *e /= sum;
    }
    exps
}

/// First index attaining the strict maximum; ties resolve to the lowest index.
pub fn argmax(values: &[f32]) -> usize {
    let mut best_i = 0;
    let mut best_v = values[0];
    for (i, &v) in values.iter().enumerate().skip(1) {
        if v > best_v {
            best_v = v;
            best_i = i;
        }
    }
    best_i
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sigmoid_at_zero() {
        assert_eq!(sigmoid(0.0), 0.5);
    }

    #[test]
    fn sigmoid_clamps_exactly() {
        assert_eq!(sigmoid(36.0), 1.0);
        assert_eq!(sigmoid(-36.0), 0.0);
        assert_eq!(sigmoid(35.1), 1.0);
        assert_eq!(sigmoid(-35.1), 0.0);
    }

    #[test]
    fn sigmoid_clamp_boundary_is_exclusive() {
        // At exactly −35 the analytic formula still applies and stays
        // strictly positive. On the +35 side f32 rounding already
        // saturates the formula to 1.0, so both paths agree there.
        assert!(sigmoid(-35.0) > 0.0);
        assert_eq!(sigmoid(35.0), 1.0);
    }

    #[test]
    fn sigmoid_monotone() {
        let xs = [-40.0, -35.0, -10.0, -1.0, 0.0, 1.0, 10.0, 35.0, 40.0];
        for pair in xs.windows(2) {
            assert!(sigmoid(pair[0]) <= sigmoid(pair[1]), "not monotone at {pair:?}");
        }
    }

    #[test]
    fn softmax_sums_to_one() {
        let p = softmax(&[1.0, 2.0, 3.0, 4.0]);
        let sum: f32 = p.iter().sum();
        assert!((sum - 1.0).abs() < 1e-6);
    }

    #[test]
    fn softmax_shift_invariant() {
        let a = softmax(&[1.0, 2.0, 3.0, 4.0]);
        let b = softmax(&[101.0, 102.0, 103.0, 104.0]);
        for (x, y) in a.iter().zip(&b) {
            assert!((x - y).abs() < 1e-6);
        }
    }

    #[test]
    fn softmax_survives_large_logits() {
        let p = softmax(&[1000.0, 999.0, 998.0, 997.0]);
        assert!(p.iter().all(|v| v.is_finite()));
        let sum: f32 = p.iter().sum();
        assert!((sum - 1.0).abs() < 1e-6);
    }

    #[test]
    fn argmax_first_max_wins() {
        assert_eq!(argmax(&[3.0, 5.0, 5.0, 2.0]), 1);
    }

    #[test]
    fn argmax_single_and_last() {
        assert_eq!(argmax(&[7.0]), 0);
        assert_eq!(argmax(&[1.0, 2.0, 9.0]), 2);
    }

    #[test]
    fn score_row_bias_only_on_empty_vector() {
        let w = vec![1.0, 2.0, 3.0, 4.0];
        let x = SparseVector::default();
        assert_eq!(score_row(&w, -0.5, 0, 4, &x), -0.5);
    }

    #[test]
    fn score_row_selects_row() {
        // Two rows of dim 3.
        let w = vec![1.0, 0.0, 0.0, 0.0, 2.0, 0.0];
        let x = SparseVector {
            indices: vec![0, 1],
            values: vec![3.0, 5.0],
        };
        assert_eq!(score_row(&w, 0.0, 0, 3, &x), 3.0);
        assert_eq!(score_row(&w, 0.0, 1, 3, &x), 10.0);
    }

    #[test]
    fn score_row_counts_weighting() {
        let w = vec![0.5, -1.0];
        let x = SparseVector {
            indices: vec![0, 1],
            values: vec![2.0, 1.0],
        };
        assert_eq!(score_row(&w, 1.0, 0, 2, &x), 1.0 + 1.0 - 1.0);
    }
}
