//! Character n-gram feature extraction.
//!
//! Mirrors the training vectorizer: `analyzer="char"`, `lowercase=True`,
//! exact vocabulary lookup. Windows slide over characters, not bytes —
//! the vocabulary was built from Unicode text (largely Korean), so a
//! 3-gram is three characters regardless of their UTF-8 width.

use std::collections::HashMap;

use khaters_core::SparseVector;

/// Turn one input text into a sparse bag-of-n-grams vector.
///
/// N-grams absent from the vocabulary contribute nothing; known n-grams
/// accumulate raw occurrence counts keyed by their feature index, with
/// overlapping windows of different lengths adding into the same slot when
/// they map to the same index. Counts stay unnormalized — the weights were
/// trained on raw counts. Emission order is unspecified.
///
/// Never fails on text content: empty or all-unknown input yields an empty
/// but valid vector.
pub fn vectorize(
    text: &str,
    vocab: &HashMap<String, u32>,
    ngram_min: usize,
    ngram_max: usize,
) -> SparseVector {
    let lowered = text.to_lowercase();

    // Byte offset of every char boundary, so windows can be cheap &str
    // slices instead of per-window String allocations.
    let mut boundaries: Vec<usize> = lowered.char_indices().map(|(i, _)| i).collect();
    boundaries.push(lowered.len());
    let char_count = boundaries.len() - 1;

    // Phase one: mutable accumulation map keyed by feature index.
    let mut counts: HashMap<u32, u32> = HashMap::new();
    for n in ngram_min..=ngram_max {
        if char_count < n {
            continue;
        }
        for start in 0..=char_count - n {
            let gram = &lowered[boundaries[start]..boundaries[start + n]];
            if let Some(&idx) = vocab.get(gram) {
                *counts.entry(idx).or_insert(0) += 1;
            }
        }
    }

    // Phase two: flatten to immutable parallel arrays for scoring.
    let mut indices = Vec::with_capacity(counts.len());
    let mut values = Vec::with_capacity(counts.len());
    for (idx, count) in counts {
        indices.push(idx);
        values.push(count as f32);
    }

    SparseVector { indices, values }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn vocab(entries: &[(&str, u32)]) -> HashMap<String, u32> {
        entries.iter().map(|&(s, i)| (s.to_string(), i)).collect()
    }

    #[test]
    fn empty_text_yields_empty_vector() {
        let v = vocab(&[("abc", 0)]);
        let x = vectorize("", &v, 3, 5);
        assert!(x.is_empty());
    }

    #[test]
    fn text_shorter_than_ngram_min_yields_empty_vector() {
        let v = vocab(&[("abc", 0)]);
        let x = vectorize("ab", &v, 3, 5);
        assert!(x.is_empty());
    }

    #[test]
    fn single_trigram_match() {
        let v = vocab(&[("abc", 0)]);
        let x = vectorize("xabcx", &v, 3, 3);
        assert_eq!(x.indices, vec![0]);
        assert_eq!(x.values, vec![1.0]);
    }

    #[test]
    fn unknown_ngrams_dropped_silently() {
        let v = vocab(&[("zzz", 0)]);
        let x = vectorize("hello world", &v, 3, 5);
        assert!(x.is_empty());
    }

    #[test]
    fn repeated_ngram_accumulates() {
        let v = vocab(&[("aba", 0)]);
        // "ababa" contains "aba" at offsets 0 and 2.
        let x = vectorize("ababa", &v, 3, 3);
        assert_eq!(x.indices, vec![0]);
        assert_eq!(x.values, vec![2.0]);
    }

    #[test]
    fn lowercases_before_lookup() {
        let v = vocab(&[("abc", 0)]);
        let x = vectorize("ABC", &v, 3, 3);
        assert_eq!(x.len(), 1);
        assert_eq!(x.values, vec![1.0]);
    }

    #[test]
    fn indices_are_pairwise_distinct() {
        let v = vocab(&[("abc", 0), ("bcd", 1), ("abcd", 2), ("cde", 3)]);
        let x = vectorize("abcdeabcde", &v, 3, 4);
        assert_eq!(x.indices.len(), x.values.len());
        let distinct: HashSet<u32> = x.indices.iter().copied().collect();
        assert_eq!(distinct.len(), x.indices.len());
    }

    #[test]
    fn multiple_window_lengths_contribute() {
        let v = vocab(&[("abc", 0), ("abcd", 1)]);
        let x = vectorize("abcd", &v, 3, 4);
        assert_eq!(x.len(), 2);
        let pairs: HashMap<u32, f32> = x.iter().collect();
        assert_eq!(pairs[&0], 1.0);
        assert_eq!(pairs[&1], 1.0);
    }

    #[test]
    fn windows_slide_over_chars_not_bytes() {
        // Hangul syllables are 3 UTF-8 bytes each; a char 3-gram must span
        // three syllables.
        let v = vocab(&[("안녕하", 0), ("녕하세", 1)]);
        let x = vectorize("안녕하세요", &v, 3, 3);
        assert_eq!(x.len(), 2);
    }

    #[test]
    fn ngram_longer_than_text_skipped() {
        let v = vocab(&[("abc", 0)]);
        // 5-grams are skipped for a 4-char text; 3- and 4-grams still run.
        let x = vectorize("abcx", &v, 3, 5);
        assert_eq!(x.len(), 1);
    }
}
