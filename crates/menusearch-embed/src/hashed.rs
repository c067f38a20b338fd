use menusearch_core::traits::TextVectorizer;
use menusearch_core::types::FEATURE_DIM;

/// Every contribution is divided by this before it is written.
const NORMALIZER: f32 = 255.0;

/// Character- and word-hash fingerprint of text.
///
/// Text is used as given: `"Pizza"` and `"pizza"` produce different vectors.
/// Each character's code point, scaled by the field weight, lands in three
/// slots: its position, twice its position, and code point times position
/// (all modulo the dimension). Each whitespace-separated word adds
/// `weight * (word index + 1)` to the slot picked by a 31-multiplier
/// polynomial hash of the word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashedVectorizer {
    dim: usize,
}

impl HashedVectorizer {
    pub fn new(dim: usize) -> Self {
        Self { dim: dim.max(1) }
    }
}

impl Default for HashedVectorizer {
    fn default() -> Self {
        Self::new(FEATURE_DIM)
    }
}

impl TextVectorizer for HashedVectorizer {
    fn dim(&self) -> usize {
        self.dim
    }

    fn accumulate(&self, text: &str, weight: f32, into: &mut [f32]) {
        debug_assert_eq!(into.len(), self.dim, "accumulator length must match the vectorizer dimension");
        let dim = self.dim.min(into.len());
        if dim == 0 {
            return;
        }
        for (i, ch) in text.chars().enumerate() {
            let code = ch as usize;
            let position = i % dim;
            let amount = code as f32 * weight / NORMALIZER;
            into[position] += amount;
            into[(position * 2) % dim] += amount;
            into[(code * position) % dim] += amount;
        }
        for (i, word) in text.split_whitespace().enumerate() {
            into[word_slot(word, dim)] += weight * (i + 1) as f32 / NORMALIZER;
        }
    }
}

fn word_slot(word: &str, dim: usize) -> usize {
    let hash = word
        .chars()
        .fold(0i32, |acc, ch| acc.wrapping_shl(5).wrapping_sub(acc).wrapping_add(ch as i32));
    hash.unsigned_abs() as usize % dim
}
