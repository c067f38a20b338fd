use std::sync::Arc;

use crate::types::{FeatureVector, IndexState};

/// Turns free text into a fixed-length numeric fingerprint.
///
/// Implementations must be deterministic: the same `(text, weight)` always
/// yields a bit-identical vector of length [`TextVectorizer::dim`].
pub trait TextVectorizer: Send + Sync {
    fn dim(&self) -> usize;

    /// Add the contribution of `text` scaled by `weight` into `into`.
    /// `into.len()` must equal `self.dim()`.
    fn accumulate(&self, text: &str, weight: f32, into: &mut [f32]);

    fn vectorize(&self, text: &str, weight: f32) -> FeatureVector {
        let mut v = vec![0f32; self.dim()];
        self.accumulate(text, weight, &mut v);
        v
    }
}

/// Callback invoked on every index state transition with
/// `(state, error message, progress)`.
pub type StateListener = Arc<dyn Fn(IndexState, Option<&str>, f32) + Send + Sync>;
