use std::cmp::Ordering;
use std::collections::BTreeMap;

use menusearch_core::types::{SearchResult, FALLBACK_CATEGORY};
use tracing::debug;

/// Buckets ranked results by item category.
///
/// Buckets are keyed in a `BTreeMap`, so iteration yields categories
/// alphabetically; within a bucket results are ordered by descending score,
/// and equal scores keep their incoming order.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResultGrouper;

impl ResultGrouper {
    pub fn new() -> Self { Self }

    pub fn group(&self, results: &[SearchResult]) -> BTreeMap<String, Vec<SearchResult>> {
        let mut grouped: BTreeMap<String, Vec<SearchResult>> = BTreeMap::new();
        for result in results {
            if !result.score.is_finite() {
                debug!(id = %result.item.id, "skipping result with non-finite score");
                continue;
            }
            let category = result.item.category.trim();
            let key = if category.is_empty() { FALLBACK_CATEGORY } else { category };
            grouped.entry(key.to_string()).or_default().push(result.clone());
        }
        for bucket in grouped.values_mut() {
            bucket.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        }
        grouped
    }
}
