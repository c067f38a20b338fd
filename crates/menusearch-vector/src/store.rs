use std::collections::HashMap;

use menusearch_core::types::{FeatureVector, ItemId, MenuItem};
use menusearch_core::{Error, Result};

use crate::similarity::cosine_similarity;

/// A stored item snapshot together with its feature vector.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexEntry {
    pub vector: FeatureVector,
    pub item: MenuItem,
}

/// Feature vectors keyed by item id. Inserting an id that is already
/// present replaces the previous entry.
#[derive(Debug, Clone)]
pub struct VectorStore {
    dim: usize,
    entries: HashMap<ItemId, IndexEntry>,
}

impl VectorStore {
    pub fn new(dim: usize) -> Self {
        Self { dim, entries: HashMap::new() }
    }

    pub fn with_capacity(dim: usize, capacity: usize) -> Self {
        Self { dim, entries: HashMap::with_capacity(capacity) }
    }

    pub fn dim(&self) -> usize { self.dim }
    pub fn len(&self) -> usize { self.entries.len() }
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    pub fn insert(&mut self, item: MenuItem, vector: FeatureVector) -> Result<Option<IndexEntry>> {
        if vector.len() != self.dim {
            return Err(Error::DimensionMismatch { expected: self.dim, actual: vector.len() });
        }
        Ok(self.entries.insert(item.id.clone(), IndexEntry { vector, item }))
    }

    pub fn get(&self, id: &str) -> Option<&IndexEntry> {
        self.entries.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    pub fn entries(&self) -> impl Iterator<Item = &IndexEntry> {
        self.entries.values()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Cosine similarity of `query` against every stored vector, unordered.
    pub fn similarities<'a>(&'a self, query: &[f32]) -> Result<Vec<(&'a IndexEntry, f32)>> {
        if query.len() != self.dim {
            return Err(Error::DimensionMismatch { expected: self.dim, actual: query.len() });
        }
        self.entries
            .values()
            .map(|entry| cosine_similarity(query, &entry.vector).map(|s| (entry, s)))
            .collect()
    }
}
