use std::cmp::Ordering;

use menusearch_core::config::SearchSettings;
use menusearch_core::types::{FeatureVector, SearchResult};
use menusearch_core::Result;
use menusearch_embed::FeatureBuilder;
use menusearch_text::{tokenize, LexicalScorer};
use menusearch_vector::{cosine_similarity, IndexEntry, VectorStore};

/// A query prepared once and scored against every entry.
#[derive(Debug, Clone)]
pub struct QueryPlan {
    pub tokens: Vec<String>,
    pub vector: FeatureVector,
}

/// Score components for one entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreBreakdown {
    pub text: f32,
    pub vector: f32,
    pub combined: f32,
}

/// Blends lexical matching with vector similarity and ranks entries.
#[derive(Clone)]
pub struct QueryPlanner {
    features: FeatureBuilder,
    lexical: LexicalScorer,
    text_weight: f32,
    vector_weight: f32,
    max_results: Option<usize>,
}

impl QueryPlanner {
    pub fn new(features: FeatureBuilder, settings: &SearchSettings) -> Self {
        Self {
            features,
            lexical: LexicalScorer::new(),
            text_weight: settings.text_weight,
            vector_weight: settings.vector_weight,
            max_results: settings.max_results,
        }
    }

    pub fn plan(&self, query: &str) -> QueryPlan {
        QueryPlan { tokens: tokenize(query), vector: self.features.query_vector(query) }
    }

    pub fn score(&self, plan: &QueryPlan, entry: &IndexEntry) -> Result<ScoreBreakdown> {
        let similarity = cosine_similarity(&plan.vector, &entry.vector)?;
        Ok(self.blend(plan, entry, similarity))
    }

    /// Every entry with a positive blended score, best first. Ties are broken
    /// by item name, then id, so equal scores rank the same way every time.
    pub fn rank(&self, query: &str, store: &VectorStore) -> Result<Vec<SearchResult>> {
        let plan = self.plan(query);
        let mut results: Vec<SearchResult> = store
            .similarities(&plan.vector)?
            .into_iter()
            .map(|(entry, similarity)| (entry, self.blend(&plan, entry, similarity)))
            .filter(|(_, score)| score.combined > 0.0)
            .map(|(entry, score)| SearchResult { item: entry.item.clone(), score: score.combined })
            .collect();
        results.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.item.name.cmp(&b.item.name))
                .then_with(|| a.item.id.cmp(&b.item.id))
        });
        if let Some(limit) = self.max_results {
            results.truncate(limit);
        }
        Ok(results)
    }

    fn blend(&self, plan: &QueryPlan, entry: &IndexEntry, similarity: f32) -> ScoreBreakdown {
        let text = self.lexical.score(&plan.tokens, &entry.item).total();
        ScoreBreakdown { text, vector: similarity, combined: text * self.text_weight + similarity * self.vector_weight }
    }
}
