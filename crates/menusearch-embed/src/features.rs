use std::sync::Arc;

use menusearch_core::traits::TextVectorizer;
use menusearch_core::types::{FeatureVector, MenuItem};

use crate::hashed::HashedVectorizer;

/// Field weights used when fingerprinting an indexed item.
pub mod item_weights {
    pub const NAME: f32 = 4.0;
    pub const CATEGORY: f32 = 3.0;
    pub const DESCRIPTION: f32 = 2.0;
    pub const INGREDIENTS: f32 = 2.5;
    pub const ALLERGENS: f32 = 1.5;
    pub const PAIRINGS: f32 = 1.0;
    pub const HEALTH: f32 = 2.0;
}

/// Field weights used when fingerprinting a query. The raw query text is
/// fed through every field; dietary keywords get their own sub-vector.
pub mod query_weights {
    pub const NAME: f32 = 4.0;
    pub const CATEGORY: f32 = 3.0;
    pub const DESCRIPTION: f32 = 2.0;
    pub const INGREDIENTS: f32 = 2.5;
    pub const DIETARY: f32 = 2.0;
}

const HEALTHY_INGREDIENT_HINTS: [&str; 3] = ["vegetable", "fresh", "lean"];
const HEALTHY_PREPARATION_HINTS: [&str; 3] = ["grilled", "steamed", "fresh"];
const LIGHT_CALORIE_LIMIT: f64 = 500.0;

/// Builds item and query feature vectors on top of a [`TextVectorizer`].
#[derive(Clone)]
pub struct FeatureBuilder {
    vectorizer: Arc<dyn TextVectorizer>,
}

impl FeatureBuilder {
    pub fn new(vectorizer: Arc<dyn TextVectorizer>) -> Self {
        Self { vectorizer }
    }

    pub fn hashed(dim: usize) -> Self {
        Self::new(Arc::new(HashedVectorizer::new(dim)))
    }

    pub fn dim(&self) -> usize {
        self.vectorizer.dim()
    }

    /// Weighted sum of the item's field fingerprints, L2-normalised.
    pub fn item_vector(&self, item: &MenuItem) -> FeatureVector {
        let category = format!("{} {}", item.category, item.sub_category);
        let ingredients = item.ingredients.join(" ");
        let allergens = item.allergens.join(" ");
        let pairings = item.pairings.join(" ");
        let health = health_context(item);
        let fields = [
            (item.name.as_str(), item_weights::NAME),
            (category.as_str(), item_weights::CATEGORY),
            (item.description.as_str(), item_weights::DESCRIPTION),
            (ingredients.as_str(), item_weights::INGREDIENTS),
            (allergens.as_str(), item_weights::ALLERGENS),
            (pairings.as_str(), item_weights::PAIRINGS),
            (health.as_str(), item_weights::HEALTH),
        ];
        self.combine(&fields)
    }

    /// Query fingerprint: the query text under each field weight plus the
    /// dietary keyword expansion, L2-normalised.
    pub fn query_vector(&self, query: &str) -> FeatureVector {
        let dietary = dietary_query_context(query);
        let fields = [
            (query, query_weights::NAME),
            (query, query_weights::CATEGORY),
            (query, query_weights::DESCRIPTION),
            (query, query_weights::INGREDIENTS),
            (dietary.as_str(), query_weights::DIETARY),
        ];
        self.combine(&fields)
    }

    fn combine(&self, fields: &[(&str, f32)]) -> FeatureVector {
        let mut combined = vec![0f32; self.vectorizer.dim()];
        for (text, weight) in fields {
            if text.is_empty() {
                continue;
            }
            let sub = self.vectorizer.vectorize(text, *weight);
            for (acc, x) in combined.iter_mut().zip(sub) {
                *acc += x;
            }
        }
        l2_normalize(&mut combined);
        combined
    }
}

impl Default for FeatureBuilder {
    fn default() -> Self {
        Self::new(Arc::new(HashedVectorizer::default()))
    }
}

/// Divide by the Euclidean norm in place. An all-zero vector is left as is.
pub fn l2_normalize(v: &mut [f32]) {
    let norm = v.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        for x in v.iter_mut() {
            *x /= norm;
        }
    }
}

/// Synthesised description of how healthy an item looks, derived from its
/// dietary flags, ingredients, description, calories and sub-category.
/// Empty when nothing applies.
pub fn health_context(item: &MenuItem) -> String {
    let mut parts: Vec<&str> = Vec::new();
    if item.dietary.is_vegetarian {
        parts.push("vegetarian vegetable plant-based");
    }
    if item.dietary.is_vegan {
        parts.push("vegan plant-based dairy-free");
    }
    if item.dietary.is_gluten_free {
        parts.push("gluten-free");
    }
    let ingredients = item.ingredients.join(" ").to_lowercase();
    if HEALTHY_INGREDIENT_HINTS.iter().any(|k| ingredients.contains(k)) {
        parts.push("wholesome ingredients");
    }
    let description = item.description.to_lowercase();
    if description.contains("fresh") {
        parts.push("fresh");
    }
    if item.calories < LIGHT_CALORIE_LIMIT {
        parts.push("light low-calorie");
    }
    if item.sub_category.trim().eq_ignore_ascii_case("salads") {
        parts.push("salad greens light");
    }
    if HEALTHY_PREPARATION_HINTS.iter().any(|k| description.contains(k)) {
        parts.push("healthy preparation");
    }
    if parts.is_empty() {
        return String::new();
    }
    let mut context = String::from("healthy");
    for part in parts {
        context.push(' ');
        context.push_str(part);
    }
    context
}

/// Canned dietary phrases for the dietary words that appear in a query.
pub fn dietary_query_context(query: &str) -> String {
    let q = query.to_lowercase();
    let mut parts: Vec<&str> = Vec::new();
    if q.contains("vegetarian") {
        parts.push("vegetarian vegetable vegetables");
    }
    if q.contains("vegan") {
        parts.push("vegan plant-based");
    }
    if q.contains("gluten") {
        parts.push("gluten-free gluten free");
    }
    parts.join(" ")
}
