//! Domain types shared by the vectorizer, the lexical scorer and the index.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

pub type ItemId = String;
pub type FeatureVector = Vec<f32>;

/// Length of every feature vector produced for items and queries.
pub const FEATURE_DIM: usize = 384;

/// Category used by the grouper when an item carries none.
pub const FALLBACK_CATEGORY: &str = "Other";

/// Dietary flags attached to a menu item. Missing flags are `false`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Dietary {
    #[serde(deserialize_with = "lenient_bool")]
    pub is_vegetarian: bool,
    #[serde(deserialize_with = "lenient_bool")]
    pub is_vegan: bool,
    #[serde(deserialize_with = "lenient_bool")]
    pub is_gluten_free: bool,
}

/// A single dish as delivered by the menu content source.
///
/// Deserialization is forgiving: `id` may be a number, `price` and
/// `calories` may be numeric strings, and `null` is treated like a missing
/// field. Whether the item is usable is decided later by
/// [`MenuItem::is_indexable`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MenuItem {
    #[serde(deserialize_with = "lenient_string")]
    pub id: ItemId,
    #[serde(deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(deserialize_with = "lenient_string")]
    pub description: String,
    #[serde(deserialize_with = "lenient_string")]
    pub category: String,
    #[serde(deserialize_with = "lenient_string")]
    pub sub_category: String,
    #[serde(deserialize_with = "lenient_number")]
    pub price: f64,
    #[serde(deserialize_with = "lenient_dietary")]
    pub dietary: Dietary,
    #[serde(deserialize_with = "lenient_strings")]
    pub ingredients: Vec<String>,
    #[serde(deserialize_with = "lenient_strings")]
    pub allergens: Vec<String>,
    #[serde(deserialize_with = "lenient_strings")]
    pub pairings: Vec<String>,
    #[serde(deserialize_with = "lenient_number")]
    pub calories: f64,
    #[serde(deserialize_with = "lenient_string")]
    pub image: String,
}

impl MenuItem {
    /// An item can be indexed only with a non-blank id, name and category.
    pub fn is_indexable(&self) -> bool {
        !self.id.trim().is_empty() && !self.name.trim().is_empty() && !self.category.trim().is_empty()
    }
}

/// Lifecycle of a search index. Exactly one value holds at any time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexState {
    #[default]
    Uninitialized,
    Loading,
    Ready,
    Error,
}

impl fmt::Display for IndexState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            IndexState::Uninitialized => "uninitialized",
            IndexState::Loading => "loading",
            IndexState::Ready => "ready",
            IndexState::Error => "error",
        };
        f.write_str(s)
    }
}

/// One ranked hit. `score` is the blended lexical/vector score; higher is better.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub item: MenuItem,
    pub score: f32,
}

/// Output of a search: the flat ranking plus the same hits bucketed by category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub results: Vec<SearchResult>,
    pub grouped: BTreeMap<String, Vec<SearchResult>>,
}

impl SearchResponse {
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

/// Handle returned when registering a state listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub u64);

fn lenient_string<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(match Option::<Value>::deserialize(d)? {
        Some(Value::String(s)) => s,
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    })
}

fn lenient_number<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
    Ok(match Option::<Value>::deserialize(d)? {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().trim_start_matches('$').trim().parse().unwrap_or(0.0),
        _ => 0.0,
    })
}

fn lenient_bool<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
    Ok(match Option::<Value>::deserialize(d)? {
        Some(Value::Bool(b)) => b,
        Some(Value::String(s)) => s.trim().eq_ignore_ascii_case("true"),
        Some(Value::Number(n)) => n.as_f64().is_some_and(|v| v != 0.0),
        _ => false,
    })
}

fn lenient_dietary<'de, D: Deserializer<'de>>(d: D) -> Result<Dietary, D::Error> {
    Ok(Option::<Dietary>::deserialize(d)?.unwrap_or_default())
}

fn lenient_strings<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<String>, D::Error> {
    Ok(match Option::<Value>::deserialize(d)? {
        Some(Value::Array(values)) => values
            .into_iter()
            .filter_map(|v| match v {
                Value::String(s) => Some(s),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
            .collect(),
        Some(Value::String(s)) if !s.trim().is_empty() => vec![s],
        _ => Vec::new(),
    })
}
