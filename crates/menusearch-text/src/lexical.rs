use menusearch_core::types::MenuItem;

/// Added to a field's score for every query token the field contains.
pub mod match_weights {
    pub const NAME: f32 = 1.0;
    pub const CATEGORY: f32 = 0.8;
    pub const DESCRIPTION: f32 = 0.6;
    pub const INGREDIENTS: f32 = 0.5;
    pub const DIETARY: f32 = 0.7;
}

/// Share of each field score in the total. Applied on top of
/// [`match_weights`], so every match is weighted twice.
pub mod field_weights {
    pub const NAME: f32 = 0.35;
    pub const CATEGORY: f32 = 0.25;
    pub const DESCRIPTION: f32 = 0.15;
    pub const INGREDIENTS: f32 = 0.15;
    pub const DIETARY: f32 = 0.10;
}

/// Per-field lexical scores for one item. Uncapped: each matching token
/// adds its field's match weight again.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LexicalScore {
    pub name: f32,
    pub category: f32,
    pub description: f32,
    pub ingredients: f32,
    pub dietary: f32,
}

impl LexicalScore {
    pub fn total(&self) -> f32 {
        self.name * field_weights::NAME
            + self.category * field_weights::CATEGORY
            + self.description * field_weights::DESCRIPTION
            + self.ingredients * field_weights::INGREDIENTS
            + self.dietary * field_weights::DIETARY
    }
}

/// Lowercased searchable text of one item, prepared once per search.
struct ItemText {
    name: String,
    category: String,
    description: String,
    ingredients: Vec<String>,
    dietary: String,
}

impl ItemText {
    fn new(item: &MenuItem) -> Self {
        Self {
            name: item.name.to_lowercase(),
            category: format!("{} {}", item.category, item.sub_category).to_lowercase(),
            description: item.description.to_lowercase(),
            ingredients: item.ingredients.iter().map(|i| i.to_lowercase()).collect(),
            dietary: dietary_label(item),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LexicalScorer;

impl LexicalScorer {
    pub fn new() -> Self { Self }

    /// Score already-lowercased `tokens` against an item.
    pub fn score(&self, tokens: &[String], item: &MenuItem) -> LexicalScore {
        let text = ItemText::new(item);
        let mut score = LexicalScore::default();
        for token in tokens.iter().filter(|t| !t.is_empty()) {
            let token = token.as_str();
            if text.name.contains(token) { score.name += match_weights::NAME; }
            if text.category.contains(token) { score.category += match_weights::CATEGORY; }
            if text.description.contains(token) { score.description += match_weights::DESCRIPTION; }
            if text.ingredients.iter().any(|i| i.contains(token)) { score.ingredients += match_weights::INGREDIENTS; }
            if text.dietary.contains(token) { score.dietary += match_weights::DIETARY; }
        }
        score
    }
}

/// Space-separated dietary labels of an item, e.g. `"vegetarian gluten-free"`.
pub fn dietary_label(item: &MenuItem) -> String {
    let mut labels: Vec<&str> = Vec::new();
    if item.dietary.is_vegetarian { labels.push("vegetarian"); }
    if item.dietary.is_vegan { labels.push("vegan"); }
    if item.dietary.is_gluten_free { labels.push("gluten-free"); }
    labels.join(" ")
}
