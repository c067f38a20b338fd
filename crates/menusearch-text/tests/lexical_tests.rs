use menusearch_core::types::{Dietary, MenuItem};
use menusearch_text::{dietary_label, tokenize, LexicalScore, LexicalScorer};

fn margherita() -> MenuItem {
    MenuItem {
        id: "1".into(),
        name: "Margherita Pizza".into(),
        category: "mains".into(),
        sub_category: "pizzas".into(),
        description: "tomato, mozzarella, basil".into(),
        ingredients: vec!["Tomato".into(), "Mozzarella".into(), "Basil".into()],
        dietary: Dietary { is_vegetarian: true, ..Default::default() },
        ..Default::default()
    }
}

#[test]
fn tokenize_lowercases_and_splits_on_whitespace() {
    assert_eq!(tokenize("  Vegan   PIZZA\tbasil "), vec!["vegan", "pizza", "basil"]);
    assert!(tokenize("   ").is_empty());
}

#[test]
fn name_match_is_double_weighted() {
    let score = LexicalScorer::new().score(&tokenize("margherita"), &margherita());
    assert_eq!(score, LexicalScore { name: 1.0, ..Default::default() });
    assert!((score.total() - 0.35).abs() < 1e-6);
}

#[test]
fn token_matching_several_fields_accumulates() {
    // "pizza" hits name and sub-category; "tomato" hits description and ingredients.
    let score = LexicalScorer::new().score(&tokenize("pizza tomato"), &margherita());
    assert_eq!(score.name, 1.0);
    assert!((score.category - 0.8).abs() < 1e-6);
    assert!((score.description - 0.6).abs() < 1e-6);
    assert!((score.ingredients - 0.5).abs() < 1e-6);
    let expected = 1.0 * 0.35 + 0.8 * 0.25 + 0.6 * 0.15 + 0.5 * 0.15;
    assert!((score.total() - expected).abs() < 1e-6);
}

#[test]
fn repeated_tokens_are_not_capped() {
    let once = LexicalScorer::new().score(&tokenize("pizza"), &margherita()).total();
    let twice = LexicalScorer::new().score(&tokenize("pizza pizza"), &margherita()).total();
    assert!((twice - 2.0 * once).abs() < 1e-6);
}

#[test]
fn dietary_label_matches_query_words() {
    let score = LexicalScorer::new().score(&tokenize("Vegetarian"), &margherita());
    assert!((score.dietary - 0.7).abs() < 1e-6);
    assert!((score.total() - 0.07).abs() < 1e-6);
}

#[test]
fn substring_matching_is_partial() {
    let score = LexicalScorer::new().score(&tokenize("mozz"), &margherita());
    assert!(score.description > 0.0 && score.ingredients > 0.0);
}

#[test]
fn unrelated_query_scores_zero() {
    let score = LexicalScorer::new().score(&tokenize("sushi"), &margherita());
    assert_eq!(score.total(), 0.0);
}

#[test]
fn dietary_label_lists_flags_in_order() {
    let mut item = margherita();
    item.dietary = Dietary { is_vegetarian: true, is_vegan: true, is_gluten_free: true };
    assert_eq!(dietary_label(&item), "vegetarian vegan gluten-free");
    item.dietary = Dietary::default();
    assert_eq!(dietary_label(&item), "");
}
