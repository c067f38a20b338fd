use menusearch_core::traits::TextVectorizer;
use menusearch_core::types::{Dietary, MenuItem, FEATURE_DIM};
use menusearch_embed::{dietary_query_context, health_context, l2_normalize, FeatureBuilder, HashedVectorizer};

fn norm(v: &[f32]) -> f32 {
    v.iter().map(|x| x * x).sum::<f32>().sqrt()
}

fn item(id: &str, name: &str, category: &str) -> MenuItem {
    MenuItem { id: id.into(), name: name.into(), category: category.into(), ..Default::default() }
}

#[test]
fn vectorize_is_deterministic() {
    let vectorizer = HashedVectorizer::default();
    let a = vectorizer.vectorize("Wood-fired Margherita pizza", 4.0);
    let b = vectorizer.vectorize("Wood-fired Margherita pizza", 4.0);
    assert_eq!(a.len(), FEATURE_DIM);
    assert!(a.iter().zip(&b).all(|(x, y)| x.to_bits() == y.to_bits()), "same input gives bit-identical output");
}

#[test]
fn vectorize_uses_raw_code_points() {
    let vectorizer = HashedVectorizer::default();
    assert_ne!(vectorizer.vectorize("Pizza", 1.0), vectorizer.vectorize("pizza", 1.0));
    // 'A' = 65 lands in slot 0 three times, its word hash in slot 65.
    let v = vectorizer.vectorize("A", 1.0);
    assert!((v[0] - 3.0 * 65.0 / 255.0).abs() < 1e-6);
    assert!((v[65] - 1.0 / 255.0).abs() < 1e-6);
}

#[test]
fn vectorize_single_character_layout() {
    // 'a' = 97 at position 0: slots 0, 0 and 0 from the character pass,
    // plus the word hash of "a" (97 % 384 = 97).
    let v = HashedVectorizer::default().vectorize("a", 1.0);
    assert!((v[0] - 3.0 * 97.0 / 255.0).abs() < 1e-6);
    assert!((v[97] - 1.0 / 255.0).abs() < 1e-6);
    let touched = v.iter().filter(|x| **x != 0.0).count();
    assert_eq!(touched, 2);
}

#[test]
fn vectorize_scales_linearly_with_weight() {
    let vectorizer = HashedVectorizer::default();
    let one = vectorizer.vectorize("grilled salmon", 1.0);
    let two = vectorizer.vectorize("grilled salmon", 2.0);
    for (a, b) in one.iter().zip(&two) {
        assert!((a * 2.0 - b).abs() < 1e-4);
    }
}

#[test]
fn empty_text_is_all_zero() {
    let v = HashedVectorizer::default().vectorize("", 4.0);
    assert!(v.iter().all(|x| *x == 0.0));
}

#[test]
fn custom_dimension_is_respected() {
    let vectorizer = HashedVectorizer::new(16);
    let v = vectorizer.vectorize("a much longer piece of text than sixteen characters", 1.0);
    assert_eq!(v.len(), 16);
    assert!(norm(&v) > 0.0);
}

#[test]
fn item_vector_is_unit_length() {
    let builder = FeatureBuilder::default();
    let mut pizza = item("1", "Margherita Pizza", "mains");
    pizza.description = "tomato, mozzarella, basil".into();
    pizza.dietary = Dietary { is_vegetarian: true, ..Default::default() };
    let v = builder.item_vector(&pizza);
    assert_eq!(v.len(), FEATURE_DIM);
    assert!((norm(&v) - 1.0).abs() < 1e-4, "norm = {}", norm(&v));
}

#[test]
fn item_vector_is_deterministic() {
    let builder = FeatureBuilder::default();
    let salmon = MenuItem {
        description: "grilled with lemon".into(),
        ingredients: vec!["salmon".into(), "lemon".into()],
        ..item("2", "Grilled Salmon", "mains")
    };
    assert_eq!(builder.item_vector(&salmon), builder.item_vector(&salmon));
}

#[test]
fn query_vector_is_unit_length_and_empty_query_is_zero() {
    let builder = FeatureBuilder::default();
    assert!((norm(&builder.query_vector("vegan curry")) - 1.0).abs() < 1e-4);
    assert!(builder.query_vector("").iter().all(|x| *x == 0.0));
}

#[test]
fn l2_normalize_leaves_zero_vector_alone() {
    let mut zero = vec![0.0f32; 4];
    l2_normalize(&mut zero);
    assert_eq!(zero, vec![0.0; 4]);

    let mut v = vec![3.0f32, 4.0];
    l2_normalize(&mut v);
    assert!((v[0] - 0.6).abs() < 1e-6 && (v[1] - 0.8).abs() < 1e-6);
}

#[test]
fn health_context_reflects_item_traits() {
    let salad = MenuItem {
        sub_category: "Salads".into(),
        description: "Fresh greens, grilled halloumi".into(),
        ingredients: vec!["fresh spinach".into()],
        dietary: Dietary { is_vegetarian: true, is_gluten_free: true, ..Default::default() },
        calories: 320.0,
        ..item("3", "Halloumi Salad", "starters")
    };
    let context = health_context(&salad);
    assert!(context.starts_with("healthy "));
    for expected in ["vegetarian", "gluten-free", "wholesome", "fresh", "low-calorie", "salad", "preparation"] {
        assert!(context.contains(expected), "missing {expected} in {context}");
    }
    assert!(!context.contains("vegan"));
}

#[test]
fn health_context_is_empty_for_heavy_plain_items() {
    let burger = MenuItem { calories: 950.0, ..item("4", "Burger", "mains") };
    assert_eq!(health_context(&burger), "");
    let borderline = MenuItem { calories: 500.0, ..item("5", "Fries", "sides") };
    assert_eq!(health_context(&borderline), "");
}

#[test]
fn missing_calories_count_as_light() {
    let fries = item("5", "Fries", "sides");
    assert_eq!(fries.calories, 0.0);
    assert_eq!(health_context(&fries), "healthy light low-calorie");
}

#[test]
fn item_vector_concatenates_category_and_sub_category() {
    // No sub-category: the category field is still "mains " with the separator.
    let burger = item("4", "Burger", "mains");
    let vectorizer = HashedVectorizer::default();
    let mut expected = vec![0.0f32; FEATURE_DIM];
    for (text, weight) in [("Burger", 4.0), ("mains ", 3.0), ("healthy light low-calorie", 2.0)] {
        vectorizer.accumulate(text, weight, &mut expected);
    }
    l2_normalize(&mut expected);

    let actual = FeatureBuilder::default().item_vector(&burger);
    for (a, e) in actual.iter().zip(&expected) {
        assert!((a - e).abs() < 1e-5);
    }
}

#[test]
fn dietary_query_context_expands_keywords() {
    assert_eq!(dietary_query_context("pizza"), "");
    assert!(dietary_query_context("Vegetarian pizza").contains("vegetables"));
    let both = dietary_query_context("vegan gluten free");
    assert!(both.contains("plant-based") && both.contains("gluten-free"));
}
