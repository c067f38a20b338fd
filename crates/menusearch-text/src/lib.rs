//! menusearch-text
//!
//! Lexical side of menu search: whitespace tokenisation of queries and
//! case-insensitive substring scoring of item fields.

pub mod lexical;
pub mod tokenize;

pub use lexical::{dietary_label, LexicalScore, LexicalScorer};
pub use tokenize::tokenize;
