//! menusearch-embed
//!
//! Deterministic pseudo-embeddings for menu search. `hashed` turns one string
//! into a fixed-length fingerprint; `features` combines per-field
//! fingerprints of an item (or a query) into one normalised vector.

pub mod features;
pub mod hashed;

pub use features::{dietary_query_context, health_context, l2_normalize, FeatureBuilder};
pub use hashed::HashedVectorizer;
