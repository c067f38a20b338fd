//! menusearch-vector
//!
//! In-memory storage of item feature vectors and the cosine similarity used
//! to compare them with query vectors. The store is rebuilt wholesale on
//! every index build and never persisted.

pub mod similarity;
pub mod store;

pub use similarity::{cosine_similarity, dot_product, l2_norm};
pub use store::{IndexEntry, VectorStore};
