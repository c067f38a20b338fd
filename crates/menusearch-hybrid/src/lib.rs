//! menusearch-hybrid
//!
//! Hybrid menu search: lexical matching blended with pseudo-embedding
//! similarity, grouped by category, behind a stateful index with change
//! notifications. Construct one [`SearchIndex`] per menu scope and share it
//! (usually through a [`SearchService`]).

pub mod console;
pub mod grouper;
pub mod index;
pub mod planner;
pub mod service;

pub use console::{ConsoleStatus, ConsoleUpdate, SearchConsole};
pub use grouper::ResultGrouper;
pub use index::SearchIndex;
pub use planner::{QueryPlan, QueryPlanner, ScoreBreakdown};
pub use service::SearchService;

pub use menusearch_core::types::{IndexState, ListenerId, MenuItem, SearchResponse, SearchResult};
pub use menusearch_core::{Error, Result};
