use thiserror::Error;

use crate::types::IndexState;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("Search index is not ready (state: {state})")]
    IndexNotReady { state: IndexState },

    #[error("Invalid menu data: {0}")]
    InvalidMenuData(String),

    #[error("Vector dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Build {generation} was superseded by a newer build")]
    Superseded { generation: u64 },

    #[error("Index build failed: {0}")]
    BuildFailed(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, Error>;
