use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use tokio::task;
use tracing::debug;

use menusearch_core::config::SearchSettings;
use menusearch_core::menu::MenuLoader;
use menusearch_core::types::{IndexState, ListenerId, MenuItem, SearchResponse};
use menusearch_core::{Error, Result};

use crate::index::SearchIndex;

/// Async face of a shared [`SearchIndex`] for UI code that awaits builds
/// and debounced searches. Cloning shares the same index.
#[derive(Clone)]
pub struct SearchService {
    index: Arc<SearchIndex>,
}

impl SearchService {
    pub fn new(index: Arc<SearchIndex>) -> Self {
        Self { index }
    }

    pub fn with_settings(settings: &SearchSettings) -> Self {
        Self::new(Arc::new(SearchIndex::new(settings)))
    }

    pub fn index(&self) -> &Arc<SearchIndex> {
        &self.index
    }

    pub fn state(&self) -> IndexState {
        self.index.state()
    }

    /// Build the index on the blocking pool so the caller's executor keeps
    /// running while vectors are computed.
    pub async fn initialize_index(&self, items: Vec<MenuItem>) -> Result<usize> {
        let index = Arc::clone(&self.index);
        match task::spawn_blocking(move || index.build(&items)).await {
            Ok(result) => result,
            Err(e) if e.is_panic() => std::panic::resume_unwind(e.into_panic()),
            Err(e) => Err(Error::BuildFailed(e.to_string())),
        }
    }

    /// Load a static menu file and build from it. A file that cannot be read
    /// or parsed puts the index into `Error` before the error is returned.
    pub async fn initialize_from_file(&self, path: PathBuf) -> anyhow::Result<usize> {
        let display = path.display().to_string();
        let loaded = task::spawn_blocking(move || MenuLoader::new().load_file(&path))
            .await
            .context("menu loader task failed")?;
        let items = match loaded {
            Ok(items) => items,
            Err(e) => {
                if let Err(superseded) = self.index.mark_failed(format!("{e:#}")) {
                    debug!(error = %superseded, "menu load failure not recorded");
                }
                return Err(e);
            }
        };
        let indexed = self
            .initialize_index(items)
            .await
            .with_context(|| format!("indexing menu from {display}"))?;
        Ok(indexed)
    }

    pub async fn search(&self, query: &str) -> Result<SearchResponse> {
        self.index.search(query)
    }

    pub fn cleanup(&self) {
        self.index.cleanup();
    }

    pub fn add_state_listener<F>(&self, listener: F) -> ListenerId
    where
        F: Fn(IndexState, Option<&str>, f32) + Send + Sync + 'static,
    {
        self.index.add_state_listener(listener)
    }

    pub fn remove_state_listener(&self, id: ListenerId) -> bool {
        self.index.remove_state_listener(id)
    }
}
