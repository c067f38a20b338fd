//! The menu search index: owns the vector store, drives the
//! `Uninitialized → Loading → Ready | Error` lifecycle and broadcasts every
//! transition to registered listeners.
//!
//! Builds are "latest wins". Each build takes a generation number when it
//! starts; a build that finishes after a newer build (or a cleanup) has
//! started throws its work away and reports [`Error::Superseded`] without
//! touching the state the newer call owns.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::{Mutex, ReentrantMutex, RwLock};
use serde_json::Value;
use tracing::{debug, info, warn};

use menusearch_core::config::SearchSettings;
use menusearch_core::menu::flatten_menu;
use menusearch_core::traits::{StateListener, TextVectorizer};
use menusearch_core::types::{IndexState, ListenerId, MenuItem, SearchResponse};
use menusearch_core::{Error, Result};
use menusearch_embed::FeatureBuilder;
use menusearch_vector::VectorStore;

use crate::grouper::ResultGrouper;
use crate::planner::QueryPlanner;

#[derive(Default)]
struct Inner {
    state: IndexState,
    error: Option<String>,
    store: Option<Arc<VectorStore>>,
}

pub struct SearchIndex {
    features: FeatureBuilder,
    planner: QueryPlanner,
    grouper: ResultGrouper,
    inner: RwLock<Inner>,
    generation: AtomicU64,
    // Serialises transitions and their notifications. Reentrant so a
    // listener may call back into the index from the notifying thread.
    transition: ReentrantMutex<()>,
    listeners: Mutex<BTreeMap<ListenerId, StateListener>>,
    next_listener: AtomicU64,
}

impl SearchIndex {
    pub fn new(settings: &SearchSettings) -> Self {
        Self::with_features(FeatureBuilder::hashed(settings.dimension), settings)
    }

    pub fn with_vectorizer(vectorizer: Arc<dyn TextVectorizer>, settings: &SearchSettings) -> Self {
        Self::with_features(FeatureBuilder::new(vectorizer), settings)
    }

    fn with_features(features: FeatureBuilder, settings: &SearchSettings) -> Self {
        Self {
            planner: QueryPlanner::new(features.clone(), settings),
            features,
            grouper: ResultGrouper::new(),
            inner: RwLock::new(Inner::default()),
            generation: AtomicU64::new(0),
            transition: ReentrantMutex::new(()),
            listeners: Mutex::new(BTreeMap::new()),
            next_listener: AtomicU64::new(1),
        }
    }

    pub fn state(&self) -> IndexState {
        self.inner.read().state
    }

    /// Message of the last failed build, while the index is in `Error`.
    pub fn last_error(&self) -> Option<String> {
        self.inner.read().error.clone()
    }

    /// Number of indexed items; zero unless the index is `Ready`.
    pub fn len(&self) -> usize {
        let inner = self.inner.read();
        match (&inner.state, &inner.store) {
            (IndexState::Ready, Some(store)) => store.len(),
            _ => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Index `items`, replacing any previous index. Items without an id,
    /// name or category are skipped; the build fails only if none remain.
    /// Returns the number of indexed items.
    pub fn build(&self, items: &[MenuItem]) -> Result<usize> {
        let generation = self.begin_build()?;
        info!(generation, items = items.len(), "building search index");
        if items.is_empty() {
            return self.fail_build(generation, Error::InvalidMenuData("no valid items (menu is empty)".into()));
        }

        let mut store = VectorStore::with_capacity(self.features.dim(), items.len());
        let mut skipped = 0usize;
        for item in items {
            if !item.is_indexable() {
                skipped += 1;
                debug!(id = %item.id, name = %item.name, "skipping menu item without id, name or category");
                continue;
            }
            let vector = self.features.item_vector(item);
            if let Err(e) = store.insert(item.clone(), vector) {
                return self.fail_build(generation, e);
            }
        }
        if store.is_empty() {
            return self.fail_build(generation, Error::InvalidMenuData("no valid items".into()));
        }

        let _transition = self.transition.lock();
        let indexed = store.len();
        {
            let mut inner = self.inner.write();
            if !self.is_current(generation) {
                drop(inner);
                warn!(generation, "discarding superseded index build");
                return Err(Error::Superseded { generation });
            }
            inner.store = Some(Arc::new(store));
            inner.state = IndexState::Ready;
            inner.error = None;
        }
        info!(generation, indexed, skipped, "search index ready");
        self.notify(IndexState::Ready, None);
        Ok(indexed)
    }

    /// Flatten a raw menu document and build from it. Shapes that are not a
    /// list of items (or an object of category lists) fail the build.
    pub fn build_from_value(&self, menu: &Value) -> Result<usize> {
        match flatten_menu(menu) {
            Ok(items) => self.build(&items),
            Err(e) => {
                let generation = self.begin_build()?;
                self.fail_build(generation, e)
            }
        }
    }

    /// Put the index into `Error` on behalf of a collaborator that could not
    /// produce menu data at all, so listeners see the failure. Fails with
    /// [`Error::Superseded`] if a newer build or cleanup got there first.
    pub fn mark_failed(&self, message: impl Into<String>) -> Result<()> {
        let generation = self.begin_build()?;
        match self.fail_build(generation, Error::InvalidMenuData(message.into())) {
            Err(e @ Error::Superseded { .. }) => Err(e),
            _ => Ok(()),
        }
    }

    /// Rank the indexed items against `query`. Fails with
    /// [`Error::IndexNotReady`] unless the index is `Ready`; a blank query
    /// yields an empty response.
    pub fn search(&self, query: &str) -> Result<SearchResponse> {
        let store = {
            let inner = self.inner.read();
            match (&inner.state, &inner.store) {
                (IndexState::Ready, Some(store)) => Arc::clone(store),
                (state, _) => return Err(Error::IndexNotReady { state: *state }),
            }
        };
        if query.trim().is_empty() {
            return Ok(SearchResponse::default());
        }
        let results = self.planner.rank(query, &store)?;
        let grouped = self.grouper.group(&results);
        debug!(query, hits = results.len(), categories = grouped.len(), "search");
        Ok(SearchResponse { results, grouped })
    }

    /// Drop the index and return to `Uninitialized`. Also invalidates any
    /// build still in flight. Calling it again is a no-op.
    pub fn cleanup(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        let _transition = self.transition.lock();
        {
            let mut inner = self.inner.write();
            if inner.state == IndexState::Uninitialized && inner.store.is_none() {
                return;
            }
            *inner = Inner::default();
        }
        info!("search index cleaned up");
        self.notify(IndexState::Uninitialized, None);
    }

    /// Register a listener. It is called right away with the current state
    /// and then on every transition until removed.
    pub fn add_state_listener<F>(&self, listener: F) -> ListenerId
    where
        F: Fn(IndexState, Option<&str>, f32) + Send + Sync + 'static,
    {
        let listener: StateListener = Arc::new(listener);
        let id = ListenerId(self.next_listener.fetch_add(1, Ordering::SeqCst));
        let _transition = self.transition.lock();
        self.listeners.lock().insert(id, Arc::clone(&listener));
        let (state, error) = {
            let inner = self.inner.read();
            (inner.state, inner.error.clone())
        };
        listener(state, error.as_deref(), progress_of(state));
        id
    }

    /// Returns `false` if `id` was not registered.
    pub fn remove_state_listener(&self, id: ListenerId) -> bool {
        let removed = self.listeners.lock().remove(&id).is_some();
        if !removed {
            warn!(listener = id.0, "removing unknown state listener");
        }
        removed
    }

    fn begin_build(&self) -> Result<u64> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let _transition = self.transition.lock();
        if !self.is_current(generation) {
            return Err(Error::Superseded { generation });
        }
        {
            let mut inner = self.inner.write();
            inner.state = IndexState::Loading;
            inner.error = None;
            inner.store = None;
        }
        self.notify(IndexState::Loading, None);
        Ok(generation)
    }

    fn fail_build(&self, generation: u64, error: Error) -> Result<usize> {
        let _transition = self.transition.lock();
        if !self.is_current(generation) {
            warn!(generation, %error, "superseded index build failed");
            return Err(Error::Superseded { generation });
        }
        let message = error.to_string();
        {
            let mut inner = self.inner.write();
            inner.state = IndexState::Error;
            inner.error = Some(message.clone());
            inner.store = None;
        }
        warn!(generation, error = %message, "search index build failed");
        self.notify(IndexState::Error, Some(&message));
        Err(error)
    }

    fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }

    fn notify(&self, state: IndexState, error: Option<&str>) {
        let listeners: Vec<StateListener> = self.listeners.lock().values().cloned().collect();
        for listener in listeners {
            listener(state, error, progress_of(state));
        }
    }
}

impl Default for SearchIndex {
    fn default() -> Self {
        Self::new(&SearchSettings::default())
    }
}

fn progress_of(state: IndexState) -> f32 {
    if state == IndexState::Ready { 1.0 } else { 0.0 }
}
