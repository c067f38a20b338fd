//! Headless model of the search box: debounced input, index status,
//! grouped results and a keyboard cursor over them. A UI layer renders
//! from [`SearchConsole::status`], [`SearchConsole::response`] and
//! [`SearchConsole::selected`].

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

use menusearch_core::config::SearchSettings;
use menusearch_core::types::{IndexState, ListenerId, SearchResponse, SearchResult};
use menusearch_core::Error;

use crate::service::SearchService;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleStatus {
    Initializing,
    Ready,
    Failed(String),
}

impl ConsoleStatus {
    fn from_state(state: IndexState, error: Option<&str>) -> Self {
        match state {
            IndexState::Ready => ConsoleStatus::Ready,
            IndexState::Error => ConsoleStatus::Failed(error.unwrap_or("search index failed").to_string()),
            IndexState::Uninitialized | IndexState::Loading => ConsoleStatus::Initializing,
        }
    }
}

/// What happened to one call of [`SearchConsole::input`].
#[derive(Debug, Clone, PartialEq)]
pub enum ConsoleUpdate {
    /// New results are displayed.
    Results { count: usize },
    /// The query was blank; the display was cleared.
    Cleared,
    /// A newer input arrived; this one was dropped.
    Superseded,
    /// The index is still loading or has failed.
    NotReady(String),
    Failed(String),
}

#[derive(Default)]
struct View {
    query: String,
    response: SearchResponse,
    // Results in display order: categories alphabetically, then by score.
    ordered: Vec<SearchResult>,
    selected: Option<usize>,
}

pub struct SearchConsole {
    service: SearchService,
    debounce: Duration,
    sequence: AtomicU64,
    view: Mutex<View>,
    status: Arc<Mutex<ConsoleStatus>>,
    listener: ListenerId,
}

impl SearchConsole {
    pub fn new(service: SearchService, debounce: Duration) -> Self {
        let status = Arc::new(Mutex::new(ConsoleStatus::Initializing));
        let sink = Arc::clone(&status);
        let listener = service.add_state_listener(move |state, error, _progress| {
            *sink.lock() = ConsoleStatus::from_state(state, error);
        });
        Self { service, debounce, sequence: AtomicU64::new(0), view: Mutex::new(View::default()), status, listener }
    }

    pub fn from_settings(service: SearchService, settings: &SearchSettings) -> Self {
        Self::new(service, settings.debounce())
    }

    pub fn status(&self) -> ConsoleStatus {
        self.status.lock().clone()
    }

    /// Typing is only useful once the index is ready.
    pub fn input_enabled(&self) -> bool {
        *self.status.lock() == ConsoleStatus::Ready
    }

    /// Handle a new value of the text box. Waits out the debounce interval
    /// and drops the query if another input arrives meanwhile; a response
    /// that comes back after a newer input is discarded too.
    pub async fn input(&self, query: &str) -> ConsoleUpdate {
        let seq = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
        if query.trim().is_empty() {
            *self.view.lock() = View::default();
            return ConsoleUpdate::Cleared;
        }

        tokio::time::sleep(self.debounce).await;
        if !self.is_latest(seq) {
            return ConsoleUpdate::Superseded;
        }

        let response = match self.service.search(query).await {
            Ok(response) => response,
            Err(e @ Error::IndexNotReady { .. }) => return ConsoleUpdate::NotReady(e.to_string()),
            Err(e) => return ConsoleUpdate::Failed(e.to_string()),
        };

        let mut view = self.view.lock();
        if !self.is_latest(seq) {
            return ConsoleUpdate::Superseded;
        }
        let ordered: Vec<SearchResult> = response.grouped.values().flatten().cloned().collect();
        let count = ordered.len();
        *view = View { query: query.to_string(), response, ordered, selected: None };
        ConsoleUpdate::Results { count }
    }

    pub fn query(&self) -> String {
        self.view.lock().query.clone()
    }

    pub fn response(&self) -> SearchResponse {
        self.view.lock().response.clone()
    }

    /// Move the cursor down, wrapping to the first result.
    pub fn select_next(&self) -> Option<SearchResult> {
        let mut view = self.view.lock();
        let len = view.ordered.len();
        if len == 0 {
            return None;
        }
        let next = match view.selected {
            Some(i) => (i + 1) % len,
            None => 0,
        };
        view.selected = Some(next);
        view.ordered.get(next).cloned()
    }

    /// Move the cursor up, wrapping to the last result.
    pub fn select_previous(&self) -> Option<SearchResult> {
        let mut view = self.view.lock();
        let len = view.ordered.len();
        if len == 0 {
            return None;
        }
        let prev = match view.selected {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        view.selected = Some(prev);
        view.ordered.get(prev).cloned()
    }

    pub fn selected(&self) -> Option<SearchResult> {
        let view = self.view.lock();
        view.selected.and_then(|i| view.ordered.get(i).cloned())
    }

    fn is_latest(&self, seq: u64) -> bool {
        self.sequence.load(Ordering::SeqCst) == seq
    }
}

impl Drop for SearchConsole {
    fn drop(&mut self) {
        self.service.remove_state_listener(self.listener);
    }
}
