//! Debounced name search.
//!
//! Each [`SearchState::set_query`] call starts a new generation. A search
//! is issued only after the query has been stable for the debounce period,
//! and results belonging to an older generation are dropped, so a slow
//! response can never overwrite a newer one.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use super::api::CatalogApi;
use crate::config::ClientConfig;
use crate::node::Node;

/// Snapshot of the search view.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchView {
    /// Query as typed.
    pub query: String,
    /// Results for the latest completed query.
    pub results: Vec<Node>,
    /// A search is pending or in flight.
    pub searching: bool,
    /// Last failure message.
    pub error: Option<String>,
}

struct Inner<A> {
    api: Arc<A>,
    debounce: Duration,
    limit: Option<u32>,
    generation: AtomicU64,
    view: watch::Sender<SearchView>,
}

/// Debounced search over a [`CatalogApi`].
pub struct SearchState<A> {
    inner: Arc<Inner<A>>,
}

impl<A> Clone for SearchState<A> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<A: CatalogApi + 'static> SearchState<A> {
    /// Create a search state with the given debounce period.
    pub fn new(api: Arc<A>, debounce: Duration) -> Self {
        let (view, _) = watch::channel(SearchView::default());
        Self {
            inner: Arc::new(Inner {
                api,
                debounce,
                limit: None,
                generation: AtomicU64::new(0),
                view,
            }),
        }
    }

    /// Create a search state using the configured debounce period.
    pub fn from_config(api: Arc<A>, config: &ClientConfig) -> Self {
        Self::new(api, Duration::from_millis(config.search_debounce_ms))
    }

    /// Cap the number of results per search.
    ///
    /// Must be called before the state is cloned.
    pub fn with_limit(mut self, limit: u32) -> Self {
        if let Some(inner) = Arc::get_mut(&mut self.inner) {
            inner.limit = Some(limit);
        }
        self
    }

    /// Receive every published view.
    pub fn subscribe(&self) -> watch::Receiver<SearchView> {
        self.inner.view.subscribe()
    }

    /// Current view.
    pub fn snapshot(&self) -> SearchView {
        self.inner.view.borrow().clone()
    }

    /// Replace the query.
    ///
    /// A blank query clears the results at once and returns `None`.
    /// Otherwise a debounced search task is spawned and its handle
    /// returned.
    pub fn set_query(&self, query: impl Into<String>) -> Option<JoinHandle<()>> {
        let query = query.into();
        let generation = self.inner.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let blank = query.trim().is_empty();

        self.inner.view.send_modify(|v| {
            v.query = query.clone();
            v.error = None;
            v.searching = !blank;
            if blank {
                v.results.clear();
            }
        });

        if blank {
            return None;
        }

        let inner = Arc::clone(&self.inner);
        Some(tokio::spawn(async move {
            tokio::time::sleep(inner.debounce).await;
            if !inner.is_current(generation) {
                return;
            }

            let result = inner.api.search(query.trim(), inner.limit).await;
            if !inner.is_current(generation) {
                debug!(query = %query, "Discarded stale search result");
                return;
            }

            inner.view.send_modify(|v| {
                v.searching = false;
                match result {
                    Ok(nodes) => v.results = nodes,
                    Err(e) => {
                        warn!(error = %e, query = %query, "Search failed");
                        v.results.clear();
                        v.error = Some(e.to_string());
                    }
                }
            });
        }))
    }

    /// Clear the query and results, cancelling any pending search.
    pub fn clear(&self) {
        self.inner.generation.fetch_add(1, Ordering::SeqCst);
        self.inner.view.send_replace(SearchView::default());
    }
}

impl<A> Inner<A> {
    fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }
}
