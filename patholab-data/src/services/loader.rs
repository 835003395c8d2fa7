//! Full-list loading with in-flight deduplication
//!
//! UI surfaces tend to request the same full listing from several components
//! at once (a form opening triggers three dropdowns). [`ListLoader`] keeps a
//! single pending load per loader instance: concurrent callers share one
//! future and observe the same outcome, and the pending slot is cleared
//! exactly once when the load settles, so a later call always starts fresh
//! and no failure leaves the loader stuck in a loading state.

use crate::models::{PathologistRecord, ResidentRecord};
use crate::services::catalog::CatalogService;
use futures::future::{BoxFuture, FutureExt, Shared};
use patholab_common::Result;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex as StateMutex};
use tokio::sync::Mutex;

type FetchFn<R> = dyn Fn() -> BoxFuture<'static, Result<Vec<R>>> + Send + Sync;
type SharedLoad<R> = Shared<BoxFuture<'static, LoadOutcome<R>>>;

/// Result of a full-list load, shared verbatim by every coalesced caller
#[derive(Debug, Clone, PartialEq)]
pub struct LoadOutcome<R> {
    pub success: bool,
    pub records: Vec<R>,
    pub message: Option<String>,
}

impl<R> LoadOutcome<R> {
    fn loaded(records: Vec<R>) -> Self {
        Self {
            success: true,
            records,
            message: None,
        }
    }

    fn failed(message: String) -> Self {
        Self {
            success: false,
            records: Vec::new(),
            message: Some(message),
        }
    }
}

/// Deduplicating wrapper around a full-list retrieval
pub struct ListLoader<R: Clone> {
    fetch: Arc<FetchFn<R>>,
    inflight: Arc<Mutex<Option<SharedLoad<R>>>>,
    loading: Arc<AtomicBool>,
    error: Arc<StateMutex<String>>,
    records: Arc<StateMutex<Vec<R>>>,
}

impl<R> ListLoader<R>
where
    R: Clone + Send + Sync + 'static,
{
    pub fn new<F, Fut>(fetch: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: std::future::Future<Output = Result<Vec<R>>> + Send + 'static,
    {
        Self {
            fetch: Arc::new(move || fetch().boxed()),
            inflight: Arc::new(Mutex::new(None)),
            loading: Arc::new(AtomicBool::new(false)),
            error: Arc::new(StateMutex::new(String::new())),
            records: Arc::new(StateMutex::new(Vec::new())),
        }
    }

    /// Load the full list, coalescing with any load already in flight
    pub async fn load_all(&self) -> LoadOutcome<R> {
        let load = {
            let mut slot = self.inflight.lock().await;
            if let Some(pending) = slot.as_ref() {
                tracing::debug!("full load already in flight, joining it");
                pending.clone()
            } else {
                self.loading.store(true, Ordering::SeqCst);
                self.error
                    .lock()
                    .expect("loader state poisoned")
                    .clear();

                let fetch = (self.fetch)();
                let inflight = Arc::clone(&self.inflight);
                let loading = Arc::clone(&self.loading);
                let error = Arc::clone(&self.error);
                let records = Arc::clone(&self.records);

                let load = async move {
                    let outcome = match fetch.await {
                        Ok(list) => {
                            tracing::debug!(count = list.len(), "full load finished");
                            *records.lock().expect("loader state poisoned") = list.clone();
                            LoadOutcome::loaded(list)
                        }
                        Err(err) => {
                            let message = err.to_string();
                            tracing::warn!(error = %message, "full load failed");
                            *error.lock().expect("loader state poisoned") = message.clone();
                            LoadOutcome::failed(message)
                        }
                    };
                    // Settlement clears the pending marker exactly once,
                    // success or failure, so no load is ever silently lost
                    *inflight.lock().await = None;
                    loading.store(false, Ordering::SeqCst);
                    outcome
                }
                .boxed()
                .shared();

                *slot = Some(load.clone());
                load
            }
        };

        load.await
    }

    /// Whether a load is currently outstanding
    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst)
    }

    /// Message of the most recent failed load; empty after a fresh attempt starts
    pub fn last_error(&self) -> String {
        self.error.lock().expect("loader state poisoned").clone()
    }

    /// Snapshot of the last successfully loaded list
    pub fn records(&self) -> Vec<R> {
        self.records.lock().expect("loader state poisoned").clone()
    }

    /// First cached record matching the predicate
    pub fn find<P>(&self, predicate: P) -> Option<R>
    where
        P: Fn(&R) -> bool,
    {
        self.records
            .lock()
            .expect("loader state poisoned")
            .iter()
            .find(|&r| predicate(r))
            .cloned()
    }

    /// Reset the observable error and loading flags
    pub fn clear_state(&self) {
        self.error.lock().expect("loader state poisoned").clear();
        self.loading.store(false, Ordering::SeqCst);
    }
}

/// Loader for the active resident listing
pub type ResidentLoader = ListLoader<ResidentRecord>;

impl ResidentLoader {
    pub fn residents(catalog: Arc<CatalogService>) -> Self {
        Self::new(move || {
            let catalog = Arc::clone(&catalog);
            async move { catalog.list_residents(false).await }
        })
    }

    /// Cached resident selected by business code or id
    pub fn find_selected(&self, key: &str) -> Option<ResidentRecord> {
        self.find(|r| r.code == key || r.id == key)
    }
}

/// Loader for the active pathologist listing
pub type PathologistLoader = ListLoader<PathologistRecord>;

impl PathologistLoader {
    pub fn pathologists(catalog: Arc<CatalogService>) -> Self {
        Self::new(move || {
            let catalog = Arc::clone(&catalog);
            async move { catalog.list_pathologists(false).await }
        })
    }
}
