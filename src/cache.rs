//! Query cache: one entry per (resource, criteria) read.
//!
//! Avoids redundant network calls for identical reads and keeps cached
//! reads consistent after writes. An explicit owned object — whoever
//! composes the application passes it around, nothing is process-global.
//!
//! Key properties:
//! - Identical in-flight reads share one network call, result fanned out
//!   to every waiter.
//! - Invalidation is resource-wide: a write marks every entry of that
//!   resource stale, whatever its filter criteria.
//! - Stale data stays visible while a refetch runs; an error supersedes it.
//! - The network call is spawned on the runtime, so a caller torn down
//!   mid-flight merely discards the result — the cache still fills.

use std::any::Any;
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{Local, NaiveDateTime};
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::RecvError;

use crate::api::ApiError;

// ═══════════════════════════════════════════════════════════
// Keys
// ═══════════════════════════════════════════════════════════

/// The read kinds the cache distinguishes. Entity writes invalidate the
/// matching entity resource; the dashboards are their own resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Patients,
    Appointments,
    PatientDashboard,
    AppointmentDashboard,
}

impl Resource {
    pub fn as_str(self) -> &'static str {
        match self {
            Resource::Patients => "patients",
            Resource::Appointments => "appointments",
            Resource::PatientDashboard => "patient-dashboard",
            Resource::AppointmentDashboard => "appointments-dashboard",
        }
    }
}

/// Identifies one cached read: resource plus serialized filter criteria.
/// Structurally equal criteria give equal keys — equality is by value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    resource: Resource,
    criteria: String,
}

impl QueryKey {
    pub fn new(resource: Resource, criteria: impl Into<String>) -> Self {
        Self {
            resource,
            criteria: criteria.into(),
        }
    }

    pub fn resource(&self) -> Resource {
        self.resource
    }

    pub fn criteria(&self) -> &str {
        &self.criteria
    }
}

// ═══════════════════════════════════════════════════════════
// Entries
// ═══════════════════════════════════════════════════════════

type CachedValue = Arc<dyn Any + Send + Sync>;
type FetchOutcome = Result<CachedValue, Arc<ApiError>>;

#[derive(Default)]
struct Entry {
    data: Option<CachedValue>,
    error: Option<Arc<ApiError>>,
    fetched_at: Option<NaiveDateTime>,
    stale: bool,
    inflight: Option<broadcast::Sender<FetchOutcome>>,
}

/// Observable state of a cached read, as surfaced to presentation.
#[derive(Debug)]
pub enum QueryStatus<T> {
    /// No read has been issued for this key.
    Idle,
    /// First load in flight, nothing to show yet.
    Loading,
    /// Data present — possibly stale while a refetch runs, so the screen
    /// never blanks during a background refresh.
    Ready(Arc<T>),
    /// Last fetch failed and no data remains.
    Failed(Arc<ApiError>),
}

impl<T> QueryStatus<T> {
    pub fn data(&self) -> Option<&Arc<T>> {
        match self {
            QueryStatus::Ready(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&Arc<ApiError>> {
        match self {
            QueryStatus::Failed(err) => Some(err),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, QueryStatus::Loading)
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, QueryStatus::Ready(_))
    }
}

enum Role<T> {
    Hit(Arc<T>),
    Follow(broadcast::Receiver<FetchOutcome>),
    Lead(broadcast::Receiver<FetchOutcome>),
}

type EntryMap = HashMap<QueryKey, Entry>;

fn lock(entries: &Mutex<EntryMap>) -> MutexGuard<'_, EntryMap> {
    entries.lock().unwrap_or_else(PoisonError::into_inner)
}

// ═══════════════════════════════════════════════════════════
// QueryCache
// ═══════════════════════════════════════════════════════════

/// Cache of read results keyed by [`QueryKey`].
pub struct QueryCache {
    entries: Arc<Mutex<EntryMap>>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Resolve a read through the cache.
    ///
    /// Fresh data returns without a network call. A fetch already in
    /// flight for this key is joined, not repeated. Otherwise `fetcher`
    /// runs as a spawned task and every waiter receives its outcome.
    pub async fn fetch<T, F, Fut>(
        &self,
        key: &QueryKey,
        fetcher: F,
    ) -> Result<Arc<T>, Arc<ApiError>>
    where
        T: Send + Sync + 'static,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, ApiError>> + Send + 'static,
    {
        loop {
            let role: Role<T> = {
                let mut entries = lock(&self.entries);
                let entry = entries.entry(key.clone()).or_default();
                let fresh = if entry.stale || entry.error.is_some() {
                    None
                } else {
                    entry.data.clone().and_then(|data| data.downcast::<T>().ok())
                };
                if let Some(data) = fresh {
                    Role::Hit(data)
                } else if let Some(tx) = &entry.inflight {
                    Role::Follow(tx.subscribe())
                } else {
                    let (tx, rx) = broadcast::channel(1);
                    entry.inflight = Some(tx);
                    Role::Lead(rx)
                }
            };

            match role {
                Role::Hit(data) => return Ok(data),
                Role::Follow(mut rx) => match rx.recv().await {
                    Ok(Ok(value)) => match value.downcast::<T>() {
                        Ok(value) => return Ok(value),
                        Err(_) => {
                            tracing::error!(?key, "cache entry type mismatch, refetching");
                            continue;
                        }
                    },
                    Ok(Err(err)) => return Err(err),
                    // Entry was discarded mid-flight (cache cleared): retry.
                    Err(RecvError::Closed) | Err(RecvError::Lagged(_)) => continue,
                },
                Role::Lead(mut rx) => {
                    let entries = Arc::clone(&self.entries);
                    let task_key = key.clone();
                    let fut = fetcher();
                    tokio::spawn(async move {
                        let outcome: FetchOutcome = match fut.await {
                            Ok(value) => Ok(Arc::new(value) as CachedValue),
                            Err(err) => Err(Arc::new(err)),
                        };
                        let tx = {
                            let mut entries = lock(&entries);
                            let entry = entries.entry(task_key).or_default();
                            match &outcome {
                                Ok(data) => {
                                    entry.data = Some(Arc::clone(data));
                                    entry.error = None;
                                    entry.stale = false;
                                    entry.fetched_at = Some(Local::now().naive_local());
                                }
                                Err(err) => {
                                    entry.data = None;
                                    entry.error = Some(Arc::clone(err));
                                    entry.stale = false;
                                }
                            }
                            entry.inflight.take()
                        };
                        if let Some(tx) = tx {
                            let _ = tx.send(outcome);
                        }
                    });
                    return match rx.recv().await {
                        Ok(Ok(value)) => value.downcast::<T>().map_err(|_| {
                            Arc::new(ApiError::Decode("cache entry type mismatch".into()))
                        }),
                        Ok(Err(err)) => Err(err),
                        Err(_) => Err(Arc::new(ApiError::Decode(
                            "fetch outcome discarded before delivery".into(),
                        ))),
                    };
                }
            }
        }
    }

    /// Current observable state for a key, without triggering a fetch.
    pub fn status<T: Send + Sync + 'static>(&self, key: &QueryKey) -> QueryStatus<T> {
        let entries = lock(&self.entries);
        let Some(entry) = entries.get(key) else {
            return QueryStatus::Idle;
        };
        if let Some(data) = &entry.data {
            if let Ok(data) = Arc::clone(data).downcast::<T>() {
                return QueryStatus::Ready(data);
            }
        }
        if let Some(err) = &entry.error {
            return QueryStatus::Failed(Arc::clone(err));
        }
        if entry.inflight.is_some() {
            return QueryStatus::Loading;
        }
        QueryStatus::Idle
    }

    /// Mark every cached read of `resource` stale. Data stays visible
    /// until the next fetch replaces it.
    pub fn invalidate(&self, resource: Resource) {
        let mut entries = lock(&self.entries);
        let mut marked = 0usize;
        for (key, entry) in entries.iter_mut() {
            if key.resource == resource {
                entry.stale = true;
                marked += 1;
            }
        }
        tracing::debug!(resource = resource.as_str(), marked, "invalidated cached reads");
    }

    pub fn is_stale(&self, key: &QueryKey) -> bool {
        lock(&self.entries).get(key).is_some_and(|entry| entry.stale)
    }

    /// When the entry's data was last fetched, if ever.
    pub fn fetched_at(&self, key: &QueryKey) -> Option<NaiveDateTime> {
        lock(&self.entries).get(key).and_then(|entry| entry.fetched_at)
    }

    /// Drop every entry. Meant for session teardown and test reset.
    pub fn clear(&self) {
        lock(&self.entries).clear();
    }

    pub fn len(&self) -> usize {
        lock(&self.entries).len()
    }

    pub fn is_empty(&self) -> bool {
        lock(&self.entries).is_empty()
    }
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new()
    }
}

// ═══════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════
