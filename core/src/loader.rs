//! Lazily loaded views
//!
//! Heavy views are not resident until something asks for them. The first
//! `load` of a key starts one background fetch (retried under the loader's
//! [`RetryPolicy`]) and hands back a `Pending` slot immediately, so a render
//! pass never waits on it. When the fetch settles the slot becomes `Ready`
//! or `Failed` for good and the shared [`Revision`] is bumped so the host
//! renders again.
//!
//! Fetches run on the tokio runtime captured when the loader is built. A
//! loader built outside any runtime cannot fetch; its slots go straight to
//! `Failed` so the page still renders.
//!
//! ```text
//!  load(key) ──▶ Pending ──fetch ok──────────────────▶ Ready(view)
//!                  │
//!                  └──fetch err──▶ retry (delay) ──…──▶ Failed(LoadError)
//!                                  up to max_attempts
//! ```

use std::fmt;
use std::future::Future;
use std::hash::Hash;
use std::pin::Pin;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex, PoisonError, Weak};

use hashbrown::HashMap;
use hashbrown::hash_map::Entry;
use tokio::runtime::Handle;
use tokio::sync::watch;

use crate::retry::{RetryPolicy, retry};
use crate::state::Revision;

/// Failure message for slots of a loader that has no runtime to fetch on
pub const NO_RUNTIME_MESSAGE: &str = "no async runtime is available to load this view";

pub type FetchFuture<V> = Pin<Box<dyn Future<Output = Result<V, String>> + Send + 'static>>;

/// Source of view implementations that are not resident yet
pub trait ViewFetcher<K, V>: Send + Sync + 'static {
    fn fetch(&self, key: &K) -> FetchFuture<V>;
}

impl<K, V, F> ViewFetcher<K, V> for F
where
    F: Fn(&K) -> FetchFuture<V> + Send + Sync + 'static,
{
    fn fetch(&self, key: &K) -> FetchFuture<V> {
        self(key)
    }
}

/// A view that could not be fetched within the retry budget
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("failed to load view '{key}' after {attempts} attempts: {message}")]
pub struct LoadError {
    pub key: String,
    pub attempts: u32,
    pub message: String,
}

#[derive(Debug, Clone)]
pub enum SlotStatus<V> {
    Pending,
    Ready(V),
    Failed(LoadError),
}

impl<V> SlotStatus<V> {
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }
}

/// Point-in-time view of a lazily loaded view
#[derive(Debug, Clone)]
pub struct LazyViewSlot<V> {
    pub status: SlotStatus<V>,
    /// Fetch attempts started so far
    pub attempts: u32,
}

struct SlotCell<V> {
    status: watch::Sender<SlotStatus<V>>,
    attempts: AtomicU32,
}

impl<V: Clone> SlotCell<V> {
    fn new() -> Self {
        let (status, _rx) = watch::channel(SlotStatus::Pending);
        Self {
            status,
            attempts: AtomicU32::new(0),
        }
    }

    fn snapshot(&self) -> LazyViewSlot<V> {
        LazyViewSlot {
            status: self.status.borrow().clone(),
            attempts: self.attempts.load(Ordering::SeqCst),
        }
    }
}

struct LoaderInner<K, V> {
    slots: Mutex<HashMap<K, Arc<SlotCell<V>>>>,
    revision: Revision,
}

/// Per-session cache of lazily loaded views, keyed by `K`.
///
/// Slots are append-only: once `Ready` a view is never refetched or
/// invalidated for the lifetime of the loader.
pub struct LazyViewLoader<K, V> {
    inner: Arc<LoaderInner<K, V>>,
    fetcher: Arc<dyn ViewFetcher<K, V>>,
    policy: RetryPolicy,
    runtime: Option<Handle>,
}

impl<K, V> LazyViewLoader<K, V>
where
    K: Eq + Hash + Clone + fmt::Display + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    /// Fetches will run on the current tokio runtime, if there is one
    pub fn new(fetcher: impl ViewFetcher<K, V>, policy: RetryPolicy, revision: Revision) -> Self {
        Self {
            inner: Arc::new(LoaderInner {
                slots: Mutex::new(HashMap::new()),
                revision,
            }),
            fetcher: Arc::new(fetcher),
            policy,
            runtime: Handle::try_current().ok(),
        }
    }

    /// Run fetches on `runtime` instead
    pub fn with_runtime(mut self, runtime: Handle) -> Self {
        self.runtime = Some(runtime);
        self
    }

    /// Current slot for `key`, starting the fetch on first reference.
    ///
    /// Never blocks, and safe to call from threads outside the runtime.
    pub fn load(&self, key: &K) -> LazyViewSlot<V> {
        let (cell, first_reference) = {
            let mut slots = self.inner.slots.lock().unwrap_or_else(PoisonError::into_inner);
            match slots.entry(key.clone()) {
                Entry::Occupied(slot) => (Arc::clone(slot.get()), false),
                Entry::Vacant(slot) => {
                    let cell = Arc::new(SlotCell::new());
                    slot.insert(Arc::clone(&cell));
                    (cell, true)
                }
            }
        };

        if first_reference {
            match &self.runtime {
                Some(runtime) => {
                    tracing::debug!(view = %key, "Loading view");
                    self.spawn_fetch(runtime, key.clone(), Arc::clone(&cell));
                }
                None => {
                    tracing::warn!(view = %key, "No tokio runtime to load view on");
                    // Settled before this pass returns, so no revision bump
                    cell.status.send_replace(SlotStatus::Failed(LoadError {
                        key: key.to_string(),
                        attempts: 0,
                        message: NO_RUNTIME_MESSAGE.to_string(),
                    }));
                }
            }
        }
        cell.snapshot()
    }

    /// Current slot for `key` without starting a fetch
    pub fn peek(&self, key: &K) -> Option<LazyViewSlot<V>> {
        self.cell(key).map(|cell| cell.snapshot())
    }

    /// Wait until the slot for `key` is no longer pending.
    ///
    /// Returns `None` if `key` was never loaded.
    pub async fn wait_settled(&self, key: &K) -> Option<LazyViewSlot<V>> {
        let cell = self.cell(key)?;
        let mut rx = cell.status.subscribe();
        // The sender lives in `cell`, so the channel cannot close while we wait
        let _ = rx.wait_for(|status| !status.is_pending()).await;
        Some(cell.snapshot())
    }

    /// Wait for every slot loaded so far to settle
    pub async fn wait_idle(&self) {
        let cells: Vec<_> = {
            let slots = self.inner.slots.lock().unwrap_or_else(PoisonError::into_inner);
            slots.values().cloned().collect()
        };
        for cell in cells {
            let mut rx = cell.status.subscribe();
            let _ = rx.wait_for(|status| !status.is_pending()).await;
        }
    }

    pub fn revision(&self) -> &Revision {
        &self.inner.revision
    }

    fn cell(&self, key: &K) -> Option<Arc<SlotCell<V>>> {
        let slots = self.inner.slots.lock().unwrap_or_else(PoisonError::into_inner);
        slots.get(key).cloned()
    }

    fn spawn_fetch(&self, runtime: &Handle, key: K, cell: Arc<SlotCell<V>>) {
        let loader: Weak<LoaderInner<K, V>> = Arc::downgrade(&self.inner);
        let fetcher = Arc::clone(&self.fetcher);
        let policy = self.policy;

        runtime.spawn(async move {
            let outcome = retry(policy, |attempt| {
                cell.attempts.store(attempt, Ordering::SeqCst);
                fetcher.fetch(&key)
            })
            .await;

            // The page that asked for this view may be gone by now
            let Some(loader) = loader.upgrade() else {
                tracing::debug!(
                    view = %key,
                    "Loader dropped before view settled, discarding result"
                );
                return;
            };

            let status = match outcome {
                Ok(view) => {
                    tracing::debug!(
                        view = %key,
                        attempts = cell.attempts.load(Ordering::SeqCst),
                        "View loaded"
                    );
                    SlotStatus::Ready(view)
                }
                Err(e) => {
                    tracing::warn!(
                        view = %key,
                        attempts = e.attempts,
                        error = %e.last_error,
                        "Failed to load view"
                    );
                    SlotStatus::Failed(LoadError {
                        key: key.to_string(),
                        attempts: e.attempts,
                        message: e.last_error,
                    })
                }
            };
            cell.status.send_replace(status);
            loader.revision.bump();
        });
    }
}
