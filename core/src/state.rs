//! Change notification for the results page
//!
//! Anything that changes what a render pass would produce bumps the
//! [`Revision`]. Hosts subscribe and re-render when it moves, instead of
//! having views force a global refresh.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::watch;

/// Monotonic revision counter shared by everything that can invalidate a page
#[derive(Debug, Clone)]
pub struct Revision {
    tx: Arc<watch::Sender<u64>>,
}

impl Revision {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(0);
        Self { tx: Arc::new(tx) }
    }

    pub fn bump(&self) {
        self.tx.send_modify(|revision| *revision = revision.wrapping_add(1));
    }

    pub fn current(&self) -> u64 {
        *self.tx.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.tx.subscribe()
    }
}

impl Default for Revision {
    fn default() -> Self {
        Self::new()
    }
}

/// Transient UI state of one results page
#[derive(Debug, Default)]
pub struct ReportState {
    adjust_for_downtime: AtomicBool,
    revision: Revision,
}

impl ReportState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn adjust_for_downtime(&self) -> bool {
        self.adjust_for_downtime.load(Ordering::SeqCst)
    }

    /// Returns `true` if the value changed (and a re-render was requested)
    pub fn set_adjust_for_downtime(&self, enabled: bool) -> bool {
        let previous = self.adjust_for_downtime.swap(enabled, Ordering::SeqCst);
        if previous == enabled {
            return false;
        }
        tracing::debug!(enabled, "Downtime adjustment toggled");
        self.revision.bump();
        true
    }

    pub fn revision(&self) -> &Revision {
        &self.revision
    }
}
