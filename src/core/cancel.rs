// ─── Cancellation ───
// Cooperative cancellation shared by every blocking point of a pass.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use futures_util::future::select_all;
use tokio::sync::Notify;

use crate::core::error::{LauncherError, LauncherResult};

#[derive(Debug, Default)]
struct Flag {
    cancelled: AtomicBool,
    notify: Notify,
}

/// Cloneable cancellation handle.
///
/// A child signal observes its own flag and every ancestor's, so cancelling
/// a parent stops all children while a child can be cancelled on its own
/// (used for fail-fast library resolution).
#[derive(Debug, Clone)]
pub struct CancellationSignal {
    /// Own flag first, then ancestors.
    lineage: Vec<Arc<Flag>>,
}

impl Default for CancellationSignal {
    fn default() -> Self {
        Self::new()
    }
}

impl CancellationSignal {
    pub fn new() -> Self {
        Self {
            lineage: vec![Arc::new(Flag::default())],
        }
    }

    pub fn child(&self) -> Self {
        let mut lineage = Vec::with_capacity(self.lineage.len() + 1);
        lineage.push(Arc::new(Flag::default()));
        lineage.extend(self.lineage.iter().cloned());
        Self { lineage }
    }

    pub fn cancel(&self) {
        let own = &self.lineage[0];
        own.cancelled.store(true, Ordering::SeqCst);
        own.notify.notify_waiters();
    }

    pub fn is_cancelled(&self) -> bool {
        self.lineage
            .iter()
            .any(|flag| flag.cancelled.load(Ordering::SeqCst))
    }

    /// `Err(Cancelled)` once the signal fired, for use with `?`.
    pub fn check(&self) -> LauncherResult<()> {
        if self.is_cancelled() {
            Err(LauncherError::Cancelled)
        } else {
            Ok(())
        }
    }

    /// Resolves once this signal or any ancestor is cancelled.
    pub async fn cancelled(&self) {
        let mut waiters = Vec::with_capacity(self.lineage.len());
        for flag in &self.lineage {
            let mut notified = Box::pin(flag.notify.notified());
            notified.as_mut().enable();
            waiters.push(notified);
        }

        // Registered before checking, so a concurrent cancel() cannot be missed.
        if self.is_cancelled() {
            return;
        }

        loop {
            let (_, _, rest) = select_all(waiters).await;
            if self.is_cancelled() {
                return;
            }
            waiters = rest;
            if waiters.is_empty() {
                std::future::pending::<()>().await;
            }
        }
    }
}
