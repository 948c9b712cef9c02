use std::sync::Arc;

use tokio::sync::watch;

/// Shared count of in-flight requests backing a global loading indicator.
///
/// Clones share one counter. Work is reported by holding a [`LoadingGuard`],
/// which releases its slot on drop whatever path the request takes.
#[derive(Debug, Clone)]
pub struct LoadingTracker {
    count: Arc<watch::Sender<usize>>,
}

impl Default for LoadingTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl LoadingTracker {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(0);
        Self {
            count: Arc::new(tx),
        }
    }

    pub fn begin(&self) -> LoadingGuard {
        self.count.send_modify(|n| *n += 1);
        LoadingGuard {
            count: Arc::clone(&self.count),
        }
    }

    pub fn in_flight(&self) -> usize {
        *self.count.borrow()
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight() > 0
    }

    /// Receiver notified on every change of the in-flight count
    pub fn subscribe(&self) -> watch::Receiver<usize> {
        self.count.subscribe()
    }
}

#[must_use = "the request is only tracked while the guard is alive"]
#[derive(Debug)]
pub struct LoadingGuard {
    count: Arc<watch::Sender<usize>>,
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        self.count.send_modify(|n| *n = n.saturating_sub(1));
    }
}
