//! Graceful shutdown handle.
//!
//! One `Shutdown` is created in `main` (or per test gateway). The HTTP
//! server holds a receiver and starts draining when the signal fires.

use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::broadcast;

pub struct Shutdown {
    tx: broadcast::Sender<()>,
    triggered: AtomicBool,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx, triggered: AtomicBool::new(false) }
    }

    /// Receiver that yields once the shutdown fires.
    ///
    /// Subscribe before triggering; a receiver created afterwards never
    /// sees the signal.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Fire the signal. Only the first call broadcasts.
    pub fn trigger(&self) {
        if self.triggered.swap(true, Ordering::SeqCst) {
            return;
        }
        let listeners = self.tx.send(()).unwrap_or(0);
        tracing::debug!(listeners, "Shutdown triggered");
    }

    pub fn is_triggered(&self) -> bool {
        self.triggered.load(Ordering::SeqCst)
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}
