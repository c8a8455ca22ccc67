// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Cooperative cancellation
//!
//! A [`CancelToken`] is handed to the coordinator and to every stage
//! action. Raising it asks in-flight actions to stop promptly and release
//! external resources; always-run stages are exempt so cleanup still runs.

use tokio::sync::watch;

/// Clonable cancellation signal
///
/// All clones observe the same flag. Raising is idempotent and sticky.
#[derive(Debug, Clone)]
pub struct CancelToken {
    tx: std::sync::Arc<watch::Sender<bool>>,
}

impl CancelToken {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self {
            tx: std::sync::Arc::new(tx),
        }
    }

    /// Raise the signal
    pub fn cancel(&self) {
        let _ = self.tx.send(true);
    }

    /// Non-blocking probe
    pub fn is_cancelled(&self) -> bool {
        *self.tx.borrow()
    }

    /// Wait until the signal is raised
    pub async fn cancelled(&self) {
        let mut rx = self.tx.subscribe();
        if *rx.borrow() {
            return;
        }
        while rx.changed().await.is_ok() {
            if *rx.borrow() {
                return;
            }
        }
        // Sender kept alive through self; channel closure is unreachable,
        // but if it happens treat it as never-cancelled.
        std::future::pending::<()>().await;
    }
}

impl Default for CancelToken {
    fn default() -> Self {
        Self::new()
    }
}
