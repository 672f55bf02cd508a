// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Single-use rendezvous between a blocking caller and an async completion
//!
//! A rendezvous is a oneshot channel split into two halves:
//! - **RendezvousSignal** - handed to the callback; `signal` consumes it
//! - **Rendezvous** - kept by the caller; `wait` consumes it
//!
//! Because both halves are consumed, a rendezvous can be signaled at most once
//! and never waited on twice. A signal half dropped without signaling resolves
//! the wait as [`WaitOutcome::Abandoned`] instead of hanging.

use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::{oneshot, watch};

/// Result of waiting on a rendezvous
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WaitOutcome<T> {
    /// The callback signaled with this payload
    Signaled(T),
    /// No signal arrived within the timeout
    TimedOut,
    /// The signal half was dropped without signaling
    Abandoned,
}

impl<T> WaitOutcome<T> {
    pub fn signaled(self) -> Option<T> {
        match self {
            WaitOutcome::Signaled(value) => Some(value),
            WaitOutcome::TimedOut | WaitOutcome::Abandoned => None,
        }
    }
}

/// Signal half of a rendezvous, owned by the completing callback
#[derive(Debug)]
pub struct RendezvousSignal<T> {
    tx: oneshot::Sender<T>,
    _pending: Option<PendingGuard>,
}

impl<T> RendezvousSignal<T> {
    /// Deliver the payload and wake the waiter
    ///
    /// Returns false if the waiter already gave up (timed out or dropped).
    pub fn signal(self, value: T) -> bool {
        let RendezvousSignal { tx, _pending } = self;
        tx.send(value).is_ok()
    }

    /// Whether the waiting side has gone away
    pub fn is_abandoned(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Wait half of a rendezvous, owned by the blocking caller
#[derive(Debug)]
pub struct Rendezvous<T> {
    rx: oneshot::Receiver<T>,
}

impl<T> Rendezvous<T> {
    /// Create an untracked rendezvous
    pub fn new() -> (RendezvousSignal<T>, Rendezvous<T>) {
        Self::with_guard(None)
    }

    fn with_guard(guard: Option<PendingGuard>) -> (RendezvousSignal<T>, Rendezvous<T>) {
        let (tx, rx) = oneshot::channel();
        (
            RendezvousSignal {
                tx,
                _pending: guard,
            },
            Rendezvous { rx },
        )
    }

    /// Block the calling thread until the signal half resolves
    ///
    /// The wait is driven on `handle`, which must belong to a runtime that is
    /// being driven by another thread (the progress worker). Must not be
    /// called from inside an async context.
    pub fn wait(self, handle: &Handle, timeout: Option<Duration>) -> WaitOutcome<T> {
        let rx = self.rx;
        match timeout {
            None => match handle.block_on(rx) {
                Ok(value) => WaitOutcome::Signaled(value),
                Err(_) => WaitOutcome::Abandoned,
            },
            Some(limit) => {
                match handle.block_on(async move { tokio::time::timeout(limit, rx).await }) {
                    Ok(Ok(value)) => WaitOutcome::Signaled(value),
                    Ok(Err(_)) => WaitOutcome::Abandoned,
                    Err(_) => WaitOutcome::TimedOut,
                }
            }
        }
    }
}

/// Tracks signal halves that have not resolved yet
///
/// Cloning shares the same counter.
#[derive(Debug, Clone)]
pub struct PendingWaits {
    live: Arc<watch::Sender<usize>>,
}

impl Default for PendingWaits {
    fn default() -> Self {
        let (live, _) = watch::channel(0);
        Self {
            live: Arc::new(live),
        }
    }
}

impl PendingWaits {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a rendezvous counted as pending until its signal half resolves
    pub fn register<T>(&self) -> (RendezvousSignal<T>, Rendezvous<T>) {
        self.live.send_modify(|n| *n += 1);
        Rendezvous::with_guard(Some(PendingGuard {
            live: Arc::clone(&self.live),
        }))
    }

    /// Number of signal halves still alive
    pub fn outstanding(&self) -> usize {
        *self.live.borrow()
    }

    /// Wait up to `grace` for every pending signal half to resolve
    ///
    /// Returns how many were still outstanding afterwards.
    pub fn drain(&self, handle: &Handle, grace: Duration) -> usize {
        if self.outstanding() == 0 {
            return 0;
        }

        let mut rx = self.live.subscribe();
        handle.block_on(async move {
            let _ = tokio::time::timeout(grace, rx.wait_for(|n| *n == 0)).await;
        });

        let remaining = self.outstanding();
        if remaining > 0 {
            tracing::warn!(remaining, "pending rendezvous not resolved before drain deadline");
        }
        remaining
    }
}

#[derive(Debug)]
struct PendingGuard {
    live: Arc<watch::Sender<usize>>,
}

impl Drop for PendingGuard {
    fn drop(&mut self) {
        self.live.send_modify(|n| *n = n.saturating_sub(1));
    }
}

#[cfg(test)]
#[path = "rendezvous_tests.rs"]
mod tests;
