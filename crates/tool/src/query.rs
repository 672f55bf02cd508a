// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Server URI query
//!
//! The query is issued once during bootstrap. Its callback runs on the
//! progress worker and hands the result back to the blocked caller through a
//! rendezvous. Every outcome other than [`QueryOutcome::Uri`] is non-fatal.

use std::time::Duration;

use tether_adapters::{InfoEntry, Provider, QueryReply, SERVER_URI_KEY};
use tether_core::{ErrorCode, PendingWaits, WaitOutcome};
use tokio::runtime::Handle;

/// How the server URI query ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryOutcome {
    /// The server reported its URI
    Uri(String),
    /// The provider reported a failure status
    Failed(ErrorCode),
    /// The reply was empty or answered a different key
    Mismatch(ErrorCode),
    /// No reply arrived before the deadline
    TimedOut,
    /// The provider dropped the callback without invoking it
    Abandoned,
}

impl QueryOutcome {
    pub fn uri(&self) -> Option<&str> {
        match self {
            QueryOutcome::Uri(uri) => Some(uri),
            _ => None,
        }
    }
}

/// Ask `provider` for the server URI and block until it answers
///
/// The worker behind `handle` must already be installed in the provider.
pub fn query_server_uri(
    provider: &dyn Provider,
    handle: &Handle,
    pending: &PendingWaits,
    timeout: Option<Duration>,
) -> QueryOutcome {
    let (signal, rendezvous) = pending.register::<QueryOutcome>();

    provider.query(
        vec![SERVER_URI_KEY.to_string()],
        Box::new(move |reply| {
            let QueryReply {
                status,
                entries,
                release,
            } = reply;
            let outcome = interpret(status, &entries);
            if let Some(release) = release {
                release();
            }
            if !signal.signal(outcome) {
                tracing::debug!("server URI arrived after the caller stopped waiting");
            }
        }),
    );

    match rendezvous.wait(handle, timeout) {
        WaitOutcome::Signaled(outcome) => outcome,
        WaitOutcome::TimedOut => {
            tracing::warn!(
                timeout = ?timeout,
                "server URI query timed out; continuing without it"
            );
            QueryOutcome::TimedOut
        }
        WaitOutcome::Abandoned => {
            tracing::warn!("server URI query was dropped by the provider; continuing without it");
            QueryOutcome::Abandoned
        }
    }
}

fn interpret(status: Result<(), ErrorCode>, entries: &[InfoEntry]) -> QueryOutcome {
    if let Err(code) = status {
        tracing::error!(error = %code, "server URI query failed");
        return QueryOutcome::Failed(code);
    }

    match entries.first() {
        None => {
            tracing::error!("server URI query returned no entries");
            QueryOutcome::Mismatch(ErrorCode::NotSupported)
        }
        Some(entry) if entry.key == SERVER_URI_KEY => QueryOutcome::Uri(entry.value.clone()),
        Some(entry) => {
            tracing::error!(
                expected = SERVER_URI_KEY,
                received = %entry.key,
                "server URI query answered the wrong key"
            );
            QueryOutcome::Mismatch(ErrorCode::BadParam)
        }
    }
}

#[cfg(test)]
#[path = "query_tests.rs"]
mod tests;
