// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake provider for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{InfoEntry, Provider, ProviderError, QueryCallback, QueryReply};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tether_core::{Directives, ErrorCode, IdentityFragment, JobId, Rank};
use tokio::runtime::Handle;

/// Recorded provider call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderCall {
    InstallWorker,
    ToolInit { directives: Directives },
    Query { keys: Vec<String> },
    Finalize,
}

/// How the fake answers a query
#[derive(Debug, Clone)]
pub enum FakeQuery {
    /// Invoke the callback on the worker with this status and entries
    Reply {
        status: Result<(), ErrorCode>,
        entries: Vec<InfoEntry>,
    },
    /// Keep the callback and never invoke it
    Hold,
    /// Drop the callback without invoking it
    Drop,
}

struct FakeState {
    init: Result<IdentityFragment, ProviderError>,
    query: FakeQuery,
    finalize: Result<(), ProviderError>,
    worker: Option<Handle>,
    held: Vec<QueryCallback>,
    calls: Vec<ProviderCall>,
}

/// Fake provider for testing
///
/// Clones share state, so a test can keep one clone for inspection while the
/// framework owns another.
#[derive(Clone)]
pub struct FakeProvider {
    name: String,
    priority: u32,
    available: bool,
    tool: bool,
    query_capable: bool,
    state: Arc<Mutex<FakeState>>,
    releases: Arc<AtomicUsize>,
}

impl FakeProvider {
    /// A tool-capable provider that answers queries with no entries
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            priority: 0,
            available: true,
            tool: true,
            query_capable: true,
            state: Arc::new(Mutex::new(FakeState {
                init: Ok(IdentityFragment {
                    job_id: JobId(1),
                    rank: Rank(0),
                    hostname: Some("fakehost".to_string()),
                }),
                query: FakeQuery::Reply {
                    status: Ok(()),
                    entries: Vec::new(),
                },
                finalize: Ok(()),
                worker: None,
                held: Vec::new(),
                calls: Vec::new(),
            })),
            releases: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn with_priority(mut self, priority: u32) -> Self {
        self.priority = priority;
        self
    }

    pub fn unavailable(mut self) -> Self {
        self.available = false;
        self
    }

    /// Provider without tool support
    pub fn legacy(mut self) -> Self {
        self.tool = false;
        self
    }

    pub fn without_query(mut self) -> Self {
        self.query_capable = false;
        self
    }

    pub fn with_init(self, result: Result<IdentityFragment, ProviderError>) -> Self {
        self.lock().init = result;
        self
    }

    pub fn with_query(self, query: FakeQuery) -> Self {
        self.lock().query = query;
        self
    }

    /// Answer queries successfully with a single entry
    pub fn answering(self, key: &str, value: &str) -> Self {
        self.with_query(FakeQuery::Reply {
            status: Ok(()),
            entries: vec![InfoEntry::new(key, value)],
        })
    }

    pub fn with_finalize(self, result: Result<(), ProviderError>) -> Self {
        self.lock().finalize = result;
        self
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<ProviderCall> {
        self.lock().calls.clone()
    }

    /// How many times a reply's release function was called
    pub fn releases(&self) -> usize {
        self.releases.load(Ordering::SeqCst)
    }

    /// Drop every held callback, abandoning its rendezvous
    pub fn drop_held(&self) {
        self.lock().held.clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FakeState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Provider for FakeProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn priority(&self) -> u32 {
        self.priority
    }

    fn probe(&self) -> bool {
        self.available
    }

    fn supports_tool(&self) -> bool {
        self.tool
    }

    fn supports_query(&self) -> bool {
        self.query_capable
    }

    fn install_worker(&self, handle: Handle) {
        let mut state = self.lock();
        state.calls.push(ProviderCall::InstallWorker);
        state.worker = Some(handle);
    }

    fn tool_init(&self, directives: Directives) -> Result<IdentityFragment, ProviderError> {
        let mut state = self.lock();
        state.calls.push(ProviderCall::ToolInit { directives });
        state.init.clone()
    }

    fn query(&self, keys: Vec<String>, callback: QueryCallback) {
        let mut state = self.lock();
        state.calls.push(ProviderCall::Query { keys });

        match state.query.clone() {
            FakeQuery::Reply { status, entries } => {
                let Some(worker) = state.worker.clone() else {
                    return;
                };
                let releases = Arc::clone(&self.releases);
                let reply = QueryReply {
                    status,
                    entries,
                    release: None,
                }
                .with_release(move || {
                    releases.fetch_add(1, Ordering::SeqCst);
                });
                worker.spawn(async move { callback(reply) });
            }
            FakeQuery::Hold => state.held.push(callback),
            FakeQuery::Drop => {}
        }
    }

    fn finalize(&self) -> Result<(), ProviderError> {
        let mut state = self.lock();
        state.calls.push(ProviderCall::Finalize);
        state.held.clear();
        state.worker = None;
        state.finalize.clone()
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
