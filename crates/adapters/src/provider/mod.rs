// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Capability provider boundary
//!
//! A provider is the service a tool attaches to. Initialization is
//! synchronous; queries are fire-and-forget and complete through a callback
//! invoked on the progress worker.

mod framework;
mod loopback;

pub use framework::ProviderFramework;
pub use loopback::{LoopbackProvider, JOB_ID_DIRECTIVE, RANK_DIRECTIVE};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeProvider, FakeQuery, ProviderCall};

use std::fmt;
use tether_core::{Directives, ErrorCode, IdentityFragment};
use thiserror::Error;
use tokio::runtime::Handle;

/// Well-known key for the coordination server's URI
pub const SERVER_URI_KEY: &str = "server_uri";

/// Errors from provider operations
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProviderError {
    #[error("no coordination server could be located")]
    NoServer,
    #[error("provider {provider} failed: {code}")]
    Failed { provider: String, code: ErrorCode },
}

impl ProviderError {
    pub fn failed(provider: &str, code: ErrorCode) -> Self {
        ProviderError::Failed {
            provider: provider.to_string(),
            code,
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            ProviderError::NoServer => ErrorCode::Unreach,
            ProviderError::Failed { code, .. } => *code,
        }
    }
}

/// One key/value pair in a query result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfoEntry {
    pub key: String,
    pub value: String,
}

impl InfoEntry {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Hands query resources back to the provider; must be called once
pub type Release = Box<dyn FnOnce() + Send>;

/// Completion callback for [`Provider::query`]
pub type QueryCallback = Box<dyn FnOnce(QueryReply) + Send>;

/// What a query callback receives
pub struct QueryReply {
    pub status: Result<(), ErrorCode>,
    pub entries: Vec<InfoEntry>,
    pub release: Option<Release>,
}

impl QueryReply {
    pub fn ok(entries: Vec<InfoEntry>) -> Self {
        Self {
            status: Ok(()),
            entries,
            release: None,
        }
    }

    pub fn failed(code: ErrorCode) -> Self {
        Self {
            status: Err(code),
            entries: Vec::new(),
            release: None,
        }
    }

    pub fn with_release(mut self, release: impl FnOnce() + Send + 'static) -> Self {
        self.release = Some(Box::new(release));
        self
    }
}

impl fmt::Debug for QueryReply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryReply")
            .field("status", &self.status)
            .field("entries", &self.entries)
            .field("release", &self.release.is_some())
            .finish()
    }
}

/// A capability provider component
pub trait Provider: Send + Sync {
    fn name(&self) -> &str;

    /// Higher priority wins during selection
    fn priority(&self) -> u32 {
        0
    }

    /// Whether this component can run in the current environment
    fn probe(&self) -> bool {
        true
    }

    /// Whether the provider can initialize a tool client
    fn supports_tool(&self) -> bool;

    /// Whether the provider answers [`Provider::query`]
    fn supports_query(&self) -> bool;

    /// Install the event loop that delivers async completions
    ///
    /// Must happen before any call to `query`.
    fn install_worker(&self, handle: Handle);

    /// Initialize as a tool, consuming the directives
    fn tool_init(&self, directives: Directives) -> Result<IdentityFragment, ProviderError>;

    /// Ask the server for `keys`; `callback` runs once on the progress worker
    fn query(&self, keys: Vec<String>, callback: QueryCallback);

    fn finalize(&self) -> Result<(), ProviderError>;
}
