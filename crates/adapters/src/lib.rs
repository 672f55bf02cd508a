// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
// Enable coverage(off) attribute for excluding test infrastructure
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Adapters for the capability provider and its progress worker

pub mod provider;
pub mod traced;
pub mod worker;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
pub mod module;

pub use provider::{
    InfoEntry, LoopbackProvider, Provider, ProviderError, ProviderFramework, QueryCallback,
    QueryReply, Release, SERVER_URI_KEY,
};
pub use traced::TracedProvider;
pub use worker::{ProgressWorker, WorkerError};

#[cfg(any(test, feature = "test-support"))]
pub use module::{FakeModule, ModuleCall, ModuleLog};
#[cfg(any(test, feature = "test-support"))]
pub use provider::{FakeProvider, FakeQuery, ProviderCall};
