// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced provider wrapper for consistent observability

use crate::provider::{Provider, ProviderError, QueryCallback};
use tether_core::{Directives, IdentityFragment};
use tokio::runtime::Handle;

/// Wrapper that adds tracing to any Provider
#[derive(Clone)]
pub struct TracedProvider<P> {
    inner: P,
}

impl<P> TracedProvider<P> {
    pub fn new(inner: P) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &P {
        &self.inner
    }
}

impl<P: Provider> Provider for TracedProvider<P> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn priority(&self) -> u32 {
        self.inner.priority()
    }

    fn probe(&self) -> bool {
        let available = self.inner.probe();
        tracing::trace!(provider = self.inner.name(), available, "probed");
        available
    }

    fn supports_tool(&self) -> bool {
        self.inner.supports_tool()
    }

    fn supports_query(&self) -> bool {
        self.inner.supports_query()
    }

    fn install_worker(&self, handle: Handle) {
        tracing::debug!(provider = self.inner.name(), "installing progress worker");
        self.inner.install_worker(handle);
    }

    fn tool_init(&self, directives: Directives) -> Result<IdentityFragment, ProviderError> {
        let span = tracing::info_span!("provider.tool_init", provider = self.inner.name());
        let _guard = span.enter();

        tracing::info!(directive_count = directives.len(), "starting");

        let start = std::time::Instant::now();
        let result = self.inner.tool_init(directives);
        let elapsed = start.elapsed();

        match &result {
            Ok(fragment) => tracing::info!(
                job_id = %fragment.job_id,
                rank = %fragment.rank,
                elapsed_ms = elapsed.as_millis() as u64,
                "initialized"
            ),
            Err(e) => tracing::debug!(
                elapsed_ms = elapsed.as_millis() as u64,
                error = %e,
                "init failed"
            ),
        }

        result
    }

    fn query(&self, keys: Vec<String>, callback: QueryCallback) {
        let span = tracing::info_span!("provider.query", provider = self.inner.name());
        let _guard = span.enter();

        tracing::debug!(keys = ?keys, "issuing");
        let start = std::time::Instant::now();
        let provider = self.inner.name().to_string();
        self.inner.query(
            keys,
            Box::new(move |reply| {
                tracing::debug!(
                    provider = %provider,
                    status = ?reply.status,
                    entries = reply.entries.len(),
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "query completed"
                );
                callback(reply);
            }),
        );
    }

    fn finalize(&self) -> Result<(), ProviderError> {
        let span = tracing::info_span!("provider.finalize", provider = self.inner.name());
        let _guard = span.enter();

        let result = self.inner.finalize();
        match &result {
            Ok(()) => tracing::info!("finalized"),
            Err(e) => tracing::warn!(error = %e, "finalize failed"),
        }

        result
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
