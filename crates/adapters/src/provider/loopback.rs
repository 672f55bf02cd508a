// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-process provider that serves its own identity and server URI

use super::{InfoEntry, Provider, ProviderError, QueryCallback, QueryReply, SERVER_URI_KEY};
use std::sync::Mutex;
use tether_core::{
    DirectiveValue, Directives, ErrorCode, IdentityFragment, JobId, ProviderConfig, Rank,
};
use tokio::runtime::Handle;

/// Directive overriding the assigned job id
pub const JOB_ID_DIRECTIVE: &str = "job_id";
/// Directive overriding the assigned rank
pub const RANK_DIRECTIVE: &str = "rank";

/// Provider answered entirely in-process
///
/// Used when no external coordination server is deployed, and by the CLI.
/// Queries are answered from a task on the installed progress worker.
#[derive(Debug)]
pub struct LoopbackProvider {
    name: String,
    tool: bool,
    server_uri: Option<String>,
    job_id: JobId,
    rank: Rank,
    worker: Mutex<Option<Handle>>,
}

impl LoopbackProvider {
    pub fn new(config: &ProviderConfig) -> Self {
        Self {
            name: "loopback".to_string(),
            tool: true,
            server_uri: config.server_uri.clone(),
            job_id: JobId(config.job_id.unwrap_or_else(std::process::id)),
            rank: Rank(config.rank.unwrap_or(0)),
            worker: Mutex::new(None),
        }
    }

    /// A singleton-style component that cannot initialize tools
    pub fn legacy(name: &str) -> Self {
        Self {
            name: name.to_string(),
            tool: false,
            server_uri: None,
            job_id: JobId(0),
            rank: Rank(0),
            worker: Mutex::new(None),
        }
    }

    fn directive_id(
        &self,
        directives: &Directives,
        key: &str,
    ) -> Result<Option<u32>, ProviderError> {
        match directives.get(key) {
            None => Ok(None),
            Some(DirectiveValue::Int(n)) => u32::try_from(*n)
                .map(Some)
                .map_err(|_| ProviderError::failed(&self.name, ErrorCode::BadParam)),
            Some(other) => {
                tracing::debug!(key, value = %other, "directive must be a non-negative integer");
                Err(ProviderError::failed(&self.name, ErrorCode::BadParam))
            }
        }
    }
}

impl Provider for LoopbackProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn priority(&self) -> u32 {
        if self.tool {
            10
        } else {
            5
        }
    }

    fn supports_tool(&self) -> bool {
        self.tool
    }

    fn supports_query(&self) -> bool {
        self.tool
    }

    fn install_worker(&self, handle: Handle) {
        *self.worker.lock().unwrap_or_else(|e| e.into_inner()) = Some(handle);
    }

    fn tool_init(&self, directives: Directives) -> Result<IdentityFragment, ProviderError> {
        if !self.tool {
            return Err(ProviderError::failed(&self.name, ErrorCode::NotSupported));
        }

        let job_id = self.directive_id(&directives, JOB_ID_DIRECTIVE)?;
        let rank = self.directive_id(&directives, RANK_DIRECTIVE)?;
        for directive in directives.iter() {
            if directive.key != JOB_ID_DIRECTIVE && directive.key != RANK_DIRECTIVE {
                tracing::debug!(key = %directive.key, "ignoring directive");
            }
        }

        Ok(IdentityFragment {
            job_id: job_id.map(JobId).unwrap_or(self.job_id),
            rank: rank.map(Rank).unwrap_or(self.rank),
            hostname: None,
        })
    }

    fn query(&self, keys: Vec<String>, callback: QueryCallback) {
        let worker = self
            .worker
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone();
        let Some(worker) = worker else {
            tracing::warn!("query issued before a progress worker was installed");
            return;
        };

        let reply = match keys.iter().find(|k| k.as_str() != SERVER_URI_KEY) {
            Some(unknown) => {
                tracing::debug!(key = %unknown, "unknown query key");
                QueryReply::failed(ErrorCode::NotFound)
            }
            None => {
                let entries = self
                    .server_uri
                    .iter()
                    .map(|uri| InfoEntry::new(SERVER_URI_KEY, uri.as_str()))
                    .take(keys.len())
                    .collect();
                QueryReply::ok(entries)
            }
        };
        worker.spawn(async move { callback(reply) });
    }

    fn finalize(&self) -> Result<(), ProviderError> {
        self.worker.lock().unwrap_or_else(|e| e.into_inner()).take();
        Ok(())
    }
}

#[cfg(test)]
#[path = "loopback_tests.rs"]
mod tests;
