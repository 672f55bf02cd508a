// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Bootstrap failures and their operator-facing diagnostics

use tether_adapters::{ProviderError, WorkerError};
use tether_core::ErrorCode;
use thiserror::Error;

/// Fatal bootstrap failures
///
/// Each variant knows the stage it failed in and the status code to report.
#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("progress worker failed to start: {0}")]
    WorkerStart(#[source] WorkerError),

    #[error("provider framework failed to open: {0}")]
    ProviderOpen(ErrorCode),

    #[error("provider selection failed: {0}")]
    ProviderSelect(ErrorCode),

    #[error("provider {provider} does not support tools")]
    UnsupportedEnvironment { provider: String },

    #[error("provider initialization failed: {0}")]
    ProviderInit(#[source] ProviderError),

    #[error("module {module} failed to open: {code}")]
    ModuleOpen { module: String, code: ErrorCode },

    #[error("module {module} failed to select: {code}")]
    ModuleSelect { module: String, code: ErrorCode },

    #[error("session base setup failed: {0}")]
    SessionSetup(ErrorCode),
}

impl BootstrapError {
    /// Name of the stage that failed; module failures use the module's name
    pub fn stage(&self) -> &str {
        match self {
            BootstrapError::WorkerStart(_) => "progress_worker",
            BootstrapError::ProviderOpen(_) => "provider_open",
            BootstrapError::ProviderSelect(_) => "provider_select",
            BootstrapError::UnsupportedEnvironment { .. } => "provider_tool_init",
            BootstrapError::ProviderInit(_) => "provider_init",
            BootstrapError::ModuleOpen { module, .. } => module,
            BootstrapError::ModuleSelect { module, .. } => module,
            BootstrapError::SessionSetup(_) => "session_base",
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            BootstrapError::WorkerStart(e) => e.code(),
            BootstrapError::ProviderOpen(code) => *code,
            BootstrapError::ProviderSelect(code) => *code,
            BootstrapError::UnsupportedEnvironment { .. } => ErrorCode::Silent,
            BootstrapError::ProviderInit(e) => e.code(),
            BootstrapError::ModuleOpen { code, .. } => *code,
            BootstrapError::ModuleSelect { code, .. } => *code,
            BootstrapError::SessionSetup(code) => *code,
        }
    }

    /// Single consolidated message for the operator
    pub fn diagnostic(&self) -> String {
        match self {
            BootstrapError::UnsupportedEnvironment { provider } => format!(
                "tether can only attach through a tool-capable provider, but the selected \
                 provider \"{}\" does not support tools.\n\
                 Legacy environments without a tool-capable provider are no longer supported; \
                 check the provider filter (TETHER_PROVIDER or [provider] components).",
                provider
            ),
            BootstrapError::ProviderInit(ProviderError::NoServer) => format!(
                "tether could not locate a coordination server to attach to \
                 (stage \"{}\": {} ({})).\n\
                 Make sure the job's server is running and reachable from this host.",
                self.stage(),
                self.code().name(),
                self.code().code()
            ),
            _ => format!(
                "tether startup failed at stage \"{}\": {} ({})\n  {}",
                self.stage(),
                self.code().name(),
                self.code().code(),
                self
            ),
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
