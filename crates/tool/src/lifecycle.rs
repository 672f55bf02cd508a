// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tool attach and detach
//!
//! [`startup`] walks the bootstrap stages in a fixed order and stops at the
//! first fatal failure without tearing anything down. [`Tool::shutdown`]
//! releases whatever was brought up, in reverse, and never fails.

use std::fmt;
use std::sync::Arc;

use tether_adapters::{ProgressWorker, Provider, ProviderFramework};
use tether_core::{
    Directives, LocalIdentity, ModulePhase, ModuleRegistry, PendingWaits, ToolConfig,
};
use tracing::{debug, info, warn};

use crate::error::BootstrapError;
use crate::query::{query_server_uri, QueryOutcome};
use crate::session::{SessionBase, SessionLayout};

/// How far bootstrap has progressed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BootstrapStage {
    Idle,
    WorkerStarted,
    ProviderOpen,
    ProviderSelected,
    Identified,
    QueriedOptional,
    /// Opening the module at this registry index
    ModulesOpening(usize),
    SessionDefined,
    Ready,
    /// Bootstrap stopped at the named stage
    Failed { stage: String },
}

/// Collaborators a tool is assembled from
pub struct ToolDeps {
    pub providers: ProviderFramework,
    pub modules: ModuleRegistry,
    pub session: Box<dyn SessionLayout>,
}

/// An attached (or partially attached) tool
pub struct Tool {
    config: ToolConfig,
    stage: BootstrapStage,
    /// Last stage entered before a failure
    failed_from: Option<BootstrapStage>,
    worker: Option<ProgressWorker>,
    providers: ProviderFramework,
    provider: Option<Arc<dyn Provider>>,
    modules: ModuleRegistry,
    layout: Box<dyn SessionLayout>,
    pending: PendingWaits,
    identity: Option<LocalIdentity>,
    query: Option<QueryOutcome>,
    session: Option<SessionBase>,
}

/// Bootstrap failed; the partial tool is kept so the caller can shut it down
#[derive(Debug)]
pub struct StartupFailure {
    pub error: BootstrapError,
    pub tool: Tool,
}

impl StartupFailure {
    pub fn into_parts(self) -> (BootstrapError, Tool) {
        (self.error, self.tool)
    }
}

impl fmt::Display for StartupFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)
    }
}

impl std::error::Error for StartupFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

/// What teardown did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShutdownReport {
    /// Modules closed, in close order
    pub closed_modules: Vec<String>,
    /// Rendezvous still pending after the drain grace period
    pub outstanding_waits: usize,
    /// Whether the selected provider finalized cleanly
    pub provider_finalized: bool,
    /// Whether a running progress worker was stopped and joined
    pub worker_stopped: bool,
}

/// Attach as a tool
///
/// `directives` are left untouched if bootstrap fails before provider
/// initialization; from then on they belong to the provider and the caller's
/// list is empty, whether or not initialization succeeds.
pub fn startup(
    config: ToolConfig,
    deps: ToolDeps,
    directives: &mut Directives,
) -> Result<Tool, StartupFailure> {
    let mut tool = Tool::new(config, deps);
    match tool.bring_up(directives) {
        Ok(()) => Ok(tool),
        Err(error) => {
            debug!(
                stage = error.stage(),
                code = error.code().code(),
                error = %error,
                "bootstrap failed"
            );
            let reached = std::mem::replace(
                &mut tool.stage,
                BootstrapStage::Failed {
                    stage: error.stage().to_string(),
                },
            );
            tool.failed_from = Some(reached);
            Err(StartupFailure { error, tool })
        }
    }
}

impl Tool {
    fn new(config: ToolConfig, deps: ToolDeps) -> Self {
        Self {
            config,
            stage: BootstrapStage::Idle,
            failed_from: None,
            worker: None,
            providers: deps.providers,
            provider: None,
            modules: deps.modules,
            layout: deps.session,
            pending: PendingWaits::new(),
            identity: None,
            query: None,
            session: None,
        }
    }

    /// Bootstrap stages; the caller records the failure
    fn bring_up(&mut self, directives: &mut Directives) -> Result<(), BootstrapError> {
        // 1. Progress worker, before anything can complete asynchronously
        let worker =
            ProgressWorker::start(&self.config.worker_name).map_err(BootstrapError::WorkerStart)?;
        let handle = worker.handle().clone();
        self.worker = Some(worker);
        self.stage = BootstrapStage::WorkerStarted;

        // 2. Provider framework
        self.providers.open().map_err(BootstrapError::ProviderOpen)?;
        self.stage = BootstrapStage::ProviderOpen;
        let provider = self
            .providers
            .select()
            .map_err(BootstrapError::ProviderSelect)?;
        self.provider = Some(Arc::clone(&provider));
        self.stage = BootstrapStage::ProviderSelected;

        // 3. Legacy providers cannot host a tool
        if !provider.supports_tool() {
            return Err(BootstrapError::UnsupportedEnvironment {
                provider: provider.name().to_string(),
            });
        }
        provider.install_worker(handle.clone());

        // 4. Identity; the directives belong to the provider from here on
        let fragment = provider
            .tool_init(directives.take())
            .map_err(BootstrapError::ProviderInit)?;
        let identity = LocalIdentity::publish(fragment);
        info!(
            name = %identity.name(),
            hostname = %identity.hostname,
            "identity published"
        );
        self.identity = Some(identity);
        self.stage = BootstrapStage::Identified;

        // 5. Server URI, best effort
        if provider.supports_query() {
            let outcome = query_server_uri(
                provider.as_ref(),
                &handle,
                &self.pending,
                self.config.query_deadline(),
            );
            if let (Some(uri), Some(identity)) = (outcome.uri(), self.identity.as_mut()) {
                info!(server_uri = uri, "server URI recorded");
                identity.server_uri = Some(uri.to_string());
            }
            self.query = Some(outcome);
            self.stage = BootstrapStage::QueriedOptional;
        }

        // 6. Runtime modules in dependency order
        let stage = &mut self.stage;
        self.modules
            .open_all_with(|index, _| *stage = BootstrapStage::ModulesOpening(index))
            .map_err(|failure| match failure.phase {
                ModulePhase::Open => BootstrapError::ModuleOpen {
                    module: failure.module,
                    code: failure.code,
                },
                ModulePhase::Select => BootstrapError::ModuleSelect {
                    module: failure.module,
                    code: failure.code,
                },
            })?;

        // 7. Session base
        if let Some(identity) = self.identity.as_ref() {
            let base = self
                .layout
                .setup_base(identity)
                .map_err(BootstrapError::SessionSetup)?;
            self.session = Some(base);
        }
        self.stage = BootstrapStage::SessionDefined;

        // 8. Ready
        self.stage = BootstrapStage::Ready;
        info!(modules = ?self.modules.names(), "tool attached");
        Ok(())
    }

    pub fn stage(&self) -> &BootstrapStage {
        &self.stage
    }

    /// Stage bootstrap had entered when it failed
    pub fn failed_from(&self) -> Option<&BootstrapStage> {
        self.failed_from.as_ref()
    }

    pub fn is_ready(&self) -> bool {
        self.stage == BootstrapStage::Ready
    }

    pub fn identity(&self) -> Option<&LocalIdentity> {
        self.identity.as_ref()
    }

    pub fn modules(&self) -> &ModuleRegistry {
        &self.modules
    }

    pub fn provider_name(&self) -> Option<&str> {
        self.provider.as_ref().map(|p| p.name())
    }

    /// Outcome of the server URI query, if one was issued
    pub fn query_outcome(&self) -> Option<&QueryOutcome> {
        self.query.as_ref()
    }

    pub fn session(&self) -> Option<&SessionBase> {
        self.session.as_ref()
    }

    /// Rendezvous not yet resolved
    pub fn pending_waits(&self) -> usize {
        self.pending.outstanding()
    }

    /// Detach, releasing everything bootstrap acquired
    ///
    /// Every step is attempted; failures are logged and do not stop later
    /// steps.
    pub fn shutdown(mut self) -> ShutdownReport {
        info!(stage = ?self.stage, "detaching tool");

        // 1. Let in-flight completions land while the worker still runs
        let outstanding_waits = match self.worker.as_ref() {
            Some(worker) => self.pending.drain(worker.handle(), self.config.drain_grace),
            None => self.pending.outstanding(),
        };

        // 2. Modules in reverse
        let closed_modules = self.modules.close_all();

        // 3. Provider
        let provider_finalized = match self.provider.take() {
            Some(provider) => match provider.finalize() {
                Ok(()) => true,
                Err(e) => {
                    warn!(provider = provider.name(), error = %e, "provider finalize failed");
                    false
                }
            },
            None => false,
        };

        // 4. Provider framework
        self.providers.close();

        // 5. Progress worker last
        let worker_stopped = match self.worker.take() {
            Some(worker) => {
                let stopped = worker.stop();
                if !stopped {
                    warn!("progress worker did not stop cleanly");
                }
                stopped
            }
            None => false,
        };

        self.identity = None;
        self.session = None;

        info!(
            closed = ?closed_modules,
            outstanding_waits,
            "tool detached"
        );

        ShutdownReport {
            closed_modules,
            outstanding_waits,
            provider_finalized,
            worker_stopped,
        }
    }
}

impl fmt::Debug for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tool")
            .field("stage", &self.stage)
            .field("failed_from", &self.failed_from)
            .field("provider", &self.provider_name())
            .field("modules", &self.modules)
            .field("identity", &self.identity)
            .field("query", &self.query)
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "lifecycle_tests.rs"]
mod tests;
