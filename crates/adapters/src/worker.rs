// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Progress worker: a dedicated thread running the provider's event loop
//!
//! The worker owns a current-thread tokio runtime and parks in `block_on`
//! until stopped. Provider callbacks run on it, so the caller thread can block
//! on a rendezvous without starving provider I/O.

use std::thread::JoinHandle;

use tether_core::ErrorCode;
use thiserror::Error;
use tokio::runtime::Handle;
use tokio::sync::oneshot;

/// Errors starting the progress worker
#[derive(Debug, Error)]
pub enum WorkerError {
    #[error("failed to build event loop for worker {name}: {source}")]
    Runtime {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to spawn worker thread {name}: {source}")]
    Spawn {
        name: String,
        #[source]
        source: std::io::Error,
    },
}

impl WorkerError {
    /// Both failures mean the process is out of threads or descriptors
    pub fn code(&self) -> ErrorCode {
        ErrorCode::OutOfResource
    }
}

/// Background event loop thread
///
/// `stop` consumes the worker, so it runs at most once per successful start.
/// Dropping a worker that was never stopped stops it as well.
#[derive(Debug)]
pub struct ProgressWorker {
    name: String,
    handle: Handle,
    shutdown: Option<oneshot::Sender<()>>,
    thread: Option<JoinHandle<()>>,
}

impl ProgressWorker {
    /// Build the event loop and start its thread
    pub fn start(name: &str) -> Result<Self, WorkerError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .thread_name(name)
            .build()
            .map_err(|source| WorkerError::Runtime {
                name: name.to_string(),
                source,
            })?;
        let handle = runtime.handle().clone();
        let (shutdown, stopped) = oneshot::channel::<()>();

        let thread = std::thread::Builder::new()
            .name(name.to_string())
            .spawn(move || {
                runtime.block_on(async {
                    // Either an explicit stop or the sender being dropped ends the loop
                    let _ = stopped.await;
                });
            })
            .map_err(|source| WorkerError::Spawn {
                name: name.to_string(),
                source,
            })?;

        tracing::info!(worker = name, "progress worker started");

        Ok(Self {
            name: name.to_string(),
            handle,
            shutdown: Some(shutdown),
            thread: Some(thread),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Handle used to schedule work on the event loop
    pub fn handle(&self) -> &Handle {
        &self.handle
    }

    /// Whether the worker thread is still running
    pub fn is_running(&self) -> bool {
        self.thread.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Stop the event loop and join its thread
    ///
    /// Tasks still queued on the loop are dropped. Returns false if the thread
    /// panicked.
    pub fn stop(mut self) -> bool {
        self.shutdown_and_join()
    }

    fn shutdown_and_join(&mut self) -> bool {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
        let Some(thread) = self.thread.take() else {
            return true;
        };

        match thread.join() {
            Ok(()) => {
                tracing::info!(worker = %self.name, "progress worker stopped");
                true
            }
            Err(_) => {
                tracing::error!(worker = %self.name, "progress worker panicked");
                false
            }
        }
    }
}

impl Drop for ProgressWorker {
    fn drop(&mut self) {
        self.shutdown_and_join();
    }
}

#[cfg(test)]
#[path = "worker_tests.rs"]
mod tests;
