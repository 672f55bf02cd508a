// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! tether-tool: attach a management tool to a running job and detach it again
//!
//! [`startup`] brings the tool up stage by stage and [`Tool::shutdown`] takes
//! it back down in reverse.

pub mod error;
pub mod lifecycle;
pub mod modules;
pub mod query;
pub mod session;

pub use error::BootstrapError;
pub use lifecycle::{startup, BootstrapStage, ShutdownReport, StartupFailure, Tool, ToolDeps};
pub use modules::{default_registry, Component, ComponentSet, FrameworkModule};
pub use query::{query_server_uri, QueryOutcome};
pub use session::{SessionBase, SessionLayout, TmpSessionLayout};
