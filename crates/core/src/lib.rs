// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! tether-core: building blocks shared by the tool lifecycle
//!
//! This crate provides:
//! - Single-use rendezvous between a blocking caller and an async callback
//! - The ordered module registry and its open/select/close contract
//! - Local identity, directives and runtime status codes
//! - Tool configuration

pub mod config;
pub mod directive;
pub mod error;
pub mod identity;
pub mod module;
pub mod rendezvous;

pub use config::{ComponentFilter, ConfigError, ProviderConfig, SessionConfig, ToolConfig};
pub use directive::{Directive, DirectiveParseError, DirectiveValue, Directives};
pub use error::ErrorCode;
pub use identity::{ArchTag, IdentityFragment, JobId, LocalIdentity, ProcFlags, Rank};
pub use module::{ModuleFailure, ModulePhase, ModuleRegistry, RuntimeModule};
pub use rendezvous::{PendingWaits, Rendezvous, RendezvousSignal, WaitOutcome};
