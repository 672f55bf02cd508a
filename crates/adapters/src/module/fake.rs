// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake runtime module for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use std::sync::{Arc, Mutex};
use tether_core::{ErrorCode, RuntimeModule};

/// Recorded module call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModuleCall {
    Open(String),
    Select(String),
    Close(String),
}

/// Call log shared by several fake modules, so ordering across them is visible
#[derive(Debug, Clone, Default)]
pub struct ModuleLog {
    calls: Arc<Mutex<Vec<ModuleCall>>>,
}

impl ModuleLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<ModuleCall> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Names of closed modules in the order they were closed
    pub fn closed(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                ModuleCall::Close(name) => Some(name),
                _ => None,
            })
            .collect()
    }

    fn push(&self, call: ModuleCall) {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(call);
    }
}

/// Fake runtime module for testing
#[derive(Debug, Clone)]
pub struct FakeModule {
    name: String,
    open_result: Result<(), ErrorCode>,
    select_result: Result<(), ErrorCode>,
    log: ModuleLog,
}

impl FakeModule {
    pub fn new(name: &str, log: &ModuleLog) -> Self {
        Self {
            name: name.to_string(),
            open_result: Ok(()),
            select_result: Ok(()),
            log: log.clone(),
        }
    }

    pub fn failing_open(mut self, code: ErrorCode) -> Self {
        self.open_result = Err(code);
        self
    }

    pub fn failing_select(mut self, code: ErrorCode) -> Self {
        self.select_result = Err(code);
        self
    }
}

impl RuntimeModule for FakeModule {
    fn name(&self) -> &str {
        &self.name
    }

    fn open(&mut self) -> Result<(), ErrorCode> {
        self.log.push(ModuleCall::Open(self.name.clone()));
        self.open_result
    }

    fn select(&mut self) -> Result<(), ErrorCode> {
        self.log.push(ModuleCall::Select(self.name.clone()));
        self.select_result
    }

    fn close(&mut self) {
        self.log.push(ModuleCall::Close(self.name.clone()));
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
