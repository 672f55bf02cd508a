// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Ordered registry of runtime modules
//!
//! Modules are opened front to back and closed back to front. The registry
//! owns each module's `opened` flag, which is the only authority on whether
//! `close` may be called.

use crate::error::ErrorCode;
use std::fmt;

/// A subsystem with an open/select/close lifecycle
pub trait RuntimeModule: Send {
    fn name(&self) -> &str;

    /// Load the module's candidate components
    fn open(&mut self) -> Result<(), ErrorCode>;

    /// Pick the active component
    fn select(&mut self) -> Result<(), ErrorCode>;

    /// Release everything acquired by `open` and `select`
    fn close(&mut self);
}

/// Which lifecycle call failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModulePhase {
    Open,
    Select,
}

impl fmt::Display for ModulePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModulePhase::Open => write!(f, "open"),
            ModulePhase::Select => write!(f, "select"),
        }
    }
}

/// A module that failed to come up
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleFailure {
    pub index: usize,
    pub module: String,
    pub phase: ModulePhase,
    pub code: ErrorCode,
}

struct ModuleSlot {
    module: Box<dyn RuntimeModule>,
    opened: bool,
}

/// Modules in dependency order
#[derive(Default)]
pub struct ModuleRegistry {
    slots: Vec<ModuleSlot>,
}

impl ModuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a module; it depends on every module registered before it
    pub fn register(mut self, module: impl RuntimeModule + 'static) -> Self {
        self.push(Box::new(module));
        self
    }

    pub fn push(&mut self, module: Box<dyn RuntimeModule>) {
        self.slots.push(ModuleSlot {
            module,
            opened: false,
        });
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Module names in registry order
    pub fn names(&self) -> Vec<String> {
        self.slots
            .iter()
            .map(|s| s.module.name().to_string())
            .collect()
    }

    /// `opened` flag of each module in registry order
    pub fn opened_flags(&self) -> Vec<bool> {
        self.slots.iter().map(|s| s.opened).collect()
    }

    /// Whether the named module is opened, `None` if not registered
    pub fn is_opened(&self, name: &str) -> Option<bool> {
        self.slots
            .iter()
            .find(|s| s.module.name() == name)
            .map(|s| s.opened)
    }

    /// Number of modules currently opened
    pub fn opened_count(&self) -> usize {
        self.slots.iter().filter(|s| s.opened).count()
    }

    /// Open and select each module in order, stopping at the first failure
    ///
    /// Modules already opened are skipped. Modules after a failure are never
    /// touched.
    pub fn open_all(&mut self) -> Result<(), ModuleFailure> {
        self.open_all_with(|_, _| {})
    }

    /// Like [`open_all`](Self::open_all), calling `on_open(index, name)`
    /// before each module is opened
    pub fn open_all_with(
        &mut self,
        mut on_open: impl FnMut(usize, &str),
    ) -> Result<(), ModuleFailure> {
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if slot.opened {
                continue;
            }

            on_open(index, slot.module.name());
            let name = slot.module.name().to_string();
            if let Err(code) = slot.module.open() {
                tracing::debug!(module = %name, error = %code, "module open failed");
                return Err(ModuleFailure {
                    index,
                    module: name,
                    phase: ModulePhase::Open,
                    code,
                });
            }
            if let Err(code) = slot.module.select() {
                tracing::debug!(module = %name, error = %code, "module select failed");
                return Err(ModuleFailure {
                    index,
                    module: name,
                    phase: ModulePhase::Select,
                    code,
                });
            }

            slot.opened = true;
            tracing::debug!(module = %name, "module opened");
        }
        Ok(())
    }

    /// Close every opened module in reverse order
    ///
    /// Returns the names of the modules closed, in the order they were closed.
    pub fn close_all(&mut self) -> Vec<String> {
        let mut closed = Vec::new();
        for slot in self.slots.iter_mut().rev() {
            if !slot.opened {
                continue;
            }
            slot.module.close();
            slot.opened = false;
            tracing::debug!(module = %slot.module.name(), "module closed");
            closed.push(slot.module.name().to_string());
        }
        closed
    }
}

impl fmt::Debug for ModuleRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(
                self.slots
                    .iter()
                    .map(|s| (s.module.name().to_string(), s.opened)),
            )
            .finish()
    }
}

#[cfg(test)]
#[path = "module_tests.rs"]
mod tests;
