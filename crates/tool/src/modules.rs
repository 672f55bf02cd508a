// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Runtime modules brought up after the provider
//!
//! Each module owns a [`ComponentSet`]: `open` loads the components allowed by
//! the module's filter, `select` activates the best tool-capable one.

use tether_core::{ComponentFilter, ErrorCode, ModuleRegistry, RuntimeModule};

/// Name of the state machine module
pub const STATE_MODULE: &str = "state";
/// Name of the error manager module
pub const ERRMGR_MODULE: &str = "errmgr";

/// A selectable implementation of a module
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    pub name: String,
    pub priority: u32,
    /// Whether the component can serve a tool process
    pub tool_capable: bool,
}

impl Component {
    pub fn new(name: &str, priority: u32, tool_capable: bool) -> Self {
        Self {
            name: name.to_string(),
            priority,
            tool_capable,
        }
    }
}

/// Components of one module and the one currently selected
#[derive(Debug, Clone)]
pub struct ComponentSet {
    available: Vec<Component>,
    filter: ComponentFilter,
    loaded: Vec<Component>,
    selected: Option<Component>,
}

impl ComponentSet {
    pub fn new(available: Vec<Component>) -> Self {
        Self {
            available,
            filter: ComponentFilter::allow_all(),
            loaded: Vec::new(),
            selected: None,
        }
    }

    pub fn with_filter(mut self, filter: ComponentFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn loaded(&self) -> &[Component] {
        &self.loaded
    }

    pub fn selected(&self) -> Option<&Component> {
        self.selected.as_ref()
    }

    fn open(&mut self) -> Result<(), ErrorCode> {
        self.loaded = self
            .available
            .iter()
            .filter(|c| self.filter.allows(&c.name))
            .cloned()
            .collect();
        if self.loaded.is_empty() {
            return Err(ErrorCode::NotFound);
        }
        Ok(())
    }

    fn select(&mut self) -> Result<(), ErrorCode> {
        let best = self
            .loaded
            .iter()
            .filter(|c| c.tool_capable)
            .max_by_key(|c| c.priority)
            .cloned();
        match best {
            Some(component) => {
                self.selected = Some(component);
                Ok(())
            }
            None => Err(ErrorCode::NotFound),
        }
    }

    fn reset(&mut self) {
        self.loaded.clear();
        self.selected = None;
    }
}

/// A runtime module backed by a component set
#[derive(Debug, Clone)]
pub struct FrameworkModule {
    name: &'static str,
    components: ComponentSet,
}

impl FrameworkModule {
    pub fn new(name: &'static str, components: ComponentSet) -> Self {
        Self { name, components }
    }

    /// Process state machine with its built-in components
    pub fn state() -> Self {
        Self::new(
            STATE_MODULE,
            ComponentSet::new(vec![
                Component::new("tool", 10, true),
                Component::new("app", 20, false),
                Component::new("daemon", 30, false),
            ]),
        )
    }

    /// Error manager with its built-in components
    pub fn errmgr() -> Self {
        Self::new(
            ERRMGR_MODULE,
            ComponentSet::new(vec![
                Component::new("tool", 10, true),
                Component::new("default_app", 20, false),
                Component::new("default_daemon", 30, false),
            ]),
        )
    }

    pub fn components(&self) -> &ComponentSet {
        &self.components
    }
}

impl RuntimeModule for FrameworkModule {
    fn name(&self) -> &str {
        self.name
    }

    fn open(&mut self) -> Result<(), ErrorCode> {
        self.components.open()?;
        tracing::debug!(
            module = self.name,
            loaded = self.components.loaded().len(),
            "components loaded"
        );
        Ok(())
    }

    fn select(&mut self) -> Result<(), ErrorCode> {
        self.components.select()?;
        if let Some(component) = self.components.selected() {
            tracing::debug!(module = self.name, component = %component.name, "component selected");
        }
        Ok(())
    }

    fn close(&mut self) {
        self.components.reset();
    }
}

/// Modules a tool brings up, in dependency order
pub fn default_registry() -> ModuleRegistry {
    ModuleRegistry::new()
        .register(FrameworkModule::state())
        .register(FrameworkModule::errmgr())
}

#[cfg(test)]
#[path = "modules_tests.rs"]
mod tests;
