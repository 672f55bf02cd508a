// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Provider framework: candidate filtering and selection

use super::Provider;
use std::sync::Arc;
use tether_core::{ComponentFilter, ErrorCode};

/// The set of provider components and the one selected to serve the tool
pub struct ProviderFramework {
    components: Vec<Arc<dyn Provider>>,
    filter: ComponentFilter,
    candidates: Vec<Arc<dyn Provider>>,
    selected: Option<Arc<dyn Provider>>,
    open: bool,
}

impl ProviderFramework {
    pub fn new(filter: ComponentFilter) -> Self {
        Self {
            components: Vec::new(),
            filter,
            candidates: Vec::new(),
            selected: None,
            open: false,
        }
    }

    /// Add a component
    pub fn with_component(mut self, component: impl Provider + 'static) -> Self {
        self.add(Arc::new(component));
        self
    }

    pub fn add(&mut self, component: Arc<dyn Provider>) {
        self.components.push(component);
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Names of the components that passed the filter
    pub fn candidates(&self) -> Vec<&str> {
        self.candidates.iter().map(|c| c.name()).collect()
    }

    pub fn selected(&self) -> Option<&Arc<dyn Provider>> {
        self.selected.as_ref()
    }

    /// Apply the component filter
    pub fn open(&mut self) -> Result<(), ErrorCode> {
        self.candidates = self
            .components
            .iter()
            .filter(|c| self.filter.allows(c.name()))
            .cloned()
            .collect();

        if self.candidates.is_empty() {
            tracing::debug!(filter = ?self.filter, "no provider components left after filtering");
            return Err(ErrorCode::NotFound);
        }

        self.open = true;
        tracing::debug!(candidates = ?self.candidates(), "provider framework opened");
        Ok(())
    }

    /// Pick the highest-priority candidate whose probe succeeds
    pub fn select(&mut self) -> Result<Arc<dyn Provider>, ErrorCode> {
        if !self.open {
            return Err(ErrorCode::Error);
        }

        let mut ranked = self.candidates.clone();
        ranked.sort_by_key(|c| std::cmp::Reverse(c.priority()));

        let Some(chosen) = ranked.into_iter().find(|c| c.probe()) else {
            tracing::debug!("no provider component is available");
            return Err(ErrorCode::NotFound);
        };

        tracing::info!(provider = chosen.name(), "provider selected");
        self.selected = Some(Arc::clone(&chosen));
        Ok(chosen)
    }

    /// Release the selection and candidates; safe to call repeatedly
    pub fn close(&mut self) {
        self.selected = None;
        self.candidates.clear();
        self.open = false;
    }
}

#[cfg(test)]
#[path = "framework_tests.rs"]
mod tests;
