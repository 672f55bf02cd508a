// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Key/value directives passed through to provider initialization

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Value carried by a directive
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectiveValue {
    /// Presence-only flag
    Flag,
    Bool(bool),
    Int(i64),
    Str(String),
}

impl DirectiveValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            DirectiveValue::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            DirectiveValue::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Parse a command-line value: integers and booleans are typed, the rest is a string
    pub fn parse(raw: &str) -> Self {
        if let Ok(n) = raw.parse::<i64>() {
            return DirectiveValue::Int(n);
        }
        match raw {
            "true" => DirectiveValue::Bool(true),
            "false" => DirectiveValue::Bool(false),
            _ => DirectiveValue::Str(raw.to_string()),
        }
    }
}

impl fmt::Display for DirectiveValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DirectiveValue::Flag => Ok(()),
            DirectiveValue::Bool(b) => write!(f, "{}", b),
            DirectiveValue::Int(n) => write!(f, "{}", n),
            DirectiveValue::Str(s) => write!(f, "{}", s),
        }
    }
}

/// A single opaque directive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    pub key: String,
    pub value: DirectiveValue,
}

impl Directive {
    pub fn new(key: impl Into<String>, value: DirectiveValue) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }

    pub fn flag(key: impl Into<String>) -> Self {
        Self::new(key, DirectiveValue::Flag)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DirectiveParseError {
    #[error("directive has an empty key: {0:?}")]
    EmptyKey(String),
}

impl FromStr for Directive {
    type Err = DirectiveParseError;

    /// `key=value` or a bare `key` flag
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (key, value) = match s.split_once('=') {
            Some((key, raw)) => (key.trim(), DirectiveValue::parse(raw.trim())),
            None => (s.trim(), DirectiveValue::Flag),
        };
        if key.is_empty() {
            return Err(DirectiveParseError::EmptyKey(s.to_string()));
        }
        Ok(Directive::new(key, value))
    }
}

/// Ordered directive list
///
/// Moved into the provider on initialization; see [`Directives::take`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Directives(Vec<Directive>);

impl Directives {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, directive: Directive) {
        self.0.push(directive);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Directive> {
        self.0.iter()
    }

    /// First value for `key`
    pub fn get(&self, key: &str) -> Option<&DirectiveValue> {
        self.0.iter().find(|d| d.key == key).map(|d| &d.value)
    }

    /// Move every directive out, leaving this list empty
    pub fn take(&mut self) -> Directives {
        std::mem::take(self)
    }
}

impl FromIterator<Directive> for Directives {
    fn from_iter<I: IntoIterator<Item = Directive>>(iter: I) -> Self {
        Directives(iter.into_iter().collect())
    }
}

impl IntoIterator for Directives {
    type Item = Directive;
    type IntoIter = std::vec::IntoIter<Directive>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

#[cfg(test)]
#[path = "directive_tests.rs"]
mod tests;
