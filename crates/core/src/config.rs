// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tool configuration
//!
//! Load order: built-in defaults, then a TOML file, then environment
//! overrides. Environment values always win.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Environment variable naming a config file
pub const CONFIG_ENV: &str = "TETHER_CONFIG";
/// Environment variable overriding the provider component filter
pub const PROVIDER_ENV: &str = "TETHER_PROVIDER";
/// Environment variable overriding the query timeout
pub const QUERY_TIMEOUT_ENV: &str = "TETHER_QUERY_TIMEOUT";

/// Provider components that cannot serve tools
pub const LEGACY_PROVIDERS: [&str; 4] = ["s1", "s2", "cray", "isolated"];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {0}: {1}")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("invalid config {0}: {1}")]
    Parse(PathBuf, #[source] toml::de::Error),

    #[error("invalid value for {var}: {message}")]
    InvalidEnv { var: String, message: String },
}

/// Which components of a framework may be considered
///
/// Text form: `a,b` includes only the listed components, `^a,b` excludes
/// them. An empty string allows everything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComponentFilter {
    Include(Vec<String>),
    Exclude(Vec<String>),
}

impl ComponentFilter {
    pub fn allow_all() -> Self {
        ComponentFilter::Exclude(Vec::new())
    }

    pub fn allows(&self, component: &str) -> bool {
        match self {
            ComponentFilter::Include(names) => names.iter().any(|n| n == component),
            ComponentFilter::Exclude(names) => !names.iter().any(|n| n == component),
        }
    }
}

impl Default for ComponentFilter {
    fn default() -> Self {
        Self::allow_all()
    }
}

impl FromStr for ComponentFilter {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (exclude, list) = match s.strip_prefix('^') {
            Some(rest) => (true, rest),
            None => (false, s),
        };
        let names: Vec<String> = list
            .split(',')
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string)
            .collect();

        if exclude || names.is_empty() {
            Ok(ComponentFilter::Exclude(names))
        } else {
            Ok(ComponentFilter::Include(names))
        }
    }
}

impl<'de> Deserialize<'de> for ComponentFilter {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(raw.parse::<ComponentFilter>().unwrap_or_default())
    }
}

/// Provider settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProviderConfig {
    /// Component filter applied when the provider framework opens
    pub components: ComponentFilter,
    /// URI the loopback provider reports for its server
    pub server_uri: Option<String>,
    /// Job id the loopback provider assigns when no directive sets one
    pub job_id: Option<u32>,
    /// Rank the loopback provider assigns when no directive sets one
    pub rank: Option<u32>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            components: ComponentFilter::Exclude(
                LEGACY_PROVIDERS.iter().map(|s| s.to_string()).collect(),
            ),
            server_uri: None,
            job_id: None,
            rank: None,
        }
    }
}

/// Session directory settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SessionConfig {
    /// Base for session directories; falls back to `TMPDIR`, then the OS temp dir
    pub tmp_base: Option<PathBuf>,
}

/// Tool configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolConfig {
    /// Name of the progress worker thread
    pub worker_name: String,
    /// How long to wait for the server URI query; zero waits forever
    #[serde(with = "humantime_serde")]
    pub query_timeout: Duration,
    /// How long teardown waits for outstanding rendezvous
    #[serde(with = "humantime_serde")]
    pub drain_grace: Duration,
    pub provider: ProviderConfig,
    pub session: SessionConfig,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            worker_name: "tool".to_string(),
            query_timeout: Duration::from_secs(30),
            drain_grace: Duration::from_secs(1),
            provider: ProviderConfig::default(),
            session: SessionConfig::default(),
        }
    }
}

impl ToolConfig {
    /// Load config from `path`, or from `TETHER_CONFIG` if set, then apply
    /// environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = path
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from));

        let mut config = match path {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };
        config.apply_env(|var| std::env::var(var).ok())?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        toml::from_str(&content).map_err(|e| ConfigError::Parse(path.to_path_buf(), e))
    }

    /// Apply overrides looked up through `lookup`
    pub fn apply_env(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(raw) = lookup(PROVIDER_ENV) {
            self.provider.components = raw.parse::<ComponentFilter>().unwrap_or_default();
        }
        if let Some(raw) = lookup(QUERY_TIMEOUT_ENV) {
            self.query_timeout =
                humantime::parse_duration(&raw).map_err(|e| ConfigError::InvalidEnv {
                    var: QUERY_TIMEOUT_ENV.to_string(),
                    message: e.to_string(),
                })?;
        }
        Ok(())
    }

    /// Query timeout, `None` when waiting is unbounded
    pub fn query_deadline(&self) -> Option<Duration> {
        if self.query_timeout.is_zero() {
            None
        } else {
            Some(self.query_timeout)
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
