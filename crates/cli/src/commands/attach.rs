// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `tether attach` - attach through the loopback provider and report identity

use std::fmt;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tether_adapters::{LoopbackProvider, ProviderFramework, TracedProvider};
use tether_core::{Directive, Directives, ToolConfig};
use tether_tool::{default_registry, startup, TmpSessionLayout, Tool, ToolDeps};

use crate::output::{self, OutputFormat};

/// Provider component that cannot host tools
const LEGACY_COMPONENT: &str = "isolated";

#[derive(Args)]
pub struct AttachArgs {
    /// Directive handed to the provider (key=value, or a bare flag)
    #[arg(short = 'd', long = "directive", value_name = "KEY=VALUE")]
    pub directives: Vec<Directive>,

    /// Output format
    #[arg(short = 'o', long, value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,
}

/// What an attached tool reports about itself
#[derive(Debug, Serialize)]
pub struct AttachSummary {
    pub name: String,
    pub provider: Option<String>,
    pub job_id: u32,
    pub rank: u32,
    pub hostname: String,
    pub server_uri: Option<String>,
    pub session_dir: Option<PathBuf>,
}

impl AttachSummary {
    fn from_tool(tool: &Tool) -> Option<Self> {
        let identity = tool.identity()?;
        Some(Self {
            name: identity.name(),
            provider: tool.provider_name().map(str::to_string),
            job_id: identity.job_id.0,
            rank: identity.rank.0,
            hostname: identity.hostname.clone(),
            server_uri: identity.server_uri.clone(),
            session_dir: tool.session().map(|s| s.job.clone()),
        })
    }
}

impl fmt::Display for AttachSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "attached as {} on {}", self.name, self.hostname)?;
        if let Some(provider) = &self.provider {
            write!(f, "\n  provider: {}", provider)?;
        }
        write!(
            f,
            "\n  server:   {}",
            self.server_uri.as_deref().unwrap_or("-")
        )?;
        if let Some(dir) = &self.session_dir {
            write!(f, "\n  session:  {}", dir.display())?;
        }
        Ok(())
    }
}

fn providers(config: &ToolConfig) -> ProviderFramework {
    ProviderFramework::new(config.provider.components.clone())
        .with_component(TracedProvider::new(LoopbackProvider::new(&config.provider)))
        .with_component(TracedProvider::new(LoopbackProvider::legacy(
            LEGACY_COMPONENT,
        )))
}

pub fn attach(args: AttachArgs, config: ToolConfig) -> Result<ExitCode> {
    let deps = ToolDeps {
        providers: providers(&config),
        modules: default_registry(),
        session: Box::new(TmpSessionLayout::from_env(&config.session)),
    };
    let mut directives: Directives = args.directives.into_iter().collect();

    match startup(config, deps, &mut directives) {
        Ok(tool) => {
            if let Some(summary) = AttachSummary::from_tool(&tool) {
                output::print(&summary, args.output);
            }
            let report = tool.shutdown();
            tracing::debug!(?report, "detached");
            Ok(ExitCode::SUCCESS)
        }
        Err(failure) => {
            let (error, tool) = failure.into_parts();
            eprintln!("{}", error.diagnostic());
            let report = tool.shutdown();
            tracing::debug!(?report, "detached after failed attach");
            Ok(ExitCode::FAILURE)
        }
    }
}

#[cfg(test)]
#[path = "attach_tests.rs"]
mod tests;
