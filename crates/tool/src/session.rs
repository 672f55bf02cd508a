// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Session directory layout
//!
//! The layout only computes paths; nothing is created on disk.

use std::path::{Path, PathBuf};

use tether_core::{ErrorCode, LocalIdentity, SessionConfig};

/// Session directories of an attached tool
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionBase {
    /// Root all session directories live under
    pub tmp_base: PathBuf,
    /// Per user and host directory
    pub top: PathBuf,
    /// Directory of the attached job
    pub job: PathBuf,
}

/// Computes where a tool's session directories live
pub trait SessionLayout: Send {
    fn setup_base(&self, identity: &LocalIdentity) -> Result<SessionBase, ErrorCode>;
}

/// `<tmp_base>/tether.<user>@<hostname>/<job_id>`
#[derive(Debug, Clone, Default)]
pub struct TmpSessionLayout {
    tmp_base: Option<PathBuf>,
    user: Option<String>,
}

impl TmpSessionLayout {
    pub fn new(tmp_base: Option<PathBuf>, user: Option<String>) -> Self {
        Self { tmp_base, user }
    }

    /// Resolve the base from config, then `TMPDIR`, then the OS temp dir;
    /// the user comes from `USER`
    pub fn from_env(config: &SessionConfig) -> Self {
        let tmp_base = config
            .tmp_base
            .clone()
            .or_else(|| std::env::var_os("TMPDIR").map(PathBuf::from))
            .or_else(|| Some(std::env::temp_dir()));
        let user = std::env::var("USER").ok().filter(|u| !u.is_empty());
        Self::new(tmp_base, user)
    }

    pub fn tmp_base(&self) -> Option<&Path> {
        self.tmp_base.as_deref()
    }
}

impl SessionLayout for TmpSessionLayout {
    fn setup_base(&self, identity: &LocalIdentity) -> Result<SessionBase, ErrorCode> {
        let Some(user) = self.user.as_deref() else {
            tracing::debug!("cannot name the session directory: USER is not set");
            return Err(ErrorCode::NotFound);
        };
        let tmp_base = self.tmp_base.clone().unwrap_or_else(std::env::temp_dir);

        let top = tmp_base.join(format!("tether.{}@{}", user, identity.hostname));
        let job = top.join(identity.job_id.to_string());
        tracing::debug!(job = %job.display(), "session base defined");

        Ok(SessionBase { tmp_base, top, job })
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
