// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Local process identity published once a tool is attached

use serde::Serialize;
use std::fmt;

/// Job identifier assigned by the coordination server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct JobId(pub u32);

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Rank of this process within its job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Rank(pub u32);

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Locality flags describing where a process lives relative to this one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ProcFlags(u16);

impl ProcFlags {
    pub const NON_LOCAL: ProcFlags = ProcFlags(0x0000);
    pub const ON_SOCKET: ProcFlags = ProcFlags(0x0004);
    pub const ON_NODE: ProcFlags = ProcFlags(0x0020);
    pub const ON_CLUSTER: ProcFlags = ProcFlags(0x0080);
    pub const ALL_LOCAL: ProcFlags = ProcFlags(0x0fff);

    pub fn bits(self) -> u16 {
        self.0
    }

    pub fn contains(self, other: ProcFlags) -> bool {
        self.0 & other.0 == other.0
    }
}

impl std::ops::BitOr for ProcFlags {
    type Output = ProcFlags;

    fn bitor(self, rhs: ProcFlags) -> ProcFlags {
        ProcFlags(self.0 | rhs.0)
    }
}

/// Architecture tag of the running process
///
/// Layout: header byte, then one bit each for endianness and 64-bit pointers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ArchTag(u32);

impl ArchTag {
    const HEADER: u32 = 0x0100_0000;
    const LITTLE_ENDIAN: u32 = 0x0000_0001;
    const POINTER_64: u32 = 0x0000_0010;

    /// Tag describing the current process
    pub fn local() -> Self {
        let mut tag = Self::HEADER;
        if cfg!(target_endian = "little") {
            tag |= Self::LITTLE_ENDIAN;
        }
        if cfg!(target_pointer_width = "64") {
            tag |= Self::POINTER_64;
        }
        ArchTag(tag)
    }

    pub fn bits(self) -> u32 {
        self.0
    }

    pub fn is_little_endian(self) -> bool {
        self.0 & Self::LITTLE_ENDIAN != 0
    }
}

/// Identity fields returned by provider initialization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityFragment {
    pub job_id: JobId,
    pub rank: Rank,
    /// Hostname as seen by the provider, if it reports one
    pub hostname: Option<String>,
}

/// Identity of this tool process for the lifetime of its attached session
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocalIdentity {
    pub job_id: JobId,
    pub rank: Rank,
    pub hostname: String,
    pub arch: ArchTag,
    pub flags: ProcFlags,
    /// URI of the coordination server, when the query step learned it
    pub server_uri: Option<String>,
}

impl LocalIdentity {
    /// Snapshot the identity published after provider initialization
    ///
    /// Tools see every other process as local, so flags are `ALL_LOCAL`.
    pub fn publish(fragment: IdentityFragment) -> Self {
        let hostname = fragment.hostname.unwrap_or_else(local_hostname);
        Self {
            job_id: fragment.job_id,
            rank: fragment.rank,
            hostname,
            arch: ArchTag::local(),
            flags: ProcFlags::ALL_LOCAL,
            server_uri: None,
        }
    }

    /// Printable process name, `[job,rank]`
    pub fn name(&self) -> String {
        format!("[{},{}]", self.job_id, self.rank)
    }
}

/// Hostname of this machine, `localhost` if it cannot be read
pub fn local_hostname() -> String {
    match hostname::get() {
        Ok(name) => name.to_string_lossy().to_string(),
        Err(e) => {
            tracing::warn!(error = %e, "failed to read hostname");
            "localhost".to_string()
        }
    }
}

#[cfg(test)]
#[path = "identity_tests.rs"]
mod tests;
