//! Shared helpers for CLI specs

use std::path::{Path, PathBuf};

use assert_cmd::assert::Assert;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Config used by most specs: a fixed job id and a reachable server
pub const SERVER_CONFIG: &str = r#"
query_timeout = "5s"

[provider]
server_uri = "uri://host:1234"
job_id = 40
"#;

/// A scratch directory holding an optional config file
pub struct Workspace {
    dir: TempDir,
    config: Option<PathBuf>,
}

impl Workspace {
    pub fn empty() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
            config: None,
        }
    }

    /// Workspace whose `tether.toml` holds `content`
    pub fn with_config(content: &str) -> Self {
        let mut workspace = Self::empty();
        workspace.write_config(content);
        workspace
    }

    /// Write `tether.toml` and point `TETHER_CONFIG` at it
    pub fn write_config(&mut self, content: &str) {
        let path = self.dir.path().join("tether.toml");
        std::fs::write(&path, content).unwrap();
        self.config = Some(path);
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// `tether` with a clean environment rooted in this workspace
    pub fn tether(&self) -> CliBuilder {
        let mut cmd = Command::cargo_bin("tether").unwrap();
        cmd.current_dir(self.path())
            .env_remove("TETHER_CONFIG")
            .env_remove("TETHER_PROVIDER")
            .env_remove("TETHER_QUERY_TIMEOUT")
            .env_remove("RUST_LOG")
            .env("USER", "tester")
            .env("TMPDIR", self.path());
        if let Some(config) = &self.config {
            cmd.env("TETHER_CONFIG", config);
        }
        CliBuilder { cmd }
    }
}

pub struct CliBuilder {
    cmd: Command,
}

impl CliBuilder {
    pub fn args(mut self, args: &[&str]) -> Self {
        self.cmd.args(args);
        self
    }

    pub fn env(mut self, key: &str, value: impl AsRef<std::ffi::OsStr>) -> Self {
        self.cmd.env(key, value);
        self
    }

    pub fn env_remove(mut self, key: &str) -> Self {
        self.cmd.env_remove(key);
        self
    }

    /// Run and require exit code 0
    pub fn passes(mut self) -> RunAssert {
        RunAssert {
            assert: self.cmd.assert().success(),
        }
    }

    /// Run and require the given exit code
    pub fn exits(mut self, code: i32) -> RunAssert {
        RunAssert {
            assert: self.cmd.assert().code(code),
        }
    }
}

pub struct RunAssert {
    assert: Assert,
}

impl RunAssert {
    pub fn stdout_has(self, expected: &str) -> Self {
        Self {
            assert: self.assert.stdout(predicate::str::contains(expected)),
        }
    }

    pub fn stdout_lacks(self, unexpected: &str) -> Self {
        Self {
            assert: self
                .assert
                .stdout(predicate::str::contains(unexpected).not()),
        }
    }

    pub fn stderr_has(self, expected: &str) -> Self {
        Self {
            assert: self.assert.stderr(predicate::str::contains(expected)),
        }
    }

    pub fn stderr_lacks(self, unexpected: &str) -> Self {
        Self {
            assert: self
                .assert
                .stderr(predicate::str::contains(unexpected).not()),
        }
    }

    pub fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.assert.get_output().stderr).to_string()
    }

    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.assert.get_output().stdout).to_string()
    }
}
