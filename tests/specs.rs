//! Behavioral specifications for the tether CLI.
//!
//! These tests are black-box: they invoke the CLI binary and verify
//! stdout, stderr, and exit codes.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

#[path = "specs/prelude.rs"]
mod prelude;

// cli/
#[path = "specs/cli/errors.rs"]
mod cli_errors;
#[path = "specs/cli/help.rs"]
mod cli_help;

// attach/
#[path = "specs/attach/identity.rs"]
mod attach_identity;
#[path = "specs/attach/failure.rs"]
mod attach_failure;
#[path = "specs/attach/logging.rs"]
mod attach_logging;
