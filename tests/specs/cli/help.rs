//! Help output specs

use crate::prelude::*;

#[test]
fn help_lists_attach() {
    Workspace::empty()
        .tether()
        .args(&["--help"])
        .passes()
        .stdout_has("attach");
}

#[test]
fn attach_help_documents_directives() {
    Workspace::empty()
        .tether()
        .args(&["attach", "--help"])
        .passes()
        .stdout_has("--directive")
        .stdout_has("KEY=VALUE");
}

#[test]
fn version_flag_prints_version() {
    Workspace::empty()
        .tether()
        .args(&["--version"])
        .passes()
        .stdout_has(env!("CARGO_PKG_VERSION"));
}
