//! Argument and configuration error specs

use crate::prelude::*;

#[test]
fn missing_subcommand_is_a_usage_error() {
    Workspace::empty().tether().exits(2).stderr_has("Usage");
}

#[test]
fn directive_with_empty_key_is_rejected() {
    Workspace::empty()
        .tether()
        .args(&["attach", "--directive", "=5"])
        .exits(2)
        .stderr_has("empty key");
}

#[test]
fn missing_config_file_is_reported() {
    let workspace = Workspace::empty();
    let missing = workspace.path().join("absent.toml");

    workspace
        .tether()
        .args(&["attach", "--config", missing.to_str().unwrap()])
        .exits(1)
        .stderr_has("failed to read config");
}

#[test]
fn unknown_config_field_is_reported() {
    Workspace::with_config("bogus = 1\n")
        .tether()
        .args(&["attach"])
        .exits(1)
        .stderr_has("invalid config");
}

#[test]
fn invalid_query_timeout_override_is_reported() {
    Workspace::with_config(SERVER_CONFIG)
        .tether()
        .args(&["attach"])
        .env("TETHER_QUERY_TIMEOUT", "soon")
        .exits(1)
        .stderr_has("TETHER_QUERY_TIMEOUT");
}
