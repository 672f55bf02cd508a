//! Failed attach specs

use crate::prelude::*;

#[test]
fn legacy_provider_is_rejected_with_distinct_diagnostic() {
    Workspace::with_config(SERVER_CONFIG)
        .tether()
        .args(&["attach"])
        .env("TETHER_PROVIDER", "isolated")
        .exits(1)
        .stderr_has("does not support tools")
        .stderr_has("\"isolated\"")
        .stdout_lacks("attached as");
}

#[test]
fn provider_filter_excluding_everything_fails_to_open() {
    Workspace::with_config(SERVER_CONFIG)
        .tether()
        .args(&["attach"])
        .env("TETHER_PROVIDER", "^loopback,isolated")
        .exits(1)
        .stderr_has("startup failed at stage \"provider_open\": NOT_FOUND (-13)");
}

#[test]
fn non_numeric_job_id_fails_provider_init() {
    Workspace::with_config(SERVER_CONFIG)
        .tether()
        .args(&["attach", "--directive", "job_id=abc"])
        .exits(1)
        .stderr_has("startup failed at stage \"provider_init\": BAD_PARAM (-5)");
}

#[test]
fn missing_user_fails_session_setup() {
    Workspace::with_config(SERVER_CONFIG)
        .tether()
        .env_remove("USER")
        .args(&["attach"])
        .exits(1)
        .stderr_has("startup failed at stage \"session_base\": NOT_FOUND (-13)");
}

#[test]
fn failed_attach_is_reported_once() {
    let run = Workspace::with_config(SERVER_CONFIG)
        .tether()
        .args(&["attach"])
        .env("TETHER_PROVIDER", "nope")
        .exits(1)
        .stderr_lacks("ERROR")
        .stderr_lacks("no provider components left");
    let stderr = run.stderr();

    assert_eq!(stderr.matches("startup failed").count(), 1, "{}", stderr);
}

#[test]
fn legacy_provider_shows_only_the_legacy_message() {
    Workspace::with_config(SERVER_CONFIG)
        .tether()
        .args(&["attach"])
        .env("TETHER_PROVIDER", "isolated")
        .exits(1)
        .stderr_lacks("ERROR")
        .stderr_lacks("startup failed at stage");
}
