//! Successful attach specs

use crate::prelude::*;

#[test]
fn attach_prints_identity_and_server() {
    Workspace::with_config(SERVER_CONFIG)
        .tether()
        .args(&["attach"])
        .passes()
        .stdout_has("attached as [40,0]")
        .stdout_has("provider: loopback")
        .stdout_has("server:   uri://host:1234")
        .stdout_has("tether.tester@");
}

#[test]
fn attach_json_output_is_parseable() {
    let run = Workspace::with_config(SERVER_CONFIG)
        .tether()
        .args(&["attach", "--output", "json"])
        .passes();

    let json: serde_json::Value = serde_json::from_str(&run.stdout()).unwrap();
    assert_eq!(json["name"], "[40,0]");
    assert_eq!(json["job_id"], 40);
    assert_eq!(json["server_uri"], "uri://host:1234");
    assert_eq!(json["provider"], "loopback");
}

#[test]
fn directives_override_configured_identity() {
    Workspace::with_config(SERVER_CONFIG)
        .tether()
        .args(&[
            "attach",
            "--directive",
            "job_id=12",
            "-d",
            "rank=3",
            "-d",
            "debug",
        ])
        .passes()
        .stdout_has("attached as [12,3]");
}

#[test]
fn attach_without_server_uri_still_succeeds() {
    Workspace::with_config("[provider]\njob_id = 7\n")
        .tether()
        .args(&["attach"])
        .passes()
        .stdout_has("attached as [7,0]")
        .stdout_has("server:   -");
}

#[test]
fn session_dir_uses_configured_tmp_base() {
    let mut workspace = Workspace::empty();
    let sessions = workspace.path().join("sessions");
    workspace.write_config(&format!(
        "[provider]\njob_id = 9\n\n[session]\ntmp_base = {:?}\n",
        sessions.display().to_string()
    ));

    workspace
        .tether()
        .args(&["attach"])
        .passes()
        .stdout_has(&format!("session:  {}", sessions.display()))
        .stdout_has("/9");
}
