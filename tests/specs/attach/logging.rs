//! Logging specs

use crate::prelude::*;

#[test]
fn log_file_receives_lifecycle_records() {
    let workspace = Workspace::with_config(SERVER_CONFIG);
    let log = workspace.path().join("logs").join("tether.log");

    workspace
        .tether()
        .args(&["-v", "--log-file", log.to_str().unwrap(), "attach"])
        .passes()
        .stdout_has("attached as [40,0]");

    let contents = std::fs::read_to_string(&log).unwrap();
    assert!(contents.contains("tool attached"), "{}", contents);
    assert!(contents.contains("tool detached"), "{}", contents);
}

#[test]
fn verbose_logs_go_to_stderr() {
    Workspace::with_config(SERVER_CONFIG)
        .tether()
        .args(&["-v", "attach"])
        .passes()
        .stderr_has("progress worker started")
        .stderr_has("identity published");
}
