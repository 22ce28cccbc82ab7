//! Monitor runs: snapshot persistence and up/down transition reporting.

mod support;

use httpmock::prelude::*;
use support::*;

#[test]
fn monitor_once_records_snapshot_and_transitions() {
    let t = Test::new();

    // First pass: nothing listens on port 9, so Radarr is down.
    let output = t
        .cmd()
        .args(["monitor", "--once"])
        .env("ENABLE_RADARR", "true")
        .env("RADARR_URL", "http://127.0.0.1:9")
        .output()
        .expect("failed to run surge monitor");

    assert_success(&output);
    assert_stdout_contains(&output, "Radarr is down");
    assert_stdout_contains(&output, "0/1 services up");

    let snapshot_path = t.storage_path().join(".surge").join("monitor.json");
    let snapshot: serde_json::Value = serde_json::from_str(
        &std::fs::read_to_string(&snapshot_path).expect("snapshot should be written"),
    )
    .expect("snapshot should be valid json");
    assert_eq!(snapshot["services"]["Radarr"], false);

    // Second pass against a live endpoint: the transition is reported.
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET);
        then.status(200);
    });
    let base = server.base_url();

    let output = t
        .cmd()
        .args(["monitor", "--once"])
        .env("ENABLE_RADARR", "true")
        .env("RADARR_URL", base.as_str())
        .output()
        .expect("failed to run surge monitor");

    assert_success(&output);
    assert_stdout_contains(&output, "Radarr came back up");
    assert_stdout_contains(&output, "1/1 services up");

    let snapshot: serde_json::Value = serde_json::from_str(
        &std::fs::read_to_string(&snapshot_path).expect("snapshot should be rewritten"),
    )
    .expect("snapshot should be valid json");
    assert_eq!(snapshot["services"]["Radarr"], true);
}

#[test]
fn monitor_once_stays_quiet_when_nothing_changes() {
    let t = Test::new();
    let vars = [("ENABLE_RADARR", "true"), ("RADARR_URL", "http://127.0.0.1:9")];

    let first = {
        let mut cmd = t.cmd();
        cmd.args(["monitor", "--once"]);
        for (k, v) in &vars {
            cmd.env(k, v);
        }
        cmd.output().expect("failed to run surge monitor")
    };
    assert_success(&first);
    assert_stdout_contains(&first, "Radarr is down");

    // A repeat with the same state reports the tally but no transition.
    let second = {
        let mut cmd = t.cmd();
        cmd.args(["monitor", "--once"]);
        for (k, v) in &vars {
            cmd.env(k, v);
        }
        cmd.output().expect("failed to run surge monitor")
    };
    assert_success(&second);
    assert_stdout_contains(&second, "0/1 services up");
    let out = stdout(&second);
    assert!(!out.contains("Radarr is down"));
    assert!(!out.contains("went down"));
}
