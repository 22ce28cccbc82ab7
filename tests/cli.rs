//! CLI integration tests: argument handling, reporters, completions.

mod support;

use predicates::prelude::*;
use support::*;

#[test]
fn status_with_nothing_enabled_succeeds() {
    let t = Test::new();

    let output = t.status(&[]);
    assert_success(&output);
    assert_stdout_contains(&output, "no services enabled");
    assert_stdout_contains(&output, "ENABLE_<SERVICE>=true");
}

#[test]
fn status_reports_unreachable_service() {
    let t = Test::new();

    // Port 9 is unassigned; the connection is refused immediately.
    let output = t.status(&[
        ("ENABLE_RADARR", "true"),
        ("RADARR_URL", "http://127.0.0.1:9"),
    ]);
    assert_success(&output);
    assert_stdout_contains(&output, "Radarr");
    assert_stdout_contains(&output, "unreachable");
    assert_stdout_contains(&output, "api key not found");
    assert_stdout_contains(&output, "0/2 checks passed");
}

#[test]
fn status_discovers_key_from_storage() {
    let t = Test::new();
    t.write_config(
        "Radarr/config/config.xml",
        "<Config><ApiKey>ABCDEF1234567890</ApiKey></Config>",
    );

    let output = t.status(&[
        ("ENABLE_RADARR", "true"),
        ("RADARR_URL", "http://127.0.0.1:9"),
    ]);
    assert_success(&output);
    assert_stdout_contains(&output, "api key ABCD…");
    // Never print the full key.
    let out = stdout(&output);
    assert!(!out.contains("ABCDEF1234567890"));
}

#[test]
fn configure_unknown_service_fails() {
    let t = Test::new();

    let output = t.configure("flurble", &[]);
    assert_failure(&output);
    assert_stderr_contains(&output, "unknown service: flurble");
}

#[test]
fn configure_all_with_nothing_enabled_warns() {
    let t = Test::new();

    let output = t.configure("all", &[]);
    assert_success(&output);
    assert_stdout_contains(&output, "no services enabled");
}

#[test]
fn env_file_flag_is_honored() {
    let t = Test::new();
    let env_file = t.write_file(
        "custom.env",
        "ENABLE_RADARR=true\nRADARR_URL=http://127.0.0.1:9\n",
    );

    let mut cmd = t.cmd();
    cmd.args(["--env-file", env_file.to_str().unwrap(), "status"]);
    let output = cmd.output().expect("failed to run surge status");

    assert_success(&output);
    assert_stdout_contains(&output, "Radarr");
}

#[test]
fn audit_with_empty_stack_finds_nothing() {
    let t = Test::new();

    let output = t.audit(&[]);
    assert_success(&output);
    assert_stdout_contains(&output, "no issues found");
}

#[test]
fn audit_flags_default_nzbget_password() {
    let t = Test::new();

    let output = t.audit(&[("ENABLE_NZBGET", "true")]);
    assert_success(&output);
    assert_stdout_contains(&output, "default password");
    assert_stdout_contains(&output, "High severity");
}

#[test]
fn audit_flags_stale_config_for_disabled_service() {
    let t = Test::new();
    t.write_config(
        "Radarr/config/config.xml",
        "<Config><ApiKey>ABCDEF1234567890</ApiKey></Config>",
    );

    let output = t.audit(&[]);
    assert_success(&output);
    assert_stdout_contains(&output, "disabled but still has a config on disk");
}

#[test]
fn completions_bash_prints_script() {
    let t = Test::new();

    let output = t
        .cmd()
        .args(["completions", "bash"])
        .output()
        .expect("failed to run surge completions");

    assert_success(&output);
    assert_stdout_contains(&output, "_surge");
}

#[test]
fn deploy_without_docker_prints_hint() {
    let t = Test::new();

    let output = t
        .cmd()
        .env("PATH", "")
        .arg("deploy")
        .output()
        .expect("failed to run surge deploy");

    assert_failure(&output);
    assert_stderr_contains(&output, "docker not found in PATH");
    assert_stdout_contains(&output, "is docker installed");
}

#[test]
fn version_flag_prints_version() {
    let t = Test::new();

    t.cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("surge"));
}

#[test]
fn help_lists_all_commands() {
    let t = Test::new();

    let output = t
        .cmd()
        .arg("--help")
        .output()
        .expect("failed to run surge --help");

    assert_success(&output);
    for command in [
        "configure",
        "status",
        "audit",
        "wizard",
        "deploy",
        "monitor",
        "completions",
    ] {
        assert_stdout_contains(&output, command);
    }
}
