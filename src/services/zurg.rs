//! Zurg config generator plus the rclone WebDAV remote that mounts it.

use serde_json::json;

use crate::core::env::Env;
use crate::core::render;
use crate::core::report::Report;
use crate::error::Result;

const RCLONE_REMOTE: &str = "[zurg]\n\
type = webdav\n\
url = http://zurg:9999/dav\n\
vendor = other\n\
pacer_min_sleep = 0\n";

pub fn configure(env: &Env) -> Result<Report> {
    let mut report = Report::new("Zurg");

    let Some(token) = env.get("RD_API_TOKEN").map(str::to_string) else {
        report.fail("real-debrid token present", "RD_API_TOKEN not set");
        return Ok(report);
    };
    report.pass("real-debrid token present");

    let config = json!({
        "zurg": "v1",
        "token": token,
        "host": "0.0.0.0",
        "port": 9999,
        "concurrent_workers": 20,
        "check_for_changes_every_secs": 10,
        "retain_rd_torrent_name": true,
        "directories": {
            "__all__": {
                "group": 1,
                "filters": [{"regex": "/.*/"}],
            },
        },
    });
    match render::write_yaml(&env.storage_path().join("Zurg/config/config.yml"), &config) {
        Ok(()) => report.pass("config.yml written"),
        Err(err) => report.fail("config.yml written", err.to_string()),
    }

    match render::write_text(
        &env.storage_path().join("Rclone/rclone.conf"),
        RCLONE_REMOTE,
    ) {
        Ok(()) => report.pass("rclone webdav remote written"),
        Err(err) => report.fail("rclone webdav remote written", err.to_string()),
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_config_and_rclone_remote() {
        let dir = tempfile::tempdir().unwrap();
        let env = Env::from_pairs([
            ("STORAGE_PATH", dir.path().to_str().unwrap()),
            ("RD_API_TOKEN", "rdtoken123456"),
        ]);

        let report = configure(&env).unwrap();
        assert!(report.succeeded());

        let config =
            std::fs::read_to_string(dir.path().join("Zurg/config/config.yml")).unwrap();
        assert!(config.contains("token: rdtoken123456"));
        assert!(config.contains("port: 9999"));

        let rclone = std::fs::read_to_string(dir.path().join("Rclone/rclone.conf")).unwrap();
        assert!(rclone.contains("type = webdav"));
        assert!(rclone.contains("url = http://zurg:9999/dav"));
    }

    #[test]
    fn missing_token_fails_without_writing() {
        let dir = tempfile::tempdir().unwrap();
        let env = Env::from_pairs([("STORAGE_PATH", dir.path().to_str().unwrap())]);

        let report = configure(&env).unwrap();
        assert!(!report.succeeded());
        assert!(!dir.path().join("Zurg/config/config.yml").exists());
    }
}
