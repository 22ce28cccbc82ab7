//! Bazarr config generator.
//!
//! Bazarr is wired by file, not by API: its `config.yaml` is rendered before
//! the container starts, carrying the discovered *arr keys. An existing
//! `auth.apikey` is preserved so a re-run does not rotate it.

use serde_json::json;

use crate::core::discover::{self, KeySource};
use crate::core::env::Env;
use crate::core::render;
use crate::core::report::Report;
use crate::core::service::{Service, ServiceKind};
use crate::error::Result;

pub fn configure(env: &Env) -> Result<Report> {
    let mut report = Report::new("Bazarr");
    let config_path = env.storage_path().join("Bazarr/config/config.yaml");

    let api_key = discover::read_key(&config_path, KeySource::YamlPath(&["auth", "apikey"]))?
        .filter(|key| discover::looks_valid(key))
        .unwrap_or_else(discover::generate_key);
    report.pass("api key ensured");

    let mut doc = json!({
        "general": {
            "ip": "0.0.0.0",
            "port": 6767,
            "base_url": "",
            "use_sonarr": false,
            "use_radarr": false,
        },
        "auth": {
            "type": "None",
            "apikey": api_key,
        },
    });

    for (kind, flag, port) in [
        (ServiceKind::Sonarr, "use_sonarr", 8989),
        (ServiceKind::Radarr, "use_radarr", 7878),
    ] {
        let label = format!("{} connection", kind.name().to_lowercase());
        if !env.enabled(kind) {
            report.skip(&label, "service disabled");
            continue;
        }
        let service = Service::from_env(kind, env)?;
        let Some(key) = service.api_key.clone() else {
            report.skip(&label, "no api key discovered yet");
            continue;
        };
        doc["general"][flag] = json!(true);
        doc[kind.slug()] = json!({
            "ip": kind.slug(),
            "port": port,
            "base_url": "/",
            "ssl": false,
            "apikey": key,
        });
        report.pass(&label);
    }

    render::write_yaml(&config_path, &doc)?;
    report.pass("config.yaml written");

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn existing_api_key_is_preserved() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("Bazarr/config/config.yaml");
        std::fs::create_dir_all(config.parent().unwrap()).unwrap();
        std::fs::write(&config, "auth:\n  apikey: keepthiskey123\n").unwrap();

        let env = Env::from_pairs([("STORAGE_PATH", dir.path().to_str().unwrap())]);
        configure(&env).unwrap();

        let written = std::fs::read_to_string(&config).unwrap();
        assert!(written.contains("keepthiskey123"));
    }

    #[test]
    fn sonarr_block_carries_discovered_key() {
        let dir = tempfile::tempdir().unwrap();
        let sonarr_config = dir.path().join("Sonarr/config");
        std::fs::create_dir_all(&sonarr_config).unwrap();
        std::fs::write(
            sonarr_config.join("config.xml"),
            "<Config><ApiKey>SONARRKEY1234567</ApiKey></Config>",
        )
        .unwrap();

        let env = Env::from_pairs([
            ("STORAGE_PATH", dir.path().to_str().unwrap()),
            ("ENABLE_SONARR", "true"),
        ]);
        let report = configure(&env).unwrap();
        assert!(report.succeeded());

        let written =
            std::fs::read_to_string(dir.path().join("Bazarr/config/config.yaml")).unwrap();
        assert!(written.contains("SONARRKEY1234567"));
        assert!(written.contains("use_sonarr: true"));
    }
}
