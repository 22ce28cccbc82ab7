//! Placeholdarr config generator.

use serde_json::json;

use crate::core::env::Env;
use crate::core::render;
use crate::core::report::Report;
use crate::core::service::{Service, ServiceKind};
use crate::error::Result;

use super::arr;

pub fn configure(env: &Env) -> Result<Report> {
    let mut report = Report::new("Placeholdarr");

    let plex = Service::from_env(ServiceKind::Plex, env)?;
    let mut doc = json!({
        "plex": {
            "url": arr::base_str(&plex),
            "token": env.get_or("PLEX_TOKEN", ""),
        },
        "placeholder": {
            "strategy": env.get_or("PLACEHOLDARR_STRATEGY", "hardlink"),
            "dummy_file_path": "/data/dummy.mp4",
            "check_interval": 60,
        },
    });

    for kind in [ServiceKind::Radarr, ServiceKind::Sonarr] {
        let label = format!("{} connection", kind.name().to_lowercase());
        if !env.enabled(kind) {
            report.skip(&label, "service disabled");
            continue;
        }
        let service = Service::from_env(kind, env)?;
        let Some(key) = &service.api_key else {
            report.skip(&label, "no api key discovered yet");
            continue;
        };
        doc[kind.slug()] = json!({
            "url": arr::base_str(&service),
            "api_key": key,
        });
        report.pass(&label);
    }

    match render::write_yaml(
        &env.storage_path().join("Placeholdarr/config/config.yml"),
        &doc,
    ) {
        Ok(()) => report.pass("config.yml written"),
        Err(err) => report.fail("config.yml written", err.to_string()),
    }

    Ok(report)
}
