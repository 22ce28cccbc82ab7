//! Decypharr config generator.
//!
//! Builds the debrid provider list from whichever tokens are present, plus the
//! qBittorrent-compatible section the *arrs download through and hooks back to
//! the *arrs themselves.

use serde_json::json;

use crate::core::debrid;
use crate::core::env::Env;
use crate::core::render;
use crate::core::report::Report;
use crate::core::service::{Service, ServiceKind};
use crate::error::Result;

use super::arr;

pub fn configure(env: &Env) -> Result<Report> {
    let mut report = Report::new("Decypharr");

    let providers = debrid::all_configured(env);
    if providers.is_empty() {
        report.fail(
            "debrid providers present",
            "no RD/AD/Premiumize/TorBox token in environment",
        );
        return Ok(report);
    }
    report.pass(&format!("debrid providers present ({})", providers.len()));

    let debrids: Vec<_> = providers
        .iter()
        .map(|(provider, token)| {
            json!({
                "name": provider.slug(),
                "api_key": token,
                "folder": format!("/mnt/remote/{}/__all__", provider.slug()),
                "rate_limit": "250/minute",
                "use_webdav": true,
            })
        })
        .collect();

    let mut arrs = Vec::new();
    for kind in [ServiceKind::Radarr, ServiceKind::Sonarr] {
        if !env.enabled(kind) {
            continue;
        }
        let service = Service::from_env(kind, env)?;
        if let Some(key) = &service.api_key {
            arrs.push(json!({
                "name": kind.slug(),
                "host": arr::base_str(&service),
                "token": key,
            }));
        }
    }

    let doc = json!({
        "url_base": "/",
        "port": "8282",
        "log_level": "info",
        "debrids": debrids,
        "qbittorrent": {
            "download_folder": "/mnt/symlinks",
            "categories": ["radarr", "sonarr"],
            "refresh_interval": 30,
        },
        "arrs": arrs,
        "use_auth": false,
    });

    match render::write_json(&env.storage_path().join("Decypharr/config/config.json"), &doc) {
        Ok(()) => report.pass("config.json written"),
        Err(err) => report.fail("config.json written", err.to_string()),
    }

    Ok(report)
}
