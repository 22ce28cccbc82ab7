//! Shared helpers for the *arr family (Radarr/Sonarr/Prowlarr).
//!
//! The family shares one API shape: `X-Api-Key` auth, a `system/status`
//! readiness endpoint, and collection endpoints where entries are deduped by
//! name.

use serde_json::{json, Value};

use crate::core::env::Env;
use crate::core::http;
use crate::core::poll::Poller;
use crate::core::report::Report;
use crate::core::service::Service;
use crate::error::Result;

/// Wait on `/api/<version>/system/status`, recording the step. Returns false
/// once the budget is exhausted; callers stop there and return their report.
pub fn wait_ready(service: &Service, env: &Env, api_version: &str, report: &mut Report) -> bool {
    let Some(url) = service.url(&format!("api/{api_version}/system/status")) else {
        report.fail("service ready", "no http endpoint");
        return false;
    };
    let client = match http::client() {
        Ok(client) => client,
        Err(err) => {
            report.fail("service ready", err.to_string());
            return false;
        }
    };
    let header = service
        .api_key
        .as_deref()
        .map(|key| (http::API_KEY_HEADER, key));
    let poller = Poller::from_env(env);
    if poller.wait(&client, &url, header) {
        report.pass("service ready");
        true
    } else {
        report.fail(
            "service ready",
            format!("no answer after {} attempts", poller.attempts),
        );
        false
    }
}

/// Record key discovery; `None` means the dependent wiring steps are skipped.
pub fn require_api_key(service: &Service, report: &mut Report) -> Option<String> {
    match &service.api_key {
        Some(key) => {
            report.pass("api key discovered");
            Some(key.clone())
        }
        None => {
            report.fail(
                "api key discovered",
                format!(
                    "not found in {}",
                    service
                        .config_path
                        .as_ref()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| "config".to_string())
                ),
            );
            None
        }
    }
}

/// Radarr/Sonarr download-client payload for NZBGet.
///
/// `category_field` is `movieCategory` for Radarr, `tvCategory` for Sonarr.
pub fn nzbget_payload(category_field: &str, category: &str, env: &Env) -> Value {
    json!({
        "enable": true,
        "protocol": "usenet",
        "priority": 1,
        "removeCompletedDownloads": true,
        "removeFailedDownloads": true,
        "name": "NZBGet",
        "implementation": "Nzbget",
        "implementationName": "NZBGet",
        "configContract": "NzbgetSettings",
        "fields": [
            {"name": "host", "value": "nzbget"},
            {"name": "port", "value": 6789},
            {"name": "useSsl", "value": false},
            {"name": "username", "value": env.get_or("NZBGET_USER", "nzbget")},
            {"name": "password", "value": env.get_or("NZBGET_PASS", "tegbzn6789")},
            {"name": category_field, "value": category},
        ]
    })
}

/// Radarr/Sonarr download-client payload for rdt-client, which speaks the
/// qBittorrent API.
pub fn rdt_client_payload(category_field: &str, category: &str, env: &Env) -> Value {
    json!({
        "enable": true,
        "protocol": "torrent",
        "priority": 1,
        "removeCompletedDownloads": true,
        "removeFailedDownloads": true,
        "name": "RDT-Client",
        "implementation": "QBittorrent",
        "implementationName": "qBittorrent",
        "configContract": "QBittorrentSettings",
        "fields": [
            {"name": "host", "value": "rdtclient"},
            {"name": "port", "value": 6500},
            {"name": "useSsl", "value": false},
            {"name": "username", "value": env.get_or("RDTCLIENT_USER", "")},
            {"name": "password", "value": env.get_or("RDTCLIENT_PASS", "")},
            {"name": category_field, "value": category},
        ]
    })
}

/// Base URL without the trailing slash `Url` serialization appends.
pub fn base_str(service: &Service) -> String {
    service
        .base_url
        .as_ref()
        .map(|u| u.as_str().trim_end_matches('/').to_string())
        .unwrap_or_default()
}

/// Register NZBGet and rdt-client (when enabled) as download clients.
pub fn wire_download_clients(
    client: &http::ApiClient,
    api_version: &str,
    category_field: &str,
    usenet_category: &str,
    torrent_category: &str,
    env: &Env,
    report: &mut Report,
) -> Result<()> {
    use crate::core::service::ServiceKind;

    let path = format!("api/{api_version}/downloadclient");
    if env.enabled(ServiceKind::NzbGet) {
        report.record_wire(
            "download client NZBGet",
            client.ensure_named(&path, "NZBGet", &nzbget_payload(category_field, usenet_category, env)),
        );
    }
    if env.enabled(ServiceKind::RdtClient) {
        report.record_wire(
            "download client RDT-Client",
            client.ensure_named(
                &path,
                "RDT-Client",
                &rdt_client_payload(category_field, torrent_category, env),
            ),
        );
    }
    Ok(())
}
