//! Prowlarr wiring: register the *arr applications so indexers sync to them.

use serde_json::{json, Value};

use crate::core::env::Env;
use crate::core::report::Report;
use crate::core::service::{Service, ServiceKind};
use crate::error::Result;

use super::arr;

const MOVIE_CATEGORIES: &[u32] = &[2000, 2010, 2020, 2030, 2040, 2045, 2050, 2060];
const TV_CATEGORIES: &[u32] = &[5000, 5010, 5020, 5030, 5040, 5045, 5050];

fn application_payload(prowlarr: &Service, app: &Service, categories: &[u32]) -> Value {
    let name = app.kind.name();
    json!({
        "name": name,
        "syncLevel": "fullSync",
        "implementation": name,
        "implementationName": name,
        "configContract": format!("{name}Settings"),
        "fields": [
            {"name": "prowlarrUrl", "value": arr::base_str(prowlarr)},
            {"name": "baseUrl", "value": arr::base_str(app)},
            {"name": "apiKey", "value": app.api_key.clone().unwrap_or_default()},
            {"name": "syncCategories", "value": categories},
        ]
    })
}

pub fn configure(env: &Env) -> Result<Report> {
    let mut report = Report::new("Prowlarr");
    let prowlarr = Service::from_env(ServiceKind::Prowlarr, env)?;

    if !arr::wait_ready(&prowlarr, env, "v1", &mut report) {
        return Ok(report);
    }
    if arr::require_api_key(&prowlarr, &mut report).is_none() {
        return Ok(report);
    }

    let client = prowlarr.api_client()?;

    for (kind, categories) in [
        (ServiceKind::Radarr, MOVIE_CATEGORIES),
        (ServiceKind::Sonarr, TV_CATEGORIES),
    ] {
        let label = format!("application {}", kind.name());
        if !env.enabled(kind) {
            continue;
        }
        let app = Service::from_env(kind, env)?;
        if app.api_key.is_none() {
            report.skip(&label, "no api key discovered yet");
            continue;
        }
        report.record_wire(
            &label,
            client.ensure_named(
                "api/v1/applications",
                kind.name(),
                &application_payload(&prowlarr, &app, categories),
            ),
        );
    }

    Ok(report)
}
