//! Radarr wiring: root folder plus download clients.

use serde_json::json;

use crate::core::env::Env;
use crate::core::report::Report;
use crate::core::service::{Service, ServiceKind};
use crate::error::Result;

use super::arr;

pub fn configure(env: &Env) -> Result<Report> {
    let mut report = Report::new("Radarr");
    let service = Service::from_env(ServiceKind::Radarr, env)?;

    if !arr::wait_ready(&service, env, "v3", &mut report) {
        return Ok(report);
    }
    if arr::require_api_key(&service, &mut report).is_none() {
        return Ok(report);
    }

    let client = service.api_client()?;

    let root = env.get_or("RADARR_ROOT_FOLDER", "/movies");
    report.record_wire(
        "root folder",
        client.ensure_entry("api/v3/rootfolder", "path", &root, &json!({ "path": root })),
    );

    arr::wire_download_clients(
        &client,
        "v3",
        "movieCategory",
        &env.get_or("NZBGET_MOVIE_CATEGORY", "movies"),
        "radarr",
        env,
        &mut report,
    )?;

    Ok(report)
}
