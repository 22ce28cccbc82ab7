//! Overseerr wiring: ensure an API key in settings.json, then probe.

use crate::core::discover;
use crate::core::env::Env;
use crate::core::http;
use crate::core::poll::Poller;
use crate::core::report::Report;
use crate::core::service::{Service, ServiceKind};
use crate::error::Result;

pub fn configure(env: &Env) -> Result<Report> {
    let mut report = Report::new("Overseerr");

    let settings = env.storage_path().join("Overseerr/config/settings.json");
    match discover::ensure_json_key(&settings, "/main/apiKey") {
        Ok(_) => report.pass("api key ensured"),
        Err(err) => report.fail("api key ensured", err.to_string()),
    }

    let service = Service::from_env(ServiceKind::Overseerr, env)?;
    if let Some(url) = service.url("api/v1/status") {
        let client = http::client()?;
        if Poller::from_env(env).wait(&client, &url, None) {
            report.pass("service ready");
        } else {
            report.fail("service ready", "no answer within budget");
        }
    }

    Ok(report)
}
