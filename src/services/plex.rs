//! Plex wiring: token check and library visibility probe.
//!
//! Plex itself is configured through its own first-run flow; Surge only
//! verifies the token works so the downstream consumers (Tautulli, Kometa,
//! Overseerr) can be wired against it.

use serde_json::Value;

use crate::core::env::Env;
use crate::core::http::{self, ApiClient, PLEX_TOKEN_HEADER};
use crate::core::poll::Poller;
use crate::core::report::Report;
use crate::core::service::{Service, ServiceKind};
use crate::error::Result;

pub fn configure(env: &Env) -> Result<Report> {
    let mut report = Report::new("Plex");

    let Some(token) = env.get("PLEX_TOKEN").map(str::to_string) else {
        report.fail("plex token present", "PLEX_TOKEN not set");
        return Ok(report);
    };
    report.pass("plex token present");

    let service = Service::from_env(ServiceKind::Plex, env)?;
    let Some(url) = service.url("identity") else {
        report.fail("service ready", "no http endpoint");
        return Ok(report);
    };

    let client = http::client()?;
    if !Poller::from_env(env).wait(&client, &url, Some((PLEX_TOKEN_HEADER, &token))) {
        report.fail("service ready", "no answer within budget");
        return Ok(report);
    }
    report.pass("service ready");

    let Some(base) = service.base_url.clone() else {
        return Ok(report);
    };
    let api = ApiClient::new("Plex", base, Some(token))?.with_header(PLEX_TOKEN_HEADER);
    match api.get_json::<Value>("library/sections") {
        Ok(body) => {
            let count = body
                .pointer("/MediaContainer/size")
                .and_then(Value::as_u64)
                .unwrap_or(0);
            report.pass(&format!("library sections visible ({count})"));
        }
        Err(err) => report.fail("library sections visible", err.to_string()),
    }

    Ok(report)
}
