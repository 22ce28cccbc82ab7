//! NZBGet wiring: reachability and credential check.
//!
//! Registration into Radarr/Sonarr happens from their side; this script only
//! verifies the daemon is up and the configured credentials work.

use serde_json::Value;

use crate::core::env::Env;
use crate::core::http;
use crate::core::poll::Poller;
use crate::core::report::Report;
use crate::core::service::{Service, ServiceKind};
use crate::error::Result;

pub fn configure(env: &Env) -> Result<Report> {
    let mut report = Report::new("NZBGet");
    let service = Service::from_env(ServiceKind::NzbGet, env)?;

    let Some(base) = service.url("") else {
        report.fail("service ready", "no http endpoint");
        return Ok(report);
    };

    let client = http::client()?;
    // The web UI answers 401 without credentials, which still counts as up.
    if !Poller::from_env(env).wait(&client, &base, None) {
        report.fail("service ready", "no answer within budget");
        return Ok(report);
    }
    report.pass("service ready");

    let user = env.get_or("NZBGET_USER", "nzbget");
    let pass = env.get_or("NZBGET_PASS", "tegbzn6789");
    let rpc_url = service.url("jsonrpc/version").unwrap_or_default();
    match client
        .get(&rpc_url)
        .basic_auth(&user, Some(&pass))
        .send()
    {
        Ok(response) if response.status().is_success() => {
            let version = response
                .json::<Value>()
                .ok()
                .and_then(|v| v.get("result").and_then(Value::as_str).map(str::to_string))
                .unwrap_or_else(|| "unknown".to_string());
            report.pass(&format!("credentials accepted (rpc version {version})"));
        }
        Ok(response) => report.fail(
            "credentials accepted",
            format!("status {}", response.status()),
        ),
        Err(err) => report.fail("credentials accepted", err.to_string()),
    }

    Ok(report)
}
