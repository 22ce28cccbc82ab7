//! rdt-client wiring: debrid token validation and reachability.

use crate::core::debrid;
use crate::core::env::Env;
use crate::core::http;
use crate::core::poll::Poller;
use crate::core::report::Report;
use crate::core::service::{Service, ServiceKind};
use crate::error::Result;

pub fn configure(env: &Env) -> Result<Report> {
    let mut report = Report::new("RDT-Client");

    let Some((provider, token)) = debrid::first_configured(env) else {
        report.fail(
            "debrid token present",
            "no RD/AD/Premiumize/TorBox token in environment",
        );
        return Ok(report);
    };
    report.pass(&format!("debrid token present ({})", provider.name()));

    let client = http::client()?;
    if provider.validate(&client, &token) {
        report.pass("debrid token valid");
    } else {
        report.fail("debrid token valid", "account endpoint rejected the token");
    }

    let service = Service::from_env(ServiceKind::RdtClient, env)?;
    if let Some(url) = service.url("") {
        if Poller::from_env(env).wait(&client, &url, None) {
            report.pass("service ready");
        } else {
            report.fail("service ready", "no answer within budget");
        }
    }

    Ok(report)
}
