//! Status command - read-only connectivity checklist.
//!
//! Re-runs the discovery and a single-attempt readiness probe for every
//! enabled service. Never exits non-zero on findings; this is a reporter.

use crate::cli::output;
use crate::core::discover;
use crate::core::env::Env;
use crate::core::http;
use crate::core::poll::Poller;
use crate::core::service::{Service, ServiceKind};
use crate::error::Result;

pub fn execute(env: &Env) -> Result<()> {
    output::section("Status");
    output::kv("storage", env.storage_path().display());

    let enabled: Vec<ServiceKind> = ServiceKind::ALL
        .into_iter()
        .filter(|kind| env.enabled(*kind))
        .collect();

    if enabled.is_empty() {
        output::blank();
        output::dimmed("no services enabled");
        output::hint("set ENABLE_<SERVICE>=true in the environment or .env file");
        return Ok(());
    }

    let client = http::client()?;
    let mut passed = 0;
    let mut total = 0;

    for kind in enabled {
        output::blank();
        output::header(kind.name());

        let service = Service::from_env(kind, env)?;

        if let Some(url) = service.url("") {
            total += 1;
            let header = service
                .api_key
                .as_deref()
                .map(|key| (http::API_KEY_HEADER, key));
            if Poller::once().wait(&client, &url, header) {
                output::success(&format!("reachable at {url}"));
                passed += 1;
            } else {
                output::failure(&format!("unreachable at {url}"));
            }
        }

        if kind.key_source().is_some() {
            total += 1;
            match &service.api_key {
                Some(key) => {
                    output::success(&format!("api key {}", discover::mask(key)));
                    passed += 1;
                }
                None => output::failure("api key not found"),
            }
        }
    }

    output::blank();
    output::rule();
    output::dimmed(&format!("{passed}/{total} checks passed"));

    Ok(())
}
