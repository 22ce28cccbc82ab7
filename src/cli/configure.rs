//! Configure command.
//!
//! Runs one service's wiring, or every enabled one in dependency order. Step
//! failures are non-fatal: each run prints its checklist and the `all` form
//! ends with a services-level tally.

use crate::cli::output;
use crate::core::env::Env;
use crate::core::service::ServiceKind;
use crate::error::{Result, SurgeError};
use crate::services;

pub fn execute(target: &str, env: &Env) -> Result<()> {
    if target.eq_ignore_ascii_case("all") {
        return configure_all(env);
    }

    let kind = ServiceKind::from_slug(target)
        .ok_or_else(|| SurgeError::UnknownService(target.to_string()))?;

    let report = services::configure(kind, env)?;
    report.print();
    Ok(())
}

fn configure_all(env: &Env) -> Result<()> {
    let enabled: Vec<ServiceKind> = ServiceKind::ALL
        .into_iter()
        .filter(|kind| env.enabled(*kind))
        .collect();

    if enabled.is_empty() {
        output::warn("no services enabled");
        output::hint("set ENABLE_<SERVICE>=true in the environment or .env file");
        return Ok(());
    }

    let mut succeeded = 0;
    for kind in &enabled {
        match services::configure(*kind, env) {
            Ok(report) => {
                report.print();
                if report.succeeded() {
                    succeeded += 1;
                }
            }
            Err(err) => {
                // One broken service never stops the rest of the stack.
                output::section(kind.name());
                output::failure(&err.to_string());
            }
        }
    }

    output::blank();
    output::rule();
    if succeeded == enabled.len() {
        output::success(&format!(
            "configured {succeeded}/{} services",
            enabled.len()
        ));
    } else {
        output::warn(&format!(
            "configured {succeeded}/{} services",
            enabled.len()
        ));
        output::hint(&format!(
            "re-run {} once the failing containers are up",
            output::cmd("surge configure all")
        ));
    }

    Ok(())
}
