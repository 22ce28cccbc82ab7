//! Audit command - security posture checklist.
//!
//! Read-only: re-runs discovery across all services and reports findings
//! grouped by severity. Exit code stays zero; findings are console text.

use std::fmt;

use crate::cli::output;
use crate::core::debrid::{self, DebridProvider};
use crate::core::discover;
use crate::core::env::Env;
use crate::core::http;
use crate::core::service::{Service, ServiceKind};
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    High,
    Medium,
    Low,
}

pub struct Finding {
    pub severity: Severity,
    pub message: String,
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

const DEBRID_CONSUMERS: &[ServiceKind] = &[
    ServiceKind::RdtClient,
    ServiceKind::Zurg,
    ServiceKind::Decypharr,
];

/// Collect findings without printing. Separated for tests.
pub fn scan(env: &Env) -> Result<Vec<Finding>> {
    let mut findings = Vec::new();
    let client = http::client()?;

    // Debrid consumers without a working token.
    let consumers: Vec<&ServiceKind> = DEBRID_CONSUMERS
        .iter()
        .filter(|kind| env.enabled(**kind))
        .collect();
    if !consumers.is_empty() {
        match debrid::first_configured(env) {
            None => findings.push(Finding {
                severity: Severity::High,
                message: format!(
                    "{} enabled but no debrid token configured",
                    consumers
                        .iter()
                        .map(|k| k.name())
                        .collect::<Vec<_>>()
                        .join(", ")
                ),
            }),
            Some((provider, token)) => {
                if !provider.validate(&client, &token) {
                    findings.push(Finding {
                        severity: Severity::High,
                        message: format!(
                            "{} rejected the token in {}",
                            provider.name(),
                            provider.token_var()
                        ),
                    });
                }
            }
        }
    }

    // Default NZBGet credentials.
    if env.enabled(ServiceKind::NzbGet) && env.get_or("NZBGET_PASS", "tegbzn6789") == "tegbzn6789" {
        findings.push(Finding {
            severity: Severity::High,
            message: "NZBGet is using the shipped default password".to_string(),
        });
    }

    // World-readable .env with tokens in it.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let env_file = std::path::Path::new(".env");
        if let Ok(metadata) = std::fs::metadata(env_file) {
            if metadata.permissions().mode() & 0o044 != 0 {
                findings.push(Finding {
                    severity: Severity::High,
                    message: ".env is readable by other users (chmod 600 .env)".to_string(),
                });
            }
        }
    }

    // Per-service key checks.
    for kind in ServiceKind::ALL {
        if !env.enabled(kind) {
            continue;
        }
        let service = Service::from_env(kind, env)?;
        if let Some(key) = &service.api_key {
            if !discover::looks_valid(key) {
                findings.push(Finding {
                    severity: Severity::Medium,
                    message: format!("{} api key looks malformed or too short", kind.name()),
                });
            }
        }
    }

    // *arr endpoints answering without auth.
    for (kind, probe) in [
        (ServiceKind::Radarr, "api/v3/system/status"),
        (ServiceKind::Sonarr, "api/v3/system/status"),
        (ServiceKind::Prowlarr, "api/v1/system/status"),
    ] {
        if !env.enabled(kind) {
            continue;
        }
        let service = Service::from_env(kind, env)?;
        let Some(url) = service.url(probe) else {
            continue;
        };
        if let Ok(response) = client.get(&url).send() {
            if response.status().is_success() {
                findings.push(Finding {
                    severity: Severity::Medium,
                    message: format!("{} answers its API without an api key", kind.name()),
                });
            }
        }
    }

    // Stale configs for services that are switched off.
    for kind in ServiceKind::ALL {
        if env.enabled(kind) {
            continue;
        }
        if let Some(rel) = kind.config_file() {
            if env.storage_path().join(rel).exists() {
                findings.push(Finding {
                    severity: Severity::Low,
                    message: format!("{} is disabled but still has a config on disk", kind.name()),
                });
            }
        }
    }

    // Unused debrid tokens are worth knowing about too.
    for provider in DebridProvider::ALL {
        if provider.token(env).is_some() && consumers.is_empty() {
            findings.push(Finding {
                severity: Severity::Low,
                message: format!(
                    "{} set but no debrid consumer is enabled",
                    provider.token_var()
                ),
            });
        }
    }

    Ok(findings)
}

pub fn execute(env: &Env) -> Result<()> {
    output::section("Audit");

    let findings = scan(env)?;

    if findings.is_empty() {
        output::success("no issues found");
        output::dimmed("(static checks only, review exposed ports and reverse proxy auth manually)");
        return Ok(());
    }

    output::warn(&format!(
        "{} potential issue{} found",
        findings.len(),
        if findings.len() == 1 { "" } else { "s" }
    ));
    output::blank();

    let high: Vec<_> = findings
        .iter()
        .filter(|f| f.severity == Severity::High)
        .collect();
    let medium: Vec<_> = findings
        .iter()
        .filter(|f| f.severity == Severity::Medium)
        .collect();
    let low: Vec<_> = findings
        .iter()
        .filter(|f| f.severity == Severity::Low)
        .collect();

    if !high.is_empty() {
        output::warn(&format!("High severity ({}):", high.len()));
        for finding in &high {
            output::list_item(&format!("{finding}"));
        }
        output::blank();
    }

    if !medium.is_empty() {
        output::dimmed(&format!("Medium severity ({}):", medium.len()));
        for finding in &medium {
            output::list_item(&format!("{finding}"));
        }
        output::blank();
    }

    if !low.is_empty() {
        output::dimmed(&format!("Low severity ({}):", low.len()));
        for finding in &low {
            output::list_item(&format!("{finding}"));
        }
        output::blank();
    }

    output::hint("rotate any exposed credentials and enable auth on every *arr UI");

    Ok(())
}
