//! Monitor command - sleep-and-repeat readiness daemon.
//!
//! One recurring task: probe every enabled service, diff against the previous
//! snapshot, log transitions, optionally notify a webhook. Nothing overlaps;
//! the loop sleeps the whole interval between iterations.

use std::collections::BTreeMap;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cli::output;
use crate::core::env::Env;
use crate::core::http;
use crate::core::poll::Poller;
use crate::core::service::{Service, ServiceKind};
use crate::error::Result;

#[derive(Debug, Default, Serialize, Deserialize)]
struct Snapshot {
    taken_at: Option<DateTime<Utc>>,
    services: BTreeMap<String, bool>,
}

/// Probe every enabled service once.
fn probe(env: &Env) -> Result<BTreeMap<String, bool>> {
    let client = http::client()?;
    let mut up = BTreeMap::new();

    for kind in ServiceKind::ALL {
        if !env.enabled(kind) {
            continue;
        }
        let service = Service::from_env(kind, env)?;
        let Some(url) = service.url("") else {
            continue;
        };
        let header = service
            .api_key
            .as_deref()
            .map(|key| (http::API_KEY_HEADER, key));
        up.insert(
            kind.name().to_string(),
            Poller::once().wait(&client, &url, header),
        );
    }

    Ok(up)
}

fn load_snapshot(path: &std::path::Path) -> Snapshot {
    std::fs::read_to_string(path)
        .ok()
        .and_then(|contents| serde_json::from_str(&contents).ok())
        .unwrap_or_default()
}

fn notify(env: &Env, changes: &[String]) {
    let Some(webhook) = env.get("SURGE_WEBHOOK_URL") else {
        return;
    };
    let client = match http::client() {
        Ok(client) => client,
        Err(_) => return,
    };
    let body = serde_json::json!({ "content": changes.join("\n") });
    if let Err(err) = client.post(webhook).json(&body).send() {
        tracing::warn!("webhook notification failed: {err}");
    }
}

pub fn execute(env: &Env, interval_secs: u64, once: bool) -> Result<()> {
    let state_path = env.storage_path().join(".surge").join("monitor.json");

    if !once {
        output::dimmed(&format!("monitoring every {interval_secs}s, ctrl-c to stop"));
    }

    loop {
        let current = probe(env)?;
        let previous = load_snapshot(&state_path);

        let mut changes = Vec::new();
        for (name, up) in &current {
            match previous.services.get(name) {
                Some(was) if was == up => {}
                Some(_) => {
                    let line = if *up {
                        format!("{name} came back up")
                    } else {
                        format!("{name} went down")
                    };
                    tracing::info!("{line}");
                    if *up {
                        output::success(&line);
                    } else {
                        output::failure(&line);
                    }
                    changes.push(line);
                }
                // First sighting: report only if it's down.
                None => {
                    if !up {
                        let line = format!("{name} is down");
                        output::failure(&line);
                        changes.push(line);
                    }
                }
            }
        }

        if !changes.is_empty() {
            notify(env, &changes);
        }

        let snapshot = Snapshot {
            taken_at: Some(Utc::now()),
            services: current,
        };
        crate::core::render::write_json(&state_path, &snapshot)?;

        if once {
            let up = snapshot.services.values().filter(|v| **v).count();
            output::dimmed(&format!("{up}/{} services up", snapshot.services.len()));
            return Ok(());
        }
        std::thread::sleep(Duration::from_secs(interval_secs));
    }
}
