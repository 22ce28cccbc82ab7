//! Homepage dashboard generator.
//!
//! One tile per enabled service, grouped the way the stack is used; widgets
//! are attached where Homepage has one and a key was discovered.

use serde_json::{json, Value};

use crate::core::env::Env;
use crate::core::render;
use crate::core::report::Report;
use crate::core::service::{Service, ServiceKind};
use crate::error::Result;

use super::arr;

const MEDIA: &[ServiceKind] = &[
    ServiceKind::Plex,
    ServiceKind::Overseerr,
    ServiceKind::Tautulli,
];
const AUTOMATION: &[ServiceKind] = &[
    ServiceKind::Radarr,
    ServiceKind::Sonarr,
    ServiceKind::Prowlarr,
    ServiceKind::Bazarr,
];
const DOWNLOADS: &[ServiceKind] = &[
    ServiceKind::NzbGet,
    ServiceKind::RdtClient,
    ServiceKind::Zurg,
    ServiceKind::Decypharr,
];

/// Widget type Homepage knows for this service, if any.
fn widget_type(kind: ServiceKind) -> Option<&'static str> {
    match kind {
        ServiceKind::Plex => Some("plex"),
        ServiceKind::Overseerr => Some("overseerr"),
        ServiceKind::Tautulli => Some("tautulli"),
        ServiceKind::Radarr => Some("radarr"),
        ServiceKind::Sonarr => Some("sonarr"),
        ServiceKind::Prowlarr => Some("prowlarr"),
        ServiceKind::Bazarr => Some("bazarr"),
        _ => None,
    }
}

fn tile(kind: ServiceKind, env: &Env) -> Result<Option<Value>> {
    if !env.enabled(kind) {
        return Ok(None);
    }
    let service = Service::from_env(kind, env)?;
    let href = arr::base_str(&service);

    let mut entry = json!({
        "icon": format!("{}.png", kind.slug()),
        "href": href,
    });

    let key = match kind {
        ServiceKind::Plex => env.get("PLEX_TOKEN").map(str::to_string),
        _ => service.api_key.clone(),
    };
    if let (Some(widget), Some(key)) = (widget_type(kind), key) {
        entry["widget"] = json!({
            "type": widget,
            "url": arr::base_str(&service),
            "key": key,
        });
    }

    let mut tile = serde_json::Map::new();
    tile.insert(kind.name().to_string(), entry);
    Ok(Some(Value::Object(tile)))
}

fn group(name: &str, kinds: &[ServiceKind], env: &Env) -> Result<Option<Value>> {
    let mut tiles = Vec::new();
    for kind in kinds {
        if let Some(tile) = tile(*kind, env)? {
            tiles.push(tile);
        }
    }
    if tiles.is_empty() {
        return Ok(None);
    }
    let mut group = serde_json::Map::new();
    group.insert(name.to_string(), Value::Array(tiles));
    Ok(Some(Value::Object(group)))
}

pub fn configure(env: &Env) -> Result<Report> {
    let mut report = Report::new("Homepage");

    let mut groups = Vec::new();
    for (name, kinds) in [
        ("Media", MEDIA),
        ("Automation", AUTOMATION),
        ("Downloads", DOWNLOADS),
    ] {
        if let Some(group) = group(name, kinds, env)? {
            groups.push(group);
        }
    }

    let tiles: usize = groups
        .iter()
        .filter_map(|g| g.as_object())
        .flat_map(|g| g.values())
        .filter_map(|v| v.as_array())
        .map(|a| a.len())
        .sum();

    match render::write_yaml(
        &env.storage_path().join("Homepage/config/services.yaml"),
        &Value::Array(groups),
    ) {
        Ok(()) => report.pass(&format!("services.yaml written ({tiles} tiles)")),
        Err(err) => report.fail("services.yaml written", err.to_string()),
    }

    Ok(report)
}
