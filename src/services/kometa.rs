//! Kometa config generator.

use serde_json::json;

use crate::core::env::Env;
use crate::core::render;
use crate::core::report::Report;
use crate::core::service::{Service, ServiceKind};
use crate::error::Result;

use super::arr;

pub fn configure(env: &Env) -> Result<Report> {
    let mut report = Report::new("Kometa");

    let plex = Service::from_env(ServiceKind::Plex, env)?;
    let plex_token = env.get_or("PLEX_TOKEN", "");
    if plex_token.is_empty() {
        report.skip("plex token present", "PLEX_TOKEN not set");
    } else {
        report.pass("plex token present");
    }

    let tmdb_key = env.get_or("TMDB_API_KEY", "");
    if tmdb_key.is_empty() {
        report.fail("tmdb api key present", "TMDB_API_KEY not set");
    } else {
        report.pass("tmdb api key present");
    }

    let mut libraries = serde_json::Map::new();
    libraries.insert(
        env.get_or("KOMETA_MOVIE_LIBRARY", "Movies"),
        json!({"collection_files": [{"default": "basic"}, {"default": "imdb"}]}),
    );
    libraries.insert(
        env.get_or("KOMETA_TV_LIBRARY", "TV Shows"),
        json!({"collection_files": [{"default": "basic"}]}),
    );

    let doc = json!({
        "libraries": libraries,
        "plex": {
            "url": arr::base_str(&plex),
            "token": plex_token,
            "timeout": 60,
            "clean_bundles": false,
            "empty_trash": false,
            "optimize": false,
        },
        "tmdb": {
            "apikey": tmdb_key,
            "language": env.get_or("KOMETA_LANGUAGE", "en"),
            "cache_expiration": 60,
        },
        "settings": {
            "cache": true,
            "asset_directory": "/config/assets",
            "sync_mode": "append",
        },
    });

    match render::write_yaml(&env.storage_path().join("Kometa/config/config.yml"), &doc) {
        Ok(()) => report.pass("config.yml written"),
        Err(err) => report.fail("config.yml written", err.to_string()),
    }

    Ok(report)
}
