//! Posterizarr config generator.

use serde_json::json;

use crate::core::env::Env;
use crate::core::render;
use crate::core::report::Report;
use crate::core::service::{Service, ServiceKind};
use crate::error::Result;

use super::arr;

pub fn configure(env: &Env) -> Result<Report> {
    let mut report = Report::new("Posterizarr");

    let plex = Service::from_env(ServiceKind::Plex, env)?;
    let plex_token = env.get_or("PLEX_TOKEN", "");
    let tmdb_key = env.get_or("TMDB_API_KEY", "");
    if tmdb_key.is_empty() {
        report.skip("tmdb api key present", "TMDB_API_KEY not set");
    } else {
        report.pass("tmdb api key present");
    }

    let doc = json!({
        "ApiPart": {
            "tvdbapi": "",
            "tmdbtoken": tmdb_key,
            "FanartTvAPIKey": "",
            "PlexToken": plex_token,
            "FavProvider": "tmdb",
            "PreferredLanguageOrder": ["xx", "en"],
        },
        "PlexPart": {
            "PlexUrl": arr::base_str(&plex),
            "LibstoExclude": [],
            "UsePlex": true,
        },
        "PrerequisitePart": {
            "AssetPath": "/assets",
            "show_skipped": false,
            "maxLogs": 9,
            "logLevel": 2,
            "SeasonPosters": true,
            "BackgroundPosters": false,
            "TitleCards": true,
        },
    });

    match render::write_json(
        &env.storage_path().join("Posterizarr/config/config.json"),
        &doc,
    ) {
        Ok(()) => report.pass("config.json written"),
        Err(err) => report.fail("config.json written", err.to_string()),
    }

    Ok(report)
}
