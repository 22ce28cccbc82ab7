//! CineSync `.env` generator.
//!
//! CineSync reads its entire configuration from one `.env` file; every
//! documented key must be present, either env-sourced or defaulted, or the
//! application falls back to surprising built-ins.

use crate::core::env::Env;
use crate::core::render::EnvFile;
use crate::core::report::Report;
use crate::core::service::{Service, ServiceKind};
use crate::error::Result;

/// Every key CineSync documents, with its shipped default.
pub const DOCUMENTED_KEYS: &[(&str, &str)] = &[
    ("SOURCE_DIR", "/mnt/remote/realdebrid/__all__"),
    ("DESTINATION_DIR", "/mnt/media"),
    ("USE_SOURCE_STRUCTURE", "false"),
    ("CINESYNC_LAYOUT", "true"),
    ("ANIME_SEPARATION", "true"),
    ("4K_SEPARATION", "true"),
    ("KIDS_SEPARATION", "false"),
    ("CUSTOM_SHOW_FOLDER", "Shows"),
    ("CUSTOM_4KSHOW_FOLDER", "4KShows"),
    ("CUSTOM_ANIME_SHOW_FOLDER", "AnimeShows"),
    ("CUSTOM_MOVIE_FOLDER", "Movies"),
    ("CUSTOM_4KMOVIE_FOLDER", "4KMovies"),
    ("CUSTOM_ANIME_MOVIE_FOLDER", "AnimeMovies"),
    ("CUSTOM_KIDS_MOVIE_FOLDER", "KidsMovies"),
    ("CUSTOM_KIDS_SHOW_FOLDER", "KidsShows"),
    ("SHOW_RESOLUTION_STRUCTURE", "false"),
    ("MOVIE_RESOLUTION_STRUCTURE", "false"),
    ("LOG_LEVEL", "INFO"),
    ("RCLONE_MOUNT", "false"),
    ("MOUNT_CHECK_INTERVAL", "30"),
    ("TMDB_API_KEY", "your_tmdb_api_key_here"),
    ("LANGUAGE", "English"),
    ("ANIME_SCAN", "false"),
    ("TMDB_FOLDER_ID", "false"),
    ("IMDB_FOLDER_ID", "false"),
    ("TVDB_FOLDER_ID", "false"),
    ("RENAME_ENABLED", "false"),
    ("MEDIAINFO_PARSER", "false"),
    ("RENAME_TAGS", "Resolution"),
    ("MEDIAINFO_TAGS", ""),
    ("MOVIE_COLLECTION_ENABLED", "false"),
    ("RELATIVE_SYMLINK", "false"),
    ("MAX_CORES", "1"),
    ("MAX_PROCESSES", "15"),
    ("SKIP_EXTRAS_FOLDER", "true"),
    ("JUNK_MAX_SIZE_MB", "5"),
    ("ALLOWED_EXTENSIONS", ".mp4,.mkv,.srt,.avi,.mov,.divx,.strm"),
    ("SKIP_ADULT_PATTERNS", "true"),
    ("SLEEP_TIME", "60"),
    ("SYMLINK_CLEANUP_INTERVAL", "600"),
    ("ENABLE_PLEX_UPDATE", "false"),
    ("PLEX_URL", "http://plex:32400"),
    ("PLEX_TOKEN", ""),
    ("CINESYNC_IP", "0.0.0.0"),
    ("CINESYNC_API_PORT", "8082"),
    ("CINESYNC_UI_PORT", "5173"),
    ("CINESYNC_AUTH_ENABLED", "true"),
    ("CINESYNC_USERNAME", "admin"),
    ("CINESYNC_PASSWORD", "admin"),
    ("MEDIAHUB_AUTO_START", "true"),
    ("RTM_AUTO_START", "false"),
    ("FILE_OPERATIONS_AUTO_MODE", "true"),
    ("DB_THROTTLE_RATE", "100"),
    ("DB_MAX_RETRIES", "10"),
    ("DB_RETRY_DELAY", "1.0"),
    ("DB_BATCH_SIZE", "1000"),
    ("DB_MAX_WORKERS", "20"),
];

/// Build the `.env` document: every documented key, environment value first,
/// shipped default otherwise. Plex connection details come from the shared
/// descriptor when not explicitly overridden.
pub fn build(env: &Env) -> Result<EnvFile> {
    let plex = Service::from_env(ServiceKind::Plex, env)?;
    let plex_url = plex
        .base_url
        .as_ref()
        .map(|u| u.as_str().trim_end_matches('/').to_string());

    let mut file = EnvFile::new();
    for (key, default) in DOCUMENTED_KEYS {
        let value = match (*key, &plex_url) {
            ("PLEX_URL", Some(url)) if env.get("PLEX_URL").is_none() => url.clone(),
            _ => env.get_or(key, default),
        };
        file.push(key, value);
    }
    Ok(file)
}

pub fn configure(env: &Env) -> Result<Report> {
    let mut report = Report::new("CineSync");

    if env.get("TMDB_API_KEY").is_some() {
        report.pass("tmdb api key present");
    } else {
        report.skip("tmdb api key present", "using placeholder default");
    }

    let file = build(env)?;
    let count = file.len();
    match file.write(&env.storage_path().join("CineSync/.env")) {
        Ok(()) => report.pass(&format!(".env written ({count} keys)")),
        Err(err) => report.fail(".env written", err.to_string()),
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_documented_key_is_emitted() {
        let file = build(&Env::default()).unwrap();
        assert!(file.len() >= 55);

        let emitted: Vec<&str> = file.keys().collect();
        for (key, _) in DOCUMENTED_KEYS {
            assert!(emitted.contains(key), "missing key {key}");
        }
    }

    #[test]
    fn environment_values_override_defaults() {
        let env = Env::from_pairs([
            ("TMDB_API_KEY", "realkey123456"),
            ("PLEX_TOKEN", "tok"),
        ]);
        let rendered = build(&env).unwrap().render();
        assert!(rendered.contains("TMDB_API_KEY=realkey123456\n"));
        assert!(rendered.contains("PLEX_TOKEN=tok\n"));
        assert!(rendered.contains("CINESYNC_API_PORT=8082\n"));
    }

    #[test]
    fn plex_url_follows_service_descriptor() {
        let env = Env::from_pairs([("PLEX_URL", "http://127.0.0.1:32400")]);
        let rendered = build(&env).unwrap().render();
        assert!(rendered.contains("PLEX_URL=http://127.0.0.1:32400"));
    }
}
