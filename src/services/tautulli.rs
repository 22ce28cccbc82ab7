//! Tautulli wiring: ensure an API key, write the Plex connection block.

use crate::core::discover;
use crate::core::env::Env;
use crate::core::report::Report;
use crate::core::service::{Service, ServiceKind};
use crate::error::Result;

pub fn configure(env: &Env) -> Result<Report> {
    let mut report = Report::new("Tautulli");
    let ini = env.storage_path().join("Tautulli/config/config.ini");

    match discover::ensure_ini_key(&ini, "General", "api_key") {
        Ok(_) => report.pass("api key ensured"),
        Err(err) => report.fail("api key ensured", err.to_string()),
    }

    match env.get("PLEX_TOKEN") {
        Some(token) => {
            let plex = Service::from_env(ServiceKind::Plex, env)?;
            let (host, port) = plex
                .base_url
                .as_ref()
                .map(|u| {
                    (
                        u.host_str().unwrap_or("plex").to_string(),
                        u.port_or_known_default().unwrap_or(32400),
                    )
                })
                .unwrap_or_else(|| ("plex".to_string(), 32400));

            let port = port.to_string();
            match discover::set_ini_values(
                &ini,
                "PMS",
                &[
                    ("pms_ip", host.as_str()),
                    ("pms_port", port.as_str()),
                    ("pms_token", token),
                    ("pms_ssl", "0"),
                ],
            ) {
                Ok(()) => report.pass("plex connection written"),
                Err(err) => report.fail("plex connection written", err.to_string()),
            }
        }
        None => report.skip("plex connection written", "PLEX_TOKEN not set"),
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_pms_block_and_keeps_api_key() {
        let dir = tempfile::tempdir().unwrap();
        let env = Env::from_pairs([
            ("STORAGE_PATH", dir.path().to_str().unwrap()),
            ("PLEX_TOKEN", "plextoken1234"),
        ]);

        let report = configure(&env).unwrap();
        assert!(report.succeeded());

        let ini = dir.path().join("Tautulli/config/config.ini");
        let contents = std::fs::read_to_string(&ini).unwrap();
        assert!(contents.contains("[General]"));
        assert!(contents.contains("api_key = "));
        assert!(contents.contains("pms_ip = plex"));
        assert!(contents.contains("pms_token = plextoken1234"));

        // Second run keeps the generated key
        let key_before = discover::read_key(
            &ini,
            discover::KeySource::Ini {
                section: "General",
                key: "api_key",
            },
        )
        .unwrap();
        configure(&env).unwrap();
        let key_after = discover::read_key(
            &ini,
            discover::KeySource::Ini {
                section: "General",
                key: "api_key",
            },
        )
        .unwrap();
        assert_eq!(key_before, key_after);
    }
}
