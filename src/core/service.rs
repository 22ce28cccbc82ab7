//! Service descriptors.
//!
//! A descriptor is ephemeral: rebuilt on every invocation from environment
//! variables and whatever the service has already written to disk. Nothing
//! here is cached between runs.

use std::path::PathBuf;

use url::Url;

use crate::core::discover::{self, KeySource};
use crate::core::env::Env;
use crate::core::http::ApiClient;
use crate::error::{Result, SurgeError};

/// Every application Surge knows how to wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ServiceKind {
    Plex,
    Radarr,
    Sonarr,
    Prowlarr,
    Bazarr,
    Overseerr,
    Tautulli,
    NzbGet,
    RdtClient,
    Zurg,
    Decypharr,
    CineSync,
    Kometa,
    Posterizarr,
    Placeholdarr,
    Homepage,
}

impl ServiceKind {
    /// Configuration order: providers before the services that consume them.
    pub const ALL: [ServiceKind; 16] = [
        ServiceKind::Plex,
        ServiceKind::NzbGet,
        ServiceKind::RdtClient,
        ServiceKind::Zurg,
        ServiceKind::Decypharr,
        ServiceKind::Radarr,
        ServiceKind::Sonarr,
        ServiceKind::Prowlarr,
        ServiceKind::Bazarr,
        ServiceKind::Overseerr,
        ServiceKind::Tautulli,
        ServiceKind::CineSync,
        ServiceKind::Kometa,
        ServiceKind::Posterizarr,
        ServiceKind::Placeholdarr,
        ServiceKind::Homepage,
    ];

    /// Display name, also the storage directory name.
    pub fn name(self) -> &'static str {
        match self {
            ServiceKind::Plex => "Plex",
            ServiceKind::Radarr => "Radarr",
            ServiceKind::Sonarr => "Sonarr",
            ServiceKind::Prowlarr => "Prowlarr",
            ServiceKind::Bazarr => "Bazarr",
            ServiceKind::Overseerr => "Overseerr",
            ServiceKind::Tautulli => "Tautulli",
            ServiceKind::NzbGet => "NZBGet",
            ServiceKind::RdtClient => "RDT-Client",
            ServiceKind::Zurg => "Zurg",
            ServiceKind::Decypharr => "Decypharr",
            ServiceKind::CineSync => "CineSync",
            ServiceKind::Kometa => "Kometa",
            ServiceKind::Posterizarr => "Posterizarr",
            ServiceKind::Placeholdarr => "Placeholdarr",
            ServiceKind::Homepage => "Homepage",
        }
    }

    /// CLI argument spelling, also the container-network hostname.
    pub fn slug(self) -> &'static str {
        match self {
            ServiceKind::Plex => "plex",
            ServiceKind::Radarr => "radarr",
            ServiceKind::Sonarr => "sonarr",
            ServiceKind::Prowlarr => "prowlarr",
            ServiceKind::Bazarr => "bazarr",
            ServiceKind::Overseerr => "overseerr",
            ServiceKind::Tautulli => "tautulli",
            ServiceKind::NzbGet => "nzbget",
            ServiceKind::RdtClient => "rdtclient",
            ServiceKind::Zurg => "zurg",
            ServiceKind::Decypharr => "decypharr",
            ServiceKind::CineSync => "cinesync",
            ServiceKind::Kometa => "kometa",
            ServiceKind::Posterizarr => "posterizarr",
            ServiceKind::Placeholdarr => "placeholdarr",
            ServiceKind::Homepage => "homepage",
        }
    }

    /// Prefix for `ENABLE_*`, `*_URL` and `*_API_KEY` variables.
    pub fn env_prefix(self) -> &'static str {
        match self {
            ServiceKind::Plex => "PLEX",
            ServiceKind::Radarr => "RADARR",
            ServiceKind::Sonarr => "SONARR",
            ServiceKind::Prowlarr => "PROWLARR",
            ServiceKind::Bazarr => "BAZARR",
            ServiceKind::Overseerr => "OVERSEERR",
            ServiceKind::Tautulli => "TAUTULLI",
            ServiceKind::NzbGet => "NZBGET",
            ServiceKind::RdtClient => "RDTCLIENT",
            ServiceKind::Zurg => "ZURG",
            ServiceKind::Decypharr => "DECYPHARR",
            ServiceKind::CineSync => "CINESYNC",
            ServiceKind::Kometa => "KOMETA",
            ServiceKind::Posterizarr => "POSTERIZARR",
            ServiceKind::Placeholdarr => "PLACEHOLDARR",
            ServiceKind::Homepage => "HOMEPAGE",
        }
    }

    /// Default port on the container network. `None` for batch tools that
    /// expose no HTTP surface worth probing.
    pub fn default_port(self) -> Option<u16> {
        match self {
            ServiceKind::Plex => Some(32400),
            ServiceKind::Radarr => Some(7878),
            ServiceKind::Sonarr => Some(8989),
            ServiceKind::Prowlarr => Some(9696),
            ServiceKind::Bazarr => Some(6767),
            ServiceKind::Overseerr => Some(5055),
            ServiceKind::Tautulli => Some(8181),
            ServiceKind::NzbGet => Some(6789),
            ServiceKind::RdtClient => Some(6500),
            ServiceKind::Zurg => Some(9999),
            ServiceKind::Decypharr => Some(8282),
            ServiceKind::CineSync => Some(5173),
            ServiceKind::Homepage => Some(3000),
            ServiceKind::Kometa | ServiceKind::Posterizarr | ServiceKind::Placeholdarr => None,
        }
    }

    /// Config file carrying the service's credential, relative to the storage
    /// root. `None` where there is nothing to discover.
    pub fn config_file(self) -> Option<&'static str> {
        match self {
            ServiceKind::Radarr => Some("Radarr/config/config.xml"),
            ServiceKind::Sonarr => Some("Sonarr/config/config.xml"),
            ServiceKind::Prowlarr => Some("Prowlarr/config/config.xml"),
            ServiceKind::Bazarr => Some("Bazarr/config/config.yaml"),
            ServiceKind::Overseerr => Some("Overseerr/config/settings.json"),
            ServiceKind::Tautulli => Some("Tautulli/config/config.ini"),
            _ => None,
        }
    }

    /// Where the credential sits inside [`Self::config_file`].
    pub fn key_source(self) -> Option<KeySource> {
        match self {
            ServiceKind::Radarr | ServiceKind::Sonarr | ServiceKind::Prowlarr => {
                Some(KeySource::XmlTag("ApiKey"))
            }
            ServiceKind::Bazarr => Some(KeySource::YamlPath(&["auth", "apikey"])),
            ServiceKind::Overseerr => Some(KeySource::JsonPointer("/main/apiKey")),
            ServiceKind::Tautulli => Some(KeySource::Ini {
                section: "General",
                key: "api_key",
            }),
            _ => None,
        }
    }

    pub fn from_slug(s: &str) -> Option<Self> {
        ServiceKind::ALL
            .into_iter()
            .find(|kind| kind.slug() == s.to_ascii_lowercase())
    }
}

/// One service as seen by the current invocation.
#[derive(Debug, Clone)]
pub struct Service {
    pub kind: ServiceKind,
    pub base_url: Option<Url>,
    pub api_key: Option<String>,
    pub config_path: Option<PathBuf>,
}

impl Service {
    /// Resolve a service from the environment: `<PREFIX>_URL` override or the
    /// container-network default, `<PREFIX>_API_KEY` override or whatever the
    /// on-disk config holds.
    pub fn from_env(kind: ServiceKind, env: &Env) -> Result<Self> {
        let prefix = kind.env_prefix();

        let base_url = match env.get(&format!("{prefix}_URL")) {
            Some(explicit) => Some(Url::parse(explicit)?),
            None => kind
                .default_port()
                .map(|port| Url::parse(&format!("http://{}:{}", kind.slug(), port)))
                .transpose()?,
        };

        let config_path = kind
            .config_file()
            .map(|rel| env.storage_path().join(rel));

        let api_key = match env.get(&format!("{prefix}_API_KEY")) {
            Some(explicit) => Some(explicit.to_string()),
            None => match (&config_path, kind.key_source()) {
                (Some(path), Some(source)) => discover::read_key(path, source)?,
                _ => None,
            },
        };

        Ok(Self {
            kind,
            base_url,
            api_key,
            config_path,
        })
    }

    /// Absolute URL for an API path, if the service has an HTTP surface.
    pub fn url(&self, path: &str) -> Option<String> {
        self.base_url
            .as_ref()
            .and_then(|base| base.join(path).ok())
            .map(String::from)
    }

    /// REST client for this service, using its discovered API key.
    pub fn api_client(&self) -> Result<ApiClient> {
        let base = self.base_url.clone().ok_or_else(|| {
            SurgeError::Config(format!("{} has no HTTP endpoint", self.kind.name()))
        })?;
        ApiClient::new(self.kind.name(), base, self.api_key.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_override_beats_default() {
        let env = Env::from_pairs([("RADARR_URL", "http://127.0.0.1:9999")]);
        let service = Service::from_env(ServiceKind::Radarr, &env).unwrap();
        assert_eq!(
            service.url("/api/v3/system/status").unwrap(),
            "http://127.0.0.1:9999/api/v3/system/status"
        );
    }

    #[test]
    fn default_url_uses_container_hostname() {
        let service = Service::from_env(ServiceKind::Sonarr, &Env::default()).unwrap();
        assert_eq!(
            service.base_url.unwrap().as_str(),
            "http://sonarr:8989/"
        );
    }

    #[test]
    fn api_key_discovered_from_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("Radarr").join("config");
        std::fs::create_dir_all(&config).unwrap();
        std::fs::write(
            config.join("config.xml"),
            "<Config><ApiKey>ABCDEF1234567890</ApiKey></Config>",
        )
        .unwrap();

        let env = Env::from_pairs([("STORAGE_PATH", dir.path().to_str().unwrap())]);
        let service = Service::from_env(ServiceKind::Radarr, &env).unwrap();
        assert_eq!(service.api_key.as_deref(), Some("ABCDEF1234567890"));
    }

    #[test]
    fn env_key_override_skips_discovery() {
        let env = Env::from_pairs([("TAUTULLI_API_KEY", "override12345")]);
        let service = Service::from_env(ServiceKind::Tautulli, &env).unwrap();
        assert_eq!(service.api_key.as_deref(), Some("override12345"));
    }

    #[test]
    fn slugs_round_trip() {
        for kind in ServiceKind::ALL {
            assert_eq!(ServiceKind::from_slug(kind.slug()), Some(kind));
        }
        assert_eq!(ServiceKind::from_slug("notaservice"), None);
    }
}
