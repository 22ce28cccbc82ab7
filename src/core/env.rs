//! Environment and config loading.
//!
//! Every run rebuilds its view of the world from scratch: built-in defaults,
//! then an optional `surge.toml`, then an optional `.env` file, then the
//! process environment. Later sources win.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::core::service::ServiceKind;
use crate::error::Result;

const ENV_FILE: &str = ".env";
const CONFIG_FILE: &str = "surge.toml";
const DEFAULT_STORAGE_PATH: &str = "/opt/surge";

/// Optional `surge.toml` overrides: a flat `[env]` table of environment keys.
#[derive(Debug, Deserialize)]
struct SurgeToml {
    #[serde(default)]
    env: BTreeMap<String, String>,
}

/// Merged view of the environment for one invocation.
#[derive(Debug, Clone, Default)]
pub struct Env {
    vars: BTreeMap<String, String>,
}

impl Env {
    /// Load from `surge.toml`, `.env` (explicit path or `./.env`) and the
    /// process environment, in that precedence order.
    pub fn load(env_file: Option<&Path>) -> Result<Self> {
        Self::load_with(env_file, std::env::vars())
    }

    fn load_with(
        env_file: Option<&Path>,
        process: impl IntoIterator<Item = (String, String)>,
    ) -> Result<Self> {
        let mut vars = BTreeMap::new();

        let toml_path = Path::new(CONFIG_FILE);
        if toml_path.exists() {
            let contents = std::fs::read_to_string(toml_path)?;
            let parsed: SurgeToml = toml::from_str(&contents)?;
            vars.extend(parsed.env);
        }

        let env_path = env_file.map(Path::to_path_buf).unwrap_or_else(|| PathBuf::from(ENV_FILE));
        if env_path.exists() {
            let contents = std::fs::read_to_string(&env_path)?;
            for (key, value) in parse_env(&contents) {
                vars.insert(key, value);
            }
        }

        vars.extend(process);

        Ok(Self { vars })
    }

    /// Build directly from key/value pairs. Used by the wizard handlers and
    /// by tests; skips every file and process-environment source.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str).filter(|v| !v.is_empty())
    }

    pub fn get_or(&self, key: &str, default: &str) -> String {
        self.get(key).unwrap_or(default).to_string()
    }

    /// Truthy flag: `1`, `true`, `yes`, `on` (case-insensitive).
    pub fn flag(&self, key: &str) -> bool {
        matches!(
            self.get(key).map(str::to_ascii_lowercase).as_deref(),
            Some("1") | Some("true") | Some("yes") | Some("on")
        )
    }

    /// `ENABLE_<SERVICE>` flag for a service.
    pub fn enabled(&self, kind: ServiceKind) -> bool {
        self.flag(&format!("ENABLE_{}", kind.env_prefix()))
    }

    /// Root of the shared per-service storage tree.
    pub fn storage_path(&self) -> PathBuf {
        PathBuf::from(self.get_or("STORAGE_PATH", DEFAULT_STORAGE_PATH))
    }

    /// `${STORAGE_PATH}/<Service>/config`
    pub fn config_dir(&self, kind: ServiceKind) -> PathBuf {
        self.storage_path().join(kind.name()).join("config")
    }
}

/// Parse `.env`-style contents into key/value pairs.
///
/// Skips blanks and comments; strips single/double quotes around values.
pub fn parse_env(contents: &str) -> Vec<(String, String)> {
    let mut pairs = Vec::new();

    for line in contents.lines() {
        let line = line.trim();

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if let Some((key, value)) = line.split_once('=') {
            let key = key.trim();
            let value = value.trim().trim_matches('"').trim_matches('\'');
            pairs.push((key.to_string(), value.to_string()));
        }
    }

    pairs
}
