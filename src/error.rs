use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SurgeError {
    #[error("{service} did not become ready after {attempts} attempts")]
    NotReady { service: String, attempts: u32 },

    #[error("no api key found for {service} (looked in {path})")]
    MissingCredential { service: String, path: PathBuf },

    #[error("{service} api error: {status}: {body}")]
    Api {
        service: String,
        status: u16,
        body: String,
    },

    #[error("unknown service: {0}")]
    UnknownService(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("docker error: {0}")]
    Docker(String),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("toml parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, SurgeError>;
