//! REST wiring client.
//!
//! Thin wrapper over a blocking reqwest client: base URL, API-key header,
//! JSON bodies. Wiring is idempotent by convention only: `ensure_entry`
//! checks the target collection for an entry with the same name before
//! posting, and verifies nothing beyond the HTTP status code.

use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::ACCEPT;
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use crate::error::{Result, SurgeError};

/// Header used by the *arr family.
pub const API_KEY_HEADER: &str = "X-Api-Key";
/// Header used by Plex and Tautulli-adjacent tools.
pub const PLEX_TOKEN_HEADER: &str = "X-Plex-Token";

const TIMEOUT_SECS: u64 = 10;

/// Build the blocking client every script shares.
pub fn client() -> Result<Client> {
    Ok(Client::builder()
        .timeout(std::time::Duration::from_secs(TIMEOUT_SECS))
        .build()?)
}

/// Outcome of a single wiring call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireOutcome {
    /// Entry was posted and accepted.
    Created,
    /// An entry with the same name already exists; nothing was sent.
    AlreadyConfigured,
}

/// REST client bound to one service.
pub struct ApiClient {
    service: String,
    base: Url,
    key_header: &'static str,
    api_key: Option<String>,
    http: Client,
}

impl ApiClient {
    pub fn new(service: &str, base: Url, api_key: Option<String>) -> Result<Self> {
        Ok(Self {
            service: service.to_string(),
            base,
            key_header: API_KEY_HEADER,
            api_key,
            http: client()?,
        })
    }

    /// Use a different auth header (e.g. `X-Plex-Token`).
    pub fn with_header(mut self, header: &'static str) -> Self {
        self.key_header = header;
        self
    }

    pub fn url(&self, path: &str) -> Result<String> {
        Ok(self.base.join(path)?.to_string())
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let url = self.base.join(path)?;
        let mut builder = self
            .http
            .request(method, url)
            .header(ACCEPT, "application/json");
        if let Some(key) = &self.api_key {
            builder = builder.header(self.key_header, key);
        }
        Ok(builder)
    }

    fn check(&self, response: reqwest::blocking::Response) -> Result<reqwest::blocking::Response> {
        let status = response.status();
        if matches!(
            status,
            StatusCode::OK | StatusCode::CREATED | StatusCode::ACCEPTED
        ) {
            return Ok(response);
        }
        let body = response.text().unwrap_or_default();
        Err(SurgeError::Api {
            service: self.service.clone(),
            status: status.as_u16(),
            body: body.chars().take(200).collect(),
        })
    }

    pub fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.request(Method::GET, path)?.send()?;
        Ok(self.check(response)?.json()?)
    }

    pub fn post_json(&self, path: &str, body: &Value) -> Result<()> {
        let response = self.request(Method::POST, path)?.json(body).send()?;
        self.check(response)?;
        Ok(())
    }

    pub fn put_json(&self, path: &str, body: &Value) -> Result<()> {
        let response = self.request(Method::PUT, path)?.json(body).send()?;
        self.check(response)?;
        Ok(())
    }

    /// Post `payload` to a collection endpoint unless an entry whose
    /// `match_field` equals `match_value` is already listed.
    pub fn ensure_entry(
        &self,
        path: &str,
        match_field: &str,
        match_value: &str,
        payload: &Value,
    ) -> Result<WireOutcome> {
        let existing: Vec<Value> = self.get_json(path)?;
        let present = existing
            .iter()
            .any(|entry| entry.get(match_field).and_then(Value::as_str) == Some(match_value));
        if present {
            tracing::debug!(service = %self.service, path, match_value, "entry already present");
            return Ok(WireOutcome::AlreadyConfigured);
        }
        self.post_json(path, payload)?;
        Ok(WireOutcome::Created)
    }

    /// [`Self::ensure_entry`] matching on the conventional `name` field.
    pub fn ensure_named(&self, path: &str, name: &str, payload: &Value) -> Result<WireOutcome> {
        self.ensure_entry(path, "name", name, payload)
    }
}
