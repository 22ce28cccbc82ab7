//! Debrid service token validation.
//!
//! Each provider exposes an account endpoint that answers 200 for a live
//! token. Validation is best-effort and read-only; transport errors count as
//! "not valid" rather than propagating.

use reqwest::blocking::Client;

use crate::core::env::Env;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebridProvider {
    RealDebrid,
    AllDebrid,
    Premiumize,
    Torbox,
}

impl DebridProvider {
    pub const ALL: [DebridProvider; 4] = [
        DebridProvider::RealDebrid,
        DebridProvider::AllDebrid,
        DebridProvider::Premiumize,
        DebridProvider::Torbox,
    ];

    pub fn name(self) -> &'static str {
        match self {
            DebridProvider::RealDebrid => "Real-Debrid",
            DebridProvider::AllDebrid => "AllDebrid",
            DebridProvider::Premiumize => "Premiumize",
            DebridProvider::Torbox => "TorBox",
        }
    }

    /// Identifier used in generated configs (decypharr's `debrids[].name`).
    pub fn slug(self) -> &'static str {
        match self {
            DebridProvider::RealDebrid => "realdebrid",
            DebridProvider::AllDebrid => "alldebrid",
            DebridProvider::Premiumize => "premiumize",
            DebridProvider::Torbox => "torbox",
        }
    }

    pub fn token_var(self) -> &'static str {
        match self {
            DebridProvider::RealDebrid => "RD_API_TOKEN",
            DebridProvider::AllDebrid => "AD_API_TOKEN",
            DebridProvider::Premiumize => "PREMIUMIZE_API_KEY",
            DebridProvider::Torbox => "TORBOX_API_TOKEN",
        }
    }

    pub fn token(self, env: &Env) -> Option<String> {
        env.get(self.token_var()).map(str::to_string)
    }

    /// Account endpoint and whether the token travels as a bearer header
    /// (otherwise it is appended as a query parameter).
    pub fn account_request(self, token: &str) -> (String, Option<String>) {
        match self {
            DebridProvider::RealDebrid => (
                "https://api.real-debrid.com/rest/1.0/user".to_string(),
                Some(token.to_string()),
            ),
            DebridProvider::AllDebrid => (
                format!("https://api.alldebrid.com/v4/user?agent=surge&apikey={token}"),
                None,
            ),
            DebridProvider::Premiumize => (
                format!("https://www.premiumize.me/api/account/info?apikey={token}"),
                None,
            ),
            DebridProvider::Torbox => (
                "https://api.torbox.app/v1/api/user/me".to_string(),
                Some(token.to_string()),
            ),
        }
    }

    /// True if the provider's account endpoint accepts the token.
    pub fn validate(self, client: &Client, token: &str) -> bool {
        let (url, bearer) = self.account_request(token);
        check_account(client, &url, bearer.as_deref())
    }
}

/// Issue the account request and report whether it succeeded.
pub fn check_account(client: &Client, url: &str, bearer: Option<&str>) -> bool {
    let mut request = client.get(url);
    if let Some(token) = bearer {
        request = request.bearer_auth(token);
    }
    match request.send() {
        Ok(response) => response.status().is_success(),
        Err(err) => {
            tracing::debug!(url, "debrid account check failed: {err}");
            false
        }
    }
}

/// First provider with a token in the environment, in [`DebridProvider::ALL`]
/// order.
pub fn first_configured(env: &Env) -> Option<(DebridProvider, String)> {
    DebridProvider::ALL
        .into_iter()
        .find_map(|provider| provider.token(env).map(|token| (provider, token)))
}

/// Every provider with a token in the environment.
pub fn all_configured(env: &Env) -> Vec<(DebridProvider, String)> {
    DebridProvider::ALL
        .into_iter()
        .filter_map(|provider| provider.token(env).map(|token| (provider, token)))
        .collect()
}
