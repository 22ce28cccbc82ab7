//! Service readiness polling.
//!
//! The one pattern every script repeats: GET an endpoint until it answers or
//! the attempt budget runs out. Never raises; a 401 counts as "up" because an
//! unconfigured service demands auth before it does anything else.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::StatusCode;

use crate::core::env::Env;

const DEFAULT_ATTEMPTS: u32 = 30;
const DEFAULT_DELAY_SECS: u64 = 2;

/// Sleep seam so tests can run against a mocked clock.
pub trait Sleeper {
    fn sleep(&self, duration: Duration);
}

/// Production sleeper: blocking `thread::sleep`.
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Fixed-budget, fixed-delay poller.
#[derive(Debug, Clone, Copy)]
pub struct Poller {
    pub attempts: u32,
    pub delay: Duration,
}

impl Poller {
    pub fn new(attempts: u32, delay: Duration) -> Self {
        Self { attempts, delay }
    }

    /// Single attempt, no sleeping. Used by the read-only reporters.
    pub fn once() -> Self {
        Self::new(1, Duration::ZERO)
    }

    /// Defaults (30 attempts, 2 s) with `SURGE_POLL_ATTEMPTS` /
    /// `SURGE_POLL_DELAY_SECS` overrides.
    pub fn from_env(env: &Env) -> Self {
        let attempts = env
            .get("SURGE_POLL_ATTEMPTS")
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_ATTEMPTS);
        let delay = env
            .get("SURGE_POLL_DELAY_SECS")
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_DELAY_SECS);
        Self::new(attempts, Duration::from_secs(delay))
    }

    /// Poll `url` until it answers with 2xx or 401, sleeping `delay` between
    /// attempts (never after the last one). Returns whether it came up.
    pub fn wait(&self, client: &Client, url: &str, header: Option<(&str, &str)>) -> bool {
        self.wait_with(&ThreadSleeper, client, url, header)
    }

    pub fn wait_with<S: Sleeper>(
        &self,
        sleeper: &S,
        client: &Client,
        url: &str,
        header: Option<(&str, &str)>,
    ) -> bool {
        for attempt in 1..=self.attempts {
            let mut request = client.get(url);
            if let Some((name, value)) = header {
                request = request.header(name, value);
            }
            match request.send() {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() || status == StatusCode::UNAUTHORIZED {
                        tracing::debug!(url, attempt, %status, "service is up");
                        return true;
                    }
                    tracing::debug!(url, attempt, %status, "service not ready");
                }
                Err(err) => {
                    tracing::debug!(url, attempt, "request failed: {err}");
                }
            }
            if attempt < self.attempts {
                sleeper.sleep(self.delay);
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use std::cell::RefCell;

    struct RecordingSleeper {
        sleeps: RefCell<Vec<Duration>>,
    }

    impl RecordingSleeper {
        fn new() -> Self {
            Self {
                sleeps: RefCell::new(Vec::new()),
            }
        }
    }

    impl Sleeper for RecordingSleeper {
        fn sleep(&self, duration: Duration) {
            self.sleeps.borrow_mut().push(duration);
        }
    }

    #[test]
    fn immediate_success_does_not_sleep() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/ping");
            then.status(200);
        });

        let sleeper = RecordingSleeper::new();
        let client = crate::core::http::client().unwrap();
        let up = Poller::new(5, Duration::from_secs(2)).wait_with(
            &sleeper,
            &client,
            &server.url("/ping"),
            None,
        );

        assert!(up);
        assert!(sleeper.sleeps.borrow().is_empty());
    }

    #[test]
    fn exhausts_budget_and_sleeps_between_attempts() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/ping");
            then.status(503);
        });

        let sleeper = RecordingSleeper::new();
        let client = crate::core::http::client().unwrap();
        let delay = Duration::from_secs(3);
        let up = Poller::new(4, delay).wait_with(&sleeper, &client, &server.url("/ping"), None);

        assert!(!up);
        mock.assert_hits(4);
        assert_eq!(sleeper.sleeps.borrow().as_slice(), &[delay; 3]);
    }

    #[test]
    fn unauthorized_counts_as_up() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/api/v3/system/status");
            then.status(401);
        });

        let sleeper = RecordingSleeper::new();
        let client = crate::core::http::client().unwrap();
        let up = Poller::once().wait_with(
            &sleeper,
            &client,
            &server.url("/api/v3/system/status"),
            Some(("X-Api-Key", "whatever")),
        );

        assert!(up);
    }
}
