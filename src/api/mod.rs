// HTTP client for the bingo backend API.
//
// Every wrapper performs a single request/response round trip: check the
// status, return the parsed JSON body unchanged, or fail with that
// operation's fixed message. No retries, no backoff, no request coalescing.

pub mod cards;
pub mod teams;

use std::sync::Arc;
use std::time::Duration;

use reqwest::cookie::Jar;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Response, Url};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::config::Config;

/// Header name the backend's CSRF middleware checks on state-changing requests.
pub const CSRF_HEADER: &str = "x-csrftoken";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ApiError {
    /// Non-2xx response, collapsed to the operation's fixed message.
    #[error("{0}")]
    Failed(&'static str),

    /// Non-2xx response whose body carried a server-supplied `error` field.
    #[error("{0}")]
    Rejected(String),

    /// Network or body-decoding failure from the underlying HTTP client.
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

// ---------------------------------------------------------------------------
// BingoApi
// ---------------------------------------------------------------------------

/// Client for the backend's team and bingo-card endpoints.
///
/// The CSRF header map is computed once at construction and reused for every
/// state-changing card call in the session. A token rotated by the server
/// after construction is deliberately not picked up; build a fresh client to
/// re-read credentials.
pub struct BingoApi {
    http: reqwest::Client,
    base: String,
    headers: HeaderMap,
    card_year: i32,
}

impl BingoApi {
    /// Build a client from the loaded configuration. Session cookies from the
    /// credentials file are seeded into the cookie jar, and the CSRF token is
    /// captured into the shared header map.
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        let jar = Arc::new(Jar::default());
        if let Ok(base_url) = Url::parse(&config.backend.base_url) {
            if let Some(sessionid) = &config.credentials.sessionid {
                jar.add_cookie_str(&format!("sessionid={sessionid}"), &base_url);
            }
            if let Some(csrftoken) = &config.credentials.csrftoken {
                jar.add_cookie_str(&format!("csrftoken={csrftoken}"), &base_url);
            }
        }

        let http = reqwest::Client::builder()
            .cookie_provider(jar)
            .timeout(Duration::from_secs(config.backend.timeout_secs))
            .build()?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(token) = &config.credentials.csrftoken {
            if let Ok(value) = HeaderValue::from_str(token) {
                headers.insert(CSRF_HEADER, value);
            }
        }

        Ok(Self {
            http,
            base: config.backend.base_url.trim_end_matches('/').to_string(),
            headers,
            card_year: config.cards.year,
        })
    }

    /// The shared header map sent with every card POST.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    // -- Request primitives --

    pub(crate) async fn get(&self, path: &str) -> Result<Response, ApiError> {
        let response = self.http.get(self.endpoint(path)).send().await?;
        debug!(path, status = %response.status(), "GET");
        Ok(response)
    }

    /// Bare POST without the shared header map, matching the team endpoints'
    /// wire behavior.
    pub(crate) async fn post(&self, path: &str, body: Option<&Value>) -> Result<Response, ApiError> {
        let mut request = self.http.post(self.endpoint(path));
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request.send().await?;
        debug!(path, status = %response.status(), "POST");
        Ok(response)
    }

    /// POST carrying the shared header map (Content-Type + captured CSRF
    /// token). All card mutations go through here.
    pub(crate) async fn post_csrf(
        &self,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Response, ApiError> {
        let mut request = self.http.post(self.endpoint(path)).headers(self.headers.clone());
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request.send().await?;
        debug!(path, status = %response.status(), "POST");
        Ok(response)
    }

    /// 2xx yields the parsed body unchanged; anything else collapses to the
    /// operation's fixed message.
    pub(crate) async fn expect_json(
        response: Response,
        failure: &'static str,
    ) -> Result<Value, ApiError> {
        if !response.status().is_success() {
            return Err(ApiError::Failed(failure));
        }
        Ok(response.json().await?)
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BackendConfig, CardsConfig, CredentialsConfig};

    fn config(base_url: &str, csrftoken: Option<&str>) -> Config {
        Config {
            backend: BackendConfig {
                base_url: base_url.to_string(),
                timeout_secs: 5,
            },
            cards: CardsConfig { year: 2025 },
            credentials: CredentialsConfig {
                sessionid: Some("session-value".to_string()),
                csrftoken: csrftoken.map(String::from),
            },
        }
    }

    #[test]
    fn headers_include_captured_csrf_token() {
        let api = BingoApi::new(&config("http://localhost:8000", Some("tok123"))).unwrap();

        assert_eq!(
            api.headers().get(CSRF_HEADER).and_then(|v| v.to_str().ok()),
            Some("tok123")
        );
        assert_eq!(
            api.headers().get(CONTENT_TYPE).and_then(|v| v.to_str().ok()),
            Some("application/json")
        );
    }

    #[test]
    fn headers_omit_csrf_when_unconfigured() {
        let api = BingoApi::new(&config("http://localhost:8000", None)).unwrap();

        assert!(api.headers().get(CSRF_HEADER).is_none());
        // Content-Type is always present
        assert!(api.headers().get(CONTENT_TYPE).is_some());
    }

    #[test]
    fn endpoint_joins_without_doubled_slash() {
        let api = BingoApi::new(&config("http://localhost:8000/", Some("t"))).unwrap();
        assert_eq!(api.endpoint("/api/teams/"), "http://localhost:8000/api/teams/");

        let api = BingoApi::new(&config("http://localhost:8000", Some("t"))).unwrap();
        assert_eq!(api.endpoint("/api/teams/"), "http://localhost:8000/api/teams/");
    }
}
