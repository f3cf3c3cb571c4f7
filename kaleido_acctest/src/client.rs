//! Blocking client for the remote Kaleido API.
//!
//! The harness only consumes one boundary: fetching an environment by its
//! consortium and environment identifiers. [`EnvironmentApi`] is the typed
//! seam the checks depend on, so tests can substitute a stub without any
//! network in play.

use std::time::Duration;

use serde::de::DeserializeOwned;
use url::Url;

use crate::error::ApiError;
use crate::model::Environment;

/// A decoded HTTP response: the status code plus the body, when one was
/// successfully decoded.
#[derive(Debug, Clone)]
pub struct ApiResponse<T> {
    status: u16,
    body: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Creates a response from a raw status code and an optional body.
    #[must_use]
    pub const fn new(status: u16, body: Option<T>) -> Self {
        Self { status, body }
    }

    /// HTTP status code of the response.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        self.status
    }

    /// Decoded body, present only for successful responses.
    #[must_use]
    pub const fn body(&self) -> Option<&T> {
        self.body.as_ref()
    }
}

/// Remote boundary used by the environment checks.
pub trait EnvironmentApi {
    /// Fetches an environment record by consortium and environment
    /// identifiers.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] when the request fails in transport or the
    /// response body cannot be decoded. A non-2xx status is not an error
    /// here; callers inspect [`ApiResponse::status_code`].
    fn get_environment(
        &self,
        consortium_id: &str,
        environment_id: &str,
    ) -> Result<ApiResponse<Environment>, ApiError>;
}

/// Client for the Kaleido console API.
#[derive(Debug, Clone)]
pub struct KaleidoClient {
    // Kept as the caller's literal base (sans trailing slash) so joined
    // paths never gain a normalized double slash.
    base: String,
    api_key: String,
    http: reqwest::blocking::Client,
}

impl KaleidoClient {
    /// Creates a client for an API base URL, e.g.
    /// `https://console.kaleido.io/api/v1`, authenticating with a bearer
    /// API key.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Url`] when the base URL does not parse and
    /// [`ApiError::Transport`] when the underlying client cannot be built.
    pub fn new(api: &str, api_key: impl Into<String>) -> Result<Self, ApiError> {
        let base = api.trim_end_matches('/').to_owned();
        Url::parse(&base).map_err(|source| ApiError::Url {
            url: api.to_owned(),
            source,
        })?;
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|source| ApiError::Transport {
                url: base.clone(),
                source,
            })?;
        Ok(Self {
            base,
            api_key: api_key.into(),
            http,
        })
    }

    fn environment_url(&self, consortium_id: &str, environment_id: &str) -> String {
        format!(
            "{}/consortia/{consortium_id}/environments/{environment_id}",
            self.base
        )
    }

    fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<ApiResponse<T>, ApiError> {
        tracing::debug!(%url, "fetching remote record");
        let response = self
            .http
            .get(url)
            .bearer_auth(&self.api_key)
            .send()
            .map_err(|source| ApiError::Transport {
                url: url.to_owned(),
                source,
            })?;
        let status = response.status().as_u16();
        let body = if response.status().is_success() {
            Some(response.json().map_err(|source| ApiError::Decode {
                url: url.to_owned(),
                source,
            })?)
        } else {
            None
        };
        Ok(ApiResponse::new(status, body))
    }
}

impl EnvironmentApi for KaleidoClient {
    fn get_environment(
        &self,
        consortium_id: &str,
        environment_id: &str,
    ) -> Result<ApiResponse<Environment>, ApiError> {
        self.get_json(&self.environment_url(consortium_id, environment_id))
    }
}

#[cfg(test)]
mod tests {
    use super::KaleidoClient;
    use crate::error::ApiError;

    #[test]
    fn environment_url_joins_identifiers() {
        let client =
            KaleidoClient::new("https://console.kaleido.io/api/v1", "k").expect("build client");
        assert_eq!(
            client.environment_url("cons1", "env1"),
            "https://console.kaleido.io/api/v1/consortia/cons1/environments/env1"
        );
    }

    #[test]
    fn trailing_slash_on_base_is_trimmed() {
        let client =
            KaleidoClient::new("https://console.kaleido.io/api/v1/", "k").expect("build client");
        assert_eq!(
            client.environment_url("cons1", "env1"),
            "https://console.kaleido.io/api/v1/consortia/cons1/environments/env1"
        );
    }

    #[test]
    fn authority_only_base_joins_cleanly() {
        let client = KaleidoClient::new("http://127.0.0.1:8080", "k").expect("build client");
        assert_eq!(
            client.environment_url("cons1", "env1"),
            "http://127.0.0.1:8080/consortia/cons1/environments/env1"
        );
    }

    #[test]
    fn malformed_base_url_is_rejected() {
        let err = KaleidoClient::new("not a url", "k").expect_err("parse failure");
        assert!(matches!(err, ApiError::Url { .. }));
    }
}
