//! HTTP client for the follower-listing REST API.
//!
//! Wraps `reqwest` with the API's header authentication, a single bounded
//! request per call, and a typed mapping of every outcome onto
//! [`FetchError`]. There is no retry loop: each call costs quota.

use std::time::Duration;

use igpick_core::config::{DEFAULT_API_BASE_URL, DEFAULT_API_HOST};
use igpick_core::{AppConfig, ConfigError};
use reqwest::{Client, Url};

use crate::error::FetchError;
use crate::types::{classify_body, Envelope, RawFollower};

/// Largest page the endpoint serves in one call.
pub const MAX_FETCH_LIMIT: u32 = 500;

const DEFAULT_TIMEOUT_SECS: u64 = 15;
const DEFAULT_USER_AGENT: &str = "igpick/0.1 (follower-giveaway)";
const HOST_HEADER: &str = "x-rapidapi-host";
const KEY_HEADER: &str = "x-rapidapi-key";
const FOLLOWERS_PATH: &str = "v1/followers";
const BODY_EXCERPT_CHARS: usize = 200;

/// Explicit settings for [`SocialApiClient`].
#[derive(Clone)]
pub struct SocialApiConfig {
    pub api_key: String,
    pub api_host: String,
    pub base_url: String,
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl SocialApiConfig {
    /// Production endpoint and defaults with the given key.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_host: DEFAULT_API_HOST.to_string(),
            base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }

    /// Derives client settings from the loaded application config.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEnvVar`] when no API key is configured.
    pub fn from_app_config(config: &AppConfig) -> Result<Self, ConfigError> {
        let api_key = config
            .api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar("RAPIDAPI_KEY".to_string()))?;

        Ok(Self {
            api_key: api_key.to_string(),
            api_host: config.api_host.clone(),
            base_url: config.api_base_url.clone(),
            timeout_secs: config.request_timeout_secs,
            user_agent: config.user_agent.clone(),
        })
    }

    /// Points the client at another server (for testing with wiremock).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    #[must_use]
    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}

impl std::fmt::Debug for SocialApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SocialApiConfig")
            .field("api_key", &"[redacted]")
            .field("api_host", &self.api_host)
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

/// Client for the follower-listing API.
pub struct SocialApiClient {
    client: Client,
    api_key: String,
    api_host: String,
    base_url: Url,
}

impl SocialApiClient {
    /// Builds a client from explicit settings.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Network`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`FetchError::Malformed`] if `base_url` is
    /// not a valid URL.
    pub fn new(config: &SocialApiConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| FetchError::Network(format!("failed to build HTTP client: {e}")))?;

        // Exactly one trailing slash so `join` appends rather than replaces
        // the last path segment.
        let normalised = format!("{}/", config.base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| {
            FetchError::Malformed(format!("invalid base URL '{}': {e}", config.base_url))
        })?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            api_host: config.api_host.clone(),
            base_url,
        })
    }

    /// Fetches up to `limit` followers of `account` in a single request.
    ///
    /// `limit` is clamped to `1..=MAX_FETCH_LIMIT`; a response with more
    /// entries than requested is truncated. Entries that are not JSON objects
    /// are skipped.
    ///
    /// # Errors
    ///
    /// - [`FetchError::Network`] on connection failure or timeout.
    /// - [`FetchError::Upstream`] on a non-2xx status, or a 2xx body that only
    ///   carries an API error message.
    /// - [`FetchError::Malformed`] if the body is not JSON or has no follower
    ///   array.
    pub async fn fetch_followers(
        &self,
        account: &str,
        limit: u32,
    ) -> Result<Vec<RawFollower>, FetchError> {
        let limit = limit.clamp(1, MAX_FETCH_LIMIT);
        let url = self.build_url(account, limit)?;
        tracing::info!(account, limit, "fetching followers");

        let response = self
            .client
            .get(url)
            .header(HOST_HEADER, &self.api_host)
            .header(KEY_HEADER, &self.api_key)
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            tracing::warn!(
                account,
                status = status.as_u16(),
                "follower API returned an error status"
            );
            return Err(FetchError::Upstream {
                status: status.as_u16(),
                body_excerpt: excerpt(&body),
            });
        }

        let json: serde_json::Value = serde_json::from_str(&body)
            .map_err(|e| FetchError::Malformed(format!("response body is not JSON: {e}")))?;

        let items = match classify_body(json) {
            Envelope::Followers(items) => items,
            Envelope::ApiMessage(message) => {
                tracing::warn!(account, %message, "follower API reported an error");
                return Err(FetchError::Upstream {
                    status: status.as_u16(),
                    body_excerpt: excerpt(&message),
                });
            }
            Envelope::Unrecognized => {
                return Err(FetchError::Malformed(
                    "response has no follower list".to_string(),
                ));
            }
        };

        let received = items.len();
        let followers: Vec<RawFollower> = items
            .into_iter()
            .filter_map(|item| {
                let raw = RawFollower::from_entry(item);
                if raw.is_none() {
                    tracing::warn!("skipping follower entry that is not an object");
                }
                raw
            })
            .take(limit as usize)
            .collect();

        tracing::info!(
            account,
            received,
            kept = followers.len(),
            "fetched followers"
        );
        Ok(followers)
    }

    /// Builds the request URL with percent-encoded query parameters.
    fn build_url(&self, account: &str, limit: u32) -> Result<Url, FetchError> {
        let mut url = self
            .base_url
            .join(FOLLOWERS_PATH)
            .map_err(|e| FetchError::Malformed(format!("invalid followers URL: {e}")))?;
        url.query_pairs_mut()
            .append_pair("username_or_id_or_url", account)
            .append_pair("amount", &limit.to_string());
        Ok(url)
    }
}

/// First `BODY_EXCERPT_CHARS` characters of an error body, for messages.
fn excerpt(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.chars().count() <= BODY_EXCERPT_CHARS {
        return trimmed.to_string();
    }
    let mut cut: String = trimmed.chars().take(BODY_EXCERPT_CHARS).collect();
    cut.push('…');
    cut
}
