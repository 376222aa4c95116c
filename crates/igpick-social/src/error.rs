use thiserror::Error;

/// Errors returned by the follower-listing API client.
///
/// None of these are retried: the upstream is a metered API and every
/// failure is surfaced to the operator, who decides whether to try again.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network, TLS, or timeout failure before a response was received.
    #[error("network error: {0}")]
    Network(String),

    /// The upstream answered with a non-2xx status, or a 2xx body that
    /// only carried an API-level error message.
    #[error("upstream API error (HTTP {status}): {body_excerpt}")]
    Upstream { status: u16, body_excerpt: String },

    /// The response body was not JSON or held no follower list.
    #[error("malformed upstream response: {0}")]
    Malformed(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Network(format!("request timed out: {}", err.without_url()))
        } else if err.is_connect() {
            FetchError::Network(format!("connection failed: {}", err.without_url()))
        } else {
            FetchError::Network(err.without_url().to_string())
        }
    }
}
