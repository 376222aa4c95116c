//! Orchestration of one pick: fetch → normalize → select.
//!
//! Requests arrive already validated ([`SelectionRequest`] cannot be built
//! otherwise), so a bad handle or out-of-range parameter never reaches the
//! upstream API.

use chrono::{DateTime, Utc};
use igpick_core::{AppConfig, FollowerRecord, SelectionMode, SelectionRequest};
use igpick_social::{normalize, FollowerSource, SocialApiClient, SocialApiConfig, MAX_FETCH_LIMIT};
use rand::Rng;

use crate::error::PickError;
use crate::selection::{select, SelectionResult};

/// Picks winners from followers supplied by `S`.
///
/// Holds no state between calls: nothing is cached and previous winners are
/// not remembered.
pub struct PickService<S> {
    source: S,
}

impl PickService<SocialApiClient> {
    /// Builds the production service from the loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns [`PickError::Config`] when `RAPIDAPI_KEY` is missing, or
    /// [`PickError::Fetch`] when the HTTP client cannot be constructed.
    pub fn from_config(config: &AppConfig) -> Result<Self, PickError> {
        let api = SocialApiConfig::from_app_config(config)?;
        let client = SocialApiClient::new(&api)?;
        Ok(Self::new(client))
    }
}

impl<S: FollowerSource> PickService<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// How many followers to request for `mode`.
    ///
    /// General mode needs exactly `count`; orientation mode asks for a full
    /// page so the time filter has enough candidates.
    #[must_use]
    pub fn fetch_limit(mode: &SelectionMode) -> u32 {
        match *mode {
            SelectionMode::General { count } => count.min(MAX_FETCH_LIMIT),
            SelectionMode::Orientation { .. } => MAX_FETCH_LIMIT,
        }
    }

    /// Fetches and normalizes the follower batch for `request`.
    ///
    /// # Errors
    ///
    /// Returns [`PickError::Fetch`] when the upstream call fails.
    pub async fn fetch_records(
        &self,
        request: &SelectionRequest,
    ) -> Result<Vec<FollowerRecord>, PickError> {
        let account = request.target_account();
        let limit = Self::fetch_limit(request.mode());
        tracing::debug!(account, limit, mode = %request.mode(), "fetching");

        let raw = self
            .source
            .fetch_followers(account, limit)
            .await
            .inspect_err(|e| tracing::warn!(account, error = %e, "fetch failed"))?;

        let records = normalize(raw);
        tracing::debug!(account, records = records.len(), "normalized");
        Ok(records)
    }

    /// Runs one pick with the thread-local RNG and the current time.
    ///
    /// # Errors
    ///
    /// See [`Self::fetch_records`] and [`select`].
    pub async fn pick(&self, request: &SelectionRequest) -> SelectionResult {
        let records = self.fetch_records(request).await?;
        select(&records, request.mode(), Utc::now(), &mut rand::rng())
    }

    /// Runs one pick with an explicit clock reading and random source.
    ///
    /// # Errors
    ///
    /// See [`Self::fetch_records`] and [`select`].
    pub async fn pick_with<R>(
        &self,
        request: &SelectionRequest,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> SelectionResult
    where
        R: Rng + Send + ?Sized,
    {
        let records = self.fetch_records(request).await?;
        select(&records, request.mode(), now, rng)
    }
}

#[cfg(test)]
mod tests {
    use std::future::Future;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Mutex;

    use chrono::TimeZone;
    use igpick_social::{FetchError, RawFollower};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    /// In-memory follower source that records every call.
    #[derive(Default)]
    struct FakeSource {
        followers: Vec<serde_json::Value>,
        fail_with_timeout: bool,
        calls: AtomicU32,
        last_call: Mutex<Option<(String, u32)>>,
    }

    impl FakeSource {
        fn with_usernames(names: &[&str]) -> Self {
            Self {
                followers: names
                    .iter()
                    .map(|n| serde_json::json!({ "username": n }))
                    .collect(),
                ..Self::default()
            }
        }
    }

    impl FollowerSource for FakeSource {
        fn fetch_followers(
            &self,
            account: &str,
            limit: u32,
        ) -> impl Future<Output = Result<Vec<RawFollower>, FetchError>> + Send {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_call.lock().unwrap() = Some((account.to_string(), limit));
            let result = if self.fail_with_timeout {
                Err(FetchError::Network("request timed out".to_string()))
            } else {
                Ok(self
                    .followers
                    .iter()
                    .take(limit as usize)
                    .map(|v| RawFollower::from_entry(v.clone()).unwrap())
                    .collect())
            };
            std::future::ready(result)
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 9, 1, 18, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn account_is_normalized_before_dispatch() {
        let service = PickService::new(FakeSource::with_usernames(&["a", "b", "c"]));

        for (typed, expected) in [("@foo", "foo"), ("foo bar", "foobar")] {
            let request =
                SelectionRequest::new(typed, SelectionMode::general(10).unwrap()).unwrap();
            service
                .pick_with(&request, now(), &mut StdRng::seed_from_u64(1))
                .await
                .unwrap();
            let last = service.source.last_call.lock().unwrap().clone();
            assert_eq!(last, Some((expected.to_string(), 10)));
        }
    }

    #[tokio::test]
    async fn invalid_input_never_reaches_the_source() {
        let source = FakeSource::with_usernames(&["a"]);
        assert!(SelectionRequest::new("  @ ", SelectionMode::general(10).unwrap()).is_err());
        assert!(SelectionMode::general(5_000).is_err());
        assert_eq!(source.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn orientation_requests_a_full_page() {
        let service = PickService::new(FakeSource::with_usernames(&["a"]));
        let request =
            SelectionRequest::new("foo", SelectionMode::orientation(1.0).unwrap()).unwrap();
        let selection = service
            .pick_with(&request, now(), &mut StdRng::seed_from_u64(1))
            .await
            .unwrap();
        assert_eq!(
            *service.source.last_call.lock().unwrap(),
            Some(("foo".to_string(), MAX_FETCH_LIMIT))
        );
        assert!(!selection.time_filter_applied);
    }

    #[tokio::test]
    async fn general_pick_draws_from_fetched_batch() {
        let names: Vec<String> = (0..40).map(|i| format!("u{i}")).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let service = PickService::new(FakeSource::with_usernames(&refs));
        let request = SelectionRequest::new("foo", SelectionMode::general(30).unwrap()).unwrap();

        let selection = service.pick(&request).await.unwrap();
        assert_eq!(selection.population, 30);
        assert!(names[..30].contains(&selection.winner.username));
    }

    #[tokio::test]
    async fn timeout_surfaces_as_network_error() {
        let source = FakeSource {
            fail_with_timeout: true,
            ..FakeSource::default()
        };
        let service = PickService::new(source);
        let request = SelectionRequest::new("foo", SelectionMode::general(10).unwrap()).unwrap();

        let err = service.pick(&request).await.unwrap_err();
        assert!(matches!(err, PickError::Fetch(FetchError::Network(_))));
        assert_eq!(err.kind(), "network_error");
        assert_eq!(service.source.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn records_without_usernames_leave_empty_population() {
        let source = FakeSource {
            followers: vec![serde_json::json!({ "full_name": "nobody" })],
            ..FakeSource::default()
        };
        let service = PickService::new(source);
        let request = SelectionRequest::new("foo", SelectionMode::general(10).unwrap()).unwrap();

        let err = service.pick(&request).await.unwrap_err();
        assert!(matches!(err, PickError::EmptyPopulation { .. }));
    }

    #[test]
    fn fetch_limit_per_mode() {
        assert_eq!(
            PickService::<FakeSource>::fetch_limit(&SelectionMode::General { count: 30 }),
            30
        );
        assert_eq!(
            PickService::<FakeSource>::fetch_limit(&SelectionMode::Orientation {
                time_window_hours: 2.0
            }),
            MAX_FETCH_LIMIT
        );
    }

    #[test]
    fn from_config_requires_api_key() {
        let config = AppConfig {
            env: igpick_core::Environment::Test,
            bind_addr: "127.0.0.1:0".parse().unwrap(),
            log_level: "info".to_string(),
            api_key: None,
            api_host: "h".to_string(),
            api_base_url: "http://localhost:1".to_string(),
            request_timeout_secs: 1,
            user_agent: "test".to_string(),
            rate_limit_per_minute: 1,
        };
        let result = PickService::from_config(&config);
        assert!(matches!(result, Err(PickError::Config(_))));
    }
}
