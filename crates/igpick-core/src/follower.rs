use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A follower in canonical form, as produced by the normalizer.
///
/// `username` is the selection key. Duplicates are kept: a user listed twice
/// simply has two tickets in the draw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FollowerRecord {
    pub username: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub profile_pic_url: Option<String>,
    #[serde(default)]
    pub is_private: bool,
    #[serde(default)]
    pub is_verified: bool,
    /// When the follow happened. Only present if the upstream reports it.
    #[serde(default)]
    pub followed_at: Option<DateTime<Utc>>,
}

impl FollowerRecord {
    /// Builds a public, unverified record with only a username set.
    #[must_use]
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            full_name: String::new(),
            profile_pic_url: None,
            is_private: false,
            is_verified: false,
            followed_at: None,
        }
    }

    #[must_use]
    pub fn with_followed_at(mut self, followed_at: DateTime<Utc>) -> Self {
        self.followed_at = Some(followed_at);
        self
    }
}
