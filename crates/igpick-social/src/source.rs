use std::future::Future;

use crate::client::SocialApiClient;
use crate::error::FetchError;
use crate::types::RawFollower;

/// Anything that can list an account's followers.
///
/// [`SocialApiClient`] is the production implementation; tests substitute
/// in-memory fakes.
pub trait FollowerSource: Send + Sync {
    fn fetch_followers(
        &self,
        account: &str,
        limit: u32,
    ) -> impl Future<Output = Result<Vec<RawFollower>, FetchError>> + Send;
}

impl FollowerSource for SocialApiClient {
    fn fetch_followers(
        &self,
        account: &str,
        limit: u32,
    ) -> impl Future<Output = Result<Vec<RawFollower>, FetchError>> + Send {
        SocialApiClient::fetch_followers(self, account, limit)
    }
}
