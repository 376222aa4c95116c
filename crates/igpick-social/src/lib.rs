pub mod client;
pub mod error;
pub mod normalize;
pub mod source;
pub mod types;

pub use client::{SocialApiClient, SocialApiConfig, MAX_FETCH_LIMIT};
pub use error::FetchError;
pub use normalize::normalize;
pub use source::FollowerSource;
pub use types::RawFollower;
