pub mod app_config;
pub mod config;
pub mod error;
pub mod follower;
pub mod request;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use error::{ConfigError, ValidationError};
pub use follower::FollowerRecord;
pub use request::{
    normalize_account, SelectionMode, SelectionRequest, DEFAULT_COUNT, DEFAULT_TIME_WINDOW_HOURS,
    MAX_COUNT, MAX_TIME_WINDOW_HOURS, MIN_COUNT, MIN_TIME_WINDOW_HOURS,
};
