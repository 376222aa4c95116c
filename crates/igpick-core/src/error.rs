use thiserror::Error;

/// Errors raised while loading configuration from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

/// Rejected selection input. Always raised before any upstream call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("username is required")]
    EmptyAccount,

    #[error("invalid username \"{account}\": {reason}")]
    InvalidAccount { account: String, reason: String },

    #[error("follower count {count} is out of range ({min}-{max})")]
    CountOutOfRange { count: i64, min: u32, max: u32 },

    #[error("time window {hours}h is out of range ({min}-{max} hours)")]
    TimeWindowOutOfRange { hours: f64, min: f64, max: f64 },

    #[error("unknown pick type \"{0}\" (expected \"general\" or \"orientation\")")]
    UnknownMode(String),
}
