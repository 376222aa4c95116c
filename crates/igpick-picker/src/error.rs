use igpick_core::{ConfigError, ValidationError};
use igpick_social::FetchError;
use thiserror::Error;

/// Every way a pick can end without a winner. All are terminal for the
/// current request.
#[derive(Debug, Error)]
pub enum PickError {
    #[error("invalid input: {0}")]
    Validation(#[from] ValidationError),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Nothing to draw from. A valid outcome, not a bug.
    #[error("no winner could be selected: {reason}")]
    EmptyPopulation { reason: String },
}

impl PickError {
    /// Stable machine-readable name used by presenters.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            PickError::Validation(_) => "validation_error",
            PickError::Config(_) => "config_error",
            PickError::Fetch(FetchError::Network(_)) => "network_error",
            PickError::Fetch(FetchError::Upstream { .. }) => "upstream_error",
            PickError::Fetch(FetchError::Malformed(_)) => "malformed_response",
            PickError::EmptyPopulation { .. } => "empty_population",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_names_each_variant() {
        assert_eq!(
            PickError::from(ValidationError::EmptyAccount).kind(),
            "validation_error"
        );
        assert_eq!(
            PickError::from(ConfigError::MissingEnvVar("RAPIDAPI_KEY".into())).kind(),
            "config_error"
        );
        assert_eq!(
            PickError::from(FetchError::Network("down".into())).kind(),
            "network_error"
        );
        assert_eq!(
            PickError::from(FetchError::Upstream {
                status: 500,
                body_excerpt: String::new()
            })
            .kind(),
            "upstream_error"
        );
        assert_eq!(
            PickError::from(FetchError::Malformed("x".into())).kind(),
            "malformed_response"
        );
        assert_eq!(
            PickError::EmptyPopulation {
                reason: "none".into()
            }
            .kind(),
            "empty_population"
        );
    }

    #[test]
    fn empty_population_message_explains_outcome() {
        let err = PickError::EmptyPopulation {
            reason: "no new followers in the last 1 hour(s)".into(),
        };
        assert_eq!(
            err.to_string(),
            "no winner could be selected: no new followers in the last 1 hour(s)"
        );
    }
}
