//! Selection requests and their validation.
//!
//! A [`SelectionRequest`] can only be built through [`SelectionRequest::new`],
//! so every request that reaches the upstream client has a normalized handle
//! and an in-range mode parameter.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

pub const MIN_COUNT: u32 = 10;
pub const MAX_COUNT: u32 = 500;
pub const DEFAULT_COUNT: u32 = 50;

pub const MIN_TIME_WINDOW_HOURS: f64 = 0.5;
pub const MAX_TIME_WINDOW_HOURS: f64 = 24.0;
pub const DEFAULT_TIME_WINDOW_HOURS: f64 = 1.0;

/// Instagram caps handles at 30 characters.
const MAX_ACCOUNT_LEN: usize = 30;

/// How the winner population is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SelectionMode {
    /// Uniform draw over the first `count` fetched followers.
    General { count: u32 },
    /// Uniform draw over followers who followed within the last
    /// `time_window_hours`.
    Orientation { time_window_hours: f64 },
}

impl SelectionMode {
    /// Builds a general-mode selection over the first `count` followers.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::CountOutOfRange`] unless
    /// `MIN_COUNT <= count <= MAX_COUNT`.
    pub fn general(count: i64) -> Result<Self, ValidationError> {
        match u32::try_from(count) {
            Ok(c) if (MIN_COUNT..=MAX_COUNT).contains(&c) => Ok(Self::General { count: c }),
            _ => Err(ValidationError::CountOutOfRange {
                count,
                min: MIN_COUNT,
                max: MAX_COUNT,
            }),
        }
    }

    /// Builds an orientation-mode selection over a recent time window.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::TimeWindowOutOfRange`] unless the window is
    /// a finite value within `[MIN_TIME_WINDOW_HOURS, MAX_TIME_WINDOW_HOURS]`.
    pub fn orientation(time_window_hours: f64) -> Result<Self, ValidationError> {
        if (MIN_TIME_WINDOW_HOURS..=MAX_TIME_WINDOW_HOURS).contains(&time_window_hours) {
            Ok(Self::Orientation { time_window_hours })
        } else {
            Err(ValidationError::TimeWindowOutOfRange {
                hours: time_window_hours,
                min: MIN_TIME_WINDOW_HOURS,
                max: MAX_TIME_WINDOW_HOURS,
            })
        }
    }

    /// Resolves a mode from its wire name (`"general"` / `"orientation"`) and
    /// the optional mode parameters, applying the defaults for missing ones.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::UnknownMode`] for an unrecognized name, or
    /// the range errors of [`Self::general`] / [`Self::orientation`].
    pub fn parse(
        kind: &str,
        count: Option<i64>,
        time_window_hours: Option<f64>,
    ) -> Result<Self, ValidationError> {
        match kind.trim().to_ascii_lowercase().as_str() {
            "" | "general" => Self::general(count.unwrap_or(i64::from(DEFAULT_COUNT))),
            "orientation" => {
                Self::orientation(time_window_hours.unwrap_or(DEFAULT_TIME_WINDOW_HOURS))
            }
            other => Err(ValidationError::UnknownMode(other.to_string())),
        }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::General { .. } => "general",
            Self::Orientation { .. } => "orientation",
        }
    }
}

impl std::fmt::Display for SelectionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A validated request to pick one winner from `target_account`'s followers.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionRequest {
    target_account: String,
    mode: SelectionMode,
}

impl SelectionRequest {
    /// Normalizes `account` and pairs it with an already-validated mode.
    ///
    /// # Errors
    ///
    /// Returns the [`ValidationError`] from [`normalize_account`].
    pub fn new(account: &str, mode: SelectionMode) -> Result<Self, ValidationError> {
        Ok(Self {
            target_account: normalize_account(account)?,
            mode,
        })
    }

    #[must_use]
    pub fn target_account(&self) -> &str {
        &self.target_account
    }

    #[must_use]
    pub fn mode(&self) -> &SelectionMode {
        &self.mode
    }
}

/// Normalizes an operator-typed Instagram handle.
///
/// Leading `@` characters and all whitespace are removed (`"@foo"` becomes
/// `"foo"`, `"foo bar"` becomes `"foobar"`). The result must be non-empty,
/// at most 30 characters, and contain only ASCII letters, digits, `.` or `_`.
///
/// # Errors
///
/// Returns [`ValidationError::EmptyAccount`] when nothing is left after
/// normalization, or [`ValidationError::InvalidAccount`] for a handle
/// Instagram would not accept.
pub fn normalize_account(raw: &str) -> Result<String, ValidationError> {
    let account: String = raw
        .trim()
        .trim_start_matches('@')
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();

    if account.is_empty() {
        return Err(ValidationError::EmptyAccount);
    }

    if account.chars().count() > MAX_ACCOUNT_LEN {
        return Err(ValidationError::InvalidAccount {
            account,
            reason: format!("longer than {MAX_ACCOUNT_LEN} characters"),
        });
    }

    if let Some(bad) = account
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || *c == '.' || *c == '_'))
    {
        return Err(ValidationError::InvalidAccount {
            reason: format!("unexpected character '{bad}'"),
            account,
        });
    }

    Ok(account)
}
