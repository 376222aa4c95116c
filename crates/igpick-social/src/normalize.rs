//! Normalization of raw API followers into [`FollowerRecord`]s.
//!
//! A bad entry never fails the batch: records without a usable username are
//! dropped, every other field falls back to empty/false/absent.

use chrono::{DateTime, Utc};
use igpick_core::FollowerRecord;
use serde_json::Value;

use crate::types::RawFollower;

/// Values above this are treated as milliseconds rather than seconds.
const MILLIS_THRESHOLD: i64 = 1_000_000_000_000;

/// Normalizes a fetched batch, preserving input order.
#[must_use]
pub fn normalize(raw: Vec<RawFollower>) -> Vec<FollowerRecord> {
    let total = raw.len();
    let records: Vec<FollowerRecord> = raw.into_iter().filter_map(normalize_follower).collect();
    if records.len() < total {
        tracing::debug!(
            dropped = total - records.len(),
            kept = records.len(),
            "dropped followers without a usable username"
        );
    }
    records
}

/// Converts one raw entry, or `None` if it has no usable username.
///
/// Entries that only carry the profile under a nested `user` object are read
/// from there.
#[must_use]
pub fn normalize_follower(raw: RawFollower) -> Option<FollowerRecord> {
    let Some(username) = coerce_string(raw.username.as_ref()) else {
        let outer_followed_at = parse_followed_at(raw.followed_at.as_ref());
        return raw
            .user
            .and_then(RawFollower::from_entry)
            .and_then(normalize_follower)
            .map(|mut record| {
                record.followed_at = record.followed_at.or(outer_followed_at);
                record
            });
    };

    Some(FollowerRecord {
        username,
        full_name: coerce_string(raw.full_name.as_ref()).unwrap_or_default(),
        profile_pic_url: coerce_string(raw.profile_pic_url.as_ref()),
        is_private: coerce_bool(raw.is_private.as_ref()),
        is_verified: coerce_bool(raw.is_verified.as_ref()),
        followed_at: parse_followed_at(raw.followed_at.as_ref()),
    })
}

/// Interprets a boolean-like flag.
///
/// `true`, non-zero numbers, and the strings `1`/`true`/`yes`/`y`/`on`
/// (any case) are true. Everything else is false.
#[must_use]
pub fn coerce_bool(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::String(s)) => matches!(
            s.trim().to_ascii_lowercase().as_str(),
            "1" | "true" | "yes" | "y" | "on"
        ),
        _ => false,
    }
}

/// Parses a follow timestamp: Unix seconds or milliseconds (number or
/// numeric string), or an RFC 3339 string.
#[must_use]
pub fn parse_followed_at(value: Option<&Value>) -> Option<DateTime<Utc>> {
    match value? {
        Value::Number(n) => {
            #[allow(clippy::cast_possible_truncation)]
            let secs = n.as_i64().or_else(|| n.as_f64().map(|f| f as i64))?;
            from_unix(secs)
        }
        Value::String(s) => {
            let s = s.trim();
            if let Ok(secs) = s.parse::<i64>() {
                return from_unix(secs);
            }
            DateTime::parse_from_rfc3339(s)
                .ok()
                .map(|dt| dt.with_timezone(&Utc))
        }
        _ => None,
    }
}

fn from_unix(value: i64) -> Option<DateTime<Utc>> {
    if value <= 0 {
        return None;
    }
    if value >= MILLIS_THRESHOLD {
        DateTime::from_timestamp_millis(value)
    } else {
        DateTime::from_timestamp(value, 0)
    }
}

fn coerce_string(value: Option<&Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) => {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_string())
        }
        _ => None,
    }
}
