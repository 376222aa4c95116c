//! Wire types for the follower-listing API.
//!
//! The upstream is loose about both the envelope and the field types (flags
//! arrive as booleans, `0`/`1`, or strings), so [`RawFollower`] keeps every
//! field as a raw [`serde_json::Value`] and leaves coercion to
//! [`crate::normalize`].

use serde_json::{Map, Value};

/// Keys the upstream has used for the follow time, in order of preference.
const FOLLOWED_AT_KEYS: [&str; 3] = ["followed_at", "follow_timestamp", "followed_at_timestamp"];

/// One follower entry exactly as the upstream sent it.
///
/// Built from any JSON object without failing: a field of an unexpected type
/// is carried through as-is and judged later by the normalizer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawFollower {
    pub username: Option<Value>,
    pub full_name: Option<Value>,
    pub profile_pic_url: Option<Value>,
    pub is_private: Option<Value>,
    pub is_verified: Option<Value>,
    /// First non-null value among [`FOLLOWED_AT_KEYS`].
    pub followed_at: Option<Value>,
    /// Some responses nest the profile under `user` instead of flattening it.
    /// Only meaningful when it is an object.
    pub user: Option<Value>,
}

impl RawFollower {
    /// Reads one array entry; `None` if it is not a JSON object.
    #[must_use]
    pub fn from_entry(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self::from(map)),
            _ => None,
        }
    }
}

impl From<Map<String, Value>> for RawFollower {
    fn from(mut map: Map<String, Value>) -> Self {
        let mut take = |key: &str| map.remove(key).filter(|v| !v.is_null());
        let followed_at = FOLLOWED_AT_KEYS.into_iter().find_map(&mut take);
        Self {
            username: take("username"),
            full_name: take("full_name"),
            profile_pic_url: take("profile_pic_url"),
            is_private: take("is_private"),
            is_verified: take("is_verified"),
            followed_at,
            user: take("user"),
        }
    }
}

/// What a successful (2xx, valid JSON) response body turned out to hold.
#[derive(Debug)]
pub(crate) enum Envelope {
    Followers(Vec<Value>),
    /// `{"message": "..."}` or `{"error": "..."}` with no follower list.
    ApiMessage(String),
    Unrecognized,
}

/// Locates the follower array in a response body.
///
/// Accepted shapes, in order: a bare array, `data.items`, `data` as an array,
/// `items`, `followers`.
pub(crate) fn classify_body(body: Value) -> Envelope {
    let mut obj = match body {
        Value::Array(items) => return Envelope::Followers(items),
        Value::Object(obj) => obj,
        _ => return Envelope::Unrecognized,
    };

    if let Some(data) = obj.remove("data") {
        match data {
            Value::Array(items) => return Envelope::Followers(items),
            Value::Object(mut inner) => {
                if let Some(Value::Array(items)) = inner.remove("items") {
                    return Envelope::Followers(items);
                }
            }
            _ => {}
        }
    }

    for key in ["items", "followers"] {
        if let Some(Value::Array(items)) = obj.remove(key) {
            return Envelope::Followers(items);
        }
    }

    for key in ["message", "error"] {
        if let Some(Value::String(msg)) = obj.get(key) {
            return Envelope::ApiMessage(msg.clone());
        }
    }

    Envelope::Unrecognized
}
