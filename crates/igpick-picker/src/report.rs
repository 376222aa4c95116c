//! JSON shape shared by the HTTP API and `igpick --json`.

use igpick_core::FollowerRecord;
use serde::{Deserialize, Serialize};

use crate::selection::SelectionResult;

const NO_NAME: &str = "No name";

/// The winner as presenters show it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinnerView {
    pub username: String,
    pub full_name: String,
    pub is_private: bool,
    pub is_verified: bool,
    pub profile_pic_url: String,
}

impl From<&FollowerRecord> for WinnerView {
    fn from(record: &FollowerRecord) -> Self {
        let full_name = if record.full_name.trim().is_empty() {
            NO_NAME.to_string()
        } else {
            record.full_name.clone()
        };
        Self {
            username: record.username.clone(),
            full_name,
            is_private: record.is_private,
            is_verified: record.is_verified,
            profile_pic_url: record.profile_pic_url.clone().unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PickResponse {
    Success {
        success: bool,
        winner: WinnerView,
        info: String,
        timestamp: String,
    },
    Failure {
        success: bool,
        error: String,
        kind: String,
    },
}

impl PickResponse {
    #[must_use]
    pub fn from_result(result: &SelectionResult) -> Self {
        match result {
            Ok(selection) => PickResponse::Success {
                success: true,
                winner: WinnerView::from(&selection.winner),
                info: selection.info.clone(),
                timestamp: selection.timestamp.clone(),
            },
            Err(e) => Self::failure(e.kind(), e.to_string()),
        }
    }

    /// A failure that never reached the pick service (bad request body,
    /// picker unavailable).
    #[must_use]
    pub fn failure(kind: &str, error: impl Into<String>) -> Self {
        PickResponse::Failure {
            success: false,
            error: error.into(),
            kind: kind.to_string(),
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, PickResponse::Success { .. })
    }
}
