use axum::{extract::State, Json};
use chrono::Local;
use igpick_picker::selection::TIMESTAMP_FORMAT;
use serde::{Deserialize, Serialize};

use super::AppState;

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HealthData {
    pub status: String,
    pub api_key_configured: bool,
    /// Whether the pick service was constructed at startup.
    pub modules_loaded: bool,
    pub timestamp: String,
}

pub(super) async fn health(State(state): State<AppState>) -> Json<HealthData> {
    Json(HealthData {
        status: "healthy".to_string(),
        api_key_configured: state.api_key_configured,
        modules_loaded: state.picker.is_some(),
        timestamp: Local::now().format(TIMESTAMP_FORMAT).to_string(),
    })
}
