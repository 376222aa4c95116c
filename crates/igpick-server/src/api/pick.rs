use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};
use igpick_core::{ConfigError, SelectionMode, SelectionRequest, ValidationError};
use igpick_picker::{PickError, PickResponse};
use serde::Deserialize;

use super::{AppState, PickReply};
use crate::middleware::RequestId;

/// Body of `POST /api/pick`.
#[derive(Debug, Deserialize)]
pub struct PickBody {
    #[serde(default)]
    username: String,
    /// `"general"` (default) or `"orientation"`.
    #[serde(rename = "type", default)]
    mode: Option<String>,
    count: Option<i64>,
    time_window: Option<f64>,
}

impl PickBody {
    fn into_request(self) -> Result<SelectionRequest, ValidationError> {
        let mode =
            SelectionMode::parse(self.mode.as_deref().unwrap_or(""), self.count, self.time_window)?;
        SelectionRequest::new(&self.username, mode)
    }
}

pub(super) async fn pick(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    body: Result<Json<PickBody>, JsonRejection>,
) -> PickReply {
    let body = match body {
        Ok(Json(body)) => body,
        Err(rejection) => {
            tracing::info!(request_id = %req_id.0, error = %rejection.body_text(), "rejected pick body");
            return PickReply(PickResponse::failure(
                "validation_error",
                format!("invalid request body: {}", rejection.body_text()),
            ));
        }
    };

    let result = match body.into_request() {
        Err(e) => Err(PickError::from(e)),
        Ok(request) => match &state.picker {
            None => Err(PickError::Config(ConfigError::MissingEnvVar(
                "RAPIDAPI_KEY".to_string(),
            ))),
            Some(picker) => {
                tracing::info!(
                    request_id = %req_id.0,
                    account = request.target_account(),
                    mode = %request.mode(),
                    "pick requested"
                );
                picker.pick(&request).await
            }
        },
    };

    if let Err(e) = &result {
        tracing::warn!(request_id = %req_id.0, kind = e.kind(), error = %e, "pick failed");
    }
    PickReply(PickResponse::from_result(&result))
}
