mod health;
mod pick;

use std::sync::Arc;

use axum::{
    http::{header, HeaderName, Method, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use igpick_picker::{PickResponse, PickService};
use igpick_social::SocialApiClient;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::{enforce_rate_limit, request_id, RateLimitState, REQUEST_ID_HEADER};

const INDEX_HTML: &str = include_str!("../../static/index.html");

#[derive(Clone)]
pub struct AppState {
    /// `None` when the service started without `RAPIDAPI_KEY` (development
    /// only); picks then fail with a configuration error.
    pub picker: Option<Arc<PickService<SocialApiClient>>>,
    /// Whether `RAPIDAPI_KEY` held a non-blank value at startup.
    pub api_key_configured: bool,
}

impl AppState {
    #[must_use]
    pub fn new(picker: Option<PickService<SocialApiClient>>, api_key_configured: bool) -> Self {
        Self {
            picker: picker.map(Arc::new),
            api_key_configured,
        }
    }
}

/// A [`PickResponse`] with its HTTP status.
#[derive(Debug)]
pub struct PickReply(pub PickResponse);

impl PickReply {
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            PickResponse::Success { .. } => StatusCode::OK,
            PickResponse::Failure { kind, .. } => match kind.as_str() {
                "validation_error" | "empty_population" => StatusCode::BAD_REQUEST,
                "network_error" | "upstream_error" | "malformed_response" => {
                    StatusCode::BAD_GATEWAY
                }
                "rate_limited" => StatusCode::TOO_MANY_REQUESTS,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }
}

impl IntoResponse for PickReply {
    fn into_response(self) -> Response {
        (self.status(), Json(self.0)).into_response()
    }
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static(REQUEST_ID_HEADER),
        ])
}

pub fn build_app(state: AppState, rate_limit: RateLimitState) -> Router {
    let pick_routes = Router::new()
        .route("/api/pick", post(pick::pick))
        .layer(axum::middleware::from_fn_with_state(
            rate_limit,
            enforce_rate_limit,
        ));

    Router::new()
        .route("/", get(index))
        .route("/api/health", get(health::health))
        .merge(pick_routes)
        .layer(
            ServiceBuilder::new()
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id))
                .layer(TraceLayer::new_for_http()),
        )
        .with_state(state)
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

#[cfg(test)]
#[path = "routes_test.rs"]
mod routes_tests;
