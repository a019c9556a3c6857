mod profile;
mod research;
mod scripts;
mod styles;

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::State,
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post, put},
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use scriptos_gemini::GeminiError;
use scriptos_studio::{Studio, StudioError};
use scriptos_youtube::YoutubeError;
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::middleware::{enforce_rate_limit, request_id, RateLimitState, RequestId};

#[derive(Clone)]
pub struct AppState {
    pub studio: Arc<Studio>,
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: ErrorBody,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
    generative_api: &'static str,
    video_api: &'static str,
}

impl ResponseMeta {
    pub(super) fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
        }
    }
}

impl<T: Serialize> ApiResponse<T> {
    pub(super) fn new(data: T, request_id: String) -> Self {
        Self {
            data,
            meta: ResponseMeta::new(request_id),
        }
    }
}

impl ApiError {
    pub fn new(
        request_id: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            error: ErrorBody {
                code: code.into(),
                message: message.into(),
            },
            meta: ResponseMeta::new(request_id.into()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.error.code.as_str() {
            "not_found" => StatusCode::NOT_FOUND,
            "unauthorized" => StatusCode::UNAUTHORIZED,
            "bad_request" | "validation_error" => StatusCode::BAD_REQUEST,
            "rate_limited" => StatusCode::TOO_MANY_REQUESTS,
            "not_configured" => StatusCode::SERVICE_UNAVAILABLE,
            "upstream_error" => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

/// Maps a studio failure onto the error envelope.
pub(super) fn map_studio_error(request_id: String, error: &StudioError) -> ApiError {
    let code = match error {
        e if e.is_not_found() => "not_found",
        StudioError::Gemini(GeminiError::MissingApiKey)
        | StudioError::Youtube(YoutubeError::MissingApiKey) => "not_configured",
        StudioError::Youtube(YoutubeError::MissingAccessToken) => "unauthorized",
        StudioError::Youtube(YoutubeError::InvalidVideoReference(_)) => "bad_request",
        StudioError::SentinelStyle | StudioError::InvalidFlow(_) => "validation_error",
        StudioError::Gemini(_) | StudioError::Youtube(_) => "upstream_error",
        StudioError::Store(_)
        | StudioError::ScriptNotFound(_)
        | StudioError::StyleNotFound(_)
        | StudioError::FlowNotFound(_) => "internal_error",
    };
    if code == "internal_error" || code == "upstream_error" {
        tracing::error!(error = %error, "studio operation failed");
    } else {
        tracing::debug!(error = %error, code, "studio operation rejected");
    }
    ApiError::new(request_id, code, error.to_string())
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            HeaderName::from_static("x-request-id"),
        ])
        .expose_headers([
            header::CONTENT_DISPOSITION,
            HeaderName::from_static("x-request-id"),
        ])
}

fn api_router(rate_limit: RateLimitState) -> Router<AppState> {
    Router::new()
        .route("/api/v1/channels/resolve", get(research::resolve_channel))
        .route("/api/v1/videos/search", get(research::search_videos))
        .route("/api/v1/videos/{id}", get(research::get_video))
        .route("/api/v1/trends", get(research::trend_search))
        .route("/api/v1/titles", post(research::viral_titles))
        .route(
            "/api/v1/thumbnails/concept",
            post(research::thumbnail_concept),
        )
        .route("/api/v1/thumbnails/image", post(research::thumbnail_image))
        .route(
            "/api/v1/styles",
            get(styles::list_styles).post(styles::save_style),
        )
        .route("/api/v1/styles/decode", post(styles::decode_style))
        .route(
            "/api/v1/scripts",
            get(scripts::list_scripts).post(scripts::create_script),
        )
        .route(
            "/api/v1/scripts/{id}",
            get(scripts::get_script).delete(scripts::delete_script),
        )
        .route("/api/v1/scripts/{id}/remix", post(scripts::remix_script))
        .route(
            "/api/v1/scripts/{id}/analyze",
            post(scripts::analyze_script),
        )
        .route("/api/v1/scripts/{id}/status", put(scripts::set_status))
        .route("/api/v1/scripts/{id}/export", get(scripts::export_script))
        .route(
            "/api/v1/profile",
            get(profile::get_profile).put(profile::set_identity),
        )
        .route("/api/v1/profile/sync", post(profile::sync_profile))
        .route("/api/v1/chat", post(profile::chat))
        .route("/api/v1/flows", get(profile::list_flows))
        .route(
            "/api/v1/flows/{id}",
            get(profile::get_flow).put(profile::save_flow),
        )
        .layer(axum::middleware::from_fn_with_state(
            rate_limit,
            enforce_rate_limit,
        ))
}

pub fn build_app(state: AppState, rate_limit: RateLimitState) -> Router {
    let public_routes = Router::new().route("/api/v1/health", get(health));

    Router::new()
        .merge(public_routes)
        .merge(api_router(rate_limit))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> impl IntoResponse {
    let configured = |ok: bool| if ok { "configured" } else { "missing" };
    let generative = state.studio.has_generative_key();
    let video = state.studio.has_video_key();

    Json(ApiResponse::new(
        HealthData {
            status: if generative && video { "ok" } else { "degraded" },
            generative_api: configured(generative),
            video_api: configured(video),
        },
        req_id.0,
    ))
}

pub fn default_rate_limit_state() -> RateLimitState {
    RateLimitState::new(120, Duration::from_secs(60))
}
