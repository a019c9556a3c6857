use axum::{extract::State, http::StatusCode, Extension, Json};
use scriptos_core::StyleProfile;
use serde::Deserialize;

use crate::middleware::RequestId;

use super::{map_studio_error, ApiError, ApiResponse, AppState};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct DecodeRequest {
    pub input: String,
    #[serde(default)]
    pub from_channel: bool,
}

pub(super) async fn list_styles(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<ApiResponse<Vec<StyleProfile>>>, ApiError> {
    let styles = state
        .studio
        .styles()
        .map_err(|e| map_studio_error(req_id.0.clone(), &e))?;
    Ok(Json(ApiResponse::new(styles, req_id.0)))
}

/// Upserts a style. A blank id is replaced with a fresh one.
pub(super) async fn save_style(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(mut style): Json<StyleProfile>,
) -> Result<(StatusCode, Json<ApiResponse<StyleProfile>>), ApiError> {
    if style.name.trim().is_empty() {
        return Err(ApiError::new(
            req_id.0,
            "validation_error",
            "name must not be empty",
        ));
    }
    if style.id.trim().is_empty() {
        style.id = uuid::Uuid::new_v4().to_string();
    }
    state
        .studio
        .save_style(&style)
        .map_err(|e| map_studio_error(req_id.0.clone(), &e))?;
    Ok((StatusCode::CREATED, Json(ApiResponse::new(style, req_id.0))))
}

/// Decodes a style. A failed decode still answers 200 with the placeholder
/// profile (id `error`), which is not saved.
pub(super) async fn decode_style(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<DecodeRequest>,
) -> Result<Json<ApiResponse<StyleProfile>>, ApiError> {
    if body.input.trim().is_empty() {
        return Err(ApiError::new(
            req_id.0,
            "validation_error",
            "input must not be empty",
        ));
    }
    let profile = state
        .studio
        .decode_style(&body.input, body.from_channel)
        .await
        .map_err(|e| map_studio_error(req_id.0.clone(), &e))?;
    Ok(Json(ApiResponse::new(profile, req_id.0)))
}
