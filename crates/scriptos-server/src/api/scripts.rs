use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Extension, Json,
};
use scriptos_core::{Script, ScriptStatus};
use scriptos_store::export_file_name;
use scriptos_studio::{RemixMode, ScriptDraft};
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{map_studio_error, ApiError, ApiResponse, AppState};

#[derive(Debug, Deserialize)]
pub(super) struct ScriptsQuery {
    pub status: Option<ScriptStatus>,
}

#[derive(Debug, Deserialize)]
pub(super) struct RemixRequest {
    pub mode: RemixMode,
}

/// Body of `PUT /scripts/{id}/status`. Without a status the script moves to
/// the next column.
#[derive(Debug, Default, Deserialize)]
pub(super) struct StatusRequest {
    pub status: Option<ScriptStatus>,
}

#[derive(Debug, Serialize)]
pub(super) struct DeletedScript {
    id: String,
    deleted: bool,
}

pub(super) async fn list_scripts(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<ScriptsQuery>,
) -> Result<Json<ApiResponse<Vec<Script>>>, ApiError> {
    let scripts = state
        .studio
        .scripts()
        .map_err(|e| map_studio_error(req_id.0.clone(), &e))?
        .into_iter()
        .filter(|s| query.status.is_none_or(|wanted| s.status == wanted))
        .collect();
    Ok(Json(ApiResponse::new(scripts, req_id.0)))
}

pub(super) async fn create_script(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(draft): Json<ScriptDraft>,
) -> Result<(StatusCode, Json<ApiResponse<Script>>), ApiError> {
    if draft.topic.trim().is_empty() {
        return Err(ApiError::new(
            req_id.0,
            "validation_error",
            "topic must not be empty",
        ));
    }
    let script = state
        .studio
        .create_script(draft)
        .await
        .map_err(|e| map_studio_error(req_id.0.clone(), &e))?;
    Ok((StatusCode::CREATED, Json(ApiResponse::new(script, req_id.0))))
}

pub(super) async fn get_script(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Script>>, ApiError> {
    let script = state
        .studio
        .script(&id)
        .map_err(|e| map_studio_error(req_id.0.clone(), &e))?;
    Ok(Json(ApiResponse::new(script, req_id.0)))
}

pub(super) async fn delete_script(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<DeletedScript>>, ApiError> {
    state
        .studio
        .delete_script(&id)
        .map_err(|e| map_studio_error(req_id.0.clone(), &e))?;
    Ok(Json(ApiResponse::new(
        DeletedScript { id, deleted: true },
        req_id.0,
    )))
}

pub(super) async fn remix_script(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(id): Path<String>,
    Json(body): Json<RemixRequest>,
) -> Result<Json<ApiResponse<Script>>, ApiError> {
    let script = state
        .studio
        .remix_script(&id, body.mode)
        .await
        .map_err(|e| map_studio_error(req_id.0.clone(), &e))?;
    Ok(Json(ApiResponse::new(script, req_id.0)))
}

pub(super) async fn analyze_script(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Script>>, ApiError> {
    let script = state
        .studio
        .analyze_script(&id)
        .await
        .map_err(|e| map_studio_error(req_id.0.clone(), &e))?;
    Ok(Json(ApiResponse::new(script, req_id.0)))
}

pub(super) async fn set_status(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(id): Path<String>,
    Json(body): Json<StatusRequest>,
) -> Result<Json<ApiResponse<Script>>, ApiError> {
    let result = match body.status {
        Some(status) => state.studio.set_script_status(&id, status),
        None => state.studio.advance_script(&id),
    };
    let script = result.map_err(|e| map_studio_error(req_id.0.clone(), &e))?;
    Ok(Json(ApiResponse::new(script, req_id.0)))
}

/// The script content as a Markdown download.
pub(super) async fn export_script(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let script = state
        .studio
        .script(&id)
        .map_err(|e| map_studio_error(req_id.0.clone(), &e))?;
    let file_name = export_file_name(&script);
    Ok((
        [
            (
                header::CONTENT_TYPE,
                "text/markdown; charset=utf-8".to_string(),
            ),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{file_name}\""),
            ),
        ],
        script.content,
    ))
}
