//! Creator profile, co-pilot chat and automation flows.

use axum::{
    extract::{Path, State},
    http::HeaderMap,
    Extension, Json,
};
use scriptos_core::{AutomationFlow, ChannelIdentity, ChatMessage, UserProfile};
use serde::{Deserialize, Serialize};

use crate::middleware::{bearer_token, RequestId};

use super::{map_studio_error, ApiError, ApiResponse, AppState};

#[derive(Debug, Deserialize)]
pub(super) struct ChatRequest {
    #[serde(default)]
    pub history: Vec<ChatMessage>,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub(super) struct ChatReply {
    reply: String,
}

pub(super) async fn get_profile(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<ApiResponse<UserProfile>>, ApiError> {
    let profile = state
        .studio
        .profile()
        .map_err(|e| map_studio_error(req_id.0.clone(), &e))?;
    Ok(Json(ApiResponse::new(profile, req_id.0)))
}

/// Replaces the channel identity.
pub(super) async fn set_identity(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(identity): Json<ChannelIdentity>,
) -> Result<Json<ApiResponse<UserProfile>>, ApiError> {
    let profile = state
        .studio
        .set_identity(identity)
        .map_err(|e| map_studio_error(req_id.0.clone(), &e))?;
    Ok(Json(ApiResponse::new(profile, req_id.0)))
}

/// Syncs the linked channel using the caller's OAuth token from the
/// `Authorization: Bearer` header. The token is not kept.
pub(super) async fn sync_profile(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    headers: HeaderMap,
) -> Result<Json<ApiResponse<UserProfile>>, ApiError> {
    let Some(token) = bearer_token(&headers) else {
        return Err(ApiError::new(
            req_id.0,
            "unauthorized",
            "missing bearer access token",
        ));
    };
    let profile = state
        .studio
        .sync_profile(token)
        .await
        .map_err(|e| map_studio_error(req_id.0.clone(), &e))?;
    Ok(Json(ApiResponse::new(profile, req_id.0)))
}

pub(super) async fn chat(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<ChatRequest>,
) -> Result<Json<ApiResponse<ChatReply>>, ApiError> {
    if body.message.trim().is_empty() {
        return Err(ApiError::new(
            req_id.0,
            "validation_error",
            "message must not be empty",
        ));
    }
    let reply = state
        .studio
        .chat(&body.history, &body.message)
        .await
        .map_err(|e| map_studio_error(req_id.0.clone(), &e))?;
    Ok(Json(ApiResponse::new(ChatReply { reply }, req_id.0)))
}

pub(super) async fn list_flows(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<ApiResponse<Vec<AutomationFlow>>>, ApiError> {
    let flows = state
        .studio
        .flows()
        .map_err(|e| map_studio_error(req_id.0.clone(), &e))?;
    Ok(Json(ApiResponse::new(flows, req_id.0)))
}

pub(super) async fn get_flow(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<AutomationFlow>>, ApiError> {
    let flow = state
        .studio
        .flow(&id)
        .map_err(|e| map_studio_error(req_id.0.clone(), &e))?;
    Ok(Json(ApiResponse::new(flow, req_id.0)))
}

/// Replaces the flow stored under the path id with the edited graph.
pub(super) async fn save_flow(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(id): Path<String>,
    Json(mut flow): Json<AutomationFlow>,
) -> Result<Json<ApiResponse<AutomationFlow>>, ApiError> {
    if flow.name.trim().is_empty() {
        return Err(ApiError::new(
            req_id.0,
            "validation_error",
            "flow name must not be empty",
        ));
    }
    flow.id = id;
    state
        .studio
        .save_flow(&flow)
        .map_err(|e| map_studio_error(req_id.0.clone(), &e))?;
    Ok(Json(ApiResponse::new(flow, req_id.0)))
}
