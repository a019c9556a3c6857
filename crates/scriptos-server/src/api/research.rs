//! Channel, video and trend lookups plus the wizard's title and thumbnail
//! helpers.

use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use scriptos_core::{ChannelRecord, ThumbnailData, TitleVariant, VideoSummary};
use scriptos_studio::TrendSearch;
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{map_studio_error, ApiError, ApiResponse, AppState};

#[derive(Debug, Deserialize)]
pub(super) struct ResolveQuery {
    pub identifier: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct SearchQuery {
    pub q: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct TitlesRequest {
    pub topic: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ThumbnailConceptRequest {
    pub title: String,
    pub topic: String,
    pub style_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct ThumbnailImageRequest {
    pub prompt: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ThumbnailImage {
    image_base64: String,
}

fn require_text(req_id: &str, field: &str, value: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::new(
            req_id,
            "validation_error",
            format!("{field} must not be empty"),
        ));
    }
    Ok(())
}

pub(super) async fn resolve_channel(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<ResolveQuery>,
) -> Result<Json<ApiResponse<ChannelRecord>>, ApiError> {
    require_text(&req_id.0, "identifier", &query.identifier)?;
    let Some(channel) = state.studio.resolve_channel(&query.identifier).await else {
        return Err(ApiError::new(
            req_id.0,
            "not_found",
            format!("channel '{}' not found", query.identifier),
        ));
    };
    Ok(Json(ApiResponse::new(channel, req_id.0)))
}

pub(super) async fn get_video(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<VideoSummary>>, ApiError> {
    let Some(video) = state.studio.video_details(&id).await else {
        return Err(ApiError::new(
            req_id.0,
            "not_found",
            format!("video '{id}' not found"),
        ));
    };
    Ok(Json(ApiResponse::new(video, req_id.0)))
}

pub(super) async fn search_videos(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<ApiResponse<Vec<VideoSummary>>>, ApiError> {
    require_text(&req_id.0, "q", &query.q)?;
    let videos = state.studio.search_videos(&query.q).await;
    Ok(Json(ApiResponse::new(videos, req_id.0)))
}

pub(super) async fn trend_search(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<ApiResponse<TrendSearch>>, ApiError> {
    require_text(&req_id.0, "q", &query.q)?;
    let result = state
        .studio
        .trend_search(&query.q)
        .await
        .map_err(|e| map_studio_error(req_id.0.clone(), &e))?;
    Ok(Json(ApiResponse::new(result, req_id.0)))
}

pub(super) async fn viral_titles(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<TitlesRequest>,
) -> Result<Json<ApiResponse<Vec<TitleVariant>>>, ApiError> {
    require_text(&req_id.0, "topic", &body.topic)?;
    let titles = state
        .studio
        .viral_titles(&body.topic)
        .await
        .map_err(|e| map_studio_error(req_id.0.clone(), &e))?;
    Ok(Json(ApiResponse::new(titles, req_id.0)))
}

pub(super) async fn thumbnail_concept(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<ThumbnailConceptRequest>,
) -> Result<Json<ApiResponse<ThumbnailData>>, ApiError> {
    require_text(&req_id.0, "title", &body.title)?;
    let concept = state
        .studio
        .thumbnail_concept(&body.title, &body.topic, body.style_id.as_deref())
        .await
        .map_err(|e| map_studio_error(req_id.0.clone(), &e))?
        .ok_or_else(|| {
            ApiError::new(
                req_id.0.clone(),
                "upstream_error",
                "thumbnail concept generation failed",
            )
        })?;
    Ok(Json(ApiResponse::new(concept, req_id.0)))
}

pub(super) async fn thumbnail_image(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<ThumbnailImageRequest>,
) -> Result<Json<ApiResponse<ThumbnailImage>>, ApiError> {
    require_text(&req_id.0, "prompt", &body.prompt)?;
    let image_base64 = state
        .studio
        .thumbnail_image(&body.prompt)
        .await
        .map_err(|e| map_studio_error(req_id.0.clone(), &e))?
        .ok_or_else(|| {
            ApiError::new(
                req_id.0.clone(),
                "upstream_error",
                "image model returned no image",
            )
        })?;
    Ok(Json(ApiResponse::new(ThumbnailImage { image_base64 }, req_id.0)))
}
