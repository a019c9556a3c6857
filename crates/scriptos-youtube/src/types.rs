//! Data API and Analytics API response shapes.
//!
//! Every nested field is optional: the platform omits branding, thumbnails
//! and statistics freely, and one missing branch must not fail a whole
//! lookup. Accessors in [`crate::normalize`] supply the defaults.

use serde::{Deserialize, Deserializer};

/// Generic `{ "items": [...] }` list envelope.
#[derive(Debug, Deserialize)]
pub struct ListResponse<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}

/// Error envelope: `{ "error": { "code": 403, "message": "..." } }`.
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: String,
}

// ---------------------------------------------------------------------------
// Shared
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Thumbnails {
    pub default: Option<Thumbnail>,
    pub medium: Option<Thumbnail>,
    pub high: Option<Thumbnail>,
    pub maxres: Option<Thumbnail>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Thumbnail {
    pub url: Option<String>,
}

// ---------------------------------------------------------------------------
// channels
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChannelItem {
    pub id: Option<String>,
    pub snippet: Option<ChannelSnippet>,
    pub content_details: Option<ChannelContentDetails>,
    pub statistics: Option<ChannelStatistics>,
    pub branding_settings: Option<BrandingSettings>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChannelSnippet {
    pub title: Option<String>,
    pub description: Option<String>,
    pub custom_url: Option<String>,
    pub thumbnails: Option<Thumbnails>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChannelContentDetails {
    pub related_playlists: Option<RelatedPlaylists>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RelatedPlaylists {
    pub uploads: Option<String>,
}

/// Counts arrive as strings; numbers are tolerated too.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChannelStatistics {
    #[serde(deserialize_with = "count_string")]
    pub view_count: Option<String>,
    #[serde(deserialize_with = "count_string")]
    pub subscriber_count: Option<String>,
    #[serde(deserialize_with = "count_string")]
    pub video_count: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct BrandingSettings {
    pub channel: Option<BrandingChannel>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct BrandingChannel {
    pub keywords: Option<String>,
}

// ---------------------------------------------------------------------------
// search
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SearchItem {
    pub id: Option<SearchId>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SearchId {
    pub channel_id: Option<String>,
    pub video_id: Option<String>,
}

// ---------------------------------------------------------------------------
// playlistItems
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PlaylistItem {
    pub snippet: Option<PlaylistSnippet>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PlaylistSnippet {
    pub title: Option<String>,
    pub description: Option<String>,
}

// ---------------------------------------------------------------------------
// videos
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct VideoItem {
    pub id: Option<String>,
    pub snippet: Option<VideoSnippet>,
    pub statistics: Option<VideoStatistics>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VideoSnippet {
    pub title: Option<String>,
    pub channel_title: Option<String>,
    pub description: Option<String>,
    pub published_at: Option<String>,
    pub thumbnails: Option<Thumbnails>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VideoStatistics {
    #[serde(deserialize_with = "count_string")]
    pub view_count: Option<String>,
}

// ---------------------------------------------------------------------------
// Analytics reports
// ---------------------------------------------------------------------------

/// `reports` response. With `dimensions=day&metrics=views` each row is
/// `["YYYY-MM-DD", views]`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AnalyticsReport {
    pub rows: Vec<Vec<serde_json::Value>>,
}

fn count_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}
