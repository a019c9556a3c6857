//! Conversion of raw API payloads into the domain records in `scriptos_core`.
//!
//! Every accessor substitutes an empty or zero default for an absent field.

use chrono::{DateTime, Utc};
use scriptos_core::{
    ChannelAnalytics, ChannelRecord, ChartPoint, RecentUpload, UserProfile, VideoSummary,
    MAX_RECENT_UPLOADS,
};

use crate::metrics::{format_view_count, viral_velocity_from_rfc3339};
use crate::types::{
    ChannelItem, ChannelSnippet, ChannelStatistics, PlaylistItem, Thumbnail, Thumbnails, VideoItem,
};

/// Which thumbnail sizes to try, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThumbnailPreference {
    /// Single-video detail view: `maxres`, then `medium`.
    Detail,
    /// Search result grid: `medium`, then `default`.
    Grid,
}

fn thumb_url(thumb: Option<&Thumbnail>) -> Option<&str> {
    thumb.and_then(|t| t.url.as_deref()).filter(|u| !u.is_empty())
}

/// Picks a thumbnail URL, or an empty string when none of the preferred
/// sizes is present.
#[must_use]
pub fn pick_thumbnail(thumbnails: Option<&Thumbnails>, preference: ThumbnailPreference) -> String {
    let Some(t) = thumbnails else {
        return String::new();
    };
    let (first, second) = match preference {
        ThumbnailPreference::Detail => (t.maxres.as_ref(), t.medium.as_ref()),
        ThumbnailPreference::Grid => (t.medium.as_ref(), t.default.as_ref()),
    };
    thumb_url(first)
        .or_else(|| thumb_url(second))
        .unwrap_or_default()
        .to_string()
}

/// Parses a string-encoded count; absent or malformed counts are zero.
#[must_use]
pub fn parse_count(raw: Option<&str>) -> u64 {
    raw.and_then(|s| s.trim().parse().ok()).unwrap_or(0)
}

/// Builds a [`ChannelRecord`] from a channel item and its upload playlist.
///
/// Uploads beyond [`MAX_RECENT_UPLOADS`] are dropped and each description is
/// cut to the character cap.
#[must_use]
pub fn channel_record(item: &ChannelItem, uploads: &[PlaylistItem]) -> ChannelRecord {
    let empty_snippet = ChannelSnippet::default();
    let snippet = item.snippet.as_ref().unwrap_or(&empty_snippet);
    let empty_stats = ChannelStatistics::default();
    let stats = item.statistics.as_ref().unwrap_or(&empty_stats);

    let recent_videos = uploads
        .iter()
        .take(MAX_RECENT_UPLOADS)
        .map(|upload| {
            let s = upload.snippet.as_ref();
            RecentUpload::truncated(
                s.and_then(|s| s.title.clone()).unwrap_or_default(),
                s.and_then(|s| s.description.as_deref()).unwrap_or_default(),
            )
        })
        .collect();

    ChannelRecord {
        title: snippet.title.clone().unwrap_or_default(),
        description: snippet.description.clone().unwrap_or_default(),
        custom_url: snippet.custom_url.clone().unwrap_or_default(),
        subscribers: stats.subscriber_count.clone().unwrap_or_else(|| "0".to_string()),
        video_count: stats.video_count.clone().unwrap_or_else(|| "0".to_string()),
        keywords: item
            .branding_settings
            .as_ref()
            .and_then(|b| b.channel.as_ref())
            .and_then(|c| c.keywords.clone())
            .unwrap_or_default(),
        recent_videos,
    }
}

/// Uploads playlist id from a channel item, if the channel exposes one.
#[must_use]
pub fn uploads_playlist_id(item: &ChannelItem) -> Option<&str> {
    item.content_details
        .as_ref()
        .and_then(|d| d.related_playlists.as_ref())
        .and_then(|p| p.uploads.as_deref())
        .filter(|id| !id.is_empty())
}

/// Builds a [`VideoSummary`], deriving viral velocity relative to `now`.
#[must_use]
pub fn video_summary(
    item: &VideoItem,
    preference: ThumbnailPreference,
    now: DateTime<Utc>,
) -> VideoSummary {
    let snippet = item.snippet.as_ref();
    let views = parse_count(
        item.statistics
            .as_ref()
            .and_then(|s| s.view_count.as_deref()),
    );
    let published_at = snippet
        .and_then(|s| s.published_at.clone())
        .unwrap_or_default();

    VideoSummary {
        id: item.id.clone().unwrap_or_default(),
        title: snippet.and_then(|s| s.title.clone()).unwrap_or_default(),
        channel_title: snippet
            .and_then(|s| s.channel_title.clone())
            .unwrap_or_default(),
        thumbnail_url: pick_thumbnail(snippet.and_then(|s| s.thumbnails.as_ref()), preference),
        viral_velocity: viral_velocity_from_rfc3339(views, &published_at, now),
        published_at,
        view_count: format_view_count(views),
        description: snippet
            .and_then(|s| s.description.clone())
            .unwrap_or_default(),
    }
}

/// The linked-channel fields of a [`UserProfile`] from a `mine=true` lookup.
/// Identity is left blank; callers merge it onto the stored profile.
#[must_use]
pub fn linked_profile(item: &ChannelItem) -> UserProfile {
    let snippet = item.snippet.as_ref();
    UserProfile {
        channel_id: item.id.clone(),
        channel_name: snippet.and_then(|s| s.title.clone()),
        channel_handle: snippet.and_then(|s| s.custom_url.clone()),
        avatar_url: snippet
            .and_then(|s| s.thumbnails.as_ref())
            .and_then(|t| thumb_url(t.medium.as_ref()))
            .map(str::to_string),
        subscriber_count: item
            .statistics
            .as_ref()
            .and_then(|s| s.subscriber_count.clone()),
        ..UserProfile::default()
    }
}

/// Totals from channel statistics, combined with an optional daily chart.
#[must_use]
pub fn channel_analytics(
    stats: &ChannelStatistics,
    chart_data: Vec<ChartPoint>,
    growth_rate: Option<i64>,
) -> ChannelAnalytics {
    let views = parse_count(stats.view_count.as_deref());
    let videos = parse_count(stats.video_count.as_deref());
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    let avg_views = (views as f64 / videos.max(1) as f64).round() as u64;

    ChannelAnalytics {
        views,
        subscribers: parse_count(stats.subscriber_count.as_deref()),
        videos,
        avg_views,
        growth_rate,
        top_videos: Vec::new(),
        chart_data,
    }
}
