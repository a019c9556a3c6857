//! Normalized video-platform records handed to prompt builders and views.

use serde::{Deserialize, Serialize};

/// Hard cap on recent uploads carried by a [`ChannelRecord`].
///
/// Bounds the size of prompts built from channel data.
pub const MAX_RECENT_UPLOADS: usize = 5;

/// Hard cap, in characters, on each recent upload's description.
pub const MAX_UPLOAD_DESCRIPTION_CHARS: usize = 200;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentUpload {
    pub title: String,
    pub description: String,
}

impl RecentUpload {
    /// Builds an upload summary with the description truncated to
    /// [`MAX_UPLOAD_DESCRIPTION_CHARS`] characters.
    #[must_use]
    pub fn truncated(title: impl Into<String>, description: &str) -> Self {
        Self {
            title: title.into(),
            description: description
                .chars()
                .take(MAX_UPLOAD_DESCRIPTION_CHARS)
                .collect(),
        }
    }
}

/// A resolved channel. Built fresh per resolution; never cached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelRecord {
    pub title: String,
    pub description: String,
    /// Canonical handle (`customUrl`), e.g. `@abyssfiles`.
    pub custom_url: String,
    /// String-encoded integer, as the platform reports it.
    pub subscribers: String,
    /// String-encoded integer, as the platform reports it.
    pub video_count: String,
    pub keywords: String,
    pub recent_videos: Vec<RecentUpload>,
}

impl ChannelRecord {
    /// Renders the channel as the context block fed to the style decoder.
    #[must_use]
    pub fn context_block(&self) -> String {
        let videos = self
            .recent_videos
            .iter()
            .enumerate()
            .map(|(i, v)| format!("{}. \"{}\" - {}", i + 1, v.title, v.description))
            .collect::<Vec<_>>()
            .join("\n");
        format!(
            "CHANNEL: {} ({})\nSUBSCRIBERS: {}\nDESCRIPTION: {}\nKEYWORDS: {}\nRECENT VIDEO PATTERNS:\n{}",
            self.title, self.custom_url, self.subscribers, self.description, self.keywords, videos
        )
    }
}

/// A single video with the derived viral velocity metric.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoSummary {
    pub id: String,
    pub title: String,
    pub channel_title: String,
    pub thumbnail_url: String,
    /// RFC 3339 publish timestamp as returned by the platform.
    pub published_at: String,
    /// Thousands-separated view count, e.g. `"1,234,567"`.
    pub view_count: String,
    /// Views per elapsed day since publication (minimum one day).
    pub viral_velocity: u64,
    pub description: String,
}
