use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{CoreError, Language};

/// Production-board column a script sits in.
///
/// Variants are ordered the way the board lays them out, left to right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ScriptStatus {
    Idea,
    Drafting,
    Filming,
    Editing,
    Published,
}

impl ScriptStatus {
    pub const ALL: [ScriptStatus; 5] = [
        ScriptStatus::Idea,
        ScriptStatus::Drafting,
        ScriptStatus::Filming,
        ScriptStatus::Editing,
        ScriptStatus::Published,
    ];

    /// The column to the right of this one. `Published` is terminal.
    #[must_use]
    pub fn next(self) -> Option<ScriptStatus> {
        match self {
            ScriptStatus::Idea => Some(ScriptStatus::Drafting),
            ScriptStatus::Drafting => Some(ScriptStatus::Filming),
            ScriptStatus::Filming => Some(ScriptStatus::Editing),
            ScriptStatus::Editing => Some(ScriptStatus::Published),
            ScriptStatus::Published => None,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ScriptStatus::Idea => "IDEA",
            ScriptStatus::Drafting => "DRAFTING",
            ScriptStatus::Filming => "FILMING",
            ScriptStatus::Editing => "EDITING",
            ScriptStatus::Published => "PUBLISHED",
        }
    }
}

impl std::fmt::Display for ScriptStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScriptStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ScriptStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CoreError::InvalidStatus(s.to_string()))
    }
}

/// Scores returned by the viral-potential analyzer, each in `0..=100`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViralMetrics {
    pub hook_score: f64,
    pub retention_score: f64,
    pub controversy_score: f64,
    pub feedback: String,
}

impl ViralMetrics {
    /// Zero-score record carrying the reason the analysis could not run.
    #[must_use]
    pub fn failed(reason: &str) -> Self {
        Self {
            hook_score: 0.0,
            retention_score: 0.0,
            controversy_score: 0.0,
            feedback: format!("Analysis Failed: {reason}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TitleVariant {
    pub title: String,
    /// Psychological trigger the title leans on (curiosity gap, fear, ...).
    #[serde(default)]
    pub psychology: String,
    #[serde(default)]
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThumbnailData {
    pub concept: String,
    pub image_prompt: String,
    /// Base64-encoded image bytes once rendered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_base64: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReferenceType {
    File,
    Url,
    YoutubeVideo,
    YoutubeChannel,
}

impl ReferenceType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ReferenceType::File => "FILE",
            ReferenceType::Url => "URL",
            ReferenceType::YoutubeVideo => "YOUTUBE_VIDEO",
            ReferenceType::YoutubeChannel => "YOUTUBE_CHANNEL",
        }
    }
}

/// Research material attached to a script draft.
///
/// For `File` references `data` holds base64 file content and `mime_type`
/// is set; for the other kinds `data` is the URL or extracted text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScriptReference {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ReferenceType,
    pub data: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Script {
    pub id: String,
    pub title: String,
    pub topic: String,
    pub content: String,
    pub status: ScriptStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style_id: Option<String>,
    /// Epoch milliseconds.
    pub created_at: i64,
    /// Epoch milliseconds.
    pub last_modified: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub viral_metrics: Option<ViralMetrics>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_views: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<Language>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_title: Option<TitleVariant>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<ThumbnailData>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub references: Vec<ScriptReference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
}

impl Script {
    /// Creates a fresh `Idea`-column script with a new UUID and timestamps.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        topic: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        let now = now_millis();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            title: title.into(),
            topic: topic.into(),
            content: content.into(),
            status: ScriptStatus::Idea,
            style_id: None,
            created_at: now,
            last_modified: now,
            viral_metrics: None,
            estimated_views: None,
            language: None,
            selected_title: None,
            thumbnail: None,
            references: Vec::new(),
            duration: None,
        }
    }

    /// Bumps `last_modified` to the current time.
    pub fn touch(&mut self) {
        self.last_modified = now_millis();
    }
}

/// Current wall-clock time as epoch milliseconds.
#[must_use]
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
