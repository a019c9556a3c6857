use scriptos_core::CoreError;
use scriptos_gemini::GeminiError;
use scriptos_store::StoreError;
use scriptos_youtube::YoutubeError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StudioError {
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("generative API error: {0}")]
    Gemini(#[from] GeminiError),

    #[error("video platform error: {0}")]
    Youtube(#[from] YoutubeError),

    #[error("script not found: {0}")]
    ScriptNotFound(String),

    #[error("style not found: {0}")]
    StyleNotFound(String),

    #[error("flow not found: {0}")]
    FlowNotFound(String),

    #[error("invalid flow: {0}")]
    InvalidFlow(#[from] CoreError),

    /// The decode-failure placeholder is display-only.
    #[error("the decode-failure style cannot be saved")]
    SentinelStyle,
}

impl StudioError {
    /// True for lookups of a record that does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            StudioError::ScriptNotFound(_)
                | StudioError::StyleNotFound(_)
                | StudioError::FlowNotFound(_)
                | StudioError::Youtube(
                    YoutubeError::ChannelNotFound(_) | YoutubeError::VideoNotFound(_)
                )
        )
    }

    /// True when a credential is missing from configuration or the request.
    #[must_use]
    pub fn is_missing_credential(&self) -> bool {
        matches!(
            self,
            StudioError::Gemini(GeminiError::MissingApiKey)
                | StudioError::Youtube(
                    YoutubeError::MissingApiKey | YoutubeError::MissingAccessToken
                )
        )
    }
}
