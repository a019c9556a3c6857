use thiserror::Error;

/// Errors returned by the video-platform client.
#[derive(Debug, Error)]
pub enum YoutubeError {
    /// No Data API key was configured.
    #[error("YouTube API key is missing")]
    MissingApiKey,

    /// No OAuth access token was supplied for an authenticated endpoint.
    #[error("YouTube access token is missing")]
    MissingAccessToken,

    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("YouTube API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// No channel matched the identifier by any resolution path.
    #[error("channel not found: {0}")]
    ChannelNotFound(String),

    #[error("video not found: {0}")]
    VideoNotFound(String),

    /// The input is neither a recognizable video URL nor a bare video id.
    #[error("not a video URL or id: {0}")]
    InvalidVideoReference(String),

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}
