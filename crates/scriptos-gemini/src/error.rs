use thiserror::Error;

/// Errors returned by the generative-service client.
#[derive(Debug, Error)]
pub enum GeminiError {
    /// No API key was configured.
    #[error("Gemini API key is missing")]
    MissingApiKey,

    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("Gemini API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The response carried no text or image part.
    #[error("No data returned")]
    EmptyResponse,

    /// The response envelope could not be deserialized.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The model's text did not contain the structured payload asked for.
    #[error("Model response was not valid JSON for {0}")]
    Unparseable(String),

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}
