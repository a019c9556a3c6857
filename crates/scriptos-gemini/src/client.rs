//! HTTP transport for `generateContent`.

use std::time::Duration;

use reqwest::{Client, Url};

use crate::error::GeminiError;
use crate::types::{ErrorResponse, GenerateContentRequest, GenerateContentResponse};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/";
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Client for the generative-language REST API.
///
/// Holds the text and image model names so operations do not repeat them.
/// Use [`GeminiClient::new`] for production or [`GeminiClient::with_base_url`]
/// to point at a mock server in tests.
pub struct GeminiClient {
    client: Client,
    api_key: Option<String>,
    base_url: Url,
    model: String,
    image_model: String,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("api_key", &self.api_key.as_ref().map(|_| "[redacted]"))
            .field("base_url", &self.base_url.as_str())
            .field("model", &self.model)
            .field("image_model", &self.image_model)
            .finish_non_exhaustive()
    }
}

impl GeminiClient {
    /// Creates a client pointed at the production API.
    ///
    /// # Errors
    ///
    /// Returns [`GeminiError::Http`] if the `reqwest::Client` cannot be built.
    pub fn new(
        api_key: Option<&str>,
        model: &str,
        image_model: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, GeminiError> {
        Self::with_base_url(
            api_key,
            model,
            image_model,
            timeout_secs,
            user_agent,
            DEFAULT_BASE_URL,
        )
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`GeminiError::Http`] if the `reqwest::Client` cannot be built,
    /// or [`GeminiError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn with_base_url(
        api_key: Option<&str>,
        model: &str,
        image_model: &str,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, GeminiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let parsed = Url::parse(&normalised).map_err(|e| GeminiError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            api_key: api_key
                .map(str::trim)
                .filter(|k| !k.is_empty())
                .map(str::to_owned),
            base_url: parsed,
            model: model.to_string(),
            image_model: image_model.to_string(),
        })
    }

    /// # Errors
    ///
    /// Returns [`GeminiError::MissingApiKey`] when no key is configured.
    pub fn ensure_api_key(&self) -> Result<(), GeminiError> {
        self.api_key
            .as_ref()
            .map(|_| ())
            .ok_or(GeminiError::MissingApiKey)
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    #[must_use]
    pub fn image_model(&self) -> &str {
        &self.image_model
    }

    /// `{base}/v1beta/models/{model}:generateContent`. A `models/` prefix on
    /// the model name is accepted.
    fn endpoint(&self, model: &str) -> Result<Url, GeminiError> {
        let model = model.trim();
        let model = model.strip_prefix("models/").unwrap_or(model);
        let path = format!("v1beta/models/{model}:generateContent");
        self.base_url
            .join(&path)
            .map_err(|e| GeminiError::InvalidBaseUrl {
                url: format!("{}{path}", self.base_url),
                reason: e.to_string(),
            })
    }

    /// Sends one `generateContent` call.
    ///
    /// # Errors
    ///
    /// - [`GeminiError::MissingApiKey`] if no key is configured.
    /// - [`GeminiError::Http`] on network failure.
    /// - [`GeminiError::Api`] on a non-2xx status, with the API's message.
    /// - [`GeminiError::Deserialize`] if the envelope does not parse.
    pub async fn generate(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, GeminiError> {
        let api_key = self.api_key.as_deref().ok_or(GeminiError::MissingApiKey)?;
        let url = self.endpoint(model)?;

        let response = self
            .client
            .post(url)
            .header(API_KEY_HEADER, api_key)
            .json(request)
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorResponse>(&body)
                .map(|e| e.error.message)
                .ok()
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("error").to_string());
            return Err(GeminiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: GenerateContentResponse =
            serde_json::from_str(&body).map_err(|source| GeminiError::Deserialize {
                context: format!("generateContent({model})"),
                source,
            })?;
        tracing::debug!(model, candidates = parsed.candidates.len(), "generateContent ok");
        Ok(parsed)
    }

    /// [`GeminiClient::generate`] with the text model, returning the text.
    ///
    /// # Errors
    ///
    /// As [`GeminiClient::generate`], plus [`GeminiError::EmptyResponse`]
    /// when the response carries no text.
    pub async fn generate_text(&self, request: &GenerateContentRequest) -> Result<String, GeminiError> {
        self.generate(&self.model, request)
            .await?
            .text()
            .ok_or(GeminiError::EmptyResponse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client(base_url: &str) -> GeminiClient {
        GeminiClient::with_base_url(
            Some("test-key"),
            "gemini-2.5-flash",
            "gemini-2.5-flash-image",
            30,
            "scriptos-test",
            base_url,
        )
        .expect("client construction should not fail")
    }

    #[test]
    fn endpoint_builds_model_path() {
        let client = test_client("https://api.example.com");
        let url = client.endpoint("gemini-2.5-flash").expect("endpoint");
        assert_eq!(
            url.as_str(),
            "https://api.example.com/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[test]
    fn endpoint_accepts_models_prefix() {
        let client = test_client("https://api.example.com/");
        let url = client.endpoint("models/gemini-2.5-flash-image").expect("endpoint");
        assert_eq!(
            url.as_str(),
            "https://api.example.com/v1beta/models/gemini-2.5-flash-image:generateContent"
        );
    }

    #[test]
    fn missing_key_is_reported() {
        let client = GeminiClient::with_base_url(None, "m", "i", 30, "ua", "https://a.example")
            .expect("client");
        assert!(matches!(client.ensure_api_key(), Err(GeminiError::MissingApiKey)));
        assert!(test_client("https://a.example").ensure_api_key().is_ok());
    }

    #[test]
    fn debug_redacts_key() {
        let debug = format!("{:?}", test_client("https://a.example"));
        assert!(!debug.contains("test-key"));
    }
}
