//! Generative operations with degraded fallbacks.
//!
//! Each public method logs the underlying [`GeminiError`] at `warn` and
//! returns its documented fallback instead of an error.

use std::str::FromStr;

use scriptos_core::{
    ChannelIdentity, ChannelRecord, ChatMessage, ChatRole, Language, ReferenceType,
    ScriptReference, StyleProfile, ThumbnailData, TitleVariant, TrendReport, ViralMetrics,
};
use serde::{Deserialize, Serialize};

use crate::client::GeminiClient;
use crate::error::GeminiError;
use crate::extract::extract_json;
use crate::persona::{chat_apology, chat_instruction, system_instruction};
use crate::prompts::{self, ScriptPromptArgs};
use crate::types::{Content, GenerateContentRequest, Part};

pub const SCRIPT_FAILED: &str =
    "SYSTEM ERROR: Could not generate script. Check Neural Link (API Key).";
pub const SCRIPT_EMPTY: &str = "Error: No text generated.";
pub const TRENDS_EMPTY: &str = "No trends found in the static.";

/// Rewrite goal for [`GeminiClient::remix_script`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RemixMode {
    Retention,
    Controversy,
}

impl RemixMode {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            RemixMode::Retention => "RETENTION",
            RemixMode::Controversy => "CONTROVERSY",
        }
    }
}

impl FromStr for RemixMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "RETENTION" => Ok(RemixMode::Retention),
            "CONTROVERSY" => Ok(RemixMode::Controversy),
            other => Err(format!("unknown remix mode: {other}")),
        }
    }
}

/// Inputs for [`GeminiClient::generate_script`].
#[derive(Debug, Clone, Copy)]
pub struct ScriptRequest<'a> {
    pub topic: &'a str,
    pub style: &'a StyleProfile,
    pub duration: &'a str,
    pub lang: Language,
    pub context: Option<&'a str>,
    pub title: Option<&'a str>,
    pub thumbnail_concept: Option<&'a str>,
    pub references: &'a [ScriptReference],
    pub identity: Option<&'a ChannelIdentity>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct DecodedStyle {
    name: String,
    tone: String,
    structure: String,
    audio_signature: String,
    description: String,
}

impl DecodedStyle {
    fn into_profile(self) -> Option<StyleProfile> {
        if self.name.trim().is_empty() {
            return None;
        }
        Some(StyleProfile {
            id: uuid::Uuid::new_v4().to_string(),
            name: self.name,
            tone: self.tone,
            structure: self.structure,
            audio_signature: self.audio_signature,
            description: self.description,
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ThumbnailConcept {
    concept: String,
    image_prompt: String,
}

impl GeminiClient {
    /// Writes a full script.
    ///
    /// File references are sent as inline parts; other references are listed
    /// in the prompt. Web search is enabled for fact checks.
    ///
    /// Fallbacks: `"Error: No text generated."` when the model returns no
    /// text, the `SYSTEM ERROR` line on any other failure.
    pub async fn generate_script(&self, req: &ScriptRequest<'_>) -> String {
        let prompt = prompts::script(&ScriptPromptArgs {
            topic: req.topic,
            style: req.style,
            duration: req.duration,
            lang: req.lang,
            context: req.context,
            title: req.title,
            thumbnail_concept: req.thumbnail_concept,
            references: req.references,
        });

        let mut parts = vec![Part::text(prompt)];
        parts.extend(
            req.references
                .iter()
                .filter(|r| r.kind == ReferenceType::File)
                .filter_map(|r| {
                    r.mime_type
                        .as_deref()
                        .map(|mime| Part::inline(mime, r.data.clone()))
                }),
        );

        let request = GenerateContentRequest {
            contents: vec![Content::user(parts)],
            ..GenerateContentRequest::default()
        }
        .with_system_instruction(system_instruction(req.lang, req.identity))
        .with_web_search();

        match self.generate_text(&request).await {
            Ok(text) => text,
            Err(GeminiError::EmptyResponse) => {
                tracing::warn!(topic = req.topic, "script generation returned no text");
                SCRIPT_EMPTY.to_string()
            }
            Err(e) => {
                tracing::warn!(error = %e, topic = req.topic, "script generation failed");
                SCRIPT_FAILED.to_string()
            }
        }
    }

    /// Rewrites `content` for `mode`. Falls back to `content` unchanged.
    pub async fn remix_script(
        &self,
        content: &str,
        mode: RemixMode,
        lang: Language,
        identity: Option<&ChannelIdentity>,
    ) -> String {
        let request = GenerateContentRequest::from_prompt(prompts::remix(content, mode.as_str(), lang))
            .with_system_instruction(system_instruction(lang, identity));

        match self.generate_text(&request).await {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(error = %e, mode = mode.as_str(), "remix failed; keeping content");
                content.to_string()
            }
        }
    }

    /// Scores viral potential. Falls back to zero scores with the failure
    /// reason in `feedback`.
    pub async fn analyze_viral_score(&self, content: &str, lang: Language) -> ViralMetrics {
        let request = GenerateContentRequest::from_prompt(prompts::analyze(content, lang))
            .with_system_instruction(system_instruction(lang, None))
            .with_json_output(Some(prompts::viral_metrics_schema()));

        let result = match self.generate_text(&request).await {
            Ok(text) => extract_json::<ViralMetrics>(&text)
                .ok_or_else(|| GeminiError::Unparseable("viral metrics".to_string())),
            Err(e) => Err(e),
        };
        result.unwrap_or_else(|e| {
            tracing::warn!(error = %e, "viral analysis failed");
            ViralMetrics::failed(&e.to_string())
        })
    }

    /// Decodes a Style DNA profile from a URL, channel name or sample text,
    /// with web search. Falls back to the sentinel error profile.
    pub async fn decode_style(&self, input: &str, lang: Language) -> StyleProfile {
        let request =
            GenerateContentRequest::from_prompt(prompts::decode_style(input, lang)).with_web_search();
        self.decode_profile(&request, "style")
            .await
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "style decode failed");
                StyleProfile::decode_failed(format!("System failed to decode style. Error: {e}"))
            })
    }

    /// Decodes a Style DNA profile from resolved channel data. Falls back to
    /// the sentinel error profile.
    pub async fn decode_channel_from_data(
        &self,
        channel: &ChannelRecord,
        lang: Language,
    ) -> StyleProfile {
        let request = GenerateContentRequest::from_prompt(prompts::decode_channel(channel, lang))
            .with_json_output(None);
        self.decode_profile(&request, "channel style")
            .await
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, channel = %channel.title, "channel decode failed");
                StyleProfile::decode_failed(format!(
                    "System failed to decode channel data. Error: {e}"
                ))
            })
    }

    async fn decode_profile(
        &self,
        request: &GenerateContentRequest,
        what: &str,
    ) -> Result<StyleProfile, GeminiError> {
        let text = self.generate_text(request).await?;
        extract_json::<DecodedStyle>(&text)
            .and_then(DecodedStyle::into_profile)
            .ok_or_else(|| GeminiError::Unparseable(what.to_string()))
    }

    /// Web-grounded trend synthesis with its cited sources.
    pub async fn trend_hunt(&self, query: &str, lang: Language) -> TrendReport {
        let request =
            GenerateContentRequest::from_prompt(prompts::trend_hunt(query, lang)).with_web_search();

        match self.generate(self.model(), &request).await {
            Ok(response) => TrendReport {
                content: response.text().unwrap_or_else(|| TRENDS_EMPTY.to_string()),
                sources: response.grounding_sources(),
            },
            Err(e) => {
                tracing::warn!(error = %e, query, "trend hunt failed");
                TrendReport {
                    content: format!("Connection to search grid failed. Error: {e}"),
                    sources: Vec::new(),
                }
            }
        }
    }

    /// Title variants with their psychological trigger and score. Falls back
    /// to an empty list.
    pub async fn generate_viral_titles(
        &self,
        topic: &str,
        lang: Language,
        identity: Option<&ChannelIdentity>,
    ) -> Vec<TitleVariant> {
        let request = GenerateContentRequest::from_prompt(prompts::viral_titles(topic, lang))
            .with_system_instruction(system_instruction(lang, identity))
            .with_json_output(Some(prompts::viral_titles_schema()));

        let result = match self.generate_text(&request).await {
            Ok(text) => extract_json::<Vec<TitleVariant>>(&text)
                .ok_or_else(|| GeminiError::Unparseable("title variants".to_string())),
            Err(e) => Err(e),
        };
        result.unwrap_or_else(|e| {
            tracing::warn!(error = %e, topic, "title generation failed");
            Vec::new()
        })
    }

    /// Thumbnail art direction plus an image-generator prompt. `None` on
    /// failure.
    pub async fn generate_thumbnail_concept(
        &self,
        title: &str,
        topic: &str,
        style: &StyleProfile,
        lang: Language,
    ) -> Option<ThumbnailData> {
        let request = GenerateContentRequest::from_prompt(prompts::thumbnail_concept(
            title, topic, style, lang,
        ))
        .with_json_output(Some(prompts::thumbnail_concept_schema()));

        let result = match self.generate_text(&request).await {
            Ok(text) => extract_json::<ThumbnailConcept>(&text)
                .ok_or_else(|| GeminiError::Unparseable("thumbnail concept".to_string())),
            Err(e) => Err(e),
        };
        match result {
            Ok(c) => Some(ThumbnailData {
                concept: c.concept,
                image_prompt: c.image_prompt,
                image_base64: None,
            }),
            Err(e) => {
                tracing::warn!(error = %e, title, "thumbnail concept failed");
                None
            }
        }
    }

    /// Renders an image with the image model and returns its base64 payload.
    /// `None` on failure or when no image part comes back.
    pub async fn generate_thumbnail_image(&self, prompt: &str) -> Option<String> {
        let request =
            GenerateContentRequest::from_prompt(prompt).with_response_modalities(&["IMAGE"]);

        match self.generate(self.image_model(), &request).await {
            Ok(response) => {
                let image = response.first_inline_data().map(|d| d.data.clone());
                if image.is_none() {
                    tracing::warn!("image model returned no inline image");
                }
                image
            }
            Err(e) => {
                tracing::warn!(error = %e, "thumbnail render failed");
                None
            }
        }
    }

    /// One co-pilot turn over the prior `history`. Falls back to a localized
    /// apology.
    ///
    /// Leading model turns (the greeting) are not sent: a conversation must
    /// open with a user turn.
    pub async fn chat(
        &self,
        history: &[ChatMessage],
        message: &str,
        lang: Language,
        identity: Option<&ChannelIdentity>,
    ) -> String {
        let mut contents: Vec<Content> = history
            .iter()
            .skip_while(|m| m.role == ChatRole::Model)
            .filter(|m| !m.text.trim().is_empty())
            .map(|m| match m.role {
                ChatRole::User => Content::user(vec![Part::text(m.text.clone())]),
                ChatRole::Model => Content::model(vec![Part::text(m.text.clone())]),
            })
            .collect();
        contents.push(Content::user(vec![Part::text(message)]));

        let request = GenerateContentRequest {
            contents,
            ..GenerateContentRequest::default()
        }
        .with_system_instruction(chat_instruction(lang, identity));

        match self.generate_text(&request).await {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(error = %e, "chat turn failed");
                chat_apology(lang).to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remix_mode_parses_case_insensitively() {
        assert_eq!("retention".parse::<RemixMode>(), Ok(RemixMode::Retention));
        assert_eq!(" CONTROVERSY ".parse::<RemixMode>(), Ok(RemixMode::Controversy));
        assert!("chaos".parse::<RemixMode>().is_err());
    }

    #[test]
    fn decoded_style_without_name_is_rejected() {
        let decoded: DecodedStyle =
            serde_json::from_str(r#"{"tone":"Dark"}"#).expect("deserialize");
        assert!(decoded.into_profile().is_none());
    }

    #[test]
    fn decoded_style_gets_fresh_uuid() {
        let decoded: DecodedStyle = serde_json::from_str(
            r#"{"name":"Investigative Noir","tone":"Cynical","audioSignature":"Synthwave"}"#,
        )
        .expect("deserialize");
        let profile = decoded.into_profile().expect("profile");
        assert_eq!(profile.audio_signature, "Synthwave");
        assert!(uuid::Uuid::parse_str(&profile.id).is_ok());
        assert!(!profile.is_error());
    }
}
