//! Research flows: channel and video lookups, trend search, Style DNA
//! decoding and the title/thumbnail helpers of the script wizard.

use scriptos_core::{
    ChannelRecord, StyleProfile, ThumbnailData, TitleVariant, TrendReport, VideoSummary,
};
use serde::Serialize;

use crate::error::StudioError;
use crate::studio::Studio;

/// A trend synthesis alongside the matching videos.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrendSearch {
    pub report: TrendReport,
    pub videos: Vec<VideoSummary>,
}

impl Studio {
    /// Resolves a channel and its recent uploads. `None` when the channel
    /// cannot be resolved for any reason.
    pub async fn resolve_channel(&self, identifier: &str) -> Option<ChannelRecord> {
        match self.youtube.fetch_channel_deep_data(identifier).await {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!(error = %e, identifier, "channel lookup failed");
                None
            }
        }
    }

    /// Details for one video URL or id. `None` on any failure.
    pub async fn video_details(&self, url_or_id: &str) -> Option<VideoSummary> {
        match self.youtube.get_video_details(url_or_id).await {
            Ok(video) => Some(video),
            Err(e) => {
                tracing::warn!(error = %e, url_or_id, "video lookup failed");
                None
            }
        }
    }

    /// Relevance-ordered videos for `query`. Empty on any failure.
    pub async fn search_videos(&self, query: &str) -> Vec<VideoSummary> {
        self.youtube.search_videos(query).await.unwrap_or_else(|e| {
            tracing::warn!(error = %e, query, "video search failed");
            Vec::new()
        })
    }

    /// Runs the web-grounded trend synthesis and the video search
    /// concurrently and waits for both.
    ///
    /// # Errors
    ///
    /// Returns [`StudioError::Gemini`] when no generative API key is
    /// configured. Remote failures degrade inside the report and the list.
    pub async fn trend_search(&self, query: &str) -> Result<TrendSearch, StudioError> {
        self.gemini.ensure_api_key()?;
        let (report, videos) = tokio::join!(
            self.gemini.trend_hunt(query, self.language),
            self.search_videos(query),
        );
        tracing::info!(
            query,
            sources = report.sources.len(),
            videos = videos.len(),
            "trend search complete"
        );
        Ok(TrendSearch { report, videos })
    }

    /// Decodes a Style DNA profile and saves it when decoding succeeded.
    ///
    /// With `from_channel`, `input` is resolved as a channel identifier and
    /// the channel's own data is analysed; an unresolvable channel yields
    /// the localized "channel not found" placeholder. Otherwise `input` is
    /// treated as a URL, name or sample text. Placeholders are returned but
    /// never saved.
    ///
    /// # Errors
    ///
    /// Returns [`StudioError::Gemini`] when no generative API key is
    /// configured, or [`StudioError::Store`] if saving fails.
    pub async fn decode_style(
        &self,
        input: &str,
        from_channel: bool,
    ) -> Result<StyleProfile, StudioError> {
        self.gemini.ensure_api_key()?;

        let profile = if from_channel {
            match self.youtube.fetch_channel_deep_data(input).await {
                Ok(channel) => {
                    self.gemini
                        .decode_channel_from_data(&channel, self.language)
                        .await
                }
                Err(e) => {
                    tracing::warn!(error = %e, input, "channel resolution failed");
                    StyleProfile::channel_not_found(self.language)
                }
            }
        } else {
            self.gemini.decode_style(input, self.language).await
        };

        if profile.is_error() {
            tracing::warn!(input, "style decode produced no profile");
        } else {
            self.store.save_style(&profile)?;
            tracing::info!(style_id = %profile.id, name = %profile.name, "style saved");
        }
        Ok(profile)
    }

    /// All stored styles, seeded with the default profile.
    ///
    /// # Errors
    ///
    /// Returns [`StudioError::Store`] if the store cannot be read.
    pub fn styles(&self) -> Result<Vec<StyleProfile>, StudioError> {
        Ok(self.store.get_styles()?)
    }

    /// Upserts a hand-edited style.
    ///
    /// # Errors
    ///
    /// Returns [`StudioError::SentinelStyle`] for the decode-failure
    /// placeholder, or [`StudioError::Store`] if saving fails.
    pub fn save_style(&self, style: &StyleProfile) -> Result<(), StudioError> {
        if style.is_error() {
            return Err(StudioError::SentinelStyle);
        }
        Ok(self.store.save_style(style)?)
    }

    /// Title variants for `topic` in the creator's voice. Empty when
    /// generation fails.
    ///
    /// # Errors
    ///
    /// Returns [`StudioError`] when no generative API key is configured or
    /// the profile cannot be read.
    pub async fn viral_titles(&self, topic: &str) -> Result<Vec<TitleVariant>, StudioError> {
        self.gemini.ensure_api_key()?;
        let identity = self.persona()?;
        Ok(self
            .gemini
            .generate_viral_titles(topic, self.language, identity.as_ref())
            .await)
    }

    /// Thumbnail art direction for a chosen title, styled by `style_id` (or
    /// the first stored style).
    ///
    /// # Errors
    ///
    /// Returns [`StudioError::StyleNotFound`] for an unknown style id, or
    /// [`StudioError::Gemini`] when no generative API key is configured.
    pub async fn thumbnail_concept(
        &self,
        title: &str,
        topic: &str,
        style_id: Option<&str>,
    ) -> Result<Option<ThumbnailData>, StudioError> {
        self.gemini.ensure_api_key()?;
        let style = self.resolve_style(style_id)?;
        Ok(self
            .gemini
            .generate_thumbnail_concept(title, topic, &style, self.language)
            .await)
    }

    /// Renders `prompt` with the image model, returning base64 image data.
    ///
    /// # Errors
    ///
    /// Returns [`StudioError::Gemini`] when no generative API key is
    /// configured.
    pub async fn thumbnail_image(&self, prompt: &str) -> Result<Option<String>, StudioError> {
        self.gemini.ensure_api_key()?;
        Ok(self.gemini.generate_thumbnail_image(prompt).await)
    }
}
