use scriptos_core::{AppConfig, ChannelIdentity, Language, StyleProfile};
use scriptos_gemini::GeminiClient;
use scriptos_store::LocalStore;
use scriptos_youtube::YoutubeClient;

use crate::error::StudioError;

/// The content studio: one local store, both remote clients and the active
/// output language.
#[derive(Debug)]
pub struct Studio {
    pub(crate) store: LocalStore,
    pub(crate) youtube: YoutubeClient,
    pub(crate) gemini: GeminiClient,
    pub(crate) language: Language,
}

impl Studio {
    #[must_use]
    pub fn new(
        store: LocalStore,
        youtube: YoutubeClient,
        gemini: GeminiClient,
        language: Language,
    ) -> Self {
        Self {
            store,
            youtube,
            gemini,
            language,
        }
    }

    /// Builds a studio from loaded configuration, with a file-backed store
    /// under `config.data_dir`.
    ///
    /// # Errors
    ///
    /// Returns [`StudioError`] if the data directory cannot be created or a
    /// client cannot be built.
    pub fn from_config(config: &AppConfig) -> Result<Self, StudioError> {
        let store = LocalStore::open(config.data_dir.clone())?;
        let youtube = YoutubeClient::new(
            config.youtube_api_key.as_deref(),
            config.http_timeout_secs,
            &config.user_agent,
        )?;
        let gemini = GeminiClient::new(
            config.gemini_api_key.as_deref(),
            &config.gemini_model,
            &config.gemini_image_model,
            config.http_timeout_secs,
            &config.user_agent,
        )?;
        tracing::debug!(
            data_dir = %config.data_dir.display(),
            language = %config.language,
            youtube_key = youtube.has_api_key(),
            gemini_key = gemini.ensure_api_key().is_ok(),
            "studio ready"
        );
        Ok(Self::new(store, youtube, gemini, config.language))
    }

    #[must_use]
    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    #[must_use]
    pub fn language(&self) -> Language {
        self.language
    }

    /// True when the generative API key is configured.
    #[must_use]
    pub fn has_generative_key(&self) -> bool {
        self.gemini.ensure_api_key().is_ok()
    }

    /// True when the video platform's Data API key is configured.
    #[must_use]
    pub fn has_video_key(&self) -> bool {
        self.youtube.has_api_key()
    }

    #[must_use]
    pub fn store(&self) -> &LocalStore {
        &self.store
    }

    /// Stored channel identity, when it has any content.
    pub(crate) fn persona(&self) -> Result<Option<ChannelIdentity>, StudioError> {
        Ok(self
            .store
            .get_user_profile()?
            .and_then(|p| p.persona().cloned()))
    }

    /// The style with `style_id`, or the first stored style when none is
    /// given.
    pub(crate) fn resolve_style(&self, style_id: Option<&str>) -> Result<StyleProfile, StudioError> {
        match style_id.map(str::trim).filter(|id| !id.is_empty()) {
            Some(id) => self
                .store
                .get_style(id)?
                .ok_or_else(|| StudioError::StyleNotFound(id.to_string())),
            None => Ok(self
                .store
                .get_styles()?
                .into_iter()
                .next()
                .unwrap_or_else(StyleProfile::default_noir)),
        }
    }
}
