//! Script wizard and production board.

use std::path::{Path, PathBuf};

use scriptos_core::{
    Language, Script, ScriptReference, ScriptStatus, ThumbnailData, TitleVariant,
};
use scriptos_gemini::{RemixMode, ScriptRequest};
use scriptos_store::export_script_markdown;
use serde::Deserialize;

use crate::error::StudioError;
use crate::studio::Studio;

/// Wizard duration preset used when a draft names none.
#[must_use]
pub fn default_duration(lang: Language) -> &'static str {
    match lang {
        Language::PtBr => "Médio (8-12 min)",
        Language::EnUs => "Medium (8-12 min)",
    }
}

/// Everything the wizard collected before writing.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScriptDraft {
    pub topic: String,
    pub style_id: Option<String>,
    pub duration: Option<String>,
    pub context: Option<String>,
    pub selected_title: Option<TitleVariant>,
    pub thumbnail: Option<ThumbnailData>,
    pub references: Vec<ScriptReference>,
}

impl ScriptDraft {
    #[must_use]
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            ..Self::default()
        }
    }
}

impl Studio {
    /// Writes a script from `draft` and stores it in the `Idea` column.
    ///
    /// The stored title is the selected title variant, or the topic when
    /// none was chosen. The generated text is stored even when it is the
    /// failure placeholder, so the creator can see what happened.
    ///
    /// # Errors
    ///
    /// - [`StudioError::Gemini`] when no generative API key is configured.
    /// - [`StudioError::StyleNotFound`] for an unknown style id.
    /// - [`StudioError::Store`] if the store cannot be read or written.
    pub async fn create_script(&self, draft: ScriptDraft) -> Result<Script, StudioError> {
        self.gemini.ensure_api_key()?;
        let style = self.resolve_style(draft.style_id.as_deref())?;
        let identity = self.persona()?;
        let duration = draft
            .duration
            .filter(|d| !d.trim().is_empty())
            .unwrap_or_else(|| default_duration(self.language).to_string());

        let content = self
            .gemini
            .generate_script(&ScriptRequest {
                topic: &draft.topic,
                style: &style,
                duration: &duration,
                lang: self.language,
                context: draft.context.as_deref(),
                title: draft.selected_title.as_ref().map(|t| t.title.as_str()),
                thumbnail_concept: draft.thumbnail.as_ref().map(|t| t.concept.as_str()),
                references: &draft.references,
                identity: identity.as_ref(),
            })
            .await;

        let title = draft
            .selected_title
            .as_ref()
            .map_or_else(|| draft.topic.clone(), |t| t.title.clone());
        let mut script = Script::new(title, draft.topic, content);
        script.style_id = Some(style.id);
        script.language = Some(self.language);
        script.selected_title = draft.selected_title;
        script.thumbnail = draft.thumbnail;
        script.references = draft.references;
        script.duration = Some(duration);

        self.store.save_script(&script)?;
        tracing::info!(script_id = %script.id, title = %script.title, "script created");
        Ok(script)
    }

    /// # Errors
    ///
    /// Returns [`StudioError::Store`] if the store cannot be read.
    pub fn scripts(&self) -> Result<Vec<Script>, StudioError> {
        Ok(self.store.get_scripts()?)
    }

    /// # Errors
    ///
    /// Returns [`StudioError::ScriptNotFound`] for an unknown id, or
    /// [`StudioError::Store`] if the store cannot be read.
    pub fn script(&self, id: &str) -> Result<Script, StudioError> {
        self.store
            .get_script(id)?
            .ok_or_else(|| StudioError::ScriptNotFound(id.to_string()))
    }

    /// # Errors
    ///
    /// Returns [`StudioError::ScriptNotFound`] for an unknown id, or
    /// [`StudioError::Store`] if the store cannot be written.
    pub fn delete_script(&self, id: &str) -> Result<(), StudioError> {
        if self.store.delete_script(id)? {
            tracing::info!(script_id = id, "script deleted");
            Ok(())
        } else {
            Err(StudioError::ScriptNotFound(id.to_string()))
        }
    }

    /// Rewrites a stored script for `mode`. A failed rewrite leaves the
    /// content as it was.
    ///
    /// # Errors
    ///
    /// Returns [`StudioError`] for an unknown id, a missing generative API
    /// key, or a store failure.
    pub async fn remix_script(&self, id: &str, mode: RemixMode) -> Result<Script, StudioError> {
        self.gemini.ensure_api_key()?;
        let mut script = self.script(id)?;
        let identity = self.persona()?;
        let lang = script.language.unwrap_or(self.language);

        script.content = self
            .gemini
            .remix_script(&script.content, mode, lang, identity.as_ref())
            .await;
        script.touch();
        self.store.save_script(&script)?;
        tracing::info!(script_id = id, mode = mode.as_str(), "script remixed");
        Ok(script)
    }

    /// Scores a stored script and records the metrics on it.
    ///
    /// # Errors
    ///
    /// Returns [`StudioError`] for an unknown id, a missing generative API
    /// key, or a store failure.
    pub async fn analyze_script(&self, id: &str) -> Result<Script, StudioError> {
        self.gemini.ensure_api_key()?;
        let mut script = self.script(id)?;
        let lang = script.language.unwrap_or(self.language);

        let metrics = self.gemini.analyze_viral_score(&script.content, lang).await;
        tracing::info!(
            script_id = id,
            hook = metrics.hook_score,
            retention = metrics.retention_score,
            controversy = metrics.controversy_score,
            "script analysed"
        );
        script.viral_metrics = Some(metrics);
        script.touch();
        self.store.save_script(&script)?;
        Ok(script)
    }

    /// Moves a script one column to the right. A published script stays
    /// where it is.
    ///
    /// # Errors
    ///
    /// Returns [`StudioError::ScriptNotFound`] for an unknown id, or
    /// [`StudioError::Store`] if the store fails.
    pub fn advance_script(&self, id: &str) -> Result<Script, StudioError> {
        let script = self.script(id)?;
        match script.status.next() {
            Some(next) => self.set_script_status(id, next),
            None => Ok(script),
        }
    }

    /// # Errors
    ///
    /// Returns [`StudioError::ScriptNotFound`] for an unknown id, or
    /// [`StudioError::Store`] if the store fails.
    pub fn set_script_status(&self, id: &str, status: ScriptStatus) -> Result<Script, StudioError> {
        let mut script = self.script(id)?;
        if script.status != status {
            tracing::info!(
                script_id = id,
                from = script.status.as_str(),
                to = status.as_str(),
                "script moved"
            );
            script.status = status;
            script.touch();
            self.store.save_script(&script)?;
        }
        Ok(script)
    }

    /// Writes a stored script as Markdown into `dir`.
    ///
    /// # Errors
    ///
    /// Returns [`StudioError::ScriptNotFound`] for an unknown id, or
    /// [`StudioError::Store`] if the file cannot be written.
    pub fn export_script(&self, id: &str, dir: &Path) -> Result<PathBuf, StudioError> {
        let script = self.script(id)?;
        Ok(export_script_markdown(&script, dir)?)
    }
}
