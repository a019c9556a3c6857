//! Typed collections persisted as JSON blobs under fixed keys.

use std::path::PathBuf;
use std::sync::Arc;

use scriptos_core::{AutomationFlow, Script, StyleProfile, UserProfile};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::backend::{FileBackend, KeyValueBackend, MemoryBackend};
use crate::error::StoreError;

pub const SCRIPTS_KEY: &str = "scriptos_scripts";
pub const STYLES_KEY: &str = "scriptos_styles";
pub const PROFILE_KEY: &str = "scriptos_profile";
pub const FLOWS_KEY: &str = "scriptos_flows";

/// Typed collections over a [`KeyValueBackend`].
///
/// Every save is read-modify-write of the full collection.
#[derive(Clone)]
pub struct LocalStore {
    backend: Arc<dyn KeyValueBackend>,
}

impl std::fmt::Debug for LocalStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalStore").finish_non_exhaustive()
    }
}

impl LocalStore {
    #[must_use]
    pub fn new(backend: Arc<dyn KeyValueBackend>) -> Self {
        Self { backend }
    }

    /// Opens a file-backed store rooted at `dir`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the directory cannot be created.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        Ok(Self::new(Arc::new(FileBackend::open(dir)?)))
    }

    /// A store that lives only as long as the process.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryBackend::new()))
    }

    // -----------------------------------------------------------------------
    // Scripts
    // -----------------------------------------------------------------------

    /// All stored scripts, in insertion order. Empty when none are stored.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend fails or the blob is corrupt.
    pub fn get_scripts(&self) -> Result<Vec<Script>, StoreError> {
        Ok(self.read(SCRIPTS_KEY)?.unwrap_or_default())
    }

    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend fails or the blob is corrupt.
    pub fn get_script(&self, id: &str) -> Result<Option<Script>, StoreError> {
        Ok(self.get_scripts()?.into_iter().find(|s| s.id == id))
    }

    /// Replaces the script with the same id in place, or appends it.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend fails or the blob is corrupt.
    pub fn save_script(&self, script: &Script) -> Result<(), StoreError> {
        let mut scripts = self.get_scripts()?;
        upsert_by(&mut scripts, script.clone(), |s| s.id == script.id);
        self.write(SCRIPTS_KEY, &scripts)
    }

    /// Removes the script with `id`. Returns `false` if no script matched.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend fails or the blob is corrupt.
    pub fn delete_script(&self, id: &str) -> Result<bool, StoreError> {
        let mut scripts = self.get_scripts()?;
        let before = scripts.len();
        scripts.retain(|s| s.id != id);
        if scripts.len() == before {
            return Ok(false);
        }
        self.write(SCRIPTS_KEY, &scripts)?;
        Ok(true)
    }

    // -----------------------------------------------------------------------
    // Style profiles
    // -----------------------------------------------------------------------

    /// Stored style profiles, or the built-in seed profile when the key has
    /// never been written.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend fails or the blob is corrupt.
    pub fn get_styles(&self) -> Result<Vec<StyleProfile>, StoreError> {
        Ok(self
            .read(STYLES_KEY)?
            .unwrap_or_else(|| vec![StyleProfile::default_noir()]))
    }

    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend fails or the blob is corrupt.
    pub fn get_style(&self, id: &str) -> Result<Option<StyleProfile>, StoreError> {
        Ok(self.get_styles()?.into_iter().find(|s| s.id == id))
    }

    /// Upserts by id on top of [`LocalStore::get_styles`], so the first save
    /// also persists the seed profile.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend fails or the blob is corrupt.
    pub fn save_style(&self, style: &StyleProfile) -> Result<(), StoreError> {
        let mut styles = self.get_styles()?;
        upsert_by(&mut styles, style.clone(), |s| s.id == style.id);
        self.write(STYLES_KEY, &styles)
    }

    // -----------------------------------------------------------------------
    // User profile
    // -----------------------------------------------------------------------

    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend fails or the blob is corrupt.
    pub fn get_user_profile(&self) -> Result<Option<UserProfile>, StoreError> {
        self.read(PROFILE_KEY)
    }

    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend fails.
    pub fn save_user_profile(&self, profile: &UserProfile) -> Result<(), StoreError> {
        self.write(PROFILE_KEY, profile)
    }

    // -----------------------------------------------------------------------
    // Automation flows
    // -----------------------------------------------------------------------

    /// Stored flows, or the starter discovery pipeline when none were saved.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend fails or the blob is corrupt.
    pub fn get_flows(&self) -> Result<Vec<AutomationFlow>, StoreError> {
        Ok(self
            .read(FLOWS_KEY)?
            .unwrap_or_else(|| vec![AutomationFlow::discovery_pipeline()]))
    }

    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend fails or the blob is corrupt.
    pub fn save_flow(&self, flow: &AutomationFlow) -> Result<(), StoreError> {
        let mut flows = self.get_flows()?;
        upsert_by(&mut flows, flow.clone(), |f| f.id == flow.id);
        self.write(FLOWS_KEY, &flows)
    }

    fn read<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        let Some(raw) = self.backend.get(key)? else {
            return Ok(None);
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| StoreError::Corrupt {
                key: key.to_string(),
                source,
            })
    }

    fn write<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let body = serde_json::to_string(value)?;
        self.backend.set(key, &body)?;
        tracing::debug!(key, bytes = body.len(), "store write");
        Ok(())
    }
}

fn upsert_by<T>(items: &mut Vec<T>, item: T, matches: impl Fn(&T) -> bool) {
    match items.iter().position(matches) {
        Some(idx) => items[idx] = item,
        None => items.push(item),
    }
}
