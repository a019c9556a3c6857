//! Local persistence for scripts, style profiles, the user profile and
//! automation flows.
//!
//! Each collection is a single JSON blob under a fixed key. Reads return an
//! empty collection (or `None`) when the key is absent; writes replace the
//! whole blob. There is no locking: two writers racing on the same key keep
//! whichever write lands last.

pub mod backend;
pub mod error;
pub mod export;
pub mod store;

pub use backend::{FileBackend, KeyValueBackend, MemoryBackend};
pub use error::StoreError;
pub use export::{export_file_name, export_script_markdown, MAX_FILE_STEM_CHARS};
pub use store::{LocalStore, FLOWS_KEY, PROFILE_KEY, SCRIPTS_KEY, STYLES_KEY};
