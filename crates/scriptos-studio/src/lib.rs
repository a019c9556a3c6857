//! Studio workflows over the local store and the two remote clients.
//!
//! Every flow reads and writes through [`LocalStore`](scriptos_store::LocalStore);
//! remote failures degrade to the placeholder values each client documents,
//! while missing credentials are reported up front.

mod discovery;
pub mod error;
mod profile;
mod scripts;
pub mod studio;

pub use discovery::TrendSearch;
pub use error::StudioError;
pub use scripts::{default_duration, ScriptDraft};
pub use studio::Studio;

pub use scriptos_gemini::RemixMode;
