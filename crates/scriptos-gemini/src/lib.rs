//! Client for the generative-language `generateContent` REST endpoint.
//!
//! Operations in [`operations`] never fail: a remote or parsing failure is
//! logged and converted into the degraded value each operation documents,
//! so callers can always render something. Credential checks happen up
//! front via [`GeminiClient::ensure_api_key`].

pub mod client;
pub mod error;
pub mod extract;
pub mod operations;
pub mod persona;
pub mod prompts;
pub mod types;

pub use client::GeminiClient;
pub use error::GeminiError;
pub use extract::extract_json;
pub use operations::{RemixMode, ScriptRequest};
pub use persona::{chat_apology, chat_greeting, chat_instruction, system_instruction};
