use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::CoreError;

/// Output language for generated content. Two locales are supported.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Language {
    #[serde(rename = "pt-br")]
    PtBr,
    #[default]
    #[serde(rename = "en-us")]
    EnUs,
}

impl Language {
    /// Locale code as stored and accepted on the command line.
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Language::PtBr => "pt-br",
            Language::EnUs => "en-us",
        }
    }

    /// Name used inside prompt bodies, e.g. `LANGUAGE: Portuguese (Brazil)`.
    #[must_use]
    pub fn prompt_name(self) -> &'static str {
        match self {
            Language::PtBr => "Portuguese (Brazil)",
            Language::EnUs => "English",
        }
    }

    /// Short name used in feedback instructions ("Output feedback in Portuguese").
    #[must_use]
    pub fn short_name(self) -> &'static str {
        match self {
            Language::PtBr => "Portuguese",
            Language::EnUs => "English",
        }
    }

    /// Upper-case label used by the system instruction.
    #[must_use]
    pub fn instruction_label(self) -> &'static str {
        match self {
            Language::PtBr => "PORTUGUESE (BRAZIL)",
            Language::EnUs => "ENGLISH (US)",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pt-br" | "pt" => Ok(Language::PtBr),
            "en-us" | "en" => Ok(Language::EnUs),
            other => Err(CoreError::InvalidLanguage(other.to_string())),
        }
    }
}
