use serde::{Deserialize, Serialize};

use crate::Language;

/// Id carried by the sentinel profile returned when decoding fails.
pub const ERROR_STYLE_ID: &str = "error";

/// Persisted "Style DNA": tone, structure and audio identity of a creator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleProfile {
    pub id: String,
    pub name: String,
    pub tone: String,
    pub structure: String,
    pub audio_signature: String,
    /// Free-text rationale for why the style works.
    pub description: String,
}

impl StyleProfile {
    /// The built-in profile shown before the user has saved any of their own.
    #[must_use]
    pub fn default_noir() -> Self {
        Self {
            id: "default-noir".to_string(),
            name: "Noir Detective".to_string(),
            tone: "Cynical, Slow-paced, Investigatory".to_string(),
            structure: "Cold Open -> Case File -> The Twist -> Conclusion".to_string(),
            audio_signature: "Jazz Noir / Rain Sounds".to_string(),
            description: "Classic investigative journalism with a dark twist.".to_string(),
        }
    }

    /// Stand-in record rendered when decoding a style fails.
    #[must_use]
    pub fn decode_failed(description: impl Into<String>) -> Self {
        Self {
            id: ERROR_STYLE_ID.to_string(),
            name: "Decryption Failed".to_string(),
            tone: "Unknown".to_string(),
            structure: "Unknown".to_string(),
            audio_signature: "Unknown".to_string(),
            description: description.into(),
        }
    }

    /// Stand-in record for a channel-mode decode whose channel lookup failed.
    #[must_use]
    pub fn channel_not_found(lang: Language) -> Self {
        let (name, description) = match lang {
            Language::PtBr => (
                "Canal Não Encontrado",
                "Falha ao conectar stream de dados. Verifique o ID.",
            ),
            Language::EnUs => (
                "Channel Not Found",
                "Could not connect to YouTube Data stream. Check handle/ID.",
            ),
        };
        Self {
            id: ERROR_STYLE_ID.to_string(),
            name: name.to_string(),
            tone: "N/A".to_string(),
            structure: "N/A".to_string(),
            audio_signature: "N/A".to_string(),
            description: description.to_string(),
        }
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        self.id == ERROR_STYLE_ID
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel_is_flagged_as_error() {
        let failed = StyleProfile::decode_failed("no json");
        assert!(failed.is_error());
        assert_eq!(failed.name, "Decryption Failed");
        assert!(!StyleProfile::default_noir().is_error());
    }

    #[test]
    fn channel_not_found_is_localized_and_flagged() {
        let pt = StyleProfile::channel_not_found(Language::PtBr);
        assert!(pt.is_error());
        assert_eq!(pt.name, "Canal Não Encontrado");
        assert_eq!(StyleProfile::channel_not_found(Language::EnUs).tone, "N/A");
    }

    #[test]
    fn audio_signature_uses_camel_case_key() {
        let json = serde_json::to_value(StyleProfile::default_noir()).expect("serialize");
        assert_eq!(json["audioSignature"], "Jazz Noir / Rain Sounds");
    }
}
