//! System instructions sent with every generative call.

use scriptos_core::{ChannelIdentity, Language};

/// The writer persona's system instruction for `lang`.
///
/// When `identity` has any non-blank field, a channel identity section is
/// appended so generated text stays in the creator's voice. Blank fields are
/// omitted individually; a missing or blank identity adds nothing.
#[must_use]
pub fn system_instruction(lang: Language, identity: Option<&ChannelIdentity>) -> String {
    let mut out = format!(
        "You are \"The Archivist\", a core component of ScriptOS.
You are an expert in creating dark, investigative, and documentary-style content for platforms like YouTube.
Your personality is cold, professional, and brutally honest. You value retention, shock value, and truth.
YOUR OUTPUT LANGUAGE IS: {}.

RULES:
1. When writing scripts, start with an aggressive hook in the first 5 seconds.
2. NEVER use generic AI openers like \"In this video we will explore\" or \"Neste vídeo vamos explorar\". Be visceral.
3. Use short sentences. Focus on sensory details.
4. If asked to analyze, be a harsh critic. Give low scores if the content is boring.
5. Format script output in Markdown with cues for [VISUALS] and [AUDIO].",
        lang.instruction_label()
    );
    push_identity(&mut out, identity);
    out
}

/// The co-pilot chat persona's system instruction for `lang`.
#[must_use]
pub fn chat_instruction(lang: Language, identity: Option<&ChannelIdentity>) -> String {
    let mut out = format!(
        "You are A.I.N.A, the co-pilot of ScriptOS, a studio for dark documentary YouTube channels.
You help the creator brainstorm topics, sharpen hooks, fix pacing and plan uploads.
Keep answers short, direct and actionable. Use Markdown lists when listing ideas.
ALWAYS ANSWER IN: {}.",
        lang.instruction_label()
    );
    push_identity(&mut out, identity);
    out
}

/// Opening line the co-pilot shows before the first exchange.
#[must_use]
pub fn chat_greeting(lang: Language) -> &'static str {
    match lang {
        Language::PtBr => "A.I.N.A Online. Aguardando diretrizes.",
        Language::EnUs => "A.I.N.A Online. Awaiting directives.",
    }
}

/// Reply shown when the co-pilot cannot answer.
#[must_use]
pub fn chat_apology(lang: Language) -> &'static str {
    match lang {
        Language::PtBr => "Conexão com o núcleo neural interrompida. Tente novamente.",
        Language::EnUs => "Connection to the neural core was interrupted. Try again.",
    }
}

fn push_identity(out: &mut String, identity: Option<&ChannelIdentity>) {
    let Some(identity) = identity.filter(|i| !i.is_blank()) else {
        return;
    };
    out.push_str("\n\nCHANNEL IDENTITY (every output must match it):");
    for (label, value) in [
        ("BRAND VOICE", &identity.brand_voice),
        ("TARGET AUDIENCE", &identity.target_audience),
        ("MANIFESTO", &identity.manifesto),
    ] {
        let value = value.trim();
        if !value.is_empty() {
            out.push_str(&format!("\n- {label}: {value}"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity() -> ChannelIdentity {
        ChannelIdentity {
            brand_voice: "Sarcastic, Nihilistic".to_string(),
            target_audience: "  ".to_string(),
            manifesto: "Nobody else will say it.".to_string(),
        }
    }

    #[test]
    fn language_label_is_injected() {
        assert!(system_instruction(Language::PtBr, None)
            .contains("YOUR OUTPUT LANGUAGE IS: PORTUGUESE (BRAZIL)."));
        assert!(system_instruction(Language::EnUs, None)
            .contains("YOUR OUTPUT LANGUAGE IS: ENGLISH (US)."));
    }

    #[test]
    fn absent_identity_adds_no_section() {
        let plain = system_instruction(Language::EnUs, None);
        assert!(!plain.contains("CHANNEL IDENTITY"));
        let blank = ChannelIdentity::default();
        assert_eq!(system_instruction(Language::EnUs, Some(&blank)), plain);
    }

    #[test]
    fn identity_fields_are_interpolated_and_blanks_skipped() {
        let text = system_instruction(Language::EnUs, Some(&identity()));
        assert!(text.contains("- BRAND VOICE: Sarcastic, Nihilistic"));
        assert!(text.contains("- MANIFESTO: Nobody else will say it."));
        assert!(!text.contains("TARGET AUDIENCE"));
    }

    #[test]
    fn chat_persona_carries_identity_too() {
        let text = chat_instruction(Language::PtBr, Some(&identity()));
        assert!(text.contains("A.I.N.A"));
        assert!(text.contains("PORTUGUESE (BRAZIL)"));
        assert!(text.contains("BRAND VOICE"));
    }
}
