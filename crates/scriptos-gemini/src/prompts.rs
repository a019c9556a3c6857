//! Prompt bodies and output schemas for each generative operation.

use scriptos_core::{ChannelRecord, Language, ReferenceType, ScriptReference, StyleProfile};
use serde_json::{json, Value};

/// Script content beyond this many characters is not sent for analysis.
pub const ANALYSIS_CHAR_LIMIT: usize = 5000;

const STYLE_JSON_SHAPE: &str = r#"{
  "name": "Creative name for this style (e.g. 'Investigative Noir')",
  "tone": "3 adjectives (e.g. 'Cynical, Fast-paced, Dark')",
  "structure": "The typical video flow (e.g. 'Cold Open -> Montage -> Deep Dive')",
  "audioSignature": "Music/SFX style (e.g. 'Synthwave, Distortion')",
  "description": "A brief summary of why this style is effective."
}"#;

#[derive(Debug, Clone, Copy)]
pub struct ScriptPromptArgs<'a> {
    pub topic: &'a str,
    pub style: &'a StyleProfile,
    pub duration: &'a str,
    pub lang: Language,
    pub context: Option<&'a str>,
    pub title: Option<&'a str>,
    pub thumbnail_concept: Option<&'a str>,
    pub references: &'a [ScriptReference],
}

pub fn script(args: &ScriptPromptArgs<'_>) -> String {
    let context = args
        .context
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .unwrap_or("None provided. Use your knowledge base.");

    let mut prompt = format!(
        "Create a script for a video.
LANGUAGE: {lang}
TOPIC: {topic}
STYLE DNA: {name} ({tone})
STRUCTURE: {structure}
DURATION: {duration}
CONTEXT/DATA: {context}",
        lang = args.lang.prompt_name(),
        topic = args.topic,
        name = args.style.name,
        tone = args.style.tone,
        structure = args.style.structure,
        duration = args.duration,
    );
    if let Some(title) = args.title.filter(|t| !t.trim().is_empty()) {
        prompt.push_str(&format!(
            "\nCHOSEN TITLE: {title}\nThe hook must pay off the promise of this title."
        ));
    }
    if let Some(concept) = args.thumbnail_concept.filter(|c| !c.trim().is_empty()) {
        prompt.push_str(&format!(
            "\nTHUMBNAIL CONCEPT: {concept}\nThe opening visuals must match the thumbnail."
        ));
    }

    let linked: Vec<String> = args
        .references
        .iter()
        .filter(|r| r.kind != ReferenceType::File)
        .map(|r| format!("- [{}] {}: {}", r.kind.as_str(), r.title, r.data))
        .collect();
    if !linked.is_empty() {
        prompt.push_str("\nREFERENCES:\n");
        prompt.push_str(&linked.join("\n"));
    }
    if args.references.iter().any(|r| r.kind == ReferenceType::File) {
        prompt.push_str("\nAttached files are research material. Use them as primary sources.");
    }

    prompt.push_str(
        "

Structure the script with sections: HOOK, INTRO, BODY (divided by key points), OUTRO.
Include [VISUAL CUE] and [AUDIO CUE] directives in bold brackets.
If you need to verify facts, use Google Search.",
    );
    prompt
}

pub fn remix(content: &str, mode: &str, lang: Language) -> String {
    format!(
        "Rewrite the following script to maximize {mode}.
LANGUAGE: {lang}

IF RETENTION: Focus on removing fluff, increasing pacing, and adding open loops (questions not immediately answered).
IF CONTROVERSY: Focus on stronger opinions, darker truths, and challenging the viewer's worldview.

SCRIPT CONTENT:
{content}",
        lang = lang.prompt_name(),
    )
}

/// Analysis prompt; the script is cut to [`ANALYSIS_CHAR_LIMIT`] characters.
pub fn analyze(content: &str, lang: Language) -> String {
    let excerpt: String = content.chars().take(ANALYSIS_CHAR_LIMIT).collect();
    format!(
        "Analyze this script for viral potential on YouTube. Be harsh. Output feedback in {}.\n\nSCRIPT:\n{excerpt}",
        lang.short_name()
    )
}

#[must_use]
pub fn viral_metrics_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "hookScore": { "type": "NUMBER", "description": "0-100 score on how grabbing the intro is." },
            "retentionScore": { "type": "NUMBER", "description": "0-100 score on pacing and interest." },
            "controversyScore": { "type": "NUMBER", "description": "0-100 score on potential for debate/shock." },
            "feedback": { "type": "STRING", "description": "Brutally honest qualitative feedback." }
        },
        "required": ["hookScore", "retentionScore", "controversyScore", "feedback"]
    })
}

pub fn decode_style(input: &str, lang: Language) -> String {
    format!(
        "Analyze the following input to create a \"Style DNA Profile\" for a content creator.
LANGUAGE OUTPUT: {lang}

INPUT: \"{input}\"

INSTRUCTIONS:
1. If the input is a YouTube URL or Channel Name, use Google Search to find reviews, channel descriptions, popular upload styles, and community discussions about this channel.
2. If the input is text, analyze the writing style directly.
3. Determine the Tone, Structure, and Audio Signature.

OUTPUT FORMAT:
Return ONLY a JSON object.
{STYLE_JSON_SHAPE}",
        lang = lang.prompt_name(),
    )
}

pub fn decode_channel(channel: &ChannelRecord, lang: Language) -> String {
    format!(
        "Analyze the raw channel data provided below and construct a Style DNA profile.
Infer the content strategy, tone, and production style based on the video titles, descriptions, and channel branding.
LANGUAGE OUTPUT: {lang}

DATA:
{data}

OUTPUT FORMAT:
Return ONLY a JSON object:
{STYLE_JSON_SHAPE}",
        lang = lang.prompt_name(),
        data = channel.context_block(),
    )
}

pub fn trend_hunt(query: &str, lang: Language) -> String {
    format!(
        "Find obscure, dark, or trending topics related to: \"{query}\".
Focus on mysteries, unsolved cases, internet folklore, or disturbing facts.
Provide a comprehensive summary in {}.

Always cite your sources implicitly by using the search tool.",
        lang.short_name()
    )
}

pub fn viral_titles(topic: &str, lang: Language) -> String {
    format!(
        "Generate 5 title variants for a YouTube video about: \"{topic}\".
LANGUAGE: {lang}

Each title must use a different psychological trigger (curiosity gap, fear, forbidden knowledge, urgency, contrarian claim).
Keep every title under 70 characters. No clickbait that the video cannot pay off.
For each title explain the trigger in \"psychology\" and predict click-through appeal as \"score\" from 0 to 100.",
        lang = lang.prompt_name(),
    )
}

#[must_use]
pub fn viral_titles_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "title": { "type": "STRING" },
                "psychology": { "type": "STRING", "description": "The psychological trigger used." },
                "score": { "type": "NUMBER", "description": "0-100 predicted click-through appeal." }
            },
            "required": ["title", "psychology", "score"]
        }
    })
}

pub fn thumbnail_concept(title: &str, topic: &str, style: &StyleProfile, lang: Language) -> String {
    format!(
        "Design a YouTube thumbnail for the video below.
TITLE: {title}
TOPIC: {topic}
STYLE DNA: {name} ({tone})
LANGUAGE FOR THE CONCEPT: {lang}

Return \"concept\": a short art-direction description of the thumbnail (composition, focal point, colour, text overlay of at most 3 words).
Return \"imagePrompt\": a detailed English prompt for an image generator. Photorealistic, high contrast, 16:9, no text rendered in the image.",
        name = style.name,
        tone = style.tone,
        lang = lang.prompt_name(),
    )
}

#[must_use]
pub fn thumbnail_concept_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "concept": { "type": "STRING" },
            "imagePrompt": { "type": "STRING" }
        },
        "required": ["concept", "imagePrompt"]
    })
}

#[cfg(test)]
mod tests {
    use scriptos_core::RecentUpload;

    use super::*;

    fn args<'a>(style: &'a StyleProfile, refs: &'a [ScriptReference]) -> ScriptPromptArgs<'a> {
        ScriptPromptArgs {
            topic: "The Dyatlov Pass",
            style,
            duration: "10 min",
            lang: Language::PtBr,
            context: None,
            title: None,
            thumbnail_concept: None,
            references: refs,
        }
    }

    #[test]
    fn script_prompt_defaults_context() {
        let style = StyleProfile::default_noir();
        let prompt = script(&args(&style, &[]));
        assert!(prompt.contains("LANGUAGE: Portuguese (Brazil)"));
        assert!(prompt.contains("STYLE DNA: Noir Detective (Cynical, Slow-paced, Investigatory)"));
        assert!(prompt.contains("CONTEXT/DATA: None provided. Use your knowledge base."));
        assert!(!prompt.contains("CHOSEN TITLE"));
        assert!(!prompt.contains("REFERENCES"));
    }

    #[test]
    fn script_prompt_includes_title_concept_and_links() {
        let style = StyleProfile::default_noir();
        let refs = vec![
            ScriptReference {
                id: "r1".to_string(),
                kind: ReferenceType::Url,
                data: "https://example.com/case".to_string(),
                mime_type: None,
                title: "Case notes".to_string(),
            },
            ScriptReference {
                id: "r2".to_string(),
                kind: ReferenceType::File,
                data: "QUJD".to_string(),
                mime_type: Some("application/pdf".to_string()),
                title: "scan.pdf".to_string(),
            },
        ];
        let mut a = args(&style, &refs);
        a.title = Some("Nine Hikers, One Tent");
        a.thumbnail_concept = Some("Torn tent in snow");
        a.context = Some("  ");
        let prompt = script(&a);
        assert!(prompt.contains("CHOSEN TITLE: Nine Hikers, One Tent"));
        assert!(prompt.contains("THUMBNAIL CONCEPT: Torn tent in snow"));
        assert!(prompt.contains("- [URL] Case notes: https://example.com/case"));
        assert!(!prompt.contains("QUJD"));
        assert!(prompt.contains("Attached files"));
        assert!(prompt.contains("None provided"));
    }

    #[test]
    fn analyze_prompt_truncates_by_characters() {
        let long = "ç".repeat(ANALYSIS_CHAR_LIMIT + 100);
        let prompt = analyze(&long, Language::EnUs);
        assert_eq!(prompt.matches('ç').count(), ANALYSIS_CHAR_LIMIT);
        assert!(prompt.contains("Output feedback in English."));
    }

    #[test]
    fn channel_prompt_embeds_context_block() {
        let record = ChannelRecord {
            title: "Abyss".to_string(),
            description: String::new(),
            custom_url: "@abyss".to_string(),
            subscribers: "10".to_string(),
            video_count: "1".to_string(),
            keywords: String::new(),
            recent_videos: vec![RecentUpload::truncated("The Lake", "Cold.")],
        };
        let prompt = decode_channel(&record, Language::EnUs);
        assert!(prompt.contains("CHANNEL: Abyss (@abyss)"));
        assert!(prompt.contains("1. \"The Lake\" - Cold."));
        assert!(prompt.contains("\"audioSignature\""));
    }

    #[test]
    fn schemas_require_all_fields() {
        assert_eq!(viral_metrics_schema()["required"].as_array().map(Vec::len), Some(4));
        assert_eq!(viral_titles_schema()["type"], "ARRAY");
        assert_eq!(thumbnail_concept_schema()["required"][1], "imagePrompt");
    }
}
