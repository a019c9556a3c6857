//! Tolerant extraction of structured JSON from model text.

use std::sync::LazyLock;

use regex::Regex;
use serde::de::DeserializeOwned;

static FENCED_BLOCK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)```(?:json)?\s*(.*?)\s*```").expect("valid fenced block regex")
});

/// Parses `T` out of a model response, trying progressively looser readings:
///
/// 1. the whole text as JSON;
/// 2. the contents of the first fenced code block (labelled `json` or not);
/// 3. the span from the first `{` to the last `}`.
///
/// Returns `None` when every attempt fails; never panics.
#[must_use]
pub fn extract_json<T: DeserializeOwned>(text: &str) -> Option<T> {
    if text.trim().is_empty() {
        return None;
    }

    let attempts: [fn(&str) -> Option<&str>; 3] = [whole, fenced_block, brace_span];
    let parsed = attempts
        .iter()
        .filter_map(|candidate| candidate(text))
        .find_map(|slice| serde_json::from_str(slice).ok());

    if parsed.is_none() {
        tracing::warn!(chars = text.len(), "failed to parse JSON from model response");
    }
    parsed
}

fn whole(text: &str) -> Option<&str> {
    Some(text.trim())
}

fn fenced_block(text: &str) -> Option<&str> {
    FENCED_BLOCK_RE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

fn brace_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (start < end).then(|| &text[start..=end])
}
