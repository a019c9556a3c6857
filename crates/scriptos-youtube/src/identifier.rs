//! Free-form channel and video identifier parsing.

use std::sync::LazyLock;

use regex::Regex;

/// Fixed prefix of a canonical channel id.
pub const CHANNEL_ID_PREFIX: &str = "UC";
/// Fixed length of a canonical channel id.
pub const CHANNEL_ID_LEN: usize = 24;
/// Fixed length of a video id.
pub const VIDEO_ID_LEN: usize = 11;

const CHANNEL_PATH_SEGMENT: &str = "/channel/";

static HANDLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@[A-Za-z0-9_\-.]+").expect("valid handle regex"));

static VIDEO_URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^.*(youtu\.be/|v/|u/[A-Za-z0-9_]/|embed/|shorts/|watch\?v=|&v=)([^#&?]*).*")
        .expect("valid video url regex")
});

/// How a channel identifier will be looked up, strongest match first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelLookup {
    /// `@handle` found anywhere in the input.
    Handle(String),
    /// Canonical channel id, given directly or taken from a `/channel/` URL.
    Id(String),
    /// Nothing structural matched; search by the trimmed input text.
    Search(String),
}

/// Classifies a user-supplied channel identifier. First match wins:
///
/// 1. any `@handle` substring;
/// 2. a space-free string with the channel-id prefix and exact id length;
/// 3. a `/channel/<id>` URL segment, id ending at the next `/` or `?`;
/// 4. otherwise free-text search.
///
/// Exact structural matches are preferred over search because search can
/// silently return the wrong channel.
#[must_use]
pub fn classify_identifier(input: &str) -> ChannelLookup {
    let clean = input.trim();

    if let Some(handle) = HANDLE_RE.find(clean) {
        return ChannelLookup::Handle(handle.as_str().to_string());
    }

    if !clean.contains(' ')
        && clean.starts_with(CHANNEL_ID_PREFIX)
        && clean.len() == CHANNEL_ID_LEN
    {
        return ChannelLookup::Id(clean.to_string());
    }

    if let Some((_, rest)) = clean.split_once(CHANNEL_PATH_SEGMENT) {
        let id = rest.split(['/', '?']).next().unwrap_or_default();
        if !id.is_empty() {
            return ChannelLookup::Id(id.to_string());
        }
    }

    ChannelLookup::Search(clean.to_string())
}

/// Extracts an 11-character video id from a watch/short/embed URL, or
/// accepts a bare id of that length.
#[must_use]
pub fn extract_video_id(input: &str) -> Option<String> {
    let input = input.trim();
    if let Some(caps) = VIDEO_URL_RE.captures(input) {
        let id = caps.get(2).map_or("", |m| m.as_str());
        if id.chars().count() == VIDEO_ID_LEN {
            return Some(id.to_string());
        }
    }
    (input.chars().count() == VIDEO_ID_LEN).then(|| input.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_handle_resolves_by_handle() {
        assert_eq!(
            classify_identifier("@abyss.files"),
            ChannelLookup::Handle("@abyss.files".to_string())
        );
    }

    #[test]
    fn handle_wins_regardless_of_surrounding_text() {
        let input = "check out @dark-docs on https://youtube.com/channel/UCabcdefghijklmnopqrstuv";
        assert_eq!(
            classify_identifier(input),
            ChannelLookup::Handle("@dark-docs".to_string())
        );
    }

    #[test]
    fn handle_inside_url_is_extracted() {
        assert_eq!(
            classify_identifier("https://www.youtube.com/@LEMMiNO/videos"),
            ChannelLookup::Handle("@LEMMiNO".to_string())
        );
    }

    #[test]
    fn exact_channel_id_resolves_directly() {
        let id = "UC1234567890abcdefghijkl";
        assert_eq!(id.len(), CHANNEL_ID_LEN);
        assert_eq!(classify_identifier(id), ChannelLookup::Id(id.to_string()));
        assert_eq!(
            classify_identifier(&format!("  {id}\n")),
            ChannelLookup::Id(id.to_string())
        );
    }

    #[test]
    fn wrong_length_id_falls_back_to_search() {
        assert_eq!(
            classify_identifier("UC123"),
            ChannelLookup::Search("UC123".to_string())
        );
    }

    #[test]
    fn channel_url_segment_is_extracted() {
        assert_eq!(
            classify_identifier("https://www.youtube.com/channel/UCxyz123/videos?view=0"),
            ChannelLookup::Id("UCxyz123".to_string())
        );
        assert_eq!(
            classify_identifier("youtube.com/channel/UCxyz123?si=abc"),
            ChannelLookup::Id("UCxyz123".to_string())
        );
    }

    #[test]
    fn empty_channel_segment_falls_back_to_search() {
        let input = "https://www.youtube.com/channel/";
        assert_eq!(
            classify_identifier(input),
            ChannelLookup::Search(input.to_string())
        );
    }

    #[test]
    fn free_text_searches() {
        assert_eq!(
            classify_identifier("  unsolved mysteries channel "),
            ChannelLookup::Search("unsolved mysteries channel".to_string())
        );
    }

    #[test]
    fn video_id_from_common_url_forms() {
        let id = "dQw4w9WgXcQ";
        for url in [
            format!("https://www.youtube.com/watch?v={id}"),
            format!("https://www.youtube.com/watch?feature=share&v={id}"),
            format!("https://youtu.be/{id}?t=42"),
            format!("https://www.youtube.com/embed/{id}"),
            format!("https://www.youtube.com/shorts/{id}"),
        ] {
            assert_eq!(extract_video_id(&url).as_deref(), Some(id), "url: {url}");
        }
    }

    #[test]
    fn bare_video_id_is_accepted() {
        assert_eq!(extract_video_id("dQw4w9WgXcQ").as_deref(), Some("dQw4w9WgXcQ"));
    }

    #[test]
    fn non_video_input_is_rejected() {
        assert!(extract_video_id("https://example.com/article").is_none());
        assert!(extract_video_id("short").is_none());
    }
}
