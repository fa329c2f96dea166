use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Error, Result};

/// Characters that may never appear in a canonical video id.
const DISALLOWED: [char; 6] = ['?', '&', '/', '<', '%', '='];

// Ordered extraction patterns, strictest first. Each one that matches
// overwrites the working value with its capture, so the last matching
// rule wins.
static MARKER_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?:v|embed|watch\?v)(?:=|/)([^"&?/=%]{11})"#).unwrap());
static SEPARATOR_ID: Lazy<Regex> = Lazy::new(|| Regex::new(r#"(?:=|/)([^"&?/=%]{11})"#).unwrap());
static BARE_ID: Lazy<Regex> = Lazy::new(|| Regex::new(r#"([^"&?/=%]{11})"#).unwrap());

/// Normalizes a watch URL, short URL or bare id into a canonical video id.
///
/// Inputs without a short-link marker or any query-ish character are taken
/// to already be bare ids and pass through untouched; everything else runs
/// through the pattern cascade before validation.
pub(crate) fn find_video_id(input: &str) -> Result<String> {
    let mut video_id = input.to_owned();

    if video_id.contains("youtu") || video_id.contains(['"', '?', '&', '/', '<', '%', '=']) {
        for pattern in [&*MARKER_ID, &*SEPARATOR_ID, &*BARE_ID] {
            if let Some(captures) = pattern.captures(&video_id) {
                video_id = captures[1].to_owned();
            }
        }
    }

    tracing::debug!(%video_id, "resolved video id");

    if video_id.contains(DISALLOWED) {
        return Err(Error::InvalidVideoId(video_id));
    }
    if video_id.len() < 10 {
        return Err(Error::VideoIdTooShort(video_id));
    }
    Ok(video_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_watch_url() {
        let id = find_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ").unwrap();
        assert_eq!(id, "dQw4w9WgXcQ");
    }

    #[test]
    fn test_watch_url_with_extra_params() {
        let id = find_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ&feature=share&t=42")
            .unwrap();
        assert_eq!(id, "dQw4w9WgXcQ");
    }

    #[test]
    fn test_embed_url() {
        let id = find_video_id("http://www.youtube.com/embed/dQw4w9WgXcQ").unwrap();
        assert_eq!(id, "dQw4w9WgXcQ");
    }

    #[test]
    fn test_short_url() {
        let id = find_video_id("https://youtu.be/dQw4w9WgXcQ").unwrap();
        assert_eq!(id, "dQw4w9WgXcQ");
    }

    #[test]
    fn test_bare_id_passes_through() {
        let id = find_video_id("dQw4w9WgXcQ").unwrap();
        assert_eq!(id, "dQw4w9WgXcQ");
    }

    #[test]
    fn test_ten_character_id_is_accepted() {
        let id = find_video_id("abcdefghij").unwrap();
        assert_eq!(id, "abcdefghij");
    }

    #[test]
    fn test_synthetic_urls_recover_embedded_id() {
        let embedded = "a1B2c3D4e5F";
        for input in [
            format!("https://www.youtube.com/watch?v={embedded}"),
            format!("https://youtu.be/{embedded}"),
            format!("https://www.youtube.com/embed/{embedded}"),
            format!("v={embedded}"),
        ] {
            assert_eq!(find_video_id(&input).unwrap(), embedded, "input: {input}");
        }
    }

    #[test]
    fn test_too_short_after_extraction() {
        let err = find_video_id("short").unwrap_err();
        assert!(matches!(err, Error::VideoIdTooShort(_)));
    }

    #[test]
    fn test_unextractable_input_with_equals_fails_validation() {
        let err = find_video_id("a=b").unwrap_err();
        assert!(matches!(err, Error::InvalidVideoId(_)));
    }

    #[test]
    fn test_error_message_names_the_id() {
        let err = find_video_id("tiny").unwrap_err();
        assert!(err.to_string().contains("tiny"));
    }
}
