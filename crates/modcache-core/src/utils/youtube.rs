use std::sync::OnceLock;

use regex::Regex;

fn youtube_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r"^(?:https?://|//)?(?:www\.|m\.)?(?:youtu\.be/|youtube\.com/(?:embed/|v/|watch\?v=|watch\?.+&v=))([\w-]{11})(?:[^\w-]|$)",
        )
        .expect("static regex")
    })
}

/// Extract the 11-character video id from a YouTube link. The id names the
/// cached thumbnail file.
pub fn extract_youtube_id(url: &str) -> Option<&str> {
    youtube_pattern()
        .captures(url.trim())
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_youtube_id_variants() {
        let id = Some("dQw4w9WgXcQ");
        assert_eq!(extract_youtube_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ"), id);
        assert_eq!(extract_youtube_id("https://youtu.be/dQw4w9WgXcQ"), id);
        assert_eq!(extract_youtube_id("youtube.com/embed/dQw4w9WgXcQ?rel=0"), id);
        assert_eq!(
            extract_youtube_id("https://m.youtube.com/watch?feature=share&v=dQw4w9WgXcQ"),
            id
        );
    }

    #[test]
    fn test_extract_youtube_id_rejects_other_links() {
        assert_eq!(extract_youtube_id("https://vimeo.com/123456"), None);
        assert_eq!(extract_youtube_id("https://youtu.be/short"), None);
        assert_eq!(extract_youtube_id(""), None);
    }
}
