//! Music link classification.
//!
//! Pasted links to YouTube or Spotify are rewritten into their embeddable
//! form. Anything else is treated as a direct audio URL.

use regex::Regex;
use std::sync::LazyLock;

static YOUTUBE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(?:https?://)?(?:(?:www|m|music)\.)?(?:youtube\.com/(?:watch\?(?:[^#]*&)?v=|embed/|shorts/|live/)|youtu\.be/)(?<id>[A-Za-z0-9_-]{6,})",
    )
    .expect("youtube pattern is valid")
});

static SPOTIFY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:https?://)?(?:[a-z0-9-]+\.)*spotify\.com/(?:embed/)?(?<path>[^?#]+)")
        .expect("spotify pattern is valid")
});

/// A classified music link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaLink {
    YouTube { video_id: String },
    /// Path below the host, e.g. `track/4uLU6hMCjMI75M1A2tKUQC`.
    Spotify { path: String },
    /// Unrecognised input, played as a raw audio source.
    Direct { url: String },
}

impl MediaLink {
    /// Classifies user input. Returns `None` for blank input.
    pub fn classify(input: &str) -> Option<Self> {
        let input = input.trim();
        if input.is_empty() {
            return None;
        }

        if let Some(caps) = YOUTUBE_RE.captures(input) {
            return Some(MediaLink::YouTube {
                video_id: caps["id"].to_string(),
            });
        }

        if let Some(caps) = SPOTIFY_RE.captures(input) {
            let path = caps["path"].trim_end_matches('/');
            // A bare embed link names nothing to play.
            if !path.is_empty() && !path.eq_ignore_ascii_case("embed") {
                return Some(MediaLink::Spotify {
                    path: path.to_string(),
                });
            }
        }

        Some(MediaLink::Direct {
            url: input.to_string(),
        })
    }

    /// URL to open or embed for this link.
    pub fn embed_url(&self) -> String {
        match self {
            MediaLink::YouTube { video_id } => format!("https://www.youtube.com/embed/{video_id}"),
            MediaLink::Spotify { path } => format!("https://open.spotify.com/embed/{path}"),
            MediaLink::Direct { url } => url.clone(),
        }
    }

    pub fn provider(&self) -> &'static str {
        match self {
            MediaLink::YouTube { .. } => "YouTube",
            MediaLink::Spotify { .. } => "Spotify",
            MediaLink::Direct { .. } => "Direct audio",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn youtube(id: &str) -> Option<MediaLink> {
        Some(MediaLink::YouTube {
            video_id: id.to_string(),
        })
    }

    #[test]
    fn short_and_long_youtube_links_agree() {
        let short = MediaLink::classify("https://youtu.be/dQw4w9WgXcQ").unwrap();
        let long = MediaLink::classify("https://www.youtube.com/watch?v=dQw4w9WgXcQ").unwrap();
        assert_eq!(short, long);
        assert_eq!(
            short.embed_url(),
            "https://www.youtube.com/embed/dQw4w9WgXcQ"
        );
    }

    #[test]
    fn youtube_variants() {
        assert_eq!(
            MediaLink::classify("youtube.com/watch?feature=share&v=abcdef123&t=42"),
            youtube("abcdef123")
        );
        assert_eq!(
            MediaLink::classify("https://youtu.be/abcdef123?si=xyz"),
            youtube("abcdef123")
        );
        assert_eq!(
            MediaLink::classify("https://m.youtube.com/shorts/abc_def-12"),
            youtube("abc_def-12")
        );
        assert_eq!(
            MediaLink::classify(" https://www.youtube.com/embed/abcdef123 "),
            youtube("abcdef123")
        );
    }

    #[test]
    fn spotify_gets_embed_prefix() {
        let link =
            MediaLink::classify("https://open.spotify.com/track/4uLU6hMCjMI75M1A2tKUQC?si=1").unwrap();
        assert_eq!(
            link,
            MediaLink::Spotify {
                path: "track/4uLU6hMCjMI75M1A2tKUQC".to_string()
            }
        );
        assert_eq!(
            link.embed_url(),
            "https://open.spotify.com/embed/track/4uLU6hMCjMI75M1A2tKUQC"
        );
    }

    #[test]
    fn spotify_embed_prefix_is_not_doubled() {
        let link = MediaLink::classify("https://open.spotify.com/embed/album/xyz").unwrap();
        assert_eq!(link.embed_url(), "https://open.spotify.com/embed/album/xyz");

        for bare in ["https://open.spotify.com/embed", "https://open.spotify.com/embed/"] {
            let link = MediaLink::classify(bare).unwrap();
            assert!(matches!(link, MediaLink::Direct { .. }), "{bare}: {link:?}");
            assert!(!link.embed_url().contains("embed/embed"));
        }
    }

    #[test]
    fn unknown_links_are_direct_audio() {
        let link = MediaLink::classify("https://cdn.example.com/song.mp3").unwrap();
        assert_eq!(
            link,
            MediaLink::Direct {
                url: "https://cdn.example.com/song.mp3".to_string()
            }
        );
        assert_eq!(link.embed_url(), "https://cdn.example.com/song.mp3");

        // A youtube host without a video id falls through as well.
        assert!(matches!(
            MediaLink::classify("https://www.youtube.com/"),
            Some(MediaLink::Direct { .. })
        ));
    }

    #[test]
    fn blank_input_is_not_a_link() {
        assert_eq!(MediaLink::classify("   "), None);
    }
}
