use serde::{Deserialize, Serialize};

pub const IMAGE_EXTENSIONS: &[&str] = &[".jpg", ".jpeg", ".png", ".gif", ".bmp", ".webp"];
// `webm` has no leading dot in the list the web client shipped with; legacy
// matching keeps it that way.
pub const VIDEO_EXTENSIONS: &[&str] = &[".mp4", ".mov", ".avi", ".flv", ".wmv", "webm"];
pub const AUDIO_EXTENSIONS: &[&str] = &[".mp3", ".m4a", ".ogg", ".wav", ".flac"];

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
    Audio,
}

impl MediaKind {
    pub const ALL: [MediaKind; 3] = [MediaKind::Image, MediaKind::Video, MediaKind::Audio];

    pub fn as_str(self) -> &'static str {
        match self {
            MediaKind::Image => "image",
            MediaKind::Video => "video",
            MediaKind::Audio => "audio",
        }
    }
}

impl std::fmt::Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How URL suffixes are compared against the extension lists.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtensionMatching {
    /// Case-sensitive comparison against the lists exactly as configured.
    #[default]
    Legacy,
    /// Lowercase the URL and compare against dot-prefixed, lowercased
    /// extensions. `photo.JPG` becomes an image and `webm` only matches
    /// `.webm`.
    Normalized,
}

impl ExtensionMatching {
    /// Canonical form an extension is compared in under this mode.
    pub fn canonical_extension(self, ext: &str) -> String {
        match self {
            ExtensionMatching::Legacy => ext.to_string(),
            ExtensionMatching::Normalized => {
                let lower = ext.to_lowercase();
                if lower.starts_with('.') {
                    lower
                } else {
                    format!(".{lower}")
                }
            }
        }
    }
}

/// Suffix classifier built from three extension lists.
#[derive(Clone, Debug)]
pub struct MediaMatcher {
    matching: ExtensionMatching,
    image: Vec<String>,
    video: Vec<String>,
    audio: Vec<String>,
}

impl Default for MediaMatcher {
    fn default() -> Self {
        Self::new(
            ExtensionMatching::Legacy,
            IMAGE_EXTENSIONS,
            VIDEO_EXTENSIONS,
            AUDIO_EXTENSIONS,
        )
    }
}

impl MediaMatcher {
    pub fn new<S: AsRef<str>>(
        matching: ExtensionMatching,
        image: &[S],
        video: &[S],
        audio: &[S],
    ) -> Self {
        let canon = |list: &[S]| -> Vec<String> {
            list.iter()
                .map(|ext| matching.canonical_extension(ext.as_ref()))
                .collect()
        };
        Self {
            matching,
            image: canon(image),
            video: canon(video),
            audio: canon(audio),
        }
    }

    pub fn matching(&self) -> ExtensionMatching {
        self.matching
    }

    pub fn extensions(&self, kind: MediaKind) -> &[String] {
        match kind {
            MediaKind::Image => &self.image,
            MediaKind::Video => &self.video,
            MediaKind::Audio => &self.audio,
        }
    }

    /// First category (image, video, audio) whose list holds a suffix of `url`.
    pub fn classify(&self, url: &str) -> Option<MediaKind> {
        let subject = match self.matching {
            ExtensionMatching::Legacy => std::borrow::Cow::Borrowed(url),
            ExtensionMatching::Normalized => std::borrow::Cow::Owned(url.to_lowercase()),
        };
        MediaKind::ALL.into_iter().find(|kind| {
            self.extensions(*kind)
                .iter()
                .any(|ext| subject.ends_with(ext.as_str()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_lists_classify_by_suffix() {
        let m = MediaMatcher::default();
        assert_eq!(m.classify("https://a.com/cat.png"), Some(MediaKind::Image));
        assert_eq!(m.classify("https://a.com/clip.mov"), Some(MediaKind::Video));
        assert_eq!(m.classify("https://a.com/song.flac"), Some(MediaKind::Audio));
        assert_eq!(m.classify("https://a.com/page.html"), None);
    }

    #[test]
    fn legacy_matching_is_case_sensitive() {
        let m = MediaMatcher::default();
        assert_eq!(m.classify("https://a.com/CAT.JPG"), None);
    }

    #[test]
    fn legacy_webm_entry_matches_without_dot() {
        let m = MediaMatcher::default();
        assert_eq!(m.classify("https://a.com/clip.webm"), Some(MediaKind::Video));
        assert_eq!(m.classify("https://a.com/notwebm"), Some(MediaKind::Video));
    }

    #[test]
    fn normalized_matching_lowercases_and_dots() {
        let m = MediaMatcher::new(
            ExtensionMatching::Normalized,
            IMAGE_EXTENSIONS,
            VIDEO_EXTENSIONS,
            AUDIO_EXTENSIONS,
        );
        assert_eq!(m.classify("https://a.com/CAT.JPG"), Some(MediaKind::Image));
        assert_eq!(m.classify("https://a.com/clip.WebM"), Some(MediaKind::Video));
        assert_eq!(m.classify("https://a.com/notwebm"), None);
        assert!(m.extensions(MediaKind::Video).contains(&".webm".to_string()));
    }

    #[test]
    fn first_matching_category_wins() {
        let m = MediaMatcher::new(ExtensionMatching::Legacy, &[".x"], &["x"], &[]);
        assert_eq!(m.classify("https://a.com/f.x"), Some(MediaKind::Image));
        assert_eq!(m.classify("https://a.com/fx"), Some(MediaKind::Video));
    }
}
