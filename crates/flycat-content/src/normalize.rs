use std::sync::OnceLock;

use serde::Serialize;

use crate::config::NormalizerConfig;
use crate::linkify::{linkify, url_regex};
use crate::media::{MediaKind, MediaMatcher};
use crate::sanitize::{SafeHtml, Sanitizer};

/// Note text split into media URLs and the prose left to render.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ClassifiedContent {
    pub image_urls: Vec<String>,
    pub video_urls: Vec<String>,
    pub audio_urls: Vec<String>,
    /// The text with media URLs removed and remaining URLs turned into
    /// links, sanitized.
    pub modified_text: SafeHtml,
}

impl ClassifiedContent {
    pub fn urls(&self, kind: MediaKind) -> &[String] {
        match kind {
            MediaKind::Image => &self.image_urls,
            MediaKind::Video => &self.video_urls,
            MediaKind::Audio => &self.audio_urls,
        }
    }

    pub fn has_media(&self) -> bool {
        MediaKind::ALL.iter().any(|kind| !self.urls(*kind).is_empty())
    }

    fn push(&mut self, kind: MediaKind, url: &str) {
        let bucket = match kind {
            MediaKind::Image => &mut self.image_urls,
            MediaKind::Video => &mut self.video_urls,
            MediaKind::Audio => &mut self.audio_urls,
        };
        bucket.push(url.to_string());
    }
}

/// Splits note content into media previews and sanitized prose.
///
/// The sanitizer is built when the normalizer is created and dropped with
/// it; [`ContentNormalizer::classify`] touches no shared state.
#[derive(Debug)]
pub struct ContentNormalizer {
    media: MediaMatcher,
    sanitizer: Sanitizer,
}

impl Default for ContentNormalizer {
    fn default() -> Self {
        Self::with_matcher(MediaMatcher::default())
    }
}

impl ContentNormalizer {
    pub fn new(config: &NormalizerConfig) -> Self {
        Self::with_matcher(config.media_matcher())
    }

    pub fn with_matcher(media: MediaMatcher) -> Self {
        Self {
            media,
            sanitizer: Sanitizer::new(),
        }
    }

    /// Process-wide normalizer with the default extension lists.
    pub fn shared() -> &'static ContentNormalizer {
        static SHARED: OnceLock<ContentNormalizer> = OnceLock::new();
        SHARED.get_or_init(ContentNormalizer::default)
    }

    pub fn media(&self) -> &MediaMatcher {
        &self.media
    }

    pub fn classify(&self, text: &str) -> ClassifiedContent {
        let mut content = ClassifiedContent::default();
        let mut remaining = String::with_capacity(text.len());
        let mut last_end = 0usize;

        // Each classified match removes exactly the occurrence it was found
        // at, so repeated URLs are consumed left to right.
        for m in url_regex().find_iter(text) {
            let Some(kind) = self.media.classify(m.as_str()) else {
                continue;
            };
            content.push(kind, m.as_str());
            remaining.push_str(&text[last_end..m.start()]);
            last_end = m.end();
        }
        remaining.push_str(&text[last_end..]);

        content.modified_text = self.sanitizer.clean(&linkify(&remaining));

        tracing::debug!(
            images = content.image_urls.len(),
            videos = content.video_urls.len(),
            audio = content.audio_urls.len(),
            "classified note content"
        );
        content
    }
}

/// [`ContentNormalizer::classify`] on the shared default normalizer.
pub fn normalize_content(text: &str) -> ClassifiedContent {
    ContentNormalizer::shared().classify(text)
}
