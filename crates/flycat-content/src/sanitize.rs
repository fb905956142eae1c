use std::collections::HashSet;
use std::fmt;
use std::sync::OnceLock;

use serde::Serialize;

pub const LINK_TARGET: &str = "_blank";
pub const LINK_REL: &str = "noopener noreferrer";

const URL_SCHEMES: &[&str] = &["http", "https", "mailto"];

/// Markup that went through [`Sanitizer::clean`].
///
/// There is no public constructor: a renderer that only accepts `SafeHtml`
/// cannot be handed unsanitized note content.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct SafeHtml(String);

impl SafeHtml {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<str> for SafeHtml {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SafeHtml {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<str> for SafeHtml {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for SafeHtml {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// HTML sanitizer for note markup.
///
/// Keeps ammonia's default tag allowlist, restricts link schemes, and forces
/// every anchor (and image-map area) to open in a new tab without an opener.
pub struct Sanitizer {
    builder: ammonia::Builder<'static>,
}

impl fmt::Debug for Sanitizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sanitizer").finish_non_exhaustive()
    }
}

impl Default for Sanitizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Sanitizer {
    pub fn new() -> Self {
        let mut builder = ammonia::Builder::default();
        builder
            .url_schemes(URL_SCHEMES.iter().copied().collect::<HashSet<&'static str>>())
            .link_rel(Some(LINK_REL))
            .set_tag_attribute_value("a", "target", LINK_TARGET)
            .set_tag_attribute_value("area", "target", LINK_TARGET)
            .set_tag_attribute_value("area", "rel", LINK_REL);
        tracing::debug!(schemes = ?URL_SCHEMES, "html sanitizer initialized");
        Self { builder }
    }

    pub fn clean(&self, markup: &str) -> SafeHtml {
        SafeHtml(self.builder.clean(markup).to_string())
    }
}

/// Process-wide sanitizer, built on first call.
pub fn init_sanitizer() -> &'static Sanitizer {
    static SANITIZER: OnceLock<Sanitizer> = OnceLock::new();
    SANITIZER.get_or_init(Sanitizer::new)
}
