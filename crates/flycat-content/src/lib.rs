//! Message content helpers for the flycat feed client.
//!
//! The entry point is [`ContentNormalizer::classify`] (or the
//! [`normalize_content`] shorthand), which splits note text into media URL
//! buckets and sanitized, linkified markup ready for a renderer.

pub mod config;
pub mod helpers;
pub mod linkify;
pub mod media;
pub mod normalize;
pub mod relay;
pub mod sanitize;
pub mod tags;

pub use config::{ConfigError, ExtensionLists, NormalizerConfig};
pub use helpers::{
    equal_maps, max_strings, share_content_url, short_public_key, DEFAULT_MAX_LEN,
};
pub use linkify::linkify;
pub use media::{ExtensionMatching, MediaKind, MediaMatcher};
pub use normalize::{normalize_content, ClassifiedContent, ContentNormalizer};
pub use relay::{check_relay_url, is_valid_wss_url, RelayUrlError, RelayUrlPolicy};
pub use sanitize::{init_sanitizer, SafeHtml, Sanitizer};
pub use tags::{last_event_id_from_e_tags, last_pubkey_from_p_tags, share_header_pubkey};
