use std::borrow::Cow;
use std::collections::HashMap;
use std::hash::{BuildHasher, Hash};

use crate::linkify::url_regex;

pub const DEFAULT_MAX_LEN: usize = 100;
pub const TRUNCATION_MARKER: &str = "..";
pub const UNKNOWN_KEY: &str = "unknown";

/// Last `http(s)://` URL in `text`; share notes append the shared page's URL.
pub fn share_content_url(text: &str) -> Option<&str> {
    url_regex().find_iter(text).last().map(|m| m.as_str())
}

/// `abc..hij` style display form of a public key.
pub fn short_public_key(key: Option<&str>) -> String {
    let Some(key) = key.filter(|k| !k.is_empty()) else {
        return UNKNOWN_KEY.to_string();
    };
    let head: String = key.chars().take(3).collect();
    let count = key.chars().count();
    // A tail start below zero counts back from the end again, so two-char
    // keys keep only their last char: `ab` -> `ab..b`.
    let start = match count.checked_sub(3) {
        Some(start) => start,
        None => (2 * count).saturating_sub(3),
    };
    let tail: String = key.chars().skip(start).collect();
    format!("{head}{TRUNCATION_MARKER}{tail}")
}

/// Same size, same keys, and `==` values under every key.
pub fn equal_maps<K, V, S>(a: &HashMap<K, V, S>, b: &HashMap<K, V, S>) -> bool
where
    K: Eq + Hash,
    V: PartialEq,
    S: BuildHasher,
{
    if a.len() != b.len() {
        return false;
    }
    a.iter()
        .all(|(key, value)| b.get(key).is_some_and(|other| other == value))
}

/// Cut `s` to `max_len` characters and append `..` when it was longer.
pub fn max_strings(s: Option<&str>, max_len: usize) -> Option<Cow<'_, str>> {
    let s = s?;
    match s.char_indices().nth(max_len) {
        Some((cut, _)) => Some(Cow::Owned(format!("{}{TRUNCATION_MARKER}", &s[..cut]))),
        None => Some(Cow::Borrowed(s)),
    }
}
