use std::sync::OnceLock;

use regex::Regex;

/// Bare `http(s)://` URL up to the next whitespace.
pub(crate) fn url_regex() -> &'static Regex {
    static URL_RE: OnceLock<Regex> = OnceLock::new();
    URL_RE.get_or_init(|| Regex::new(r"https?://\S+").expect("valid url regex"))
}

fn markup_regex() -> &'static Regex {
    static MARKUP_RE: OnceLock<Regex> = OnceLock::new();
    MARKUP_RE.get_or_init(|| {
        Regex::new(r"<!--[\s\S]*?-->|<(/?)([A-Za-z][A-Za-z0-9]*)\b[^<>]*>")
            .expect("valid markup regex")
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Segment<'a> {
    /// Prose outside any tag.
    Text(&'a str),
    /// A tag or comment, copied through untouched.
    Markup(&'a str),
    /// Prose nested inside an `<a>` element.
    AnchorText(&'a str),
}

fn push_text<'a>(out: &mut Vec<Segment<'a>>, text: &'a str, anchor_depth: usize) {
    if text.is_empty() {
        return;
    }
    if anchor_depth > 0 {
        out.push(Segment::AnchorText(text));
    } else {
        out.push(Segment::Text(text));
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AnchorEdge {
    Open,
    Close,
}

fn anchor_edge(caps: &regex::Captures<'_>) -> Option<AnchorEdge> {
    let name = caps.get(2)?;
    if !name.as_str().eq_ignore_ascii_case("a") {
        return None;
    }
    let closing = caps.get(1).is_some_and(|m| !m.as_str().is_empty());
    if closing {
        Some(AnchorEdge::Close)
    } else if caps.get(0)?.as_str().ends_with("/>") {
        None
    } else {
        Some(AnchorEdge::Open)
    }
}

/// Split `content` into plain-text and markup segments, tracking whether
/// text sits inside an anchor.
///
/// Only `<a>`/`</a>` pairs count: an open tag with no later close (or a
/// stray close) is copied as markup without changing the nesting.
pub(crate) fn segments(content: &str) -> Vec<Segment<'_>> {
    let tags: Vec<_> = markup_regex().captures_iter(content).collect();

    let mut paired = vec![false; tags.len()];
    let mut open: Vec<usize> = Vec::new();
    for (idx, caps) in tags.iter().enumerate() {
        match anchor_edge(caps) {
            Some(AnchorEdge::Open) => open.push(idx),
            Some(AnchorEdge::Close) => {
                if let Some(start) = open.pop() {
                    paired[start] = true;
                    paired[idx] = true;
                }
            }
            None => {}
        }
    }

    let mut out = Vec::new();
    let mut last_end = 0usize;
    let mut anchor_depth = 0usize;

    for (idx, caps) in tags.iter().enumerate() {
        let Some(full) = caps.get(0) else {
            continue;
        };
        push_text(&mut out, &content[last_end..full.start()], anchor_depth);
        out.push(Segment::Markup(full.as_str()));

        if paired[idx] {
            match anchor_edge(caps) {
                Some(AnchorEdge::Open) => anchor_depth += 1,
                Some(AnchorEdge::Close) => anchor_depth = anchor_depth.saturating_sub(1),
                None => {}
            }
        }
        last_end = full.end();
    }
    push_text(&mut out, &content[last_end..], anchor_depth);
    out
}

fn push_anchor(out: &mut String, url: &str) {
    let href = html_escape::encode_double_quoted_attribute(url);
    let text = html_escape::encode_text(url);
    out.push_str("<a href=\"");
    out.push_str(&href);
    out.push_str("\" target=\"_blank\">");
    out.push_str(&text);
    out.push_str("</a>");
}

/// Wrap every bare URL in an anchor that opens in a new tab.
///
/// URLs already inside markup (attribute values, comments, the text of an
/// existing `<a>`) are left alone, so running this twice is the same as
/// running it once. The result is not sanitized.
pub fn linkify(content: &str) -> String {
    let mut out = String::with_capacity(content.len());
    for segment in segments(content) {
        match segment {
            Segment::Text(text) => {
                let mut last_end = 0usize;
                for m in url_regex().find_iter(text) {
                    out.push_str(&text[last_end..m.start()]);
                    push_anchor(&mut out, m.as_str());
                    last_end = m.end();
                }
                out.push_str(&text[last_end..]);
            }
            Segment::Markup(raw) | Segment::AnchorText(raw) => out.push_str(raw),
        }
    }
    out
}
