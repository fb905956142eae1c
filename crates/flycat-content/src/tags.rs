use nostr::{Tag, TagKind};

/// Index of the author public key inside a flycat share header tag.
pub const SHARE_HEADER_PUBKEY_INDEX: usize = 4;

fn last_tag_value<'a, I>(tags: I, kind: TagKind<'static>) -> Option<String>
where
    I: IntoIterator<Item = &'a Tag>,
{
    tags.into_iter()
        .filter(|tag| tag.kind() == kind)
        .filter_map(|tag| tag.content())
        .last()
        .map(|s| s.to_string())
}

/// The pubkey a reply is addressed to: the last `p` tag wins.
pub fn last_pubkey_from_p_tags<'a, I>(tags: I) -> Option<String>
where
    I: IntoIterator<Item = &'a Tag>,
{
    last_tag_value(tags, TagKind::p())
}

/// The event a reply points at: the last `e` tag wins.
pub fn last_event_id_from_e_tags<'a, I>(tags: I) -> Option<String>
where
    I: IntoIterator<Item = &'a Tag>,
{
    last_tag_value(tags, TagKind::e())
}

pub fn share_header_pubkey(header: &Tag) -> Option<&str> {
    header
        .as_slice()
        .get(SHARE_HEADER_PUBKEY_INDEX)
        .map(String::as_str)
}
