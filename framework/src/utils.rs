use addrole_models::id::{RoleId, UserId};

/// Accepts a raw id, `<@id>` or `<@!id>`
pub fn parse_username(mention: impl AsRef<str>) -> Option<UserId> {
    let mention = mention.as_ref();

    let raw = match mention.strip_prefix("<@").and_then(|m| m.strip_suffix('>')) {
        Some(inner) => inner.strip_prefix('!').unwrap_or(inner),
        None => mention,
    };
    raw.parse::<u64>().ok().and_then(UserId::new_checked)
}

/// Accepts a raw id or `<@&id>`
pub fn parse_role(mention: impl AsRef<str>) -> Option<RoleId> {
    let mention = mention.as_ref();

    let raw = match mention.strip_prefix("<@&").and_then(|m| m.strip_suffix('>')) {
        Some(inner) => inner,
        None => mention,
    };
    raw.parse::<u64>().ok().and_then(RoleId::new_checked)
}
