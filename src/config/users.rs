//! User display-name configuration loaded from environment variables.
//!
//! Maps Discord user IDs to friendly names configured in `.env`. Names are optional
//! and fall back to the Discord username when not configured.

use std::collections::HashMap;

/// Environment variable holding `id:name` pairs separated by commas
pub const NICKNAMES_ENV: &str = "HOME_BUDDY_NICKNAMES";

/// Parses `id:name,id:name` into a lookup table, skipping malformed entries.
#[must_use]
pub fn parse_nicknames(raw: &str) -> HashMap<String, String> {
    raw.split(',')
        .filter_map(|pair| {
            let (id, name) = pair.split_once(':')?;
            let (id, name) = (id.trim(), name.trim());
            (!id.is_empty() && !name.is_empty()).then(|| (id.to_string(), name.to_string()))
        })
        .collect()
}

/// Gets a mapping of user IDs to their configured nicknames from the environment.
#[must_use]
pub fn get_user_nicknames() -> HashMap<String, String> {
    std::env::var(NICKNAMES_ENV)
        .map(|raw| parse_nicknames(&raw))
        .unwrap_or_default()
}

/// Resolves the display name for a user: configured nickname, else `fallback`.
#[must_use]
pub fn display_name(user_id: &str, fallback: &str) -> String {
    get_user_nicknames()
        .remove(user_id)
        .unwrap_or_else(|| fallback.to_string())
}
