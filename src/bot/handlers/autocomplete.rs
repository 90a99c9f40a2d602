//! Autocomplete handlers for Discord slash command parameters.
//!
//! Suggestions are built from the caller's live data, so they always reflect
//! what the backend currently holds.

use crate::{
    bot::{BotData, auth_for},
    core::TaskLifecycleManager,
    errors::Error,
};
use std::sync::Arc;

/// Provides autocomplete suggestions for the caller's open tasks.
///
/// Matches task titles case-insensitively against what the user has typed and
/// returns up to 25 titles, sorted alphabetically. Any backend failure yields no
/// suggestions rather than an error popup.
pub async fn autocomplete_task(
    ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    let mut manager =
        TaskLifecycleManager::new(Arc::clone(&ctx.data().services.tasks), auth_for(ctx.author()));

    let Ok(tasks) = manager.load_tasks().await else {
        return Vec::new();
    };

    let mut matching = matching_titles(
        tasks.iter().map(|task| task.title.as_str()),
        partial,
    );
    matching.sort();
    matching
}

/// Titles containing `partial`, case-insensitive, capped at Discord's 25 choices.
fn matching_titles<'a>(titles: impl Iterator<Item = &'a str>, partial: &str) -> Vec<String> {
    let partial_lower = partial.to_lowercase();
    titles
        .filter(|title| title.to_lowercase().contains(&partial_lower))
        .map(str::to_string)
        .take(25) // Discord autocomplete limit
        .collect()
}
