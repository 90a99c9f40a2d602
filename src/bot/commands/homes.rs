//! Home search commands - `search` and `view`.
//!
//! Slash commands cannot hold on to a result list between interactions, so every
//! command that acts on a home takes the search `query` plus a 1-based `pick`
//! into its results and re-runs the search.

use crate::{
    auth::AuthContext,
    bot::BotData,
    core::{HomeCatalog, RecentlyViewedLogger},
    errors::{Error, Result},
    models::Home,
};
use std::sync::Arc;
use tracing::warn;

/// Results shown per search reply
pub const MAX_RESULTS: usize = 10;

/// One-line summary of a listing.
#[must_use]
pub fn describe_home(home: &Home) -> String {
    format!(
        "**{}** ({}) - ${:.0} • {} bd / {} ba • id `{}`",
        home.title, home.city, home.price, home.bedrooms, home.bathrooms, home.id
    )
}

/// Searches with `query` and selects result number `pick`.
pub async fn pick_home(data: &BotData, query: &str, pick: u32) -> Result<Home> {
    let mut catalog = HomeCatalog::new(Arc::clone(&data.services.catalog));
    catalog.search(query).await?;

    let id = pick
        .checked_sub(1)
        .and_then(|index| usize::try_from(index).ok())
        .and_then(|index| catalog.results().get(index))
        .map(|home| home.id.clone())
        .ok_or_else(|| Error::invalid("pick", format!("no result number {pick} for '{query}'")))?;
    Ok(catalog.select(&id)?.clone())
}

/// Logs that the caller looked at `home`.
///
/// A failed log never fails the command; the logger's message is returned so
/// the reply can mention it.
pub async fn record_view(data: &BotData, auth: AuthContext, home: &Home) -> Option<String> {
    let mut logger = RecentlyViewedLogger::new(Arc::clone(&data.services.recently_viewed), auth);
    if logger.log_view(&home.id).await.is_ok() {
        return None;
    }
    let message = logger
        .last_error()
        .unwrap_or("Something went wrong. Please try again.")
        .to_string();
    warn!("Could not log view of {}: {message}", home.id);
    Some(message)
}

/// Appends a note about a failed view log to a command reply.
pub fn note_view_failure(reply: &mut String, failure: Option<&str>) {
    if let Some(message) = failure {
        reply.push_str("\n⚠️ Could not save to recently viewed: ");
        reply.push_str(message);
    }
}

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use super::{MAX_RESULTS, describe_home, note_view_failure, pick_home, record_view};
    use crate::{
        bot::{BotData, auth_for},
        core::HomeCatalog,
        errors::{Error, Result},
    };
    use std::{fmt::Write, sync::Arc};

    /// Searches homes by city, title or listing id.
    #[poise::command(slash_command, prefix_command)]
    pub async fn search(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "City, title or listing id"] query: String,
    ) -> Result<()> {
        let mut catalog = HomeCatalog::new(Arc::clone(&ctx.data().services.catalog));

        let homes = match catalog.search(&query).await {
            Ok(homes) => homes,
            Err(Error::InvalidInput { .. }) => {
                ctx.say("❌ Enter a city, title or listing id to search.")
                    .await?;
                return Ok(());
            }
            Err(_) => {
                let message = catalog.last_error().unwrap_or("Search failed.");
                ctx.say(format!("❌ {message}")).await?;
                return Ok(());
            }
        };

        if homes.is_empty() {
            ctx.say(format!("No homes found for '{query}'.")).await?;
            return Ok(());
        }

        let mut reply = format!("🔎 **{} homes for '{query}'**\n", homes.len());
        for (i, home) in homes.iter().take(MAX_RESULTS).enumerate() {
            writeln!(reply, "`{}.` {}", i + 1, describe_home(home))?;
        }
        if homes.len() > MAX_RESULTS {
            writeln!(reply, "...and {} more", homes.len() - MAX_RESULTS)?;
        }
        reply.push_str("Use the result number as `pick` in `/view`, `/forecast` or `/favorite`.");

        ctx.say(reply).await?;
        Ok(())
    }

    /// Shows one search result in detail and adds it to your recently viewed homes.
    #[poise::command(slash_command, prefix_command)]
    pub async fn view(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "The search you ran"] query: String,
        #[description = "Result number from /search"] pick: u32,
    ) -> Result<()> {
        ctx.defer().await?;
        let home = pick_home(ctx.data(), &query, pick).await?;
        let view_failure = record_view(ctx.data(), auth_for(ctx.author()), &home).await;

        let mut reply = format!("🏡 {}", describe_home(&home));
        if let Some(area) = home.area {
            write!(reply, "\nArea: {area:.0} sq ft")?;
        }
        if let Some(image) = &home.image {
            write!(reply, "\n{image}")?;
        }
        note_view_failure(&mut reply, view_failure.as_deref());

        ctx.say(reply).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
