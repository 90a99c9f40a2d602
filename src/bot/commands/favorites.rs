//! Favorite homes commands - `favorites` and `favorite`.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{
            BotData, auth_for,
            commands::homes::{note_view_failure, pick_home, record_view},
        },
        core::FavoriteStore,
        errors::{Error, Result},
    };
    use std::{fmt::Write, sync::Arc};

    /// Lists your favorite homes.
    #[poise::command(slash_command, prefix_command)]
    pub async fn favorites(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let mut store =
            FavoriteStore::new(Arc::clone(&ctx.data().services.favorites), auth_for(ctx.author()));

        let favorites = store.load_favorites().await?;
        if favorites.is_empty() {
            ctx.say("You have no favorite homes yet. Use `/favorite` on a search result.")
                .await?;
            return Ok(());
        }

        let mut reply = format!("❤️ **Your favorites ({})**\n", favorites.len());
        for record in favorites {
            writeln!(
                reply,
                "• **{}** ({}) - ${:.0} • {} bd / {} ba",
                record.title, record.city, record.price, record.bedrooms, record.bathrooms
            )?;
        }

        ctx.say(reply).await?;
        Ok(())
    }

    /// Adds a search result to your favorites, or removes it if it is already one.
    #[poise::command(slash_command, prefix_command)]
    pub async fn favorite(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "The search you ran"] query: String,
        #[description = "Result number from /search"] pick: u32,
    ) -> Result<()> {
        ctx.defer().await?;
        let auth = auth_for(ctx.author());
        let home = pick_home(ctx.data(), &query, pick).await?;
        let view_failure = record_view(ctx.data(), auth.clone(), &home).await;

        let mut store = FavoriteStore::new(Arc::clone(&ctx.data().services.favorites), auth);
        store.load_favorites().await?;
        let was_favorite = store.is_favorite(&home.id);
        store.toggle_favorite(&home).await?;

        let mut message = if was_favorite {
            format!("💔 Removed **{}** from your favorites.", home.title)
        } else {
            format!("❤️ Added **{}** to your favorites.", home.title)
        };
        note_view_failure(&mut message, view_failure.as_deref());
        ctx.say(message).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
