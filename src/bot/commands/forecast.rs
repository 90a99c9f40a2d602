//! Price forecast command.

/// Points listed per reply; longer forecasts are truncated
const MAX_POINTS: usize = 36;

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use super::MAX_POINTS;
    use crate::{
        bot::{
            BotData, auth_for,
            commands::homes::{note_view_failure, pick_home, record_view},
        },
        core::ForecastViewModel,
        errors::{Error, Result},
    };
    use std::{fmt::Write, sync::Arc};

    /// Forecasts the price of a search result.
    #[poise::command(slash_command, prefix_command)]
    pub async fn forecast(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "The search you ran"] query: String,
        #[description = "Result number from /search"] pick: u32,
    ) -> Result<()> {
        ctx.defer().await?;
        let data = ctx.data();
        let home = pick_home(data, &query, pick).await?;
        let view_failure = record_view(data, auth_for(ctx.author()), &home).await;

        let mut view = ForecastViewModel::new(
            Arc::clone(&data.services.forecast),
            data.settings.forecast.default_area,
        );
        let title = home.title.clone();
        view.select_home(home);

        let Some(series) = view.request_forecast().await? else {
            ctx.say("❌ Select a home before requesting a forecast.")
                .await?;
            return Ok(());
        };

        let mut reply = format!("📈 **Price forecast for {title}**\n```\n");
        for point in series.points.iter().take(MAX_POINTS) {
            writeln!(reply, "{}  ${:>12.2}", point.date, point.price)?;
        }
        reply.push_str("```");
        write!(reply, "Confidence: {}", series.confidence_label())?;
        note_view_failure(&mut reply, view_failure.as_deref());

        ctx.say(reply).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
