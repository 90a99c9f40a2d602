//! Assistant command - `ask`.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::BotData,
        core::ChatSession,
        errors::{Error, Result},
    };
    use std::sync::Arc;
    use tracing::warn;

    /// Asks the home-buying assistant a question.
    ///
    /// An unreachable assistant is answered with an apology instead of a
    /// command error, matching the conversation's own failure line.
    #[poise::command(slash_command, prefix_command)]
    pub async fn ask(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Your question"]
        #[rest]
        question: String,
    ) -> Result<()> {
        ctx.defer().await?;
        let mut session = ChatSession::new(Arc::clone(&ctx.data().services.chat));

        let reply = match session.send(&question).await {
            Ok(reply) => reply.to_string(),
            Err(e @ Error::InvalidInput { .. }) => return Err(e),
            Err(e) => {
                warn!("Assistant unavailable: {e}");
                session
                    .transcript()
                    .last()
                    .map(|m| m.text.clone())
                    .unwrap_or_default()
            }
        };

        ctx.say(format!("🤖 {reply}")).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
