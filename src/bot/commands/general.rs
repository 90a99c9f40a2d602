//! General Discord commands - ping, help, and other utility commands.
//! These commands never touch a backend service.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::BotData,
        errors::{Error, Result},
    };

    /// Responds with "Pong!" to test bot connectivity.
    ///
    /// This is a simple health check command that doesn't contact any backend service.
    #[poise::command(slash_command, prefix_command)]
    pub async fn ping(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        ctx.say("Pong!").await?;
        Ok(())
    }

    /// Displays help information about available commands.
    ///
    /// Lists every command with its arguments.
    #[poise::command(slash_command, prefix_command)]
    pub async fn help(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let help_text = "**HomeBuddy Help**\n\
        Here is a summary of all available commands for HomeBuddy.\n\n\
        **Mortgage**\n\
        • `/mortgage <principal> <rate> <years>` - Monthly payment and loan totals.\n\
        • `/schedule <principal> <rate> <years>` - Year-by-year amortization.\n\n\
        **Homes**\n\
        • `/search <query>` - Finds homes by city, title or listing id.\n\
        • `/view <query> <pick>` - Shows one search result and logs the view.\n\
        • `/forecast <query> <pick>` - Price forecast for a search result.\n\
        • `/favorite <query> <pick>` - Adds or removes a search result from your favorites.\n\
        • `/favorites` - Lists your favorite homes.\n\n\
        **Checklist**\n\
        • `/generate_tasks <credit_score> [refinancing] [house_title] [house_price]` - Builds a new task list.\n\
        • `/tasks` - Shows your current tasks.\n\
        • `/complete_task <task>` - Marks a task as done and removes it.\n\n\
        **Assistant**\n\
        • `/ask <question>` - Asks the home-buying assistant.\n\n\
        **Utility Commands**\n\
        • `/ping` - Checks if the bot is responsive.\n\
        • `/help` - Shows this help message.";

        ctx.say(help_text).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
