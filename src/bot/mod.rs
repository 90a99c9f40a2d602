//! Bot layer - Discord-specific interface and command handlers
//!
//! This module provides the Discord interface for the HomeBuddy application,
//! including all slash commands, autocomplete handlers, and bot context management.
//! Components are built fresh for every command from the shared [`Services`], so no
//! state outlives a single interaction.

/// Discord command implementations (mortgage, homes, favorites, tasks, forecast, chat, general)
pub mod commands;
/// Discord interaction handlers (autocomplete, etc.)
pub mod handlers;

use crate::{
    auth::{AuthContext, User},
    config::{Settings, users},
    errors::{Error, Result},
    services::Services,
};
use poise::serenity_prelude as serenity;
use tracing::{error, info, instrument};

/// Shared data available to all bot commands.
/// Holds the wired collaborators and the loaded settings.
pub struct BotData {
    /// Collaborators every component is constructed from
    pub services: Services,
    /// Application settings (forecast defaults, storage mode)
    pub settings: Settings,
}

impl BotData {
    #[must_use]
    pub const fn new(services: Services, settings: Settings) -> Self {
        Self { services, settings }
    }
}

/// Builds the identity of the user who invoked a command.
///
/// The Discord account is the login; a configured nickname replaces the
/// Discord username for display.
#[must_use]
pub fn auth_for(author: &serenity::User) -> AuthContext {
    let id = author.id.to_string();
    let name = users::display_name(&id, &author.name);
    AuthContext::logged_in(User { id, name })
}

async fn on_error(error: poise::FrameworkError<'_, BotData, Error>) {
    match error {
        poise::FrameworkError::Setup { error, .. } => {
            error!("Failed to start bot: {error:?}");
        }
        poise::FrameworkError::Command { error, ctx, .. } => {
            error!("Error in command `{}`: {error:?}", ctx.command().name);
            if let Err(e) = ctx.say(format!("❌ {}", error.user_message())).await {
                error!("Failed to send error message: {e}");
            }
        }
        error => {
            if let Err(e) = poise::builtins::on_error(error).await {
                error!("Error while handling error: {e}");
            }
        }
    }
}

/// Connects to Discord and serves slash commands until the client stops.
#[instrument(skip(token, data))]
pub async fn run_bot(token: String, data: BotData) -> Result<()> {
    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: vec![
                commands::ping(),
                commands::help(),
                commands::mortgage(),
                commands::schedule(),
                commands::search(),
                commands::view(),
                commands::favorites(),
                commands::favorite(),
                commands::tasks(),
                commands::generate_tasks(),
                commands::complete_task(),
                commands::forecast(),
                commands::ask(),
            ],
            on_error: |error| Box::pin(on_error(error)),
            ..Default::default()
        })
        .setup(|ctx, ready, framework| {
            Box::pin(async move {
                info!("Logged in as {}", ready.user.name);
                info!("Registering commands globally...");
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                Ok(data)
            })
        })
        .build();

    let intents = serenity::GatewayIntents::non_privileged();

    info!("Setting up Serenity client for Poise framework...");
    let mut client = serenity::Client::builder(&token, intents)
        .framework(framework)
        .await
        .inspect_err(|e| error!("Error creating client: {e:?}"))?;

    info!("Starting bot client...");
    client
        .start()
        .await
        .inspect_err(|e| error!("Client error: {e:?}"))?;
    Ok(())
}

pub use commands::*;
pub use handlers::*;
