//! Poise framework setup and command registration logic.

use std::sync::Arc;
use tally_config::Settings;
use tally_i18n::Messages;
use tracing::{error, info};

/// Application data accessible in all commands.
pub struct Data {
    /// Resolved settings, shared read-only.
    pub settings: Arc<Settings>,
    /// Reply text.
    pub messages: Arc<Messages>,
}

impl Data {
    /// Wraps settings and messages for sharing across invocations.
    pub fn new(settings: Settings, messages: Messages) -> Self {
        Self {
            settings: Arc::new(settings),
            messages: Arc::new(messages),
        }
    }
}

impl std::fmt::Debug for Data {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Data")
            .field("settings", &self.settings)
            .field("messages", &"<Messages>")
            .finish()
    }
}

/// Application error type for commands.
pub type Error = Box<dyn std::error::Error + Send + Sync>;

/// Command context type.
pub type Context<'a> = poise::Context<'a, Data, Error>;

/// Every command the bot registers.
pub fn commands() -> Vec<poise::Command<Data, Error>> {
    vec![crate::count::count(), crate::validate::validate()]
}

/// Framework options with the given prefix for text commands.
pub fn framework_options(prefix: &str) -> poise::FrameworkOptions<Data, Error> {
    poise::FrameworkOptions {
        commands: commands(),
        on_error: |error| Box::pin(on_error(error)),
        pre_command: |ctx| {
            Box::pin(async move {
                info!(
                    "Command '{}' invoked by {} in channel {}",
                    ctx.command().qualified_name,
                    ctx.author().tag(),
                    ctx.channel_id()
                );
            })
        },
        prefix_options: poise::PrefixFrameworkOptions {
            prefix: Some(prefix.to_string()),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Creates a new Poise framework.
pub fn create_framework(prefix: &str) -> poise::FrameworkBuilder<Data, Error> {
    poise::Framework::builder().options(framework_options(prefix))
}

/// Global error handler for the framework
async fn on_error(error: poise::FrameworkError<'_, Data, Error>) {
    match error {
        poise::FrameworkError::Setup { error, .. } => {
            error!("Failed to start bot: {:?}", error);
        }
        poise::FrameworkError::Command { error, ctx, .. } => {
            error!("Error in command '{}': {:?}", ctx.command().name, error);
        }
        other => {
            if let Err(e) = poise::builtins::on_error(other).await {
                error!("Error while handling error: {}", e);
            }
        }
    }
}
