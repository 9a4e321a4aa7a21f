//! Application-wide error types using thiserror.

use poise::serenity_prelude as serenity;
use tally_common::TallyError;
use tally_config::ConfigError;

/// Main application error type.
#[derive(thiserror::Error, Debug)]
pub enum BotError {
    /// Configuration could not be loaded or is invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Startup resources (logging, localisation) failed.
    #[error("Startup error: {0}")]
    Startup(#[from] TallyError),

    /// Discord/Serenity error.
    #[error("Discord error: {0}")]
    Discord(#[from] serenity::Error),
}

/// Result type for the bot application.
pub type BotResult<T> = Result<T, BotError>;
