//! Core bot logic using the Poise framework.

use crate::error::BotResult;
use poise::serenity_prelude as serenity;
use std::path::PathBuf;
use tally_commands::{create_framework, Data};
use tally_common::logging::LoggingConfig;
use tally_config::Settings;
use tally_i18n::Messages;
use tracing::{error, info};

/// Environment variable naming a log file instead of stdout.
pub const LOG_FILE_VAR: &str = "TALLY_LOG_FILE";

/// Environment variable selecting the log line format (`pretty` or `compact`).
pub const LOG_FORMAT_VAR: &str = "TALLY_LOG_FORMAT";

/// Logging setup taken from the environment.
pub fn logging_config<F>(lookup: F) -> LoggingConfig
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = LoggingConfig::default();
    if let Some(path) = lookup(LOG_FILE_VAR).filter(|p| !p.trim().is_empty()) {
        config.file_path = Some(PathBuf::from(path.trim()));
    }
    if let Some(format) = lookup(LOG_FORMAT_VAR) {
        config.compact = format.trim().eq_ignore_ascii_case("compact");
    }
    config
}

/// Gateway intents the commands need.
///
/// Reading other users' message text requires the privileged message
/// content intent.
pub fn intents() -> serenity::GatewayIntents {
    serenity::GatewayIntents::non_privileged() | serenity::GatewayIntents::MESSAGE_CONTENT
}

/// Main bot structure.
pub struct TallyBot {
    settings: Settings,
    messages: Messages,
}

impl TallyBot {
    /// Creates a new bot instance.
    pub const fn new(settings: Settings, messages: Messages) -> Self {
        Self { settings, messages }
    }

    /// Connects to Discord and serves commands until shutdown.
    pub async fn start(self) -> BotResult<()> {
        let token = self.settings.config.discord.token.clone();
        let prefix = self.settings.config.discord.command_prefix.clone();
        let data = Data::new(self.settings, self.messages);

        let framework = create_framework(&prefix)
            .setup(move |ctx, ready, framework| {
                Box::pin(async move {
                    info!("Bot connected as: {}", ready.user.name);
                    info!("Connected to {} guilds", ready.guilds.len());
                    poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                    info!("Slash commands registered globally");
                    Ok(data)
                })
            })
            .build();

        let mut client = serenity::ClientBuilder::new(&token, intents())
            .framework(framework)
            .await?;

        let shard_manager = client.shard_manager.clone();
        tokio::spawn(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!("Failed to listen for shutdown signal: {:?}", e);
                return;
            }
            info!("Received shutdown signal, starting graceful shutdown");
            shard_manager.shutdown_all().await;
        });

        info!("Listening for '{}' commands", prefix);
        client.start().await?;
        info!("Tally bot has shut down");
        Ok(())
    }
}

impl std::fmt::Debug for TallyBot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TallyBot")
            .field("settings", &self.settings)
            .field("messages", &self.messages)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_logging_defaults_to_stdout() {
        let config = logging_config(lookup(&[]));
        assert!(config.file_path.is_none());
        assert!(!config.compact);
    }

    #[test]
    fn test_logging_from_env() {
        let config = logging_config(lookup(&[
            (LOG_FILE_VAR, "logs/tally.log"),
            (LOG_FORMAT_VAR, "Compact"),
        ]));
        assert_eq!(config.file_path, Some(PathBuf::from("logs/tally.log")));
        assert!(config.compact);
    }

    #[test]
    fn test_blank_log_file_is_ignored() {
        let config = logging_config(lookup(&[(LOG_FILE_VAR, "  ")]));
        assert!(config.file_path.is_none());
    }

    #[test]
    fn test_intents_include_message_content() {
        let intents = intents();
        assert!(intents.contains(serenity::GatewayIntents::MESSAGE_CONTENT));
        assert!(intents.contains(serenity::GatewayIntents::GUILD_MESSAGES));
        assert!(intents.contains(serenity::GatewayIntents::GUILDS));
    }
}
