//! Main entry point for Tally Bot.

use anyhow::Context;
use tally_bot::{logging_config, TallyBot};
use tally_common::logging::init_logging;
use tally_config::ConfigLoader;
use tally_i18n::Messages;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _log_guard = init_logging(&logging_config(|key| std::env::var(key).ok()))
        .context("failed to initialise logging")?;

    info!("Starting Tally Bot v{}", env!("CARGO_PKG_VERSION"));

    let settings = ConfigLoader::load().context("failed to load configuration")?;
    let messages = Messages::load().context("failed to load reply text")?;

    let bot = TallyBot::new(settings, messages);
    if let Err(e) = bot.start().await {
        error!("Bot stopped with an error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
