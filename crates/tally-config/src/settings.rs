//! Fully resolved, immutable runtime settings.

use chrono_tz::Tz;
use tally_common::SkipList;
use tracing::info;

use crate::{Config, ConfigError, ConfigValidator};

/// Configuration plus everything derived from it at startup.
///
/// Built once and shared read-only by every command invocation.
#[derive(Debug, Clone)]
pub struct Settings {
    /// The validated configuration.
    pub config: Config,
    /// Boilerplate lines excluded from counting and validation.
    pub skip_list: SkipList,
    /// Timezone used for dates, rolling windows and displayed timestamps.
    pub timezone: Tz,
}

impl Settings {
    /// Validates `config`, parses its timezone and loads its skip-lines file.
    pub fn resolve(config: Config) -> Result<Self, ConfigError> {
        config.validate()?;
        let timezone = ConfigValidator::parse_timezone(&config.counting.timezone)?;
        let skip_list = match &config.counting.skip_lines_file {
            Some(path) => SkipList::load(path)?,
            None => SkipList::default(),
        };

        info!(
            "Settings resolved: admin channel #{}, timezone {}, {} skip entries",
            config.discord.command_channel,
            timezone.name(),
            skip_list.len()
        );

        Ok(Self::new(config, skip_list, timezone))
    }

    /// Assembles settings from already resolved parts.
    pub const fn new(config: Config, skip_list: SkipList, timezone: Tz) -> Self {
        Self {
            config,
            skip_list,
            timezone,
        }
    }

    /// Name of the admin channel, without a leading `#`.
    pub fn command_channel(&self) -> &str {
        &self.config.discord.command_channel
    }
}
