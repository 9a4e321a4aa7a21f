//! Default values for every configuration section.

use crate::schema::*;

/// Timezone used when none is configured (US Eastern, DST aware).
pub const DEFAULT_TIMEZONE: &str = "America/New_York";

/// Prefix for text commands when none is configured.
pub const DEFAULT_COMMAND_PREFIX: &str = "!";

impl Default for DiscordConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            command_channel: String::new(),
            command_prefix: DEFAULT_COMMAND_PREFIX.to_string(),
        }
    }
}

impl Default for CountingConfig {
    fn default() -> Self {
        Self {
            skip_lines_file: None,
            timezone: DEFAULT_TIMEZONE.to_string(),
        }
    }
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 600,
            line_color: "#ff0000".to_string(),
        }
    }
}
