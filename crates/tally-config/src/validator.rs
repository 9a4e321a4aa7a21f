//! Runtime validation of a loaded configuration.

use chrono_tz::Tz;

use crate::{Config, ConfigError};

/// Largest chart edge accepted, in pixels.
pub const MAX_CHART_EDGE: u32 = 4096;

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validates a configuration.
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        if config.discord.token.trim().is_empty() {
            return Err(ConfigError::Missing("DISCORD_TOKEN".to_string()));
        }

        if config.discord.command_channel.trim().is_empty() {
            return Err(ConfigError::Missing("COMMAND_CHANNEL".to_string()));
        }

        if config.discord.command_prefix.is_empty() {
            return Err(invalid("discord.command_prefix", "must not be empty"));
        }

        Self::parse_timezone(&config.counting.timezone)?;

        for (field, value) in [("chart.width", config.chart.width), ("chart.height", config.chart.height)] {
            if value == 0 || value > MAX_CHART_EDGE {
                return Err(invalid(
                    field,
                    format!("{value} is outside 1..={MAX_CHART_EDGE}"),
                ));
            }
        }

        if parse_hex_color(&config.chart.line_color).is_none() {
            return Err(invalid(
                "chart.line_color",
                format!("'{}' is not a #rrggbb color", config.chart.line_color),
            ));
        }

        Ok(())
    }

    /// Parses an IANA timezone name.
    pub fn parse_timezone(name: &str) -> Result<Tz, ConfigError> {
        name.trim()
            .parse::<Tz>()
            .map_err(|e| invalid("counting.timezone", e.to_string()))
    }
}

/// Parses a `#rrggbb` color into its components.
pub fn parse_hex_color(color: &str) -> Option<(u8, u8, u8)> {
    let hex = color.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    Some((
        u8::from_str_radix(&hex[0..2], 16).ok()?,
        u8::from_str_radix(&hex[2..4], 16).ok()?,
        u8::from_str_radix(&hex[4..6], 16).ok()?,
    ))
}

fn invalid(field: &str, message: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field: field.to_string(),
        message: message.into(),
    }
}
