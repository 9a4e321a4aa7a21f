//! Typed accessors for reply text.

use fluent_bundle::{FluentArgs, FluentValue};
use tally_common::Result;
use tracing::warn;

use crate::{Bundle, FluentLoader, DEFAULT_LOCALE};

/// Rolling totals shown under the activity chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummaryCounts {
    /// Lines in the last 24 hours.
    pub day: usize,
    /// Lines in the last week.
    pub week: usize,
    /// Lines in the last 30 days.
    pub month: usize,
    /// All counted lines.
    pub total: usize,
}

/// Message accessor for type-safe translations.
pub struct Messages {
    bundle: Bundle,
}

impl std::fmt::Debug for Messages {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Messages").field("bundle", &"<FluentBundle>").finish()
    }
}

impl Messages {
    /// Loads the default locale.
    pub fn load() -> Result<Self> {
        Self::for_locale(DEFAULT_LOCALE)
    }

    /// Loads a specific locale.
    pub fn for_locale(language: &str) -> Result<Self> {
        Ok(Self {
            bundle: FluentLoader::load_bundle(language)?,
        })
    }

    /// Gets a localized message with arguments.
    ///
    /// Unknown ids and formatting errors are logged and fall back to the id.
    pub fn get_with_args(&self, key: &str, args: &[(&str, String)]) -> String {
        let Some(pattern) = self.bundle.get_message(key).and_then(|m| m.value()) else {
            warn!("No Fluent message '{}'", key);
            return key.to_string();
        };

        let mut fluent_args = FluentArgs::new();
        for (name, value) in args {
            fluent_args.set(*name, FluentValue::from(value.as_str()));
        }

        let mut errors = Vec::new();
        let text = self
            .bundle
            .format_pattern(pattern, Some(&fluent_args), &mut errors)
            .into_owned();
        if !errors.is_empty() {
            warn!("Formatting '{}' failed: {:?}", key, errors);
        }
        text
    }

    /// Gets a localized message without arguments.
    pub fn get(&self, key: &str) -> String {
        self.get_with_args(key, &[])
    }

    /// Reply for a command used outside the admin channel.
    pub fn wrong_channel(&self, admin_channel: &str) -> String {
        self.get_with_args("wrong-channel", &[("channel", admin_channel.to_string())])
    }

    /// Reply for an unknown channel name.
    pub fn channel_not_found(&self, channel: &str) -> String {
        self.get_with_args("channel-not-found", &[("channel", channel.to_string())])
    }

    /// Reply for a command used outside a guild.
    pub fn guild_only(&self) -> String {
        self.get("guild-only")
    }

    /// Reply for a channel without countable lines.
    pub fn no_messages(&self, channel: &str) -> String {
        self.get_with_args("no-messages", &[("channel", channel.to_string())])
    }

    /// Rolling totals text sent with the chart.
    pub fn count_summary(&self, counts: SummaryCounts) -> String {
        self.get_with_args(
            "count-summary",
            &[
                ("day", counts.day.to_string()),
                ("week", counts.week.to_string()),
                ("month", counts.month.to_string()),
                ("total", counts.total.to_string()),
            ],
        )
    }

    /// Reply for a clean validation.
    pub fn validate_clean(&self, channel: &str) -> String {
        self.get_with_args("validate-clean", &[("channel", channel.to_string())])
    }

    /// Header sent before the list of issues.
    pub fn validate_header(&self) -> String {
        self.get("validate-header")
    }

    /// One reported issue.
    pub fn issue_line(&self, author: &str, line: &str, date: &str, reason: &str) -> String {
        self.get_with_args(
            "issue-line",
            &[
                ("author", author.to_string()),
                ("line", line.to_string()),
                ("date", date.to_string()),
                ("reason", reason.to_string()),
            ],
        )
    }

    /// Reason text for a repeated number, given as decimal digits.
    pub fn reason_duplicate(&self, number: &str) -> String {
        self.get_with_args("reason-duplicate", &[("number", number.to_string())])
    }

    /// Reason text for a line missing the `N.` / `N ` prefix.
    pub fn reason_malformed_prefix(&self, number: &str) -> String {
        self.get_with_args("reason-malformed-prefix", &[("number", number.to_string())])
    }

    /// Reason text for a number that breaks the sequence.
    pub fn reason_out_of_order(&self, expected: &str, found: &str) -> String {
        self.get_with_args(
            "reason-out-of-order",
            &[("expected", expected.to_string()), ("found", found.to_string())],
        )
    }
}
