//! Fluent bundle loading from embedded resources.

use fluent_bundle::concurrent::FluentBundle;
use fluent_bundle::FluentResource;
use tally_common::{Result, TallyError};
use tracing::debug;
use unic_langid::LanguageIdentifier;

/// Locale every reply is rendered in.
pub const DEFAULT_LOCALE: &str = "en-US";

/// Embedded en-US resource.
const EN_US: &str = include_str!("../locales/en-US/tally.ftl");

/// Message ids the commands rely on.
pub const REQUIRED_MESSAGES: &[&str] = &[
    "wrong-channel",
    "channel-not-found",
    "guild-only",
    "no-messages",
    "count-summary",
    "validate-clean",
    "validate-header",
    "issue-line",
    "reason-duplicate",
    "reason-malformed-prefix",
    "reason-out-of-order",
];

/// Thread-safe bundle type shared across command invocations.
pub type Bundle = FluentBundle<FluentResource>;

/// Fluent bundle loader.
pub struct FluentLoader;

impl FluentLoader {
    /// Loads the bundle for `language` and checks every required message exists.
    pub fn load_bundle(language: &str) -> Result<Bundle> {
        let source = Self::resource_for(language).ok_or_else(|| {
            TallyError::localization("no resource for locale", Some(language.to_string()))
        })?;
        Self::bundle_from_source(language, source)
    }

    /// Builds a bundle from raw FTL text.
    pub fn bundle_from_source(language: &str, source: &str) -> Result<Bundle> {
        let langid: LanguageIdentifier = language.parse().map_err(|e| {
            TallyError::localization(format!("invalid language tag: {e}"), Some(language.to_string()))
        })?;

        let resource = FluentResource::try_new(source.to_string()).map_err(|(_, errors)| {
            TallyError::localization(
                format!("failed to parse resource: {errors:?}"),
                Some(language.to_string()),
            )
        })?;

        let mut bundle = FluentBundle::new_concurrent(vec![langid]);
        // Unicode isolation marks would show up verbatim in Discord.
        bundle.set_use_isolating(false);
        bundle.add_resource(resource).map_err(|errors| {
            TallyError::localization(
                format!("failed to add resource: {errors:?}"),
                Some(language.to_string()),
            )
        })?;

        if let Some(missing) = REQUIRED_MESSAGES.iter().find(|id| !bundle.has_message(id)) {
            return Err(TallyError::localization(
                format!("missing message '{missing}'"),
                Some(language.to_string()),
            ));
        }

        debug!("Loaded Fluent bundle for {}", language);
        Ok(bundle)
    }

    fn resource_for(language: &str) -> Option<&'static str> {
        match language {
            "en" | "en-US" => Some(EN_US),
            _ => None,
        }
    }
}
