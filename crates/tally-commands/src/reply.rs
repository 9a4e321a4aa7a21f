//! Reply helpers shared by the commands.

use poise::serenity_prelude as serenity;
use poise::CreateReply;
use tally_common::truncate_string;

use crate::{Context, Error};

/// Longest message body Discord accepts.
pub const DISCORD_MESSAGE_LIMIT: usize = 2000;

/// Shortens `text` to fit in one Discord message.
pub fn fit_message(text: &str) -> String {
    truncate_string(text, DISCORD_MESSAGE_LIMIT)
}

/// A text reply that never pings anyone.
///
/// Issue reports quote user content verbatim, which may contain mentions.
pub fn text_reply(text: &str) -> CreateReply {
    CreateReply::default()
        .content(fit_message(text))
        .allowed_mentions(serenity::CreateAllowedMentions::new())
}

/// Sends `text` as a plain reply.
pub async fn say_plain(ctx: Context<'_>, text: &str) -> Result<(), Error> {
    ctx.send(text_reply(text)).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_untouched() {
        assert_eq!(fit_message("Channel #x not found."), "Channel #x not found.");
    }

    #[test]
    fn test_long_text_fits_limit() {
        let long = "é".repeat(DISCORD_MESSAGE_LIMIT + 50);
        let fitted = fit_message(&long);
        assert_eq!(fitted.chars().count(), DISCORD_MESSAGE_LIMIT);
        assert!(fitted.ends_with("..."));
    }

    #[test]
    fn test_reply_content_is_fitted() {
        let reply = text_reply(&"a".repeat(5000));
        assert_eq!(reply.content.map(|c| c.chars().count()), Some(DISCORD_MESSAGE_LIMIT));
    }
}
