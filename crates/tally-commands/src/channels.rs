//! Admin-channel gate and target channel lookup.

use poise::serenity_prelude::{ChannelId, ChannelType, GuildChannel};
use std::collections::HashMap;
use tracing::{debug, warn};

use crate::reply::say_plain;
use crate::{Context, Error};

/// How the user named the channel to inspect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelRef {
    /// A `<#id>` mention.
    Mention(u64),
    /// A plain name, with any leading `#` removed.
    Name(String),
}

impl ChannelRef {
    /// Interprets a command argument.
    pub fn parse(arg: &str) -> Self {
        let arg = arg.trim();
        if let Some(id) = arg
            .strip_prefix("<#")
            .and_then(|rest| rest.strip_suffix('>'))
            .and_then(|digits| digits.parse::<u64>().ok())
            .filter(|id| *id != 0)
        {
            return Self::Mention(id);
        }
        Self::Name(arg.trim_start_matches('#').to_string())
    }
}

/// A channel the command will read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetChannel {
    /// Channel id.
    pub id: ChannelId,
    /// Channel name, used in replies and the chart title.
    pub name: String,
}

/// Finds the channel `reference` points to among `channels`.
///
/// Names match exactly. When several channels share a name the oldest wins.
/// Categories carry no messages and are never matched.
pub fn find_channel<'a, I>(channels: I, reference: &ChannelRef) -> Option<TargetChannel>
where
    I: IntoIterator<Item = (ChannelId, &'a str, ChannelType)>,
{
    channels
        .into_iter()
        .filter(|(_, _, kind)| *kind != ChannelType::Category)
        .filter(|(id, name, _)| match reference {
            ChannelRef::Mention(wanted) => id.get() == *wanted,
            ChannelRef::Name(wanted) => *name == wanted.as_str(),
        })
        .min_by_key(|(id, _, _)| *id)
        .map(|(id, name, _)| TargetChannel {
            id,
            name: name.to_string(),
        })
}

/// Whether `current` is the configured admin channel.
pub fn is_admin_channel(current: Option<&str>, admin_channel: &str) -> bool {
    current.is_some_and(|name| name == admin_channel)
}

fn listing(channels: &HashMap<ChannelId, GuildChannel>) -> impl Iterator<Item = (ChannelId, &str, ChannelType)> {
    channels.values().map(|c| (c.id, c.name.as_str(), c.kind))
}

/// Checks the invocation channel and resolves `argument` to a channel.
///
/// Replies with the matching notice and returns `None` when the command
/// must stop: outside a guild, outside the admin channel, or for an
/// unknown channel.
pub async fn resolve_target(ctx: Context<'_>, argument: &str) -> Result<Option<TargetChannel>, Error> {
    let data = ctx.data();

    let Some(guild_id) = ctx.guild_id() else {
        say_plain(ctx, &data.messages.guild_only()).await?;
        return Ok(None);
    };

    let channels = guild_id.channels(ctx.http()).await?;

    let current = channels.get(&ctx.channel_id()).map(|c| c.name.as_str());
    let admin_channel = data.settings.command_channel();
    if !is_admin_channel(current, admin_channel) {
        debug!(
            "Rejected '{}' outside #{} (channel {})",
            ctx.command().name,
            admin_channel,
            ctx.channel_id()
        );
        say_plain(ctx, &data.messages.wrong_channel(admin_channel)).await?;
        return Ok(None);
    }

    let reference = ChannelRef::parse(argument);
    match find_channel(listing(&channels), &reference) {
        Some(target) => Ok(Some(target)),
        None => {
            warn!("Channel '{}' not found in guild {}", argument, guild_id);
            let shown = match reference {
                ChannelRef::Name(name) => name,
                ChannelRef::Mention(_) => argument.trim().to_string(),
            };
            say_plain(ctx, &data.messages.channel_not_found(&shown)).await?;
            Ok(None)
        }
    }
}
