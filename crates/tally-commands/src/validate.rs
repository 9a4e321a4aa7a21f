//! Validate command: audits a channel's numbered sequence.

use chrono_tz::Tz;
use std::time::Instant;
use tally_common::format_timestamp;
use tally_i18n::Messages;
use tracing::info;

use crate::channels::resolve_target;
use crate::history::channel_history;
use crate::reply::say_plain;
use crate::sequence::{validate_stream, Issue, IssueKind};
use crate::{Context, Error};

/// Human readable reason for an issue.
pub fn reason_text(messages: &Messages, kind: &IssueKind) -> String {
    match kind {
        IssueKind::DuplicateNumber(number) => messages.reason_duplicate(number.as_str()),
        IssueKind::MissingOrMalformedPrefix(number) => {
            messages.reason_malformed_prefix(number.as_str())
        }
        IssueKind::OutOfOrder { expected, found } => {
            messages.reason_out_of_order(expected.as_str(), found.as_str())
        }
    }
}

/// One report line for `issue`, with its date shown in `timezone`.
pub fn issue_text(messages: &Messages, issue: &Issue, timezone: Tz) -> String {
    messages.issue_line(
        &issue.author,
        &issue.line,
        &format_timestamp(issue.timestamp, timezone),
        &reason_text(messages, &issue.kind),
    )
}

/// Checks that a channel's lines are numbered 1, 2, 3, ... without gaps.
#[poise::command(prefix_command, slash_command)]
pub async fn validate(
    ctx: Context<'_>,
    #[description = "Channel to validate"] channel_name: String,
) -> Result<(), Error> {
    let Some(target) = resolve_target(ctx, &channel_name).await? else {
        return Ok(());
    };

    let started = Instant::now();
    ctx.defer_or_broadcast().await?;

    let data = ctx.data();
    let history = channel_history(ctx.serenity_context().http.clone(), target.id);
    let issues = validate_stream(history, &data.settings.skip_list).await?;

    info!(
        "Validated #{} in {:?}: {} issues",
        target.name,
        started.elapsed(),
        issues.len()
    );

    if issues.is_empty() {
        say_plain(ctx, &data.messages.validate_clean(&target.name)).await?;
        return Ok(());
    }

    say_plain(ctx, &data.messages.validate_header()).await?;
    for issue in &issues {
        say_plain(ctx, &issue_text(&data.messages, issue, data.settings.timezone)).await?;
    }
    Ok(())
}
