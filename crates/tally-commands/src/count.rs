//! Count command: daily activity chart plus rolling totals.

use chrono::Utc;
use poise::serenity_prelude as serenity;
use std::time::Instant;
use tally_common::timezone_abbreviation;
use tally_graphs::{tally_stream, ChartOptions, CountReport, DailyCountGraph, GraphRenderer, CHART_FILE_NAME};
use tally_i18n::{Messages, SummaryCounts};
use tracing::info;

use crate::channels::resolve_target;
use crate::history::channel_history;
use crate::reply::{fit_message, say_plain};
use crate::{Context, Error};

/// Rolling totals text for a finished tally.
pub fn summary_text(messages: &Messages, report: &CountReport) -> String {
    messages.count_summary(SummaryCounts {
        day: report.stats.last_24_hours,
        week: report.stats.last_week,
        month: report.stats.last_month,
        total: report.stats.total,
    })
}

/// Charts how many lines a channel gets per day.
#[poise::command(prefix_command, slash_command)]
pub async fn count(
    ctx: Context<'_>,
    #[description = "Channel to count"] channel_name: String,
) -> Result<(), Error> {
    let Some(target) = resolve_target(ctx, &channel_name).await? else {
        return Ok(());
    };

    let started = Instant::now();
    ctx.defer_or_broadcast().await?;

    let data = ctx.data();
    let settings = &data.settings;
    let now = Utc::now();

    let history = channel_history(ctx.serenity_context().http.clone(), target.id);
    let Some(report) = tally_stream(history, &settings.skip_list, settings.timezone, now).await? else {
        say_plain(ctx, &data.messages.no_messages(&target.name)).await?;
        return Ok(());
    };

    let zone = timezone_abbreviation(settings.timezone, now);
    let options = ChartOptions::for_channel(&target.name, &zone, &settings.config.chart);
    let summary = summary_text(&data.messages, &report);
    let total = report.stats.total;
    let png = DailyCountGraph::new().render(report.histogram, options).await?;

    ctx.send(
        poise::CreateReply::default()
            .content(fit_message(&summary))
            .attachment(serenity::CreateAttachment::bytes(png, CHART_FILE_NAME))
            .allowed_mentions(serenity::CreateAllowedMentions::new()),
    )
    .await?;

    info!(
        "Counted {} lines in #{} in {:?}",
        total,
        target.name,
        started.elapsed()
    );
    Ok(())
}
