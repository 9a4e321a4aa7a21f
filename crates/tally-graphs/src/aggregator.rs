//! Line tallying over channel history.
//!
//! Every countable line of a message contributes one copy of the message's
//! timestamp. Once the history is exhausted the timestamps are sorted and
//! folded into a dense per-day histogram and rolling-window totals.
//!
//! Only the counted timestamps are buffered, never the message bodies; the
//! sort needs the complete list, so memory grows with the number of counted
//! lines in the channel.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use chrono_tz::Tz;
use futures::{pin_mut, Stream, TryStreamExt};
use std::collections::BTreeMap;
use tally_common::{MessageRecord, SkipList};
use tracing::debug;

/// Number of counted lines on one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyCount {
    /// Calendar date in the target timezone.
    pub date: NaiveDate,
    /// Counted lines on that date.
    pub count: u64,
}

/// Dense, date-ascending series of daily counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyHistogram {
    days: Vec<DailyCount>,
}

impl DailyHistogram {
    /// Builds a histogram from ascending timestamps, extended through `today`.
    ///
    /// Returns `None` when there are no timestamps.
    pub fn from_sorted(timestamps: &[DateTime<Tz>], today: NaiveDate) -> Option<Self> {
        let first = timestamps.first()?.date_naive();
        let last = timestamps.last()?.date_naive();
        let end = last.max(today);

        let mut per_day: BTreeMap<NaiveDate, u64> = BTreeMap::new();
        for timestamp in timestamps {
            *per_day.entry(timestamp.date_naive()).or_insert(0) += 1;
        }

        let days = first
            .iter_days()
            .take_while(|date| *date <= end)
            .map(|date| DailyCount {
                date,
                count: per_day.get(&date).copied().unwrap_or(0),
            })
            .collect();

        Some(Self { days })
    }

    /// All days, oldest first.
    pub fn days(&self) -> &[DailyCount] {
        &self.days
    }

    /// First date in the series.
    pub fn first_date(&self) -> NaiveDate {
        self.days[0].date
    }

    /// Last date in the series.
    pub fn last_date(&self) -> NaiveDate {
        self.days[self.days.len() - 1].date
    }

    /// Number of days covered.
    pub fn len(&self) -> usize {
        self.days.len()
    }

    /// Always false; an empty history never produces a histogram.
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Sum of all daily counts.
    pub fn total(&self) -> u64 {
        self.days.iter().map(|d| d.count).sum()
    }

    /// Largest daily count.
    pub fn max_count(&self) -> u64 {
        self.days.iter().map(|d| d.count).max().unwrap_or(0)
    }
}

/// Counted lines inside trailing windows ending at "now".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RollingStats {
    /// Lines newer than 24 hours.
    pub last_24_hours: usize,
    /// Lines newer than 7 days.
    pub last_week: usize,
    /// Lines newer than 30 days.
    pub last_month: usize,
    /// All counted lines.
    pub total: usize,
}

impl RollingStats {
    /// Computes window totals over ascending timestamps.
    ///
    /// A timestamp falls inside a window when it is strictly after
    /// `now - window`.
    pub fn compute(timestamps: &[DateTime<Tz>], now: DateTime<Utc>) -> Self {
        let newer_than = |window: Duration| {
            let cutoff = now - window;
            timestamps.len() - timestamps.partition_point(|t| *t <= cutoff)
        };

        Self {
            last_24_hours: newer_than(Duration::hours(24)),
            last_week: newer_than(Duration::days(7)),
            last_month: newer_than(Duration::days(30)),
            total: timestamps.len(),
        }
    }
}

/// Result of a successful tally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountReport {
    /// Dense per-day counts.
    pub histogram: DailyHistogram,
    /// Rolling-window totals.
    pub stats: RollingStats,
}

/// Incremental line counter fed one message at a time.
#[derive(Debug)]
pub struct LineTally<'a> {
    skip_list: &'a SkipList,
    timezone: Tz,
    timestamps: Vec<DateTime<Tz>>,
    messages: usize,
}

impl<'a> LineTally<'a> {
    /// Creates an empty tally.
    pub const fn new(skip_list: &'a SkipList, timezone: Tz) -> Self {
        Self {
            skip_list,
            timezone,
            timestamps: Vec::new(),
            messages: 0,
        }
    }

    /// Counts the countable lines of `record` and returns how many there were.
    pub fn record(&mut self, record: &MessageRecord) -> usize {
        self.messages += 1;
        let lines = self.skip_list.countable_lines(&record.content).count();
        let local = record.created_at.with_timezone(&self.timezone);
        self.timestamps.extend(std::iter::repeat(local).take(lines));
        lines
    }

    /// Messages seen so far.
    pub const fn messages(&self) -> usize {
        self.messages
    }

    /// Lines counted so far.
    pub fn counted(&self) -> usize {
        self.timestamps.len()
    }

    /// Sorts the collected timestamps and builds the report.
    ///
    /// Returns `None` when nothing was counted.
    pub fn finish(mut self, now: DateTime<Utc>) -> Option<CountReport> {
        self.timestamps.sort_unstable();
        let today = now.with_timezone(&self.timezone).date_naive();
        let histogram = DailyHistogram::from_sorted(&self.timestamps, today)?;
        let stats = RollingStats::compute(&self.timestamps, now);

        debug!(
            messages = self.messages,
            lines = stats.total,
            days = histogram.len(),
            "Tally finished"
        );

        Some(CountReport { histogram, stats })
    }
}

/// Tallies an in-memory history.
pub fn tally<'r, I>(
    records: I,
    skip_list: &SkipList,
    timezone: Tz,
    now: DateTime<Utc>,
) -> Option<CountReport>
where
    I: IntoIterator<Item = &'r MessageRecord>,
{
    let mut tally = LineTally::new(skip_list, timezone);
    for record in records {
        tally.record(record);
    }
    tally.finish(now)
}

/// Tallies a lazily fetched history, stopping at the first fetch error.
pub async fn tally_stream<S, E>(
    records: S,
    skip_list: &SkipList,
    timezone: Tz,
    now: DateTime<Utc>,
) -> Result<Option<CountReport>, E>
where
    S: Stream<Item = Result<MessageRecord, E>>,
{
    pin_mut!(records);
    let mut tally = LineTally::new(skip_list, timezone);
    while let Some(record) = records.try_next().await? {
        tally.record(&record);
    }
    Ok(tally.finish(now))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::America::New_York;
    use proptest::prelude::*;
    use tally_common::test_utils::{message_fixtures::message, mock_timestamp};

    #[test]
    fn test_empty_history_is_none() {
        let skip = SkipList::default();
        let now = mock_timestamp(2024, 1, 10, 12, 0, 0);
        assert!(tally(&Vec::<MessageRecord>::new(), &skip, New_York, now).is_none());
    }

    #[test]
    fn test_only_skipped_lines_is_none() {
        let skip = SkipList::new(["reminder"]);
        let now = mock_timestamp(2024, 1, 10, 12, 0, 0);
        let history = vec![message("bot", now, "Reminder one\nREMINDER two")];
        assert!(tally(&history, &skip, New_York, now).is_none());
    }

    #[test]
    fn test_each_line_contributes_one_timestamp() {
        let skip = SkipList::new(["ignore"]);
        let now = mock_timestamp(2024, 1, 10, 12, 0, 0);
        let history = vec![
            message("a", now - Duration::hours(1), "one\ntwo\nignore me\nthree"),
            message("b", now - Duration::hours(2), "four"),
        ];
        let report = tally(&history, &skip, New_York, now).unwrap();
        assert_eq!(report.stats.total, 4);
        assert_eq!(report.histogram.total(), 4);
    }

    #[test]
    fn test_histogram_dense_and_extends_to_today() {
        let skip = SkipList::default();
        // 2024-01-01 15:00 UTC is 10:00 EST, 2024-01-04 12:00 UTC is 07:00 EST.
        let history = vec![
            message("a", mock_timestamp(2024, 1, 4, 12, 0, 0), "x"),
            message("a", mock_timestamp(2024, 1, 1, 15, 0, 0), "y\nz"),
        ];
        let now = mock_timestamp(2024, 1, 7, 18, 0, 0);
        let report = tally(&history, &skip, New_York, now).unwrap();
        let days = report.histogram.days();

        assert_eq!(report.histogram.first_date(), NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(report.histogram.last_date(), NaiveDate::from_ymd_opt(2024, 1, 7).unwrap());
        assert_eq!(days.len(), 7);
        let counts: Vec<u64> = days.iter().map(|d| d.count).collect();
        assert_eq!(counts, vec![2, 0, 0, 1, 0, 0, 0]);
    }

    #[test]
    fn test_dates_use_target_timezone() {
        let skip = SkipList::default();
        // 03:00 UTC on Jan 2 is still Jan 1 in New York.
        let history = vec![message("a", mock_timestamp(2024, 1, 2, 3, 0, 0), "late night")];
        let now = mock_timestamp(2024, 1, 2, 4, 0, 0);
        let report = tally(&history, &skip, New_York, now).unwrap();
        assert_eq!(report.histogram.first_date(), NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(report.histogram.len(), 1);
    }

    #[test]
    fn test_future_messages_end_histogram_after_today() {
        let skip = SkipList::default();
        let now = mock_timestamp(2024, 1, 1, 17, 0, 0);
        let history = vec![message("a", mock_timestamp(2024, 1, 3, 17, 0, 0), "x")];
        let report = tally(&history, &skip, New_York, now).unwrap();
        assert_eq!(report.histogram.len(), 1);
        assert_eq!(report.histogram.last_date(), NaiveDate::from_ymd_opt(2024, 1, 3).unwrap());
    }

    #[test]
    fn test_rolling_windows_are_strict() {
        let skip = SkipList::default();
        let now = mock_timestamp(2024, 2, 1, 12, 0, 0);
        let history = vec![
            message("a", now - Duration::hours(24), "exactly a day old"),
            message("a", now - Duration::hours(23), "inside a day"),
            message("a", now - Duration::days(6), "inside a week"),
            message("a", now - Duration::days(7), "exactly a week old"),
            message("a", now - Duration::days(29), "inside a month"),
            message("a", now - Duration::days(30), "exactly a month old"),
            message("a", now - Duration::days(90), "ancient"),
        ];
        let stats = tally(&history, &skip, New_York, now).unwrap().stats;
        assert_eq!(
            stats,
            RollingStats {
                last_24_hours: 1,
                last_week: 3,
                last_month: 5,
                total: 7,
            }
        );
    }

    #[test]
    fn test_line_tally_counters() {
        let skip = SkipList::default();
        let mut tally = LineTally::new(&skip, New_York);
        let now = mock_timestamp(2024, 1, 1, 0, 0, 0);
        assert_eq!(tally.record(&message("a", now, "1\n2\n3")), 3);
        assert_eq!(tally.record(&message("a", now, "")), 0);
        assert_eq!(tally.messages(), 2);
        assert_eq!(tally.counted(), 3);
    }

    #[tokio::test]
    async fn test_tally_stream_matches_tally() {
        let skip = SkipList::new(["skip"]);
        let now = mock_timestamp(2024, 5, 5, 5, 0, 0);
        let history = vec![
            message("a", now - Duration::days(3), "one\nskip this"),
            message("b", now - Duration::hours(3), "two\nthree"),
        ];
        let stream = futures::stream::iter(history.clone().into_iter().map(Ok::<_, ()>));
        let streamed = tally_stream(stream, &skip, New_York, now).await.unwrap();
        assert_eq!(streamed, tally(&history, &skip, New_York, now));
    }

    #[tokio::test]
    async fn test_tally_stream_propagates_error() {
        let skip = SkipList::default();
        let now = mock_timestamp(2024, 5, 5, 5, 0, 0);
        let items = vec![Ok(message("a", now, "fine")), Err("http 500")];
        let result = tally_stream(futures::stream::iter(items), &skip, New_York, now).await;
        assert_eq!(result, Err("http 500"));
    }

    proptest! {
        #[test]
        fn prop_histogram_dense_and_sums(
            offsets in proptest::collection::vec((0i64..60 * 24 * 90, 1usize..4), 1..40),
        ) {
            let skip = SkipList::default();
            let now = mock_timestamp(2024, 6, 1, 0, 0, 0);
            let history: Vec<MessageRecord> = offsets
                .iter()
                .map(|(minutes, lines)| {
                    let body = vec!["line"; *lines].join("\n");
                    message("a", now - Duration::minutes(*minutes), &body)
                })
                .collect();

            let report = tally(&history, &skip, New_York, now).unwrap();
            let days = report.histogram.days();
            for pair in days.windows(2) {
                prop_assert_eq!(pair[0].date.succ_opt(), Some(pair[1].date));
            }
            let expected: usize = offsets.iter().map(|(_, lines)| lines).sum();
            prop_assert_eq!(report.histogram.total() as usize, expected);
            prop_assert_eq!(report.stats.total, expected);
            prop_assert!(report.stats.last_24_hours <= report.stats.last_week);
            prop_assert!(report.stats.last_week <= report.stats.last_month);
            prop_assert!(report.stats.last_month <= report.stats.total);
        }

        #[test]
        fn prop_tally_is_deterministic_and_order_independent(
            offsets in proptest::collection::vec(0i64..10_000, 1..20),
        ) {
            let skip = SkipList::default();
            let now = mock_timestamp(2024, 6, 1, 0, 0, 0);
            let history: Vec<MessageRecord> = offsets
                .iter()
                .map(|m| message("a", now - Duration::minutes(*m), "x"))
                .collect();
            let mut reversed = history.clone();
            reversed.reverse();

            let first = tally(&history, &skip, New_York, now);
            prop_assert_eq!(&first, &tally(&history, &skip, New_York, now));
            prop_assert_eq!(&first, &tally(&reversed, &skip, New_York, now));
        }
    }
}
