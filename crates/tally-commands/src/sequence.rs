//! Numbered-list auditing.
//!
//! Channels used as running lists expect every countable line to start with
//! the next integer, followed by a period or a space:
//!
//! ```text
//! 1. first entry
//! 2 second entry
//! ```
//!
//! [`SequenceValidator`] walks the history oldest first and records an
//! [`Issue`] for every repeated number, malformed prefix, or number that
//! does not follow its predecessor.

use chrono::{DateTime, Utc};
use futures::{pin_mut, Stream, TryStreamExt};
use std::collections::HashSet;
use std::fmt;
use tally_common::{split_lines, MessageRecord, SkipList};
use tracing::debug;

/// A list number of any length, held as canonical decimal digits.
///
/// Channels can run past `u64::MAX` when someone posts a long digit run, so
/// numbers are compared and incremented as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SequenceNumber(String);

impl SequenceNumber {
    /// The number every list starts at.
    pub fn one() -> Self {
        Self("1".to_string())
    }

    /// Reads a run of ASCII digits, dropping leading zeros.
    ///
    /// Returns `None` for an empty run or any non-digit character.
    pub fn from_digits(digits: &str) -> Option<Self> {
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let significant = digits.trim_start_matches('0');
        if significant.is_empty() {
            Some(Self("0".to_string()))
        } else {
            Some(Self(significant.to_string()))
        }
    }

    /// The number immediately after this one.
    pub fn successor(&self) -> Self {
        let nines = self.0.bytes().rev().take_while(|b| *b == b'9').count();
        let head = &self.0[..self.0.len() - nines];

        let mut next = String::with_capacity(self.0.len() + 1);
        match head.bytes().last() {
            Some(last) => {
                next.push_str(&head[..head.len() - 1]);
                next.push(char::from(last + 1));
            }
            None => next.push('1'),
        }
        next.extend(std::iter::repeat('0').take(nines));
        Self(next)
    }

    /// Canonical digits, without leading zeros.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<u64> for SequenceNumber {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for SequenceNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Why a line was flagged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IssueKind {
    /// The number was already used earlier in the channel.
    DuplicateNumber(SequenceNumber),
    /// The digits are not followed by `.` or a space, or do not form a
    /// canonical number. Carries the number as it should have been written.
    MissingOrMalformedPrefix(SequenceNumber),
    /// The number does not follow the previous one.
    OutOfOrder {
        /// Number the previous line implied.
        expected: SequenceNumber,
        /// Number actually written.
        found: SequenceNumber,
    },
}

/// A flagged line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    /// Author of the message containing the line.
    pub author: String,
    /// The line exactly as posted.
    pub line: String,
    /// Creation time of the message.
    pub timestamp: DateTime<Utc>,
    /// What is wrong with it.
    pub kind: IssueKind,
}

/// Incremental validator fed one message at a time, oldest first.
#[derive(Debug)]
pub struct SequenceValidator<'a> {
    skip_list: &'a SkipList,
    expected: SequenceNumber,
    seen: HashSet<SequenceNumber>,
    issues: Vec<Issue>,
}

impl<'a> SequenceValidator<'a> {
    /// Creates a validator expecting `1` first.
    pub fn new(skip_list: &'a SkipList) -> Self {
        Self {
            skip_list,
            expected: SequenceNumber::one(),
            seen: HashSet::new(),
            issues: Vec::new(),
        }
    }

    /// Checks every line of `record` and returns how many issues it raised.
    pub fn check_message(&mut self, record: &MessageRecord) -> usize {
        let before = self.issues.len();
        for line in split_lines(&record.content) {
            if self.skip_list.is_countable(line) {
                self.check_line(record, line);
            }
        }
        self.issues.len() - before
    }

    fn check_line(&mut self, record: &MessageRecord, line: &str) {
        let stripped = line.trim();
        let digits_len = stripped.bytes().take_while(u8::is_ascii_digit).count();
        let Some(number) = SequenceNumber::from_digits(&stripped[..digits_len]) else {
            return;
        };

        if !self.seen.insert(number.clone()) {
            self.flag(record, line, IssueKind::DuplicateNumber(number.clone()));
        }

        let well_formed = stripped
            .strip_prefix(number.as_str())
            .is_some_and(|rest| rest.starts_with('.') || rest.starts_with(' '));

        if !well_formed {
            self.flag(record, line, IssueKind::MissingOrMalformedPrefix(number.clone()));
        } else if number != self.expected {
            let kind = IssueKind::OutOfOrder {
                expected: self.expected.clone(),
                found: number.clone(),
            };
            self.flag(record, line, kind);
        }

        // Follow the observed number so one bad line is reported only once.
        self.expected = number.successor();
    }

    fn flag(&mut self, record: &MessageRecord, line: &str, kind: IssueKind) {
        debug!(author = %record.author, ?kind, "Sequence issue");
        self.issues.push(Issue {
            author: record.author.clone(),
            line: line.to_string(),
            timestamp: record.created_at,
            kind,
        });
    }

    /// Number the next valid line must carry.
    pub const fn expected_number(&self) -> &SequenceNumber {
        &self.expected
    }

    /// Issues found so far, in discovery order.
    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    /// Consumes the validator and returns its issues.
    pub fn finish(self) -> Vec<Issue> {
        self.issues
    }
}

/// Validates an in-memory, oldest-first history.
pub fn validate_records<'r, I>(records: I, skip_list: &SkipList) -> Vec<Issue>
where
    I: IntoIterator<Item = &'r MessageRecord>,
{
    let mut validator = SequenceValidator::new(skip_list);
    for record in records {
        validator.check_message(record);
    }
    validator.finish()
}

/// Validates a lazily fetched, oldest-first history.
pub async fn validate_stream<S, E>(records: S, skip_list: &SkipList) -> Result<Vec<Issue>, E>
where
    S: Stream<Item = Result<MessageRecord, E>>,
{
    pin_mut!(records);
    let mut validator = SequenceValidator::new(skip_list);
    while let Some(record) = records.try_next().await? {
        validator.check_message(&record);
    }
    Ok(validator.finish())
}
