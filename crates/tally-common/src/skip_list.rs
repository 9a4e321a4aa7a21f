//! Boilerplate line filtering.
//!
//! A [`SkipList`] holds case-insensitive substrings. Any line containing one
//! of them is excluded from both counting and sequence validation.

use std::path::Path;
use tracing::{debug, warn};

use crate::Result;

/// Ordered set of case-insensitive substrings that mark a line as boilerplate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkipList {
    /// Lowercased entries, in configuration order, without duplicates.
    entries: Vec<String>,
}

impl SkipList {
    /// Builds a skip list from raw entries.
    ///
    /// Entries are trimmed and lowercased. Blank entries are dropped so an
    /// empty string can never exclude every line.
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut list = Self::default();
        for entry in entries {
            let entry = entry.as_ref().trim().to_lowercase();
            if !entry.is_empty() && !list.entries.contains(&entry) {
                list.entries.push(entry);
            }
        }
        list
    }

    /// Parses the skip-lines file format: one entry per line, blank lines ignored.
    pub fn parse(text: &str) -> Self {
        Self::new(text.lines())
    }

    /// Reads a skip-lines file.
    ///
    /// A missing file yields an empty list; other I/O failures are returned.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(text) => {
                let list = Self::parse(&text);
                debug!("Loaded {} skip entries from {}", list.len(), path.display());
                Ok(list)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!(
                    "Skip-lines file {} not found, counting every line",
                    path.display()
                );
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Returns true unless some entry occurs in `line`, ignoring case.
    pub fn is_countable(&self, line: &str) -> bool {
        if self.entries.is_empty() {
            return true;
        }
        let line = line.to_lowercase();
        !self.entries.iter().any(|entry| line.contains(entry.as_str()))
    }

    /// Iterates over the countable lines of a message body.
    pub fn countable_lines<'a>(&'a self, text: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        split_lines(text).filter(move |line| self.is_countable(line))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the list has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Lowercased entries in configuration order.
    pub fn entries(&self) -> &[String] {
        &self.entries
    }
}

const fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\x0b' | '\x0c' | '\x1c' | '\x1d' | '\x1e' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

/// Splits a message body into lines.
///
/// Recognises every Unicode line boundary, treats `\r\n` as one break and
/// does not yield a trailing empty line.
pub fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    let mut rest = text;
    std::iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }
        match rest.char_indices().find(|&(_, c)| is_line_break(c)) {
            Some((idx, c)) => {
                let line = &rest[..idx];
                let mut next = idx + c.len_utf8();
                if c == '\r' && rest[next..].starts_with('\n') {
                    next += 1;
                }
                rest = &rest[next..];
                Some(line)
            }
            None => {
                let line = rest;
                rest = "";
                Some(line)
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_empty_list_counts_everything() {
        let skip = SkipList::default();
        assert!(skip.is_countable("anything at all"));
        assert!(skip.is_countable(""));
    }

    #[test]
    fn test_case_insensitive_match() {
        let skip = SkipList::new(["Daily Reminder"]);
        assert!(!skip.is_countable("DAILY REMINDER: post your entry"));
        assert!(!skip.is_countable("this is a daily reminder"));
        assert!(skip.is_countable("1. my entry"));
    }

    #[test]
    fn test_blank_entries_are_dropped() {
        let skip = SkipList::new(["", "   ", "rules"]);
        assert_eq!(skip.len(), 1);
        assert!(skip.is_countable("hello"));
        assert!(!skip.is_countable("read the RULES"));
    }

    #[test]
    fn test_parse_file_format() {
        let skip = SkipList::parse("Reminder\n\n  pinned  \r\nreminder\n");
        assert_eq!(skip.entries(), &["reminder".to_string(), "pinned".to_string()]);
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let skip = SkipList::load(dir.path().join("missing.txt")).unwrap();
        assert!(skip.is_empty());
    }

    #[test]
    fn test_load_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("skip_lines.txt");
        std::fs::write(&path, "Weekly thread\nbot notice\n").unwrap();
        let skip = SkipList::load(&path).unwrap();
        assert_eq!(skip.len(), 2);
        assert!(!skip.is_countable("weekly THREAD is up"));
    }

    #[test]
    fn test_split_lines_boundaries() {
        let lines: Vec<_> = split_lines("a\r\nb\rc\nd\u{2028}e\n").collect();
        assert_eq!(lines, vec!["a", "b", "c", "d", "e"]);

        let lines: Vec<_> = split_lines("a\n\nb").collect();
        assert_eq!(lines, vec!["a", "", "b"]);

        assert_eq!(split_lines("").count(), 0);
        assert_eq!(split_lines("\n").collect::<Vec<_>>(), vec![""]);
    }

    #[test]
    fn test_countable_lines() {
        let skip = SkipList::new(["skip me"]);
        let lines: Vec<_> = skip
            .countable_lines("1. keep\nSKIP ME please\n2. keep too")
            .collect();
        assert_eq!(lines, vec!["1. keep", "2. keep too"]);
    }

    proptest! {
        #[test]
        fn prop_excluded_iff_entry_contained(
            line in "[a-zA-Z ]{0,40}",
            entries in proptest::collection::vec("[a-zA-Z]{1,4}", 0..4),
        ) {
            let skip = SkipList::new(&entries);
            let lowered = line.to_lowercase();
            let contained = entries
                .iter()
                .any(|e| lowered.contains(&e.to_lowercase()));
            prop_assert_eq!(skip.is_countable(&line), !contained);
        }

        #[test]
        fn prop_empty_list_always_countable(line in ".{0,60}") {
            prop_assert!(SkipList::default().is_countable(&line));
        }
    }
}
