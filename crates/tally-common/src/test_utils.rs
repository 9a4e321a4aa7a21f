//! Test utilities and shared test helpers for Tally Bot.
//!
//! This module provides common testing utilities, fixtures, and helper functions
//! that can be used across all crates in the workspace for unit and integration testing.

use chrono::{DateTime, TimeZone, Utc};
use std::sync::Once;

use crate::MessageRecord;

/// Initialize test logging once per test run.
static INIT: Once = Once::new();

/// Initialize logging for tests with a sensible default configuration.
/// This function is safe to call multiple times and will only initialize once.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug"));
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_env_filter(filter)
            .try_init();
    });
}

/// Test fixture for creating a mock timestamp.
pub fn mock_timestamp(
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    min: u32,
    sec: u32,
) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, min, sec)
        .unwrap()
}

/// Create a temporary directory for tests that automatically cleans up.
#[cfg(feature = "tempfile")]
pub fn create_temp_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("Failed to create temporary directory")
}

/// Message history fixtures.
pub mod message_fixtures {
    use super::*;

    /// A single message posted by `author` at `at`.
    pub fn message(author: &str, at: DateTime<Utc>, content: &str) -> MessageRecord {
        MessageRecord::new(author, at, content)
    }

    /// One message per line of `lines`, a minute apart, starting at `start`.
    pub fn numbered_history(
        author: &str,
        start: DateTime<Utc>,
        lines: &[&str],
    ) -> Vec<MessageRecord> {
        lines
            .iter()
            .enumerate()
            .map(|(i, line)| {
                let offset = chrono::Duration::minutes(i64::try_from(i).unwrap_or(i64::MAX));
                message(author, start + offset, line)
            })
            .collect()
    }
}

/// Configuration-related test utilities.
pub mod config_fixtures {
    /// Create a minimal valid test configuration as YAML string.
    pub fn minimal_config_yaml() -> &'static str {
        r#"
discord:
  token: "test_token"
  command_channel: "bot-admin"
"#
    }

    /// Create a full test configuration as YAML string.
    pub fn full_config_yaml() -> &'static str {
        concat!(
            "discord:\n",
            "  token: \"test_token_full\"\n",
            "  command_channel: \"bot-admin\"\n",
            "  command_prefix: \"?\"\n",
            "\n",
            "counting:\n",
            "  skip_lines_file: \"skip_lines.txt\"\n",
            "  timezone: \"Europe/London\"\n",
            "\n",
            "chart:\n",
            "  width: 1200\n",
            "  height: 700\n",
            "  line_color: \"#0000ff\"\n",
        )
    }
}
