//! Integration tests for tally-i18n crate.
//!
//! These tests verify the embedded Fluent resource renders replies without
//! stray isolation marks and with arguments interpolated verbatim.

use proptest::prelude::*;
use tally_common::test_utils::init_test_logging;
use tally_i18n::{Messages, DEFAULT_LOCALE};

#[test]
fn test_fluent_integration() {
    init_test_logging();
    let messages = Messages::for_locale(DEFAULT_LOCALE).unwrap();
    let text = messages.channel_not_found("general");
    assert!(!text.contains('\u{2068}'));
    assert!(!text.contains('\u{2069}'));
}

#[test]
fn test_fallback_language_tag() {
    assert!(Messages::for_locale("en").is_ok());
    assert!(Messages::for_locale("de-DE").is_err());
}

proptest! {
    #[test]
    fn prop_issue_line_keeps_content_verbatim(line in "[ -~]{0,60}") {
        let messages = Messages::load().unwrap();
        let text = messages.issue_line("user", &line, "date", "reason");
        let expected = format!("Content: '{line}', Date");
        prop_assert!(text.contains(&expected));
    }
}
