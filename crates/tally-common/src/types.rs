//! Common type definitions for domain modeling.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One message pulled from a channel's history.
///
/// Records are produced by the history fetcher and are read-only to the
/// counting and validation code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageRecord {
    /// Display tag of the author.
    pub author: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Raw text body, possibly spanning several lines.
    pub content: String,
}

impl MessageRecord {
    /// Creates a new record.
    pub fn new(
        author: impl Into<String>,
        created_at: DateTime<Utc>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            author: author.into(),
            created_at,
            content: content.into(),
        }
    }
}
