//! Oldest-first channel history.
//!
//! Discord hands out history in pages of at most [`PAGE_SIZE`] messages.
//! Pages are requested with an `after` cursor so the stream yields messages
//! from the channel's first message to its latest, which is the order the
//! sequence validator needs.

use chrono::{DateTime, Utc};
use futures::{stream, Stream, TryStreamExt};
use poise::serenity_prelude::{self as serenity, ChannelId, GetMessages, Http, Message, Timestamp};
use std::future::Future;
use std::sync::Arc;
use tally_common::MessageRecord;
use tracing::debug;

/// Messages requested per page. Discord caps pages at 100.
pub const PAGE_SIZE: u8 = 100;

/// Creation time as reported by Discord, millisecond precision included.
pub fn created_at(timestamp: &Timestamp) -> DateTime<Utc> {
    **timestamp
}

/// Converts a Discord message into the record the counting code works on.
pub fn to_record(message: &Message) -> MessageRecord {
    MessageRecord::new(
        message.author.tag(),
        created_at(&message.timestamp),
        message.content.clone(),
    )
}

/// Streams items oldest first from a paged source.
///
/// `fetch(after)` returns up to [`PAGE_SIZE`] `(id, item)` pairs with ids
/// greater than `after`, in any order. Paging stops at the first short page
/// or at the first error.
pub fn oldest_first<F, Fut, T, E>(fetch: F) -> impl Stream<Item = Result<T, E>>
where
    F: FnMut(u64) -> Fut,
    Fut: Future<Output = Result<Vec<(u64, T)>, E>>,
{
    stream::try_unfold((fetch, Some(1u64)), |(mut fetch, cursor)| async move {
        let Some(after) = cursor else {
            return Ok(None);
        };

        let mut page = fetch(after).await?;
        if page.is_empty() {
            return Ok(None);
        }
        page.sort_by_key(|(id, _)| *id);

        let full = page.len() >= usize::from(PAGE_SIZE);
        let next = page.last().map(|(id, _)| *id).filter(|_| full);
        debug!("Fetched {} messages after {}", page.len(), after);

        let items: Vec<T> = page.into_iter().map(|(_, item)| item).collect();
        Ok::<_, E>(Some((items, (fetch, next))))
    })
    .map_ok(|items| stream::iter(items.into_iter().map(Ok::<T, E>)))
    .try_flatten()
}

/// Streams a channel's whole history, oldest message first.
pub fn channel_history(
    http: Arc<Http>,
    channel: ChannelId,
) -> impl Stream<Item = Result<MessageRecord, serenity::Error>> {
    oldest_first(move |after| {
        let http = Arc::clone(&http);
        async move {
            let request = GetMessages::new()
                .after(serenity::MessageId::new(after))
                .limit(PAGE_SIZE);
            let page = channel.messages(&*http, request).await?;
            let records: Vec<(u64, MessageRecord)> =
                page.iter().map(|m| (m.id.get(), to_record(m))).collect();
            Ok::<_, serenity::Error>(records)
        }
    })
}
