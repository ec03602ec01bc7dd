//! # Quiet-Window Buffering
//!
//! Stream operator that collects items into batches and releases a batch
//! once the source has been silent for the quiet window.

use futures::stream::{self, Stream, StreamExt};
use std::time::Duration;

/// Buffer `source` into batches separated by quiet windows.
///
/// The first item opens a batch; every item arriving less than `quiet`
/// after the previous one joins it. When `quiet` elapses with no new item
/// the batch is emitted. Nothing is dropped and order within a batch is
/// arrival order. A pending batch is flushed when the source ends.
pub fn buffer_until_quiet<S>(source: S, quiet: Duration) -> impl Stream<Item = Vec<S::Item>>
where
    S: Stream + Unpin,
{
    stream::unfold(Some(source), move |state| async move {
        let mut source = state?;
        let first = source.next().await?;
        let mut batch = vec![first];
        loop {
            match tokio::time::timeout(quiet, source.next()).await {
                Ok(Some(item)) => batch.push(item),
                Ok(None) => return Some((batch, None)),
                Err(_) => return Some((batch, Some(source))),
            }
        }
    })
}
