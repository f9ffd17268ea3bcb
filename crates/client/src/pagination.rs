//! Cursor-following page streams.
//!
//! Responsibilities:
//! - Turn a "fetch one page for this cursor" closure into a `futures::Stream`.
//!
//! Explicitly does NOT handle:
//! - Mixing cursor families. Each page type names its own cursor field.
//! - Rate limiting between pages; callers pace consumption themselves.
//!
//! Invariants:
//! - A page is always yielded before the stream decides whether to stop.
//! - The stream ends after a page with no data, no (or an empty) cursor, or no items.
//! - The first error is yielded and ends the stream.

use std::future::Future;

use futures::Stream;
use futures::stream;

use crate::error::{ClientError, Result};
use crate::models::{
    BreachSearchData, Envelope, StealerSearchData, V2StealerData, V2VictimsData,
};

/// A page of results that links to the next page by cursor.
pub trait CursorPage {
    fn next_cursor(&self) -> Option<&str>;

    fn is_empty_page(&self) -> bool;
}

impl CursorPage for BreachSearchData {
    fn next_cursor(&self) -> Option<&str> {
        self.cursor.as_deref()
    }

    fn is_empty_page(&self) -> bool {
        self.results.is_empty()
    }
}

impl CursorPage for StealerSearchData {
    fn next_cursor(&self) -> Option<&str> {
        self.cursor.as_deref()
    }

    fn is_empty_page(&self) -> bool {
        self.results.is_empty()
    }
}

impl CursorPage for V2StealerData {
    fn next_cursor(&self) -> Option<&str> {
        self.next_cursor.as_deref()
    }

    fn is_empty_page(&self) -> bool {
        self.items.is_empty()
    }
}

impl CursorPage for V2VictimsData {
    fn next_cursor(&self) -> Option<&str> {
        self.next_cursor.as_deref()
    }

    fn is_empty_page(&self) -> bool {
        self.items.is_empty()
    }
}

/// Stream pages starting at `first_cursor`, following each page's cursor.
pub fn pages<T, F, Fut>(
    first_cursor: Option<String>,
    fetch: F,
) -> impl Stream<Item = Result<Envelope<T>>>
where
    T: CursorPage,
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = Result<Envelope<T>>>,
{
    // `None` once the last page has been yielded.
    let start: Option<Option<String>> = Some(first_cursor);

    stream::try_unfold((start, fetch), |(state, mut fetch)| async move {
        let Some(cursor) = state else {
            return Ok(None);
        };

        let page = fetch(cursor).await?;
        let next = page
            .data()
            .filter(|data| !data.is_empty_page())
            .and_then(CursorPage::next_cursor)
            .filter(|c| !c.is_empty())
            .map(|c| Some(c.to_string()));

        Ok::<_, ClientError>(Some((page, (next, fetch))))
    })
}
