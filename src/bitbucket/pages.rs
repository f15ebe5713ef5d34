//! Walking paginated Bitbucket collections

use crate::bitbucket::types::{parse_response, Page};
use crate::core::SourceResult;
use crate::di::JsonFetcher;
use serde::de::DeserializeOwned;
use std::marker::PhantomData;
use tracing::trace;

/// Follows the `next` links of a paginated collection, one page per call.
///
/// Pages come back in server order. The walk is finished once a page
/// without `next` has been returned, or after the first error.
pub struct PageWalker<'a, T> {
    fetcher: &'a dyn JsonFetcher,
    next_url: Option<String>,
    prefer_cached: bool,
    pages_fetched: usize,
    _item: PhantomData<fn() -> T>,
}

impl<'a, T: DeserializeOwned> PageWalker<'a, T> {
    pub fn new(fetcher: &'a dyn JsonFetcher, start_url: impl Into<String>, prefer_cached: bool) -> Self {
        Self {
            fetcher,
            next_url: Some(start_url.into()),
            prefer_cached,
            pages_fetched: 0,
            _item: PhantomData,
        }
    }

    /// Fetch the next page's items, or `None` once the collection is exhausted
    pub async fn next_page(&mut self) -> SourceResult<Option<Vec<T>>> {
        let Some(url) = self.next_url.take() else {
            return Ok(None);
        };

        let value = self.fetcher.fetch_json(&url, self.prefer_cached).await?;
        let page: Page<T> = parse_response(&url, value)?;
        self.pages_fetched += 1;
        trace!(
            url = %url,
            items = page.values.len(),
            has_next = page.next.is_some(),
            "fetched page"
        );

        self.next_url = page.next.filter(|next| !next.is_empty());
        Ok(Some(page.values))
    }

    /// Drain the remaining pages into one list
    pub async fn collect_all(mut self) -> SourceResult<Vec<T>> {
        let mut items = Vec::new();
        while let Some(page) = self.next_page().await? {
            items.extend(page);
        }
        Ok(items)
    }

    /// Number of pages fetched so far
    pub fn pages_fetched(&self) -> usize {
        self.pages_fetched
    }
}
