//! Pagination for Atlan admin listings
//!
//! Listings are walked one page at a time. [`PageState`] owns the cursor and
//! the current page and decides what the next request looks like; the
//! blocking [`PagedResults`] and the async [`AsyncPagedResults`] only differ
//! in how they call their fetcher.
//!
//! ```ignore
//! let request = ListRequest::groups().limit(50);
//! let groups = AsyncPagedResults::first(&client, request.criteria(endpoints::GROUPS), request.cursor())
//!     .await?
//!     .collect_all()
//!     .await?;
//! ```

use std::sync::Arc;

use async_trait::async_trait;
use futures::stream::{self, Stream};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Default number of records requested per page for group and user listings.
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Default number of records requested per page for event listings.
pub const DEFAULT_EVENT_PAGE_SIZE: usize = 100;

/// How an endpoint names its offset and page-size query parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageParamStyle {
    /// `offset` / `limit` (groups, users)
    OffsetLimit,
    /// `first` / `max` (Keycloak login and admin events)
    FirstMax,
}

/// The immutable part of a paginated request: endpoint, filters and sort.
///
/// Every page of a traversal is fetched with the same criteria; only the
/// [`PaginationCursor`] changes between fetches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchCriteria {
    endpoint: &'static str,
    style: PageParamStyle,
    params: Vec<(&'static str, String)>,
}

impl SearchCriteria {
    /// Create empty criteria for an endpoint.
    pub fn new(endpoint: &'static str, style: PageParamStyle) -> Self {
        Self {
            endpoint,
            style,
            params: Vec::new(),
        }
    }

    /// Add a query parameter. Repeating a key sends it multiple times.
    pub fn param(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.params.push((key, value.into()));
        self
    }

    /// Add a query parameter only when a value is present.
    pub fn param_opt(self, key: &'static str, value: Option<&str>) -> Self {
        match value {
            Some(v) => self.param(key, v),
            None => self,
        }
    }

    /// API path of the listing, relative to the admin service root.
    pub fn endpoint(&self) -> &'static str {
        self.endpoint
    }

    /// Filter and sort parameters, without offset or size.
    pub fn params(&self) -> &[(&'static str, String)] {
        &self.params
    }

    /// Full query string parameters for one page.
    pub fn to_query_params(&self, cursor: PaginationCursor) -> Vec<(&'static str, String)> {
        let (offset_key, size_key) = match self.style {
            PageParamStyle::OffsetLimit => ("offset", "limit"),
            PageParamStyle::FirstMax => ("first", "max"),
        };

        let mut params = self.params.clone();
        params.push((offset_key, cursor.offset.to_string()));
        params.push((size_key, cursor.page_size.to_string()));
        params
    }
}

/// Offset and page size of the page being requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationCursor {
    /// Index of the first record of the page
    pub offset: usize,
    /// Number of records requested per page
    pub page_size: usize,
}

impl PaginationCursor {
    pub fn new(offset: usize, page_size: usize) -> Self {
        Self { offset, page_size }
    }
}

/// One fetched batch of records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Records of this page, in server order
    pub records: Vec<T>,

    /// Total number of matching entities across all pages, if reported
    #[serde(default)]
    pub total_count: Option<usize>,

    /// Number of entities matching the current filter, if reported
    #[serde(default)]
    pub filtered_count: Option<usize>,
}

impl<T> Page<T> {
    /// Create a page without count metadata.
    pub fn new(records: Vec<T>) -> Self {
        Self {
            records,
            total_count: None,
            filtered_count: None,
        }
    }

    /// Create a page with count metadata.
    pub fn with_counts(
        records: Vec<T>,
        total_count: Option<usize>,
        filtered_count: Option<usize>,
    ) -> Self {
        Self {
            records,
            total_count,
            filtered_count,
        }
    }

    /// An empty page, used once a traversal is exhausted.
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Blocking page source.
pub trait PageFetcher<T> {
    /// Fetch one page for `criteria` at `cursor`.
    fn fetch_page(&self, criteria: &SearchCriteria, cursor: PaginationCursor) -> Result<Page<T>>;
}

impl<'a, T, F: PageFetcher<T> + ?Sized> PageFetcher<T> for &'a F {
    fn fetch_page(&self, criteria: &SearchCriteria, cursor: PaginationCursor) -> Result<Page<T>> {
        (**self).fetch_page(criteria, cursor)
    }
}

/// Async page source.
#[async_trait]
pub trait AsyncPageFetcher<T: Send + 'static>: Send + Sync {
    /// Fetch one page for `criteria` at `cursor`.
    async fn fetch_page(
        &self,
        criteria: &SearchCriteria,
        cursor: PaginationCursor,
    ) -> Result<Page<T>>;
}

#[async_trait]
impl<'a, T, F> AsyncPageFetcher<T> for &'a F
where
    T: Send + 'static,
    F: AsyncPageFetcher<T> + ?Sized,
{
    async fn fetch_page(
        &self,
        criteria: &SearchCriteria,
        cursor: PaginationCursor,
    ) -> Result<Page<T>> {
        (**self).fetch_page(criteria, cursor).await
    }
}

#[async_trait]
impl<T, F> AsyncPageFetcher<T> for Arc<F>
where
    T: Send + 'static,
    F: AsyncPageFetcher<T> + ?Sized,
{
    async fn fetch_page(
        &self,
        criteria: &SearchCriteria,
        cursor: PaginationCursor,
    ) -> Result<Page<T>> {
        (**self).fetch_page(criteria, cursor).await
    }
}

/// Cursor and current page of one linear traversal.
///
/// `page_len` is the size of the current page as fetched; iteration may move
/// the records out, but exhaustion is decided by what the server returned.
#[derive(Debug)]
struct PageState<T> {
    criteria: SearchCriteria,
    cursor: PaginationCursor,
    page: Page<T>,
    page_len: usize,
}

impl<T> PageState<T> {
    fn new(criteria: SearchCriteria, cursor: PaginationCursor, page: Page<T>) -> Self {
        let page = fit_to_cursor(page, cursor);
        let page_len = page.len();
        Self {
            criteria,
            cursor,
            page,
            page_len,
        }
    }

    /// Cursor for the next fetch, or `None` once the traversal is exhausted.
    fn next_cursor(
        &self,
        explicit_offset: Option<usize>,
        explicit_size: Option<usize>,
    ) -> Option<PaginationCursor> {
        if self.page_len == 0 {
            return None;
        }

        let offset = explicit_offset
            .unwrap_or_else(|| self.cursor.offset.saturating_add(self.cursor.page_size));
        let page_size = explicit_size
            .filter(|size| *size > 0)
            .unwrap_or(self.cursor.page_size);

        Some(PaginationCursor { offset, page_size })
    }

    /// Install a freshly fetched page. Returns whether it holds any records.
    fn install(&mut self, cursor: PaginationCursor, page: Page<T>) -> bool {
        let page = fit_to_cursor(page, cursor);
        debug!(
            "{}: fetched {} records at offset {} (page size {})",
            self.criteria.endpoint,
            page.len(),
            cursor.offset,
            cursor.page_size
        );

        self.cursor = cursor;
        self.page_len = page.len();
        self.page = page;
        self.page_len > 0
    }

    fn take_records(&mut self) -> Vec<T> {
        std::mem::take(&mut self.page.records)
    }
}

/// Drop records beyond the requested page size.
fn fit_to_cursor<T>(mut page: Page<T>, cursor: PaginationCursor) -> Page<T> {
    if cursor.page_size > 0 && page.len() > cursor.page_size {
        warn!(
            "Server returned {} records for a page of {}; ignoring the excess",
            page.len(),
            cursor.page_size
        );
        page.records.truncate(cursor.page_size);
    }
    page
}

macro_rules! page_accessors {
    () => {
        /// Records of the current page. Never triggers a fetch.
        pub fn current_page(&self) -> &[T] {
            &self.state.page.records
        }

        /// Offset of the current page.
        pub fn offset(&self) -> usize {
            self.state.cursor.offset
        }

        /// Page size used for the next fetch.
        pub fn page_size(&self) -> usize {
            self.state.cursor.page_size
        }

        /// Total matching entities reported by the most recent fetch.
        pub fn total_count(&self) -> Option<usize> {
            self.state.page.total_count
        }

        /// Entities matching the filter, as reported by the most recent fetch.
        pub fn filtered_count(&self) -> Option<usize> {
            self.state.page.filtered_count
        }

        /// Criteria every page of this traversal is fetched with.
        pub fn criteria(&self) -> &SearchCriteria {
            &self.state.criteria
        }
    };
}

/// Blocking paginated result set.
///
/// Iterating yields every record from the current page onwards, fetching
/// further pages as each one is used up. A fetch error is yielded once and
/// ends the iteration.
pub struct PagedResults<T, F> {
    state: PageState<T>,
    fetcher: F,
}

impl<T, F: PageFetcher<T>> PagedResults<T, F> {
    /// Fetch the first page and wrap it.
    pub fn first(fetcher: F, criteria: SearchCriteria, cursor: PaginationCursor) -> Result<Self> {
        let page = fetcher.fetch_page(&criteria, cursor)?;
        Ok(Self::from_page(fetcher, criteria, cursor, page))
    }

    /// Wrap a page that was already fetched at `cursor`.
    pub fn from_page(
        fetcher: F,
        criteria: SearchCriteria,
        cursor: PaginationCursor,
        page: Page<T>,
    ) -> Self {
        Self {
            state: PageState::new(criteria, cursor, page),
            fetcher,
        }
    }

    page_accessors!();

    /// Move to the next page.
    ///
    /// Returns `Ok(false)` without fetching if the current page is already
    /// empty, and `Ok(false)` after a fetch that returned no records.
    pub fn advance(
        &mut self,
        explicit_offset: Option<usize>,
        explicit_size: Option<usize>,
    ) -> Result<bool> {
        let Some(cursor) = self.state.next_cursor(explicit_offset, explicit_size) else {
            return Ok(false);
        };

        let page = self.fetcher.fetch_page(&self.state.criteria, cursor)?;
        Ok(self.state.install(cursor, page))
    }

    /// Move to the page directly after the current one.
    pub fn next_page(&mut self) -> Result<bool> {
        self.advance(None, None)
    }

    /// Drain every remaining record. Fails as a whole on the first fetch error.
    pub fn collect_all(self) -> Result<Vec<T>> {
        self.into_iter().collect()
    }
}

impl<T, F: PageFetcher<T>> IntoIterator for PagedResults<T, F> {
    type Item = Result<T>;
    type IntoIter = PagedIter<T, F>;

    fn into_iter(mut self) -> Self::IntoIter {
        let buffer = self.state.take_records().into_iter();
        PagedIter {
            results: self,
            buffer,
            done: false,
        }
    }
}

/// Iterator over a [`PagedResults`].
pub struct PagedIter<T, F> {
    results: PagedResults<T, F>,
    buffer: std::vec::IntoIter<T>,
    done: bool,
}

impl<T, F: PageFetcher<T>> Iterator for PagedIter<T, F> {
    type Item = Result<T>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(record) = self.buffer.next() {
                return Some(Ok(record));
            }
            if self.done {
                return None;
            }

            match self.results.next_page() {
                Ok(true) => self.buffer = self.results.state.take_records().into_iter(),
                Ok(false) => {
                    self.done = true;
                    return None;
                }
                Err(err) => {
                    self.done = true;
                    return Some(Err(err));
                }
            }
        }
    }
}

/// Async paginated result set.
///
/// Same sequencing as [`PagedResults`]; fetches suspend instead of block.
pub struct AsyncPagedResults<T, F> {
    state: PageState<T>,
    fetcher: F,
}

impl<T, F> AsyncPagedResults<T, F>
where
    T: Send + 'static,
    F: AsyncPageFetcher<T>,
{
    /// Fetch the first page and wrap it.
    pub async fn first(
        fetcher: F,
        criteria: SearchCriteria,
        cursor: PaginationCursor,
    ) -> Result<Self> {
        let page = fetcher.fetch_page(&criteria, cursor).await?;
        Ok(Self::from_page(fetcher, criteria, cursor, page))
    }

    /// Wrap a page that was already fetched at `cursor`.
    pub fn from_page(
        fetcher: F,
        criteria: SearchCriteria,
        cursor: PaginationCursor,
        page: Page<T>,
    ) -> Self {
        Self {
            state: PageState::new(criteria, cursor, page),
            fetcher,
        }
    }

    page_accessors!();

    /// Move to the next page. See [`PagedResults::advance`].
    pub async fn advance(
        &mut self,
        explicit_offset: Option<usize>,
        explicit_size: Option<usize>,
    ) -> Result<bool> {
        let Some(cursor) = self.state.next_cursor(explicit_offset, explicit_size) else {
            return Ok(false);
        };

        let page = self.fetcher.fetch_page(&self.state.criteria, cursor).await?;
        Ok(self.state.install(cursor, page))
    }

    /// Move to the page directly after the current one.
    pub async fn next_page(&mut self) -> Result<bool> {
        self.advance(None, None).await
    }

    /// Stream every record from the current page onwards.
    ///
    /// Stopping consumption stops fetching; no page is requested until the
    /// previous one has been fully yielded.
    pub fn into_stream(mut self) -> impl Stream<Item = Result<T>> {
        let buffer = self.state.take_records().into_iter();

        stream::unfold(Some((self, buffer)), |state| async move {
            let (mut results, mut buffer) = state?;
            loop {
                if let Some(record) = buffer.next() {
                    return Some((Ok(record), Some((results, buffer))));
                }

                match results.next_page().await {
                    Ok(true) => buffer = results.state.take_records().into_iter(),
                    Ok(false) => return None,
                    Err(err) => return Some((Err(err), None)),
                }
            }
        })
    }

    /// Drain every remaining record. Fails as a whole on the first fetch error.
    pub async fn collect_all(mut self) -> Result<Vec<T>> {
        let mut records = self.state.take_records();
        while self.next_page().await? {
            records.append(&mut self.state.take_records());
        }
        Ok(records)
    }
}

/// Paging options for group and user listings.
///
/// Use the builder pattern to configure the request.
///
/// # Example
/// ```ignore
/// let request = ListRequest::groups()
///     .filter(r#"{"name":{"$ilike":"%sales%"}}"#)
///     .limit(50);
/// ```
#[derive(Debug, Clone)]
pub struct ListRequest {
    /// JSON filter expression (`filter` query parameter)
    pub filter: Option<String>,
    /// Sort field, prefix with `-` for descending
    pub sort: Option<String>,
    /// Whether the server should compute total and filtered counts
    pub count: bool,
    /// Columns to include in each record
    pub columns: Vec<String>,
    /// Offset of the first page
    pub offset: usize,
    /// Records per page
    pub limit: usize,
}

impl Default for ListRequest {
    fn default() -> Self {
        Self {
            filter: None,
            sort: None,
            count: true,
            columns: Vec::new(),
            offset: 0,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ListRequest {
    /// Group listing sorted by name.
    pub fn groups() -> Self {
        Self::default().sort("name")
    }

    /// User listing sorted by username.
    pub fn users() -> Self {
        Self::default().sort("username")
    }

    pub fn filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    pub fn sort(mut self, field: impl Into<String>) -> Self {
        self.sort = Some(field.into());
        self
    }

    /// Ask the server to skip counting (cheaper for very large directories).
    pub fn count(mut self, count: bool) -> Self {
        self.count = count;
        self
    }

    pub fn columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns = columns.into_iter().map(Into::into).collect();
        self
    }

    pub fn offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Criteria for `endpoint` built from the filter, sort, count and columns.
    pub fn criteria(&self, endpoint: &'static str) -> SearchCriteria {
        let mut criteria = SearchCriteria::new(endpoint, PageParamStyle::OffsetLimit)
            .param_opt("filter", self.filter.as_deref())
            .param_opt("sort", self.sort.as_deref())
            .param("count", self.count.to_string());

        for column in &self.columns {
            criteria = criteria.param("columns", column.clone());
        }
        criteria
    }

    /// Cursor of the first page.
    pub fn cursor(&self) -> PaginationCursor {
        PaginationCursor::new(self.offset, self.limit)
    }
}
