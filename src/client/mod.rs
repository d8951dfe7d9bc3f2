//! Atlan admin API client

pub mod api;
pub mod atlan;
pub mod blocking;
pub mod endpoints;
#[cfg(test)]
pub mod mock;
pub mod models;
pub mod pagination;

pub use api::{GroupApi, SsoApi};
pub use atlan::AtlanClient;
pub use blocking::BlockingAtlanClient;
#[cfg(test)]
pub use mock::MockAtlanClient;
pub use pagination::{
    AsyncPageFetcher, AsyncPagedResults, ListRequest, Page, PageFetcher, PageParamStyle,
    PagedIter, PagedResults, PaginationCursor, SearchCriteria,
};
