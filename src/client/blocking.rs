//! Blocking wrapper around [`AtlanClient`]
//!
//! Owns a current-thread Tokio runtime and drives the async client to
//! completion on every fetch. Must not be used from inside another runtime.

use serde::de::DeserializeOwned;
use tokio::runtime::{Builder, Runtime};

use super::atlan::AtlanClient;
use super::endpoints;
use super::models::{AtlanGroup, AtlanUser};
use super::pagination::{
    AsyncPageFetcher, ListRequest, Page, PageFetcher, PagedResults, PaginationCursor,
    SearchCriteria,
};
use crate::error::Result;

/// Blocking Atlan admin API client
pub struct BlockingAtlanClient {
    inner: AtlanClient,
    runtime: Runtime,
}

impl BlockingAtlanClient {
    pub fn new(inner: AtlanClient) -> Result<Self> {
        let runtime = Builder::new_current_thread().enable_all().build()?;
        Ok(Self { inner, runtime })
    }

    /// First page of groups, ready to iterate.
    pub fn list_groups(&self, request: &ListRequest) -> Result<PagedResults<AtlanGroup, &Self>> {
        PagedResults::first(self, request.criteria(endpoints::GROUPS), request.cursor())
    }

    /// First page of users, ready to iterate.
    pub fn list_users(&self, request: &ListRequest) -> Result<PagedResults<AtlanUser, &Self>> {
        PagedResults::first(self, request.criteria(endpoints::USERS), request.cursor())
    }
}

impl<T> PageFetcher<T> for BlockingAtlanClient
where
    T: DeserializeOwned + Send + 'static,
{
    fn fetch_page(&self, criteria: &SearchCriteria, cursor: PaginationCursor) -> Result<Page<T>> {
        self.runtime
            .block_on(AsyncPageFetcher::<T>::fetch_page(&self.inner, criteria, cursor))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    #[test]
    fn test_blocking_iteration_walks_pages() {
        let mut server = mockito::Server::new();
        let first = server
            .mock("GET", "/api/service/users")
            .match_query(Matcher::UrlEncoded("offset".into(), "0".into()))
            .with_status(200)
            .with_body(
                r#"{"totalRecord": 3, "filterRecord": 3, "records": [
                    {"id": "u1", "username": "ada"},
                    {"id": "u2", "username": "bob"}
                ]}"#,
            )
            .create();
        let second = server
            .mock("GET", "/api/service/users")
            .match_query(Matcher::UrlEncoded("offset".into(), "2".into()))
            .with_status(200)
            .with_body(r#"{"totalRecord": 3, "filterRecord": 3, "records": [{"id": "u3", "username": "cy"}]}"#)
            .create();
        let third = server
            .mock("GET", "/api/service/users")
            .match_query(Matcher::UrlEncoded("offset".into(), "4".into()))
            .with_status(200)
            .with_body(r#"{"totalRecord": 3, "filterRecord": 3, "records": []}"#)
            .create();

        let client =
            BlockingAtlanClient::new(AtlanClient::new(server.url(), "test-key").unwrap()).unwrap();
        let results = client.list_users(&ListRequest::users().limit(2)).unwrap();
        assert_eq!(results.total_count(), Some(3));

        let usernames: Vec<String> = results
            .into_iter()
            .map(|user| user.unwrap().username.unwrap_or_default())
            .collect();

        assert_eq!(usernames, vec!["ada", "bob", "cy"]);
        first.assert();
        second.assert();
        third.assert();
    }

    #[test]
    fn test_blocking_fetch_error_surfaces() {
        let mut server = mockito::Server::new();
        let _groups = server
            .mock("GET", "/api/service/groups")
            .match_query(Matcher::Any)
            .with_status(401)
            .create();

        let client =
            BlockingAtlanClient::new(AtlanClient::new(server.url(), "bad-key").unwrap()).unwrap();

        assert!(client.list_groups(&ListRequest::groups()).is_err());
    }
}
