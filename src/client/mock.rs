//! Mock Atlan API client for testing
//!
//! Provides a mock implementation of the API traits for unit testing
//! without making real API calls.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::api::{GroupApi, SsoApi};
use super::endpoints;
use super::models::{AtlanGroup, SsoMapper};
use super::pagination::{
    AsyncPageFetcher, AsyncPagedResults, ListRequest, Page, PaginationCursor, SearchCriteria,
};
use crate::error::{ApiError, Result};

/// Mock API client for testing.
///
/// Configure expected responses via builder methods, then use in tests.
///
/// # Example
/// ```ignore
/// let mock = MockAtlanClient::new()
///     .with_groups(vec![AtlanGroup::new("g1", "sales")])
///     .await;
///
/// let groups = mock.list_all_groups().await?;
/// assert_eq!(groups.len(), 1);
/// ```
pub struct MockAtlanClient {
    /// Group directory served page by page
    groups: Arc<Mutex<Vec<AtlanGroup>>>,
    /// Page size used by list_all_groups
    group_page_size: usize,
    /// Group mappers to return from list_group_mappings
    mappers: Arc<Mutex<Vec<SsoMapper>>>,
    /// Mapper IDs whose deletion fails
    failing_deletes: Arc<Mutex<HashSet<String>>>,
    /// Mapper IDs deleted so far, in order
    deleted: Arc<Mutex<Vec<String>>>,
    /// Error to return on the next call of any kind - consumed on first use
    error: Arc<Mutex<Option<ApiError>>>,
    /// Error to return from the next list_group_mappings - consumed on first use
    mapping_error: Arc<Mutex<Option<ApiError>>>,
    /// Track number of calls for verification
    call_count: Arc<Mutex<CallCounts>>,
    /// Captured requests for test assertions
    captured_requests: Arc<Mutex<Vec<CapturedRequest>>>,
}

impl Default for MockAtlanClient {
    fn default() -> Self {
        Self {
            groups: Arc::new(Mutex::new(Vec::new())),
            group_page_size: 100,
            mappers: Arc::new(Mutex::new(Vec::new())),
            failing_deletes: Arc::new(Mutex::new(HashSet::new())),
            deleted: Arc::new(Mutex::new(Vec::new())),
            error: Arc::new(Mutex::new(None)),
            mapping_error: Arc::new(Mutex::new(None)),
            call_count: Arc::new(Mutex::new(CallCounts::default())),
            captured_requests: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

/// Tracks API call counts for test verification
#[derive(Default, Debug, Clone)]
pub struct CallCounts {
    pub fetch_page: usize,
    pub list_all_groups: usize,
    pub list_group_mappings: usize,
    pub delete_group_mapping: usize,
}

impl CallCounts {
    /// Get total number of API calls made.
    pub fn total(&self) -> usize {
        self.fetch_page + self.list_all_groups + self.list_group_mappings + self.delete_group_mapping
    }
}

/// A captured API request for test assertions.
#[derive(Debug, Clone, PartialEq)]
pub struct CapturedRequest {
    /// The API method called (e.g., "fetch_page", "delete_group_mapping")
    pub method: String,
    /// SSO alias if the call was scoped to an identity provider
    pub sso_alias: Option<String>,
    /// Mapper ID for deletions
    pub mapper_id: Option<String>,
    /// Cursor for page fetches
    pub cursor: Option<PaginationCursor>,
}

impl CapturedRequest {
    fn new(method: &str) -> Self {
        Self {
            method: method.to_string(),
            sso_alias: None,
            mapper_id: None,
            cursor: None,
        }
    }
}

impl MockAtlanClient {
    /// Create a new mock client with default (empty) responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure the group directory.
    pub async fn with_groups(self, groups: Vec<AtlanGroup>) -> Self {
        *self.groups.lock().await = groups;
        self
    }

    /// Serve the group directory in pages of `size`.
    pub fn with_group_page_size(mut self, size: usize) -> Self {
        self.group_page_size = size;
        self
    }

    /// Configure mappers to return from list_group_mappings.
    pub async fn with_mappers(self, mappers: Vec<SsoMapper>) -> Self {
        *self.mappers.lock().await = mappers;
        self
    }

    /// Make deletion of the given mapper fail with a server error.
    pub async fn with_failing_delete(self, mapper_id: &str) -> Self {
        self.failing_deletes
            .lock()
            .await
            .insert(mapper_id.to_string());
        self
    }

    /// Configure an error to return on the next API call.
    /// The error is consumed after one use.
    pub async fn with_error(self, error: ApiError) -> Self {
        *self.error.lock().await = Some(error);
        self
    }

    /// Configure an error for the next list_group_mappings call only.
    pub async fn with_mapping_error(self, error: ApiError) -> Self {
        *self.mapping_error.lock().await = Some(error);
        self
    }

    /// Get the call counts for verification in tests.
    pub async fn call_counts(&self) -> CallCounts {
        self.call_count.lock().await.clone()
    }

    /// Get all captured requests for test assertions.
    pub async fn captured_requests(&self) -> Vec<CapturedRequest> {
        self.captured_requests.lock().await.clone()
    }

    /// Mapper IDs successfully deleted, in call order.
    pub async fn deleted(&self) -> Vec<String> {
        self.deleted.lock().await.clone()
    }

    /// Mappers still present.
    pub async fn remaining_mappers(&self) -> Vec<SsoMapper> {
        self.mappers.lock().await.clone()
    }

    /// Check if there's a pending error and consume it.
    async fn check_error(&self) -> Result<()> {
        let mut error = self.error.lock().await;
        if let Some(e) = error.take() {
            return Err(e.into());
        }
        Ok(())
    }

    async fn capture(&self, request: CapturedRequest) {
        self.captured_requests.lock().await.push(request);
    }
}

#[async_trait]
impl AsyncPageFetcher<AtlanGroup> for MockAtlanClient {
    async fn fetch_page(
        &self,
        criteria: &SearchCriteria,
        cursor: PaginationCursor,
    ) -> Result<Page<AtlanGroup>> {
        self.call_count.lock().await.fetch_page += 1;
        self.capture(CapturedRequest {
            cursor: Some(cursor),
            ..CapturedRequest::new("fetch_page")
        })
        .await;
        self.check_error().await?;

        if criteria.endpoint() != endpoints::GROUPS {
            return Err(ApiError::NotFound(criteria.endpoint().to_string()).into());
        }

        let groups = self.groups.lock().await;
        let total = groups.len();
        let records: Vec<AtlanGroup> = groups
            .iter()
            .skip(cursor.offset)
            .take(cursor.page_size)
            .cloned()
            .collect();
        Ok(Page::with_counts(records, Some(total), Some(total)))
    }
}

#[async_trait]
impl GroupApi for MockAtlanClient {
    async fn list_all_groups(&self) -> Result<Vec<AtlanGroup>> {
        self.call_count.lock().await.list_all_groups += 1;

        let request = ListRequest::groups().limit(self.group_page_size);
        AsyncPagedResults::first(self, request.criteria(endpoints::GROUPS), request.cursor())
            .await?
            .collect_all()
            .await
    }
}

#[async_trait]
impl SsoApi for MockAtlanClient {
    async fn list_group_mappings(&self, sso_alias: &str) -> Result<Vec<SsoMapper>> {
        self.call_count.lock().await.list_group_mappings += 1;
        self.capture(CapturedRequest {
            sso_alias: Some(sso_alias.to_string()),
            ..CapturedRequest::new("list_group_mappings")
        })
        .await;
        self.check_error().await?;
        if let Some(e) = self.mapping_error.lock().await.take() {
            return Err(e.into());
        }

        let mappers = self.mappers.lock().await;
        Ok(mappers
            .iter()
            .filter(|m| m.is_group_mapper())
            .cloned()
            .collect())
    }

    async fn delete_group_mapping(&self, sso_alias: &str, mapper_id: &str) -> Result<()> {
        self.call_count.lock().await.delete_group_mapping += 1;
        self.capture(CapturedRequest {
            sso_alias: Some(sso_alias.to_string()),
            mapper_id: Some(mapper_id.to_string()),
            ..CapturedRequest::new("delete_group_mapping")
        })
        .await;
        self.check_error().await?;

        if self.failing_deletes.lock().await.contains(mapper_id) {
            return Err(ApiError::ServerError(format!("cannot delete {}", mapper_id)).into());
        }

        let mut mappers = self.mappers.lock().await;
        let before = mappers.len();
        mappers.retain(|m| m.id.as_deref() != Some(mapper_id));
        if mappers.len() == before {
            return Err(ApiError::NotFound(format!("Mapper {}", mapper_id)).into());
        }
        drop(mappers);

        self.deleted.lock().await.push(mapper_id.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn mapper(id: &str, kind: Option<&str>) -> SsoMapper {
        SsoMapper {
            id: Some(id.to_string()),
            name: Some(format!("{}--1000", id)),
            identity_provider_mapper: kind.map(str::to_string),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_mock_client_default_empty() {
        let mock = MockAtlanClient::new();

        assert!(mock.list_all_groups().await.unwrap().is_empty());
        assert!(mock.list_group_mappings("okta").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_mock_client_pages_group_directory() {
        let groups: Vec<AtlanGroup> = (0..5)
            .map(|i| AtlanGroup::new(format!("g{}", i), format!("group-{}", i)))
            .collect();
        let mock = MockAtlanClient::new()
            .with_groups(groups)
            .await
            .with_group_page_size(2);

        let all = mock.list_all_groups().await.unwrap();

        assert_eq!(all.len(), 5);
        let offsets: Vec<usize> = mock
            .captured_requests()
            .await
            .iter()
            .filter_map(|r| r.cursor.map(|c| c.offset))
            .collect();
        assert_eq!(offsets, vec![0, 2, 4, 6]);
    }

    #[tokio::test]
    async fn test_mock_client_with_error() {
        let mock = MockAtlanClient::new()
            .with_error(ApiError::Unauthorized)
            .await;

        let result = mock.list_all_groups().await;
        assert!(matches!(result, Err(Error::Api(ApiError::Unauthorized))));

        // error is consumed
        assert!(mock.list_all_groups().await.is_ok());
    }

    #[tokio::test]
    async fn test_mock_client_filters_non_group_mappers() {
        let mock = MockAtlanClient::new()
            .with_mappers(vec![
                mapper("m1", Some("saml-group-idp-mapper")),
                mapper("m2", None),
                mapper("m3", Some("hardcoded-role-idp-mapper")),
            ])
            .await;

        let ids: Vec<Option<String>> = mock
            .list_group_mappings("okta")
            .await
            .unwrap()
            .into_iter()
            .map(|m| m.id)
            .collect();

        assert_eq!(ids, vec![Some("m1".to_string()), Some("m2".to_string())]);
    }

    #[tokio::test]
    async fn test_mock_client_delete() {
        let mock = MockAtlanClient::new()
            .with_mappers(vec![mapper("m1", None), mapper("m2", None)])
            .await
            .with_failing_delete("m2")
            .await;

        mock.delete_group_mapping("okta", "m1").await.unwrap();
        assert!(mock.delete_group_mapping("okta", "m2").await.is_err());
        assert!(matches!(
            mock.delete_group_mapping("okta", "m1").await,
            Err(Error::Api(ApiError::NotFound(_)))
        ));

        assert_eq!(mock.deleted().await, vec!["m1".to_string()]);
        assert_eq!(mock.remaining_mappers().await.len(), 1);
        assert_eq!(mock.call_counts().await.delete_group_mapping, 3);
    }
}
