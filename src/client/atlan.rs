//! Atlan admin API client implementation

use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use log::debug;
use reqwest::{Client as HttpClient, Method, Response, StatusCode, Url};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use super::api::{GroupApi, SsoApi};
use super::endpoints;
use super::models::{
    AdminEvent, AdminEventRequest, AtlanGroup, AtlanUser, KeycloakEvent, LoginEventRequest,
    SsoMapper,
};
use super::pagination::{
    AsyncPageFetcher, AsyncPagedResults, ListRequest, Page, PaginationCursor, SearchCriteria,
};
use crate::config::Config;
use crate::error::{ApiError, ConfigError, Result};

/// Admin API prefix appended to the tenant base URL
const API_PREFIX: &str = "/api/service";

/// Client-side request budget per second
const RATE_LIMIT_PER_SECOND: u32 = 10;

/// Timeout for a single HTTP request
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Page size used when walking the whole group directory
pub const DIRECTORY_PAGE_SIZE: usize = 100;

/// Atlan admin API client
pub struct AtlanClient {
    http: HttpClient,
    base_url: String,
    api_key: String,
    rate_limiter: Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>,
}

/// Response body of a paged listing.
///
/// Group and user listings wrap records with counts; event listings are a
/// bare array.
#[derive(Deserialize)]
#[serde(untagged, bound(deserialize = "T: DeserializeOwned"))]
enum PageBody<T> {
    Records {
        #[serde(rename = "totalRecord", default)]
        total_record: Option<usize>,
        #[serde(rename = "filterRecord", default)]
        filter_record: Option<usize>,
        #[serde(default)]
        records: Option<Vec<T>>,
    },
    List(Vec<T>),
}

impl<T> PageBody<T> {
    fn into_page(self) -> Page<T> {
        match self {
            PageBody::Records {
                total_record,
                filter_record,
                records,
            } => Page::with_counts(records.unwrap_or_default(), total_record, filter_record),
            PageBody::List(records) => Page::new(records),
        }
    }
}

impl AtlanClient {
    /// Create a client for a tenant, e.g. `https://acme.atlan.com`.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Result<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let parsed = Url::parse(&base_url)
            .map_err(|e| ConfigError::Invalid(format!("base URL '{}': {}", base_url, e)))?;
        if parsed.cannot_be_a_base() {
            return Err(ConfigError::Invalid(format!("base URL '{}' is not a web URL", base_url)).into());
        }

        let http = HttpClient::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("atlanop/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let per_second = NonZeroU32::new(RATE_LIMIT_PER_SECOND).unwrap_or(NonZeroU32::MIN);
        let rate_limiter = Arc::new(RateLimiter::direct(Quota::per_second(per_second)));

        Ok(Self {
            http,
            base_url,
            api_key: api_key.into(),
            rate_limiter,
        })
    }

    /// Create a client from resolved configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        let base_url = config
            .base_url
            .as_deref()
            .ok_or(ConfigError::MissingBaseUrl)?;
        let api_key = config.api_key.as_deref().ok_or(ConfigError::MissingApiKey)?;
        Self::new(base_url, api_key)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL for API path segments. Each segment is percent-encoded on
    /// its own, so `/`, `?` or `#` inside a value stay within that segment.
    fn url(&self, segments: &[&str]) -> Result<Url> {
        if let Some(bad) = segments
            .iter()
            .find(|s| s.is_empty() || **s == "." || **s == "..")
        {
            return Err(ConfigError::Invalid(format!("'{}' is not a valid path segment", bad)).into());
        }

        let mut url = Url::parse(&self.base_url)
            .map_err(|e| ConfigError::Invalid(format!("base URL '{}': {}", self.base_url, e)))?;
        url.path_segments_mut()
            .map_err(|_| ConfigError::Invalid(format!("base URL '{}' is not a web URL", self.base_url)))?
            .pop_if_empty()
            .extend(endpoints::segments(API_PREFIX))
            .extend(segments);
        Ok(url)
    }

    /// Send an authenticated request and map error statuses.
    async fn send(
        &self,
        method: Method,
        segments: &[&str],
        query: &[(&str, String)],
    ) -> Result<Response> {
        let url = self.url(segments)?;
        self.rate_limiter.until_ready().await;
        debug!("{} {} {:?}", method, url, query);

        let response = self
            .http
            .request(method, url)
            .bearer_auth(&self.api_key)
            .query(query)
            .send()
            .await
            .map_err(ApiError::from)?;

        check_status(response).await
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        query: &[(&str, String)],
    ) -> Result<T> {
        let response = self.send(Method::GET, segments, query).await?;
        let path = response.url().path().to_string();
        let data = response.json::<T>().await.map_err(|e| {
            ApiError::InvalidResponse(format!("Failed to parse response from {}: {}", path, e))
        })?;
        Ok(data)
    }

    /// First page of groups, ready to walk.
    pub async fn list_groups(
        &self,
        request: &ListRequest,
    ) -> Result<AsyncPagedResults<AtlanGroup, &Self>> {
        AsyncPagedResults::first(self, request.criteria(endpoints::GROUPS), request.cursor()).await
    }

    /// First page of users, ready to walk.
    pub async fn list_users(
        &self,
        request: &ListRequest,
    ) -> Result<AsyncPagedResults<AtlanUser, &Self>> {
        AsyncPagedResults::first(self, request.criteria(endpoints::USERS), request.cursor()).await
    }

    /// First page of login events, ready to walk.
    pub async fn list_login_events(
        &self,
        request: &LoginEventRequest,
    ) -> Result<AsyncPagedResults<KeycloakEvent, &Self>> {
        AsyncPagedResults::first(self, request.criteria(), request.cursor()).await
    }

    /// First page of admin events, ready to walk.
    pub async fn list_admin_events(
        &self,
        request: &AdminEventRequest,
    ) -> Result<AsyncPagedResults<AdminEvent, &Self>> {
        AsyncPagedResults::first(self, request.criteria(), request.cursor()).await
    }
}

/// Map a non-success status to an [`ApiError`].
async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let err = match status {
        StatusCode::UNAUTHORIZED => ApiError::Unauthorized,
        StatusCode::FORBIDDEN => ApiError::Forbidden,
        StatusCode::NOT_FOUND => {
            let url = response.url().path().to_string();
            let body = response.text().await.unwrap_or_default();
            ApiError::NotFound(if body.is_empty() { url } else { body })
        }
        StatusCode::TOO_MANY_REQUESTS => {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(60);
            ApiError::RateLimit(Duration::from_secs(retry_after))
        }
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
            let error_msg = response
                .text()
                .await
                .unwrap_or_else(|_| "Bad request".to_string());
            ApiError::BadRequest(error_msg)
        }
        status if status.is_server_error() => {
            let error_msg = response
                .text()
                .await
                .unwrap_or_else(|_| format!("Server error: {}", status));
            ApiError::ServerError(error_msg)
        }
        _ => ApiError::InvalidResponse(format!("Unexpected status code: {}", status)),
    };

    Err(err.into())
}

#[async_trait]
impl<T> AsyncPageFetcher<T> for AtlanClient
where
    T: DeserializeOwned + Send + 'static,
{
    async fn fetch_page(
        &self,
        criteria: &SearchCriteria,
        cursor: PaginationCursor,
    ) -> Result<Page<T>> {
        let query = criteria.to_query_params(cursor);
        let body: PageBody<T> = self
            .get_json(&endpoints::segments(criteria.endpoint()), &query).await?;
        Ok(body.into_page())
    }
}

#[async_trait]
impl GroupApi for AtlanClient {
    async fn list_all_groups(&self) -> Result<Vec<AtlanGroup>> {
        let request = ListRequest::groups().limit(DIRECTORY_PAGE_SIZE);
        let results = self.list_groups(&request).await?;
        if let Some(total) = results.total_count() {
            debug!("Group directory reports {} groups", total);
        }
        results.collect_all().await
    }
}

#[async_trait]
impl SsoApi for AtlanClient {
    async fn list_group_mappings(&self, sso_alias: &str) -> Result<Vec<SsoMapper>> {
        let mappers: Vec<SsoMapper> = self
            .get_json(&endpoints::sso_mappers(sso_alias), &[])
            .await?;
        let total = mappers.len();

        let group_mappers: Vec<SsoMapper> = mappers
            .into_iter()
            .filter(SsoMapper::is_group_mapper)
            .collect();
        debug!(
            "{} of {} mappers on '{}' are group mappers",
            group_mappers.len(),
            total,
            sso_alias
        );

        Ok(group_mappers)
    }

    async fn delete_group_mapping(&self, sso_alias: &str, mapper_id: &str) -> Result<()> {
        self.send(
            Method::POST,
            &endpoints::sso_mapper_delete(sso_alias, mapper_id),
            &[],
        )
        .await?;
        Ok(())
    }
}
