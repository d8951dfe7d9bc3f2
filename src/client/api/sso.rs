//! SSO group-mapping trait

use async_trait::async_trait;

use crate::client::models::SsoMapper;
use crate::error::Result;

/// Group mappings of an external identity provider
#[async_trait]
pub trait SsoApi: Send + Sync {
    /// List the group mappers configured for an identity provider.
    async fn list_group_mappings(&self, sso_alias: &str) -> Result<Vec<SsoMapper>>;

    /// Delete one group mapper.
    ///
    /// Deleting an already-absent mapper is not special-cased; whatever the
    /// server answers is returned as-is.
    async fn delete_group_mapping(&self, sso_alias: &str, mapper_id: &str) -> Result<()>;
}
