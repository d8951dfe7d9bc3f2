//! Group directory trait

use async_trait::async_trait;

use crate::client::models::AtlanGroup;
use crate::error::Result;

/// Read access to Atlan's group directory
#[async_trait]
pub trait GroupApi: Send + Sync {
    /// List every group in the tenant, walking all pages.
    ///
    /// All-or-nothing: a failure on any page fails the whole listing.
    async fn list_all_groups(&self) -> Result<Vec<AtlanGroup>>;
}
