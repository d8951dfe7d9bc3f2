//! API trait definitions split by responsibility
//!
//! - [`GroupApi`] - Atlan's group directory
//! - [`SsoApi`] - identity-provider group mappings
//!
//! Paged listings (groups, users, events) go through
//! [`AsyncPageFetcher`](super::pagination::AsyncPageFetcher) instead.

mod group;
mod sso;

pub use group::GroupApi;
pub use sso::SsoApi;
