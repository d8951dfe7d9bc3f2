//! Atlan admin API data models
//!
//! Models are organized by resource type. Every field the API may omit is
//! optional so a partially populated record never fails a whole page.

mod event;
mod group;
mod sso;
mod user;

pub use event::{AdminEvent, AdminEventRequest, AuthDetails, KeycloakEvent, LoginEventRequest};
pub use group::{AtlanGroup, GroupAttributes};
pub use sso::{GROUP_MAPPER_TYPE, MAPPER_NAME_SEPARATOR, SsoMapper, SsoMapperConfig};
pub use user::AtlanUser;
