//! Display model implementations for table and JSON output
//!
//! Display models transform API response types into CLI-friendly formats
//! with appropriate column names and serialization.

pub mod common;
mod event;
mod group;
mod sso;
mod user;

pub use event::{AdminEventDisplay, LoginEventDisplay};
pub use group::GroupDisplay;
pub use sso::MappingDisplay;
pub use user::UserDisplay;
