//! User display model

use serde::Serialize;
use tabled::Tabled;

use super::common::{format_millis, or_dash};
use crate::client::models::AtlanUser;

/// User display model for table/JSON output.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct UserDisplay {
    #[tabled(rename = "USER ID")]
    pub id: String,

    #[tabled(rename = "USERNAME")]
    pub username: String,

    #[tabled(rename = "EMAIL")]
    pub email: String,

    /// First and last name
    #[tabled(rename = "NAME")]
    pub name: String,

    #[tabled(rename = "ROLE")]
    pub role: String,

    #[tabled(rename = "ENABLED")]
    pub enabled: String,

    #[tabled(rename = "CREATED")]
    pub created: String,
}

impl From<AtlanUser> for UserDisplay {
    fn from(user: AtlanUser) -> Self {
        let name = user.full_name();
        let enabled = match user.enabled {
            Some(true) => "yes",
            Some(false) => "no",
            None => "--",
        };

        Self {
            id: or_dash(user.id.as_deref()),
            username: or_dash(user.username.as_deref()),
            email: or_dash(user.email.as_deref()),
            name: or_dash(name.as_deref()),
            role: or_dash(user.workspace_role.as_deref()),
            enabled: enabled.to_string(),
            created: format_millis(user.created_timestamp),
        }
    }
}
