//! Group display model

use serde::Serialize;
use tabled::Tabled;

use super::common::{or_dash, truncate_string};
use crate::client::models::AtlanGroup;

/// Group display model for table/JSON output.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct GroupDisplay {
    #[tabled(rename = "GROUP ID")]
    pub id: String,

    #[tabled(rename = "NAME")]
    pub name: String,

    #[tabled(rename = "ALIAS")]
    pub alias: String,

    #[tabled(rename = "MEMBERS")]
    pub members: String,

    /// Whether new users join this group automatically
    #[tabled(rename = "DEFAULT")]
    pub default: String,

    #[tabled(rename = "DESCRIPTION")]
    pub description: String,
}

impl From<AtlanGroup> for GroupDisplay {
    fn from(group: AtlanGroup) -> Self {
        let default = if group.is_default() { "yes" } else { "" };
        let description = group
            .description()
            .map(|d| truncate_string(d, 40))
            .unwrap_or_default();

        Self {
            id: or_dash(group.id.as_deref()),
            name: or_dash(group.name.as_deref()),
            alias: or_dash(group.alias.as_deref()),
            members: group
                .user_count
                .map(|n| n.to_string())
                .unwrap_or_else(|| "--".to_string()),
            default: default.to_string(),
            description,
        }
    }
}
