//! Login and admin event display models

use serde::Serialize;
use tabled::Tabled;

use super::common::{format_millis, or_dash, truncate_string};
use crate::client::models::{AdminEvent, KeycloakEvent};

/// Login event display model for table/JSON output.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct LoginEventDisplay {
    #[tabled(rename = "TIME")]
    pub time: String,

    #[tabled(rename = "TYPE")]
    pub event_type: String,

    #[tabled(rename = "USER ID")]
    pub user_id: String,

    #[tabled(rename = "CLIENT")]
    pub client: String,

    #[tabled(rename = "IP ADDRESS")]
    pub ip_address: String,
}

impl From<KeycloakEvent> for LoginEventDisplay {
    fn from(event: KeycloakEvent) -> Self {
        Self {
            time: format_millis(event.time),
            event_type: or_dash(event.event_type.as_deref()),
            user_id: or_dash(event.user_id.as_deref()),
            client: or_dash(event.client_id.as_deref()),
            ip_address: or_dash(event.ip_address.as_deref()),
        }
    }
}

/// Admin event display model for table/JSON output.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct AdminEventDisplay {
    #[tabled(rename = "TIME")]
    pub time: String,

    #[tabled(rename = "OPERATION")]
    pub operation: String,

    #[tabled(rename = "RESOURCE TYPE")]
    pub resource_type: String,

    #[tabled(rename = "RESOURCE PATH")]
    pub resource_path: String,

    /// User that performed the operation
    #[tabled(rename = "BY")]
    pub actor: String,
}

impl From<AdminEvent> for AdminEventDisplay {
    fn from(event: AdminEvent) -> Self {
        let actor = event.auth_details.as_ref().and_then(|a| a.user_id.as_deref());

        Self {
            time: format_millis(event.time),
            operation: or_dash(event.operation_type.as_deref()),
            resource_type: or_dash(event.resource_type.as_deref()),
            resource_path: truncate_string(&or_dash(event.resource_path.as_deref()), 50),
            actor: or_dash(actor),
        }
    }
}
