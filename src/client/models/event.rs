//! Keycloak login and admin event models

use serde::{Deserialize, Serialize};

use crate::client::endpoints;
use crate::client::pagination::{
    DEFAULT_EVENT_PAGE_SIZE, PageParamStyle, PaginationCursor, SearchCriteria,
};

/// Login event (LOGIN, LOGOUT, LOGIN_ERROR, ...)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeycloakEvent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub realm_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,

    /// Event time (epoch milliseconds)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<i64>,

    /// Event type
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub event_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,

    /// Free-form event details
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Who performed an admin operation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub realm_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

/// Admin event (CREATE, UPDATE, DELETE, ACTION on a realm resource)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminEvent {
    /// Event time (epoch milliseconds)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub realm_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_details: Option<AuthDetails>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_path: Option<String>,

    /// JSON representation of the resource after the operation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub representation: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Filters for the login event listing
#[derive(Debug, Clone)]
pub struct LoginEventRequest {
    pub client: Option<String>,
    pub ip_address: Option<String>,
    /// Inclusive start date (`YYYY-MM-DD`)
    pub date_from: Option<String>,
    /// Inclusive end date (`YYYY-MM-DD`)
    pub date_to: Option<String>,
    pub types: Vec<String>,
    pub user_id: Option<String>,
    pub offset: usize,
    pub size: usize,
}

impl Default for LoginEventRequest {
    fn default() -> Self {
        Self {
            client: None,
            ip_address: None,
            date_from: None,
            date_to: None,
            types: Vec::new(),
            user_id: None,
            offset: 0,
            size: DEFAULT_EVENT_PAGE_SIZE,
        }
    }
}

impl LoginEventRequest {
    pub fn criteria(&self) -> SearchCriteria {
        let mut criteria = SearchCriteria::new(endpoints::LOGIN_EVENTS, PageParamStyle::FirstMax)
            .param_opt("client", self.client.as_deref())
            .param_opt("ipAddress", self.ip_address.as_deref())
            .param_opt("dateFrom", self.date_from.as_deref())
            .param_opt("dateTo", self.date_to.as_deref())
            .param_opt("user", self.user_id.as_deref());

        for event_type in &self.types {
            criteria = criteria.param("type", event_type.clone());
        }
        criteria
    }

    pub fn cursor(&self) -> PaginationCursor {
        PaginationCursor::new(self.offset, self.size)
    }
}

/// Filters for the admin event listing
#[derive(Debug, Clone)]
pub struct AdminEventRequest {
    pub client_id: Option<String>,
    pub ip_address: Option<String>,
    pub realm_id: Option<String>,
    pub user_id: Option<String>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    pub operation_types: Vec<String>,
    pub resource_path: Option<String>,
    pub resource_types: Vec<String>,
    pub offset: usize,
    pub size: usize,
}

impl Default for AdminEventRequest {
    fn default() -> Self {
        Self {
            client_id: None,
            ip_address: None,
            realm_id: None,
            user_id: None,
            date_from: None,
            date_to: None,
            operation_types: Vec::new(),
            resource_path: None,
            resource_types: Vec::new(),
            offset: 0,
            size: DEFAULT_EVENT_PAGE_SIZE,
        }
    }
}

impl AdminEventRequest {
    pub fn criteria(&self) -> SearchCriteria {
        let mut criteria = SearchCriteria::new(endpoints::ADMIN_EVENTS, PageParamStyle::FirstMax)
            .param_opt("authClient", self.client_id.as_deref())
            .param_opt("authIpAddress", self.ip_address.as_deref())
            .param_opt("authRealm", self.realm_id.as_deref())
            .param_opt("authUser", self.user_id.as_deref())
            .param_opt("dateFrom", self.date_from.as_deref())
            .param_opt("dateTo", self.date_to.as_deref())
            .param_opt("resourcePath", self.resource_path.as_deref());

        for operation in &self.operation_types {
            criteria = criteria.param("operationTypes", operation.clone());
        }
        for resource in &self.resource_types {
            criteria = criteria.param("resourceTypes", resource.clone());
        }
        criteria
    }

    pub fn cursor(&self) -> PaginationCursor {
        PaginationCursor::new(self.offset, self.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_event_deserializes() {
        let json = r#"{
            "clientId": "atlan-frontend",
            "ipAddress": "10.0.0.1",
            "time": 1736942400000,
            "type": "LOGIN",
            "userId": "u-1",
            "details": {"auth_method": "openid-connect"}
        }"#;

        let event: KeycloakEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.event_type.as_deref(), Some("LOGIN"));
        assert_eq!(event.client_id.as_deref(), Some("atlan-frontend"));
        assert!(event.details.is_some());
    }

    #[test]
    fn test_admin_event_deserializes() {
        let json = r#"{
            "time": 1736942400000,
            "operationType": "DELETE",
            "resourceType": "GROUP",
            "resourcePath": "groups/g-1",
            "authDetails": {"userId": "u-9", "ipAddress": "10.0.0.2"}
        }"#;

        let event: AdminEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.operation_type.as_deref(), Some("DELETE"));
        assert_eq!(
            event.auth_details.and_then(|a| a.user_id).as_deref(),
            Some("u-9")
        );
    }

    #[test]
    fn test_login_event_request_params() {
        let request = LoginEventRequest {
            types: vec!["LOGIN".to_string(), "LOGIN_ERROR".to_string()],
            user_id: Some("u-1".to_string()),
            date_from: Some("2025-01-01".to_string()),
            ..Default::default()
        };
        let params = request.criteria().to_query_params(request.cursor());

        assert_eq!(request.criteria().endpoint(), endpoints::LOGIN_EVENTS);
        assert!(params.contains(&("type", "LOGIN".to_string())));
        assert!(params.contains(&("type", "LOGIN_ERROR".to_string())));
        assert!(params.contains(&("user", "u-1".to_string())));
        assert!(params.contains(&("dateFrom", "2025-01-01".to_string())));
        assert!(params.contains(&("first", "0".to_string())));
        assert!(params.contains(&("max", "100".to_string())));
        assert!(!params.iter().any(|(k, _)| *k == "client"));
    }

    #[test]
    fn test_admin_event_request_params() {
        let request = AdminEventRequest {
            operation_types: vec!["DELETE".to_string()],
            resource_types: vec!["GROUP".to_string()],
            size: 10,
            ..Default::default()
        };
        let params = request.criteria().to_query_params(request.cursor());

        assert!(params.contains(&("operationTypes", "DELETE".to_string())));
        assert!(params.contains(&("resourceTypes", "GROUP".to_string())));
        assert!(params.contains(&("max", "10".to_string())));
    }
}
