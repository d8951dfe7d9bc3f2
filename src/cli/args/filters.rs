//! Filter argument types for event listings

use chrono::NaiveDate;
use clap::Args;

use crate::client::models::{AdminEventRequest, LoginEventRequest};

/// Validate a `YYYY-MM-DD` date argument.
fn parse_date(value: &str) -> Result<String, String> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(|d| d.format("%Y-%m-%d").to_string())
        .map_err(|_| format!("expected a date as YYYY-MM-DD, got '{}'", value))
}

/// Filters for `event list`.
#[derive(Args, Debug, Clone, Default)]
pub struct LoginEventFilterArgs {
    /// Event type (repeatable), e.g. LOGIN, LOGOUT, LOGIN_ERROR
    #[arg(long = "type", short = 't')]
    pub types: Vec<String>,

    /// Only events of this user ID
    #[arg(long)]
    pub user: Option<String>,

    /// Only events from this client ID
    #[arg(long)]
    pub client: Option<String>,

    /// Only events from this IP address
    #[arg(long)]
    pub ip: Option<String>,

    /// Start date (YYYY-MM-DD, inclusive)
    #[arg(long, value_parser = parse_date)]
    pub from: Option<String>,

    /// End date (YYYY-MM-DD, inclusive)
    #[arg(long, value_parser = parse_date)]
    pub to: Option<String>,
}

impl LoginEventFilterArgs {
    pub fn to_request(&self, offset: usize, size: usize) -> LoginEventRequest {
        LoginEventRequest {
            client: self.client.clone(),
            ip_address: self.ip.clone(),
            date_from: self.from.clone(),
            date_to: self.to.clone(),
            types: self.types.clone(),
            user_id: self.user.clone(),
            offset,
            size,
        }
    }
}

/// Filters for `event admin`.
#[derive(Args, Debug, Clone, Default)]
pub struct AdminEventFilterArgs {
    /// Operation type (repeatable): CREATE, UPDATE, DELETE, ACTION
    #[arg(long = "operation-type")]
    pub operation_types: Vec<String>,

    /// Resource type (repeatable), e.g. GROUP, USER, IDENTITY_PROVIDER_MAPPER
    #[arg(long = "resource-type")]
    pub resource_types: Vec<String>,

    /// Resource path pattern, e.g. 'groups/*'
    #[arg(long)]
    pub resource_path: Option<String>,

    /// Only operations performed by this user ID
    #[arg(long)]
    pub user: Option<String>,

    /// Start date (YYYY-MM-DD, inclusive)
    #[arg(long, value_parser = parse_date)]
    pub from: Option<String>,

    /// End date (YYYY-MM-DD, inclusive)
    #[arg(long, value_parser = parse_date)]
    pub to: Option<String>,
}

impl AdminEventFilterArgs {
    pub fn to_request(&self, offset: usize, size: usize) -> AdminEventRequest {
        AdminEventRequest {
            user_id: self.user.clone(),
            date_from: self.from.clone(),
            date_to: self.to.clone(),
            operation_types: self.operation_types.clone(),
            resource_path: self.resource_path.clone(),
            resource_types: self.resource_types.clone(),
            offset,
            size,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date("2025-01-15").unwrap(), "2025-01-15");
        assert!(parse_date("15/01/2025").is_err());
        assert!(parse_date("2025-02-30").is_err());
    }

    #[test]
    fn test_login_filters_to_request() {
        let args = LoginEventFilterArgs {
            types: vec!["LOGIN_ERROR".to_string()],
            user: Some("u1".to_string()),
            ..Default::default()
        };

        let request = args.to_request(0, 25);

        assert_eq!(request.types, vec!["LOGIN_ERROR".to_string()]);
        assert_eq!(request.user_id.as_deref(), Some("u1"));
        assert_eq!(request.size, 25);
    }

    #[test]
    fn test_admin_filters_to_request() {
        let args = AdminEventFilterArgs {
            operation_types: vec!["DELETE".to_string()],
            resource_types: vec!["GROUP".to_string()],
            ..Default::default()
        };

        let request = args.to_request(10, 50);

        assert_eq!(request.operation_types, vec!["DELETE".to_string()]);
        assert_eq!(request.resource_types, vec!["GROUP".to_string()]);
        assert_eq!(request.offset, 10);
        assert!(request.client_id.is_none());
    }
}
