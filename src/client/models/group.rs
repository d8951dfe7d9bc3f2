//! Group models

use serde::{Deserialize, Serialize};

/// Atlan group as returned by the admin groups endpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AtlanGroup {
    /// Group ID (GUID)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Internal group name, unique at any point in time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Human-readable display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,

    /// Keycloak path of the group (e.g. `/sales`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// Number of members
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_count: Option<u64>,

    /// Extended attributes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<GroupAttributes>,

    /// Workspace roles granted to members
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub roles: Vec<String>,

    /// Personas the group is attached to
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub personas: Vec<serde_json::Value>,

    /// Purposes the group is attached to
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub purposes: Vec<serde_json::Value>,
}

/// Group attributes. Keycloak stores every attribute as a list of strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupAttributes {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alias: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub description: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub is_default: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub created_at: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub created_by: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub updated_at: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub updated_by: Vec<String>,
}

impl AtlanGroup {
    /// Convenience constructor for a group known by ID and name.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            name: Some(name.into()),
            ..Default::default()
        }
    }

    /// Whether this is one of the tenant's default groups.
    pub fn is_default(&self) -> bool {
        self.attributes
            .as_ref()
            .and_then(|a| a.is_default.first())
            .is_some_and(|v| v == "true")
    }

    /// First description attribute, if any.
    pub fn description(&self) -> Option<&str> {
        self.attributes
            .as_ref()
            .and_then(|a| a.description.first())
            .map(String::as_str)
    }
}
