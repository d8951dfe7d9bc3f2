//! SSO identity-provider mapper models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Mapper type Keycloak uses for SAML group mappings.
pub const GROUP_MAPPER_TYPE: &str = "saml-group-idp-mapper";

/// Separator between the group ID and the creation time in a mapper name.
pub const MAPPER_NAME_SEPARATOR: &str = "--";

/// Identity-provider mapper linking an external IdP group to an Atlan group.
///
/// Mappers created by Atlan are named `{group_id}--{creation_epoch_millis}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SsoMapper {
    /// Mapper ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Mapper name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Alias of the identity provider (e.g. `okta`, `azure`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identity_provider_alias: Option<String>,

    /// Mapper implementation type
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identity_provider_mapper: Option<String>,

    /// Mapping configuration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<SsoMapperConfig>,
}

/// Mapper configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SsoMapperConfig {
    /// Atlan group name at the time the mapping was created
    #[serde(default, rename = "group", skip_serializing_if = "Option::is_none")]
    pub group_name: Option<String>,

    /// Group name on the identity-provider side
    #[serde(
        default,
        rename = "attribute.value",
        skip_serializing_if = "Option::is_none"
    )]
    pub attribute_value: Option<String>,

    #[serde(
        default,
        rename = "attribute.name",
        skip_serializing_if = "Option::is_none"
    )]
    pub attribute_name: Option<String>,

    #[serde(
        default,
        rename = "attribute.friendly.name",
        skip_serializing_if = "Option::is_none"
    )]
    pub attribute_friendly_name: Option<String>,

    #[serde(
        default,
        rename = "are.attribute.values.regex",
        skip_serializing_if = "Option::is_none"
    )]
    pub attribute_values_regex: Option<String>,

    #[serde(default, rename = "syncMode", skip_serializing_if = "Option::is_none")]
    pub sync_mode: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<String>,
}

impl SsoMapper {
    /// Group ID embedded in the mapper name, if the name follows the
    /// `{group_id}--{millis}` convention.
    pub fn embedded_group_id(&self) -> Option<&str> {
        self.name
            .as_deref()?
            .split_once(MAPPER_NAME_SEPARATOR)
            .map(|(id, _)| id)
    }

    /// Creation time encoded in the mapper name.
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        let (_, millis) = self.name.as_deref()?.split_once(MAPPER_NAME_SEPARATOR)?;
        DateTime::from_timestamp_millis(millis.parse().ok()?)
    }

    /// Recorded Atlan group name, treating blank values as absent.
    pub fn group_name(&self) -> Option<&str> {
        self.config
            .as_ref()?
            .group_name
            .as_deref()
            .filter(|name| !name.is_empty())
    }

    /// Group name on the identity-provider side.
    pub fn attribute_value(&self) -> Option<&str> {
        self.config.as_ref()?.attribute_value.as_deref()
    }

    /// Whether this mapper maps groups (as opposed to attributes or roles).
    pub fn is_group_mapper(&self) -> bool {
        self.identity_provider_mapper
            .as_deref()
            .is_none_or(|kind| kind == GROUP_MAPPER_TYPE)
    }
}
