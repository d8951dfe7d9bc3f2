//! SSO group-mapping display models

use serde::Serialize;
use tabled::Tabled;

use super::common::{DASH, or_dash};
use crate::client::models::SsoMapper;
use crate::sso::{MappingReport, OrphanedMapping, SuspiciousMapping};

/// One group mapper with its classification, for table/JSON output.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct MappingDisplay {
    #[tabled(rename = "MAPPER ID")]
    pub id: String,

    #[tabled(rename = "NAME")]
    pub name: String,

    /// Atlan group name recorded on the mapper
    #[tabled(rename = "GROUP")]
    pub group_name: String,

    /// Group name on the identity-provider side
    #[tabled(rename = "IDP GROUP")]
    pub idp_group: String,

    #[tabled(rename = "CREATED")]
    pub created: String,

    #[tabled(rename = "STATUS")]
    pub status: String,

    /// Orphan reasons or missing fields
    #[tabled(rename = "DETAIL")]
    pub detail: String,
}

impl MappingDisplay {
    fn base(mapper: &SsoMapper, status: &str, detail: String) -> Self {
        Self {
            id: or_dash(mapper.id.as_deref()),
            name: or_dash(mapper.name.as_deref()),
            group_name: or_dash(mapper.group_name()),
            idp_group: or_dash(mapper.attribute_value()),
            created: mapper
                .created_at()
                .map(|dt| dt.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| DASH.to_string()),
            status: status.to_string(),
            detail,
        }
    }

    /// A mapper that resolves to its group.
    pub fn valid(mapper: &SsoMapper) -> Self {
        Self::base(mapper, "valid", String::new())
    }

    /// Rows for every classified mapper: orphaned first, then suspicious,
    /// then valid.
    pub fn rows(report: &MappingReport) -> Vec<Self> {
        report
            .orphaned
            .iter()
            .map(Self::from)
            .chain(report.suspicious.iter().map(Self::from))
            .chain(report.valid.iter().map(Self::valid))
            .collect()
    }
}

impl From<&OrphanedMapping> for MappingDisplay {
    fn from(orphan: &OrphanedMapping) -> Self {
        Self::base(&orphan.mapper, "orphaned", orphan.reason_summary())
    }
}

impl From<&SuspiciousMapping> for MappingDisplay {
    fn from(suspicious: &SuspiciousMapping) -> Self {
        let missing = suspicious
            .missing
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        Self::base(
            &suspicious.mapper,
            "suspicious",
            format!("missing {}", missing),
        )
    }
}
