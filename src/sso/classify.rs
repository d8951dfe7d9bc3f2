//! Classification of SSO group mappers against the group directory

use std::collections::{BTreeSet, HashMap, HashSet};
use std::fmt;

use log::{debug, warn};
use serde::Serialize;

use crate::client::models::{AtlanGroup, SsoMapper};

/// Why a mapper no longer points at the group it was created for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum OrphanReason {
    /// The group ID embedded in the mapper name is not in the directory
    GroupIdNotFound,
    /// No current group carries the recorded group name
    GroupNameNotFound,
    /// The recorded name now belongs to a different group (renamed or recreated)
    GroupIdMismatch { current_id: String },
}

impl fmt::Display for OrphanReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrphanReason::GroupIdNotFound => write!(f, "group id not found"),
            OrphanReason::GroupNameNotFound => write!(f, "group name not found"),
            OrphanReason::GroupIdMismatch { current_id } => {
                write!(f, "group id mismatch (name now held by {})", current_id)
            }
        }
    }
}

/// Field a mapper needs before it can be classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingField {
    Name,
    Config,
    GroupName,
}

impl fmt::Display for MissingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let field = match self {
            MissingField::Name => "name",
            MissingField::Config => "config",
            MissingField::GroupName => "config.group",
        };
        write!(f, "{}", field)
    }
}

/// A mapper whose group reference no longer resolves.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrphanedMapping {
    pub mapper: SsoMapper,
    pub reasons: Vec<OrphanReason>,
}

impl OrphanedMapping {
    /// Reasons joined for a single log or table line.
    pub fn reason_summary(&self) -> String {
        self.reasons
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// A mapper missing the fields needed to classify it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SuspiciousMapping {
    pub mapper: SsoMapper,
    pub missing: Vec<MissingField>,
}

/// Result of classifying every mapper of an identity provider.
///
/// `valid`, `orphaned` and `suspicious` are disjoint; mappers excluded by a
/// group-name filter appear in none of them.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MappingReport {
    pub valid: Vec<SsoMapper>,
    pub orphaned: Vec<OrphanedMapping>,
    pub suspicious: Vec<SuspiciousMapping>,
    /// Group names held by more than one group in the directory
    pub duplicate_group_names: Vec<String>,
}

impl MappingReport {
    pub fn has_orphans(&self) -> bool {
        !self.orphaned.is_empty()
    }

    /// Number of mappers that were classified.
    pub fn total(&self) -> usize {
        self.valid.len() + self.orphaned.len() + self.suspicious.len()
    }
}

/// Missing fields of a mapper, empty when it can be classified.
fn missing_fields(mapper: &SsoMapper) -> Vec<MissingField> {
    let mut missing = Vec::new();
    if mapper.name.as_deref().is_none_or(str::is_empty) {
        missing.push(MissingField::Name);
    }
    if mapper.config.is_none() {
        missing.push(MissingField::Config);
    } else if mapper.group_name().is_none() {
        missing.push(MissingField::GroupName);
    }
    missing
}

/// Classify `mappings` against the group directory.
///
/// A mapper is valid when the group ID embedded in its name exists and is
/// the group currently holding the recorded group name. When
/// `target_group_name` is given, only mappers recorded against that name are
/// classified; incomplete mappers are always reported.
///
/// If several groups share a name the last one listed wins, and the name is
/// reported in [`MappingReport::duplicate_group_names`].
pub fn classify(
    groups: &[AtlanGroup],
    mappings: Vec<SsoMapper>,
    target_group_name: Option<&str>,
) -> MappingReport {
    let mut name_to_id: HashMap<&str, &str> = HashMap::with_capacity(groups.len());
    let mut ids: HashSet<&str> = HashSet::with_capacity(groups.len());
    let mut duplicates: BTreeSet<String> = BTreeSet::new();

    for group in groups {
        let Some(id) = group.id.as_deref() else {
            debug!("Ignoring group without id: {:?}", group.name);
            continue;
        };
        ids.insert(id);

        if let Some(name) = group.name.as_deref() {
            if let Some(previous) = name_to_id.insert(name, id) {
                if previous != id {
                    duplicates.insert(name.to_string());
                }
            }
        }
    }

    for name in &duplicates {
        warn!(
            "Group name '{}' is held by more than one group; using the last one listed",
            name
        );
    }

    let mut report = MappingReport {
        duplicate_group_names: duplicates.into_iter().collect(),
        ..Default::default()
    };

    for mapper in mappings {
        let missing = missing_fields(&mapper);
        if !missing.is_empty() {
            warn!(
                "Mapper {} is missing {}; cannot classify",
                mapper.id.as_deref().unwrap_or("<no id>"),
                missing
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", ")
            );
            report.suspicious.push(SuspiciousMapping { mapper, missing });
            continue;
        }

        let group_name = mapper.group_name().unwrap_or_default();
        if target_group_name.is_some_and(|target| target != group_name) {
            continue;
        }

        let embedded_id = mapper.embedded_group_id();
        let mut reasons = Vec::new();

        if let Some(id) = embedded_id {
            if !ids.contains(id) {
                reasons.push(OrphanReason::GroupIdNotFound);
            }
        }

        match name_to_id.get(group_name) {
            None => reasons.push(OrphanReason::GroupNameNotFound),
            Some(current_id) => {
                if embedded_id.is_some_and(|id| id != *current_id) {
                    reasons.push(OrphanReason::GroupIdMismatch {
                        current_id: current_id.to_string(),
                    });
                }
            }
        }

        if reasons.is_empty() {
            report.valid.push(mapper);
        } else {
            report.orphaned.push(OrphanedMapping { mapper, reasons });
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::models::SsoMapperConfig;

    fn mapping(id: &str, name: &str, group_name: &str) -> SsoMapper {
        SsoMapper {
            id: Some(id.to_string()),
            name: Some(name.to_string()),
            config: Some(SsoMapperConfig {
                group_name: Some(group_name.to_string()),
                attribute_value: Some(format!("idp-{}", group_name.to_lowercase())),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    fn sales() -> Vec<AtlanGroup> {
        vec![AtlanGroup::new("g1", "Sales")]
    }

    #[test]
    fn test_matching_mapping_is_valid() {
        let report = classify(&sales(), vec![mapping("m1", "g1--1000", "Sales")], None);

        assert_eq!(report.valid.len(), 1);
        assert!(report.orphaned.is_empty());
        assert!(report.suspicious.is_empty());
        assert!(!report.has_orphans());
    }

    #[test]
    fn test_recreated_group_is_id_mismatch() {
        let report = classify(&sales(), vec![mapping("m1", "g2--1000", "Sales")], None);

        assert_eq!(report.orphaned.len(), 1);
        let reasons = &report.orphaned[0].reasons;
        assert!(reasons.contains(&OrphanReason::GroupIdMismatch {
            current_id: "g1".to_string()
        }));
        // g2 no longer exists either
        assert!(reasons.contains(&OrphanReason::GroupIdNotFound));
    }

    #[test]
    fn test_renamed_group_is_name_not_found() {
        let report = classify(&sales(), vec![mapping("m1", "g1--1000", "Marketing")], None);

        assert_eq!(report.orphaned.len(), 1);
        assert_eq!(
            report.orphaned[0].reasons,
            vec![OrphanReason::GroupNameNotFound]
        );
    }

    #[test]
    fn test_missing_config_is_suspicious() {
        let mapper = SsoMapper {
            id: Some("m1".to_string()),
            name: Some("g1--1000".to_string()),
            config: None,
            ..Default::default()
        };

        let report = classify(&sales(), vec![mapper], None);

        assert_eq!(report.suspicious.len(), 1);
        assert_eq!(report.suspicious[0].missing, vec![MissingField::Config]);
        assert_eq!(report.total(), 1);
    }

    #[test]
    fn test_missing_name_and_blank_group_are_suspicious() {
        let mut nameless = mapping("m1", "", "Sales");
        nameless.name = None;
        let blank_group = mapping("m2", "g1--1000", "");

        let report = classify(&sales(), vec![nameless, blank_group], None);

        assert_eq!(report.suspicious.len(), 2);
        assert_eq!(report.suspicious[0].missing, vec![MissingField::Name]);
        assert_eq!(report.suspicious[1].missing, vec![MissingField::GroupName]);
    }

    #[test]
    fn test_unconventional_name_checks_group_name_only() {
        let report = classify(
            &sales(),
            vec![
                mapping("m1", "legacy-sales", "Sales"),
                mapping("m2", "legacy-ops", "Ops"),
            ],
            None,
        );

        assert_eq!(report.valid.len(), 1);
        assert_eq!(report.orphaned.len(), 1);
        assert_eq!(
            report.orphaned[0].reasons,
            vec![OrphanReason::GroupNameNotFound]
        );
    }

    #[test]
    fn test_group_name_filter_skips_other_mappings() {
        let groups = vec![AtlanGroup::new("g1", "Sales"), AtlanGroup::new("g2", "Ops")];
        let mut incomplete = mapping("m4", "g9--1", "x");
        incomplete.config = None;

        let report = classify(
            &groups,
            vec![
                mapping("m1", "g1--1000", "Sales"),
                mapping("m2", "g2--1000", "Ops"),
                mapping("m3", "g7--1000", "Ops"),
                incomplete,
            ],
            Some("Ops"),
        );

        assert_eq!(report.valid.len(), 1);
        assert_eq!(report.valid[0].id.as_deref(), Some("m2"));
        assert_eq!(report.orphaned.len(), 1);
        assert_eq!(report.orphaned[0].mapper.id.as_deref(), Some("m3"));
        assert_eq!(report.suspicious.len(), 1);
        assert_eq!(report.total(), 3);
    }

    #[test]
    fn test_every_mapping_classified_exactly_once() {
        let groups = vec![
            AtlanGroup::new("g1", "Sales"),
            AtlanGroup::new("g2", "Ops"),
            AtlanGroup::new("g3", "Finance"),
        ];
        let mut no_config = mapping("m6", "g1--1", "Sales");
        no_config.config = None;
        let mappings = vec![
            mapping("m1", "g1--1", "Sales"),
            mapping("m2", "g2--1", "Sales"),
            mapping("m3", "g9--1", "Ops"),
            mapping("m4", "g3--1", "Finance"),
            mapping("m5", "g3--1", "Legal"),
            no_config,
        ];

        let report = classify(&groups, mappings.clone(), None);

        let mut seen: Vec<String> = report
            .valid
            .iter()
            .chain(report.orphaned.iter().map(|o| &o.mapper))
            .chain(report.suspicious.iter().map(|s| &s.mapper))
            .filter_map(|m| m.id.clone())
            .collect();
        seen.sort();
        let mut expected: Vec<String> = mappings.iter().filter_map(|m| m.id.clone()).collect();
        expected.sort();

        assert_eq!(seen, expected);
        assert_eq!(report.valid.len(), 2);
        assert_eq!(report.orphaned.len(), 3);
        assert_eq!(report.suspicious.len(), 1);
    }

    #[test]
    fn test_duplicate_group_names_are_flagged_last_wins() {
        let groups = vec![AtlanGroup::new("g1", "Sales"), AtlanGroup::new("g2", "Sales")];

        let report = classify(
            &groups,
            vec![
                mapping("m1", "g1--1000", "Sales"),
                mapping("m2", "g2--1000", "Sales"),
            ],
            None,
        );

        assert_eq!(report.duplicate_group_names, vec!["Sales".to_string()]);
        assert_eq!(report.valid.len(), 1);
        assert_eq!(report.valid[0].id.as_deref(), Some("m2"));
        assert_eq!(
            report.orphaned[0].reasons,
            vec![OrphanReason::GroupIdMismatch {
                current_id: "g2".to_string()
            }]
        );
    }

    #[test]
    fn test_groups_without_id_are_ignored() {
        let groups = vec![AtlanGroup {
            name: Some("Sales".to_string()),
            ..Default::default()
        }];

        let report = classify(&groups, vec![mapping("m1", "g1--1000", "Sales")], None);

        assert_eq!(
            report.orphaned[0].reasons,
            vec![OrphanReason::GroupIdNotFound, OrphanReason::GroupNameNotFound]
        );
    }

    #[test]
    fn test_reason_display() {
        let orphan = OrphanedMapping {
            mapper: mapping("m1", "g2--1", "Sales"),
            reasons: vec![
                OrphanReason::GroupIdNotFound,
                OrphanReason::GroupIdMismatch {
                    current_id: "g1".to_string(),
                },
            ],
        };

        assert_eq!(
            orphan.reason_summary(),
            "group id not found; group id mismatch (name now held by g1)"
        );
    }

    #[test]
    fn test_report_serializes_reasons_with_tag() {
        let report = classify(&sales(), vec![mapping("m1", "g2--1000", "Sales")], None);
        let json = serde_json::to_value(&report).unwrap();

        let reasons = &json["orphaned"][0]["reasons"];
        assert_eq!(reasons[0]["reason"], "group_id_not_found");
        assert_eq!(reasons[1]["reason"], "group_id_mismatch");
        assert_eq!(reasons[1]["current_id"], "g1");
    }
}
