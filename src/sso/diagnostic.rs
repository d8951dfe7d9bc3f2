//! Orphaned SSO group-mapping diagnostic

use std::fmt;

use log::{debug, info, warn};
use serde::Serialize;

use super::classify::{MappingReport, OrphanedMapping, classify};
use crate::client::api::{GroupApi, SsoApi};
use crate::error::Result;

/// Where a diagnostic run currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticPhase {
    FetchingGroups,
    FetchingMappings,
    Classifying,
    Reporting,
    Reconciling,
    Done,
}

impl fmt::Display for DiagnosticPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DiagnosticPhase::FetchingGroups => "fetching groups",
            DiagnosticPhase::FetchingMappings => "fetching mappings",
            DiagnosticPhase::Classifying => "classifying",
            DiagnosticPhase::Reporting => "reporting",
            DiagnosticPhase::Reconciling => "reconciling",
            DiagnosticPhase::Done => "done",
        };
        write!(f, "{}", name)
    }
}

/// Per-mapping confirmation for interactive cleanup.
pub trait ConfirmDeletion: Send {
    /// Whether `mapping` should be deleted. An error aborts the cleanup.
    fn confirm(&mut self, mapping: &OrphanedMapping) -> Result<bool>;
}

/// How cleanup decides whether to delete each orphaned mapping.
pub enum CleanupMode<'c> {
    /// Ask before every deletion
    Interactive(&'c mut dyn ConfirmDeletion),
    /// Delete everything without asking
    Batch,
}

/// A deletion that failed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FailedDeletion {
    pub mapper_id: Option<String>,
    pub mapper_name: Option<String>,
    pub error: String,
}

/// Outcome of a cleanup run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CleanupSummary {
    /// Mappings actually deleted
    pub deleted: usize,
    /// Mappings the user chose to keep
    pub skipped: usize,
    pub failed: Vec<FailedDeletion>,
}

/// Cross-references an identity provider's group mappers with the group
/// directory and deletes the ones that no longer resolve.
///
/// Any fetch failure aborts the run and leaves [`phase`](Self::phase) at the
/// step that failed.
pub struct OrphanDiagnostic<'a, C: ?Sized> {
    client: &'a C,
    phase: DiagnosticPhase,
}

impl<'a, C> OrphanDiagnostic<'a, C>
where
    C: GroupApi + SsoApi + ?Sized,
{
    pub fn new(client: &'a C) -> Self {
        Self {
            client,
            phase: DiagnosticPhase::FetchingGroups,
        }
    }

    pub fn phase(&self) -> DiagnosticPhase {
        self.phase
    }

    fn enter(&mut self, phase: DiagnosticPhase) {
        debug!("SSO diagnostic: {} -> {}", self.phase, phase);
        self.phase = phase;
    }

    /// Fetch the group directory and the mappers of `sso_alias`, then
    /// classify every mapper.
    pub async fn diagnose(
        &mut self,
        sso_alias: &str,
        target_group_name: Option<&str>,
    ) -> Result<MappingReport> {
        self.enter(DiagnosticPhase::FetchingGroups);
        let groups = self.client.list_all_groups().await?;
        info!("Loaded {} groups from the directory", groups.len());

        self.enter(DiagnosticPhase::FetchingMappings);
        let mappings = self.client.list_group_mappings(sso_alias).await?;
        info!("Loaded {} group mappings for '{}'", mappings.len(), sso_alias);

        self.enter(DiagnosticPhase::Classifying);
        let report = classify(&groups, mappings, target_group_name);

        self.enter(DiagnosticPhase::Reporting);
        for orphan in &report.orphaned {
            info!(
                "Orphaned mapping {} ({}): {}",
                orphan.mapper.id.as_deref().unwrap_or("<no id>"),
                orphan.mapper.name.as_deref().unwrap_or("<no name>"),
                orphan.reason_summary()
            );
        }
        info!(
            "{} valid, {} orphaned, {} suspicious",
            report.valid.len(),
            report.orphaned.len(),
            report.suspicious.len()
        );

        self.enter(DiagnosticPhase::Done);
        Ok(report)
    }

    /// Delete orphaned mappings from `sso_alias`.
    ///
    /// A failed deletion is logged and recorded, and the remaining mappings
    /// are still processed. A confirmation error aborts the run.
    pub async fn cleanup(
        &mut self,
        sso_alias: &str,
        orphaned: &[OrphanedMapping],
        mut mode: CleanupMode<'_>,
    ) -> Result<CleanupSummary> {
        self.enter(DiagnosticPhase::Reconciling);
        let mut summary = CleanupSummary::default();

        for orphan in orphaned {
            let mapper = &orphan.mapper;
            let Some(mapper_id) = mapper.id.as_deref() else {
                warn!(
                    "Cannot delete mapping {} without an id",
                    mapper.name.as_deref().unwrap_or("<no name>")
                );
                summary.failed.push(FailedDeletion {
                    mapper_id: None,
                    mapper_name: mapper.name.clone(),
                    error: "mapping has no id".to_string(),
                });
                continue;
            };

            if let CleanupMode::Interactive(confirmer) = &mut mode {
                if !confirmer.confirm(orphan)? {
                    debug!("Keeping mapping {}", mapper_id);
                    summary.skipped += 1;
                    continue;
                }
            }

            match self.client.delete_group_mapping(sso_alias, mapper_id).await {
                Ok(()) => {
                    info!("Deleted mapping {}", mapper_id);
                    summary.deleted += 1;
                }
                Err(err) => {
                    warn!("Failed to delete mapping {}: {}", mapper_id, err);
                    summary.failed.push(FailedDeletion {
                        mapper_id: Some(mapper_id.to_string()),
                        mapper_name: mapper.name.clone(),
                        error: err.to_string(),
                    });
                }
            }
        }

        self.enter(DiagnosticPhase::Done);
        Ok(summary)
    }
}
