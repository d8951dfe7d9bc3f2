//! SSO group-mapping diagnostics
//!
//! Identity-provider group mappers are named `{group_id}--{created_millis}`
//! and record the Atlan group name they were created for. When a group is
//! deleted, renamed or recreated the mapper silently stops working. This
//! module finds those mappers and can delete them.

mod classify;
mod diagnostic;

pub use classify::{
    MappingReport, MissingField, OrphanReason, OrphanedMapping, SuspiciousMapping, classify,
};
pub use diagnostic::{
    CleanupMode, CleanupSummary, ConfirmDeletion, DiagnosticPhase, FailedDeletion,
    OrphanDiagnostic,
};
