#![forbid(unsafe_code)]

mod apply;
mod catalog;
mod detect;
mod rebuild;
mod sql;

use super::SqliteStore;
use super::error::MigrationError;
use super::types::{ChangeOutcome, ChangeReport, ChangeStatus, SchemaChange};
use tracing::{info, warn};

/// Every known schema change in declared order.
pub fn schema_catalog() -> &'static [SchemaChange] {
    catalog::CATALOG
}

pub fn find_change(name: &str) -> Option<&'static SchemaChange> {
    catalog::CATALOG.iter().find(|change| change.name == name)
}

impl SqliteStore {
    /// Detection predicate of `change` against this store. A backfill whose
    /// inputs are missing counts as not applied.
    pub fn schema_is_applied(&self, change: &SchemaChange) -> Result<bool, MigrationError> {
        detect::is_applied(&self.conn, change)
    }

    pub fn schema_status(&self) -> Result<Vec<ChangeStatus>, MigrationError> {
        let mut status = Vec::with_capacity(catalog::CATALOG.len());
        for change in catalog::CATALOG {
            status.push(ChangeStatus {
                name: change.name,
                kind: change.kind(),
                table: change.table,
                applied: detect::is_applied(&self.conn, change)?,
                depends_on: change.depends_on,
            });
        }
        Ok(status)
    }

    /// Applies one named change: intermediate-state check, dependency gate,
    /// detection, then the change itself. Nothing is mutated unless every
    /// check before the last step passes.
    pub fn schema_apply(&mut self, name: &str) -> Result<ChangeReport, MigrationError> {
        let change =
            find_change(name).ok_or_else(|| MigrationError::UnknownChange(name.to_string()))?;

        if let Some(table) = detect::leftover_table(&self.conn, change)? {
            warn!(change = change.name, table = %table, "intermediate table present");
            return Err(MigrationError::IntermediateState {
                change: change.name,
                table,
            });
        }

        let missing = detect::missing_dependencies(&self.conn, change)?;
        if !missing.is_empty() {
            warn!(change = change.name, missing = ?missing, "dependencies not applied");
            return Err(MigrationError::Dependency {
                change: change.name,
                missing,
            });
        }

        if detect::is_applied(&self.conn, change)? {
            info!(
                change = change.name,
                kind = change.kind().as_str(),
                table = change.table,
                "schema change already applied"
            );
            return Ok(ChangeReport::new(change, ChangeOutcome::AlreadyApplied));
        }

        let report = apply::apply_step(&mut self.conn, change)?;
        info!(
            change = change.name,
            kind = change.kind().as_str(),
            table = change.table,
            rows_before = ?report.rows_before,
            rows_after = ?report.rows_after,
            rows_affected = ?report.rows_affected,
            "schema change applied"
        );
        Ok(report)
    }

    /// Walks the catalog front to back and stops at the first failure.
    /// Changes committed before the failure stay committed.
    pub fn schema_apply_pending(&mut self) -> Result<Vec<ChangeReport>, MigrationError> {
        let mut reports = Vec::with_capacity(catalog::CATALOG.len());
        for change in catalog::CATALOG {
            reports.push(self.schema_apply(change.name)?);
        }
        Ok(reports)
    }
}
