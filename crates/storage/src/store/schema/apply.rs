#![forbid(unsafe_code)]

use super::detect::contains_column;
use super::{rebuild, sql};
use crate::store::error::MigrationError;
use crate::store::support::{column_names, count_rows, quote_ident};
use crate::store::types::{ChangeOutcome, ChangeReport, ChangeStep, ColumnDef, SchemaChange};
use rusqlite::Connection;

/// Runs the step of a change whose predicate reported "not applied". Every
/// step commits as one transaction or not at all.
pub(super) fn apply_step(
    conn: &mut Connection,
    change: &'static SchemaChange,
) -> Result<ChangeReport, MigrationError> {
    match change.step {
        ChangeStep::CreateTable { ddl } => create_table(conn, change, ddl),
        ChangeStep::AddColumns { columns } => add_columns(conn, change, columns),
        ChangeStep::RebuildTable { ddl, fills } => rebuild::rebuild_table(conn, change, ddl, fills),
        ChangeStep::Backfill { apply_sql, .. } => backfill(conn, change, apply_sql),
    }
}

fn create_table(
    conn: &mut Connection,
    change: &'static SchemaChange,
    ddl: &str,
) -> Result<ChangeReport, MigrationError> {
    let tx = conn
        .transaction()
        .map_err(MigrationError::schema(change.name))?;
    tx.execute_batch(&sql::render(ddl, change.table))
        .map_err(MigrationError::schema(change.name))?;
    tx.commit().map_err(MigrationError::schema(change.name))?;
    Ok(ChangeReport::new(change, ChangeOutcome::Applied))
}

fn add_columns(
    conn: &mut Connection,
    change: &'static SchemaChange,
    columns: &[ColumnDef],
) -> Result<ChangeReport, MigrationError> {
    let tx = conn
        .transaction()
        .map_err(MigrationError::schema(change.name))?;
    let rows = count_rows(&tx, change.table).map_err(MigrationError::schema(change.name))?;
    let present = column_names(&tx, change.table).map_err(MigrationError::schema(change.name))?;
    for column in columns {
        if contains_column(&present, column.name) {
            continue;
        }
        let sql = format!(
            "ALTER TABLE {} ADD COLUMN {} {}",
            quote_ident(change.table),
            quote_ident(column.name),
            column.decl
        );
        tx.execute(&sql, [])
            .map_err(MigrationError::schema(change.name))?;
    }
    tx.commit().map_err(MigrationError::schema(change.name))?;

    let mut report = ChangeReport::new(change, ChangeOutcome::Applied);
    report.rows_before = Some(rows);
    report.rows_after = Some(rows);
    Ok(report)
}

fn backfill(
    conn: &mut Connection,
    change: &'static SchemaChange,
    apply_sql: &str,
) -> Result<ChangeReport, MigrationError> {
    let tx = conn
        .transaction()
        .map_err(MigrationError::schema(change.name))?;
    let affected = tx
        .execute(apply_sql, [])
        .map_err(MigrationError::schema(change.name))?;
    tx.commit().map_err(MigrationError::schema(change.name))?;

    let mut report = ChangeReport::new(change, ChangeOutcome::Applied);
    report.rows_affected = Some(affected);
    Ok(report)
}
