#![forbid(unsafe_code)]

use super::{find_change, sql};
use crate::store::error::MigrationError;
use crate::store::support::{column_names, table_exists};
use crate::store::types::{ChangeStep, SchemaChange};
use rusqlite::Connection;

/// Suffixes of the tables a rebuild leaves behind when it dies halfway.
pub(super) const OLD_SUFFIX: &str = "_old";
pub(super) const REBUILD_SUFFIX: &str = "__rebuild";

/// Detection predicate for one change. Reads structure only; never mutates.
pub(super) fn is_applied(conn: &Connection, change: &SchemaChange) -> Result<bool, MigrationError> {
    match change.step {
        ChangeStep::CreateTable { .. } => {
            table_exists(conn, change.table).map_err(MigrationError::schema(change.name))
        }
        ChangeStep::AddColumns { columns } => {
            let present =
                column_names(conn, change.table).map_err(MigrationError::schema(change.name))?;
            Ok(!present.is_empty()
                && columns
                    .iter()
                    .all(|column| contains_column(&present, column.name)))
        }
        ChangeStep::RebuildTable { ddl, .. } => {
            let present =
                column_names(conn, change.table).map_err(MigrationError::schema(change.name))?;
            if present.is_empty() {
                return Ok(false);
            }
            let target = target_columns(ddl).map_err(MigrationError::schema(change.name))?;
            Ok(target
                .iter()
                .all(|column| contains_column(&present, column)))
        }
        ChangeStep::Backfill { pending_sql, .. } => {
            if !missing_dependencies(conn, change)?.is_empty() {
                return Ok(false);
            }
            let pending: i64 = conn
                .query_row(pending_sql, [], |row| row.get(0))
                .map_err(MigrationError::schema(change.name))?;
            Ok(pending == 0)
        }
    }
}

/// Declared prerequisites whose own predicate says "not applied".
pub(super) fn missing_dependencies(
    conn: &Connection,
    change: &SchemaChange,
) -> Result<Vec<&'static str>, MigrationError> {
    let mut missing = Vec::new();
    for dependency in change.depends_on {
        let applied = match find_change(dependency) {
            Some(dependency) => is_applied(conn, dependency)?,
            None => false,
        };
        if !applied {
            missing.push(*dependency);
        }
    }
    Ok(missing)
}

/// First intermediate table of `change.table` still present, if any.
pub(super) fn leftover_table(
    conn: &Connection,
    change: &SchemaChange,
) -> Result<Option<String>, MigrationError> {
    for suffix in [OLD_SUFFIX, REBUILD_SUFFIX] {
        let candidate = format!("{}{suffix}", change.table);
        if table_exists(conn, &candidate).map_err(MigrationError::schema(change.name))? {
            return Ok(Some(candidate));
        }
    }
    Ok(None)
}

/// Column names the DDL template produces, read back from a scratch
/// in-memory database so the catalog never repeats column lists.
pub(super) fn target_columns(ddl: &str) -> rusqlite::Result<Vec<String>> {
    let scratch = Connection::open_in_memory()?;
    scratch.execute_batch(&sql::render(ddl, "target"))?;
    column_names(&scratch, "target")
}

pub(super) fn contains_column(columns: &[String], name: &str) -> bool {
    columns.iter().any(|column| column.eq_ignore_ascii_case(name))
}
