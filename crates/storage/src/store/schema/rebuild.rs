#![forbid(unsafe_code)]

use super::detect::{REBUILD_SUFFIX, contains_column};
use super::sql;
use crate::store::error::MigrationError;
use crate::store::support::{column_names, count_rows, quote_ident, rows_as_json, table_columns};
use crate::store::types::{ChangeOutcome, ChangeReport, ColumnFill, SchemaChange};
use rusqlite::Connection;
use tracing::{Level, debug, info, warn};

/// Rebuilds `change.table` into the shape of `ddl`: create the staging
/// table, copy every row, drop the old table, rename staging into place.
/// Old columns that `ddl` does not declare are carried over with their
/// declared type so no stored value is lost.
///
/// `PRAGMA foreign_keys` is a no-op inside a transaction, so it is switched
/// off around the transaction and restored afterwards on every path.
pub(super) fn rebuild_table(
    conn: &mut Connection,
    change: &'static SchemaChange,
    ddl: &str,
    fills: &[ColumnFill],
) -> Result<ChangeReport, MigrationError> {
    let before = count_rows(conn, change.table).map_err(MigrationError::schema(change.name))?;
    log_snapshot(conn, change, before);

    let foreign_keys: i64 = conn
        .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
        .map_err(MigrationError::schema(change.name))?;
    if foreign_keys != 0 {
        conn.execute_batch("PRAGMA foreign_keys=OFF")
            .map_err(MigrationError::schema(change.name))?;
    }

    let copied = copy_into_new_shape(conn, change, ddl, fills, before);

    if foreign_keys != 0 {
        if let Err(err) = conn.execute_batch("PRAGMA foreign_keys=ON") {
            if copied.is_ok() {
                return Err(MigrationError::schema(change.name)(err));
            }
            warn!(change = change.name, error = %err, "failed to re-enable foreign keys");
        }
    }

    let after = copied?;
    let mut report = ChangeReport::new(change, ChangeOutcome::Applied);
    report.rows_before = Some(before);
    report.rows_after = Some(after);
    Ok(report)
}

fn copy_into_new_shape(
    conn: &mut Connection,
    change: &'static SchemaChange,
    ddl: &str,
    fills: &[ColumnFill],
    before: i64,
) -> Result<i64, MigrationError> {
    let table = change.table;
    let staging = format!("{table}{REBUILD_SUFFIX}");

    let tx = conn
        .transaction()
        .map_err(MigrationError::schema(change.name))?;
    tx.execute_batch(&sql::render(ddl, &staging))
        .map_err(MigrationError::schema(change.name))?;

    let old_columns = table_columns(&tx, table).map_err(MigrationError::schema(change.name))?;
    let new_columns = column_names(&tx, &staging).map_err(MigrationError::schema(change.name))?;

    let mut carried = Vec::new();
    for column in old_columns
        .iter()
        .filter(|column| !contains_column(&new_columns, &column.name))
    {
        tx.execute_batch(&format!(
            "ALTER TABLE {} ADD COLUMN {} {}",
            quote_ident(&staging),
            quote_ident(&column.name),
            column.decl_type
        ))
        .map_err(MigrationError::schema(change.name))?;
        carried.push(column.name.clone());
    }
    if !carried.is_empty() {
        info!(
            change = change.name,
            table,
            carried = ?carried,
            "carrying undeclared columns through rebuild"
        );
    }
    let old_columns: Vec<String> = old_columns.into_iter().map(|column| column.name).collect();

    // Target columns absent from the old table and without a fill take their declared default.
    let mut targets = Vec::with_capacity(new_columns.len());
    let mut sources = Vec::with_capacity(new_columns.len());
    for column in &new_columns {
        if contains_column(&old_columns, column) {
            targets.push(quote_ident(column));
            sources.push(quote_ident(column));
        } else if let Some(fill) = fills
            .iter()
            .find(|fill| fill.column.eq_ignore_ascii_case(column))
        {
            targets.push(quote_ident(column));
            sources.push(fill.expr.to_string());
        }
    }
    for column in &carried {
        targets.push(quote_ident(column));
        sources.push(quote_ident(column));
    }

    let copy = format!(
        "INSERT INTO {} ({}) SELECT {} FROM {}",
        quote_ident(&staging),
        targets.join(", "),
        sources.join(", "),
        quote_ident(table)
    );
    tx.execute(&copy, [])
        .map_err(MigrationError::schema(change.name))?;

    let after = count_rows(&tx, &staging).map_err(MigrationError::schema(change.name))?;
    if after != before {
        return Err(MigrationError::RowCountMismatch {
            change: change.name,
            before,
            after,
        });
    }

    tx.execute_batch(&format!(
        "DROP TABLE {old};\nALTER TABLE {staging} RENAME TO {old};",
        old = quote_ident(table),
        staging = quote_ident(&staging),
    ))
    .map_err(MigrationError::schema(change.name))?;

    let violations = foreign_key_violations(&tx).map_err(MigrationError::schema(change.name))?;
    if violations > 0 {
        return Err(MigrationError::ForeignKeyViolation {
            change: change.name,
            violations,
        });
    }

    tx.commit().map_err(MigrationError::schema(change.name))?;
    Ok(after)
}

/// Whole-database check: children that reference the rebuilt table count too.
fn foreign_key_violations(conn: &Connection) -> rusqlite::Result<usize> {
    let mut stmt = conn.prepare("PRAGMA foreign_key_check")?;
    let mut rows = stmt.query([])?;
    let mut violations = 0usize;
    while rows.next()?.is_some() {
        violations += 1;
    }
    Ok(violations)
}

fn log_snapshot(conn: &Connection, change: &SchemaChange, rows: i64) {
    info!(
        change = change.name,
        table = change.table,
        rows,
        "pre-change row set"
    );
    if !tracing::enabled!(Level::DEBUG) {
        return;
    }
    match rows_as_json(conn, change.table) {
        Ok(snapshot) => debug!(
            change = change.name,
            table = change.table,
            snapshot = %serde_json::Value::Array(snapshot),
            "pre-change rows"
        ),
        Err(err) => warn!(
            change = change.name,
            table = change.table,
            error = %err,
            "could not snapshot rows before rebuild"
        ),
    }
}
