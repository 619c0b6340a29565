#![forbid(unsafe_code)]

use super::super::types::ColumnInfo;
use rusqlite::{Connection, OptionalExtension, params};

pub(in crate::store) fn table_exists(conn: &Connection, table: &str) -> rusqlite::Result<bool> {
    Ok(conn
        .query_row(
            "SELECT 1 FROM sqlite_master WHERE type='table' AND name=?1",
            params![table],
            |_| Ok(()),
        )
        .optional()?
        .is_some())
}

/// `PRAGMA table_info` for `table`; empty when the table does not exist.
pub(in crate::store) fn table_columns(
    conn: &Connection,
    table: &str,
) -> rusqlite::Result<Vec<ColumnInfo>> {
    let mut stmt = conn.prepare(
        "SELECT name, type, \"notnull\", dflt_value, pk FROM pragma_table_info(?1) ORDER BY cid",
    )?;
    let mut rows = stmt.query(params![table])?;
    let mut out = Vec::new();
    while let Some(row) = rows.next()? {
        out.push(ColumnInfo {
            name: row.get(0)?,
            decl_type: row.get(1)?,
            not_null: row.get::<_, i64>(2)? != 0,
            default_value: row.get(3)?,
            primary_key: row.get::<_, i64>(4)? != 0,
        });
    }
    Ok(out)
}

pub(in crate::store) fn column_names(conn: &Connection, table: &str) -> rusqlite::Result<Vec<String>> {
    Ok(table_columns(conn, table)?
        .into_iter()
        .map(|column| column.name)
        .collect())
}

pub(in crate::store) fn has_column(
    conn: &Connection,
    table: &str,
    column: &str,
) -> rusqlite::Result<bool> {
    Ok(table_columns(conn, table)?
        .iter()
        .any(|info| info.name == column))
}

pub(in crate::store) fn count_rows(conn: &Connection, table: &str) -> rusqlite::Result<i64> {
    conn.query_row(
        &format!("SELECT COUNT(*) FROM {}", quote_ident(table)),
        [],
        |row| row.get(0),
    )
}

pub(in crate::store) fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
