#![forbid(unsafe_code)]

use super::introspect::{column_names, quote_ident};
use rusqlite::Connection;
use rusqlite::types::ValueRef;

/// Live column set of one table. Queries select through it so stores that
/// predate a column read it as NULL instead of failing.
pub(in crate::store) struct TableShape {
    table: &'static str,
    columns: Vec<String>,
}

impl TableShape {
    /// `None` when the table does not exist.
    pub(in crate::store) fn load(conn: &Connection, table: &'static str) -> rusqlite::Result<Option<Self>> {
        let columns = column_names(conn, table)?;
        if columns.is_empty() {
            return Ok(None);
        }
        Ok(Some(Self { table, columns }))
    }

    pub(in crate::store) fn table(&self) -> String {
        quote_ident(self.table)
    }

    pub(in crate::store) fn has(&self, column: &str) -> bool {
        self.columns
            .iter()
            .any(|name| name.eq_ignore_ascii_case(column))
    }

    pub(in crate::store) fn select(&self, column: &str) -> String {
        self.select_in("", column)
    }

    /// `alias.column`, or `NULL` when the column is absent.
    pub(in crate::store) fn select_in(&self, alias: &str, column: &str) -> String {
        if !self.has(column) {
            return "NULL".to_string();
        }
        if alias.is_empty() {
            quote_ident(column)
        } else {
            format!("{alias}.{}", quote_ident(column))
        }
    }

    pub(in crate::store) fn select_list(&self, columns: &[&str]) -> String {
        columns
            .iter()
            .map(|column| self.select(column))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Published and not soft-deleted.
    pub(in crate::store) fn eligible_in(&self, alias: &str) -> String {
        let prefix = if alias.is_empty() {
            String::new()
        } else {
            format!("{alias}.")
        };
        let mut clauses = Vec::with_capacity(2);
        if self.has("status") {
            clauses.push(format!("{prefix}\"status\" = 1"));
        }
        if self.has("deletedAt") {
            clauses.push(format!("{prefix}\"deletedAt\" IS NULL"));
        }
        if clauses.is_empty() {
            "1 = 1".to_string()
        } else {
            clauses.join(" AND ")
        }
    }

    pub(in crate::store) fn eligible(&self) -> String {
        self.eligible_in("")
    }
}

/// Text column that older admin builds sometimes filled with numbers.
pub(in crate::store) fn text_at(row: &rusqlite::Row<'_>, index: usize) -> rusqlite::Result<Option<String>> {
    Ok(match row.get_ref(index)? {
        ValueRef::Null => None,
        ValueRef::Integer(value) => Some(value.to_string()),
        ValueRef::Real(value) => Some(value.to_string()),
        ValueRef::Text(bytes) | ValueRef::Blob(bytes) => {
            Some(String::from_utf8_lossy(bytes).into_owned())
        }
    })
}

/// Integer column that may hold numeric text.
pub(in crate::store) fn int_at(row: &rusqlite::Row<'_>, index: usize) -> rusqlite::Result<Option<i64>> {
    Ok(match row.get_ref(index)? {
        ValueRef::Integer(value) => Some(value),
        ValueRef::Real(value) => Some(value as i64),
        ValueRef::Text(bytes) => std::str::from_utf8(bytes)
            .ok()
            .and_then(|text| text.trim().parse().ok()),
        ValueRef::Null | ValueRef::Blob(_) => None,
    })
}

pub(in crate::store) fn real_at(row: &rusqlite::Row<'_>, index: usize) -> rusqlite::Result<Option<f64>> {
    Ok(match row.get_ref(index)? {
        ValueRef::Integer(value) => Some(value as f64),
        ValueRef::Real(value) => Some(value),
        ValueRef::Text(bytes) => std::str::from_utf8(bytes)
            .ok()
            .and_then(|text| text.trim().parse().ok()),
        ValueRef::Null | ValueRef::Blob(_) => None,
    })
}
