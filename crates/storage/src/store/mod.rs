#![forbid(unsafe_code)]

mod content;
mod error;
mod integrity;
mod menus;
mod resolve;
mod schema;
mod support;
mod types;

pub use error::{MigrationError, ResolveError, StoreError};
pub use schema::{find_change, schema_catalog};
pub use types::*;

use rusqlite::{Connection, OpenFlags};
use std::path::{Path, PathBuf};
use std::time::Duration;

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// One handle onto the site database. Nothing is shared between handles;
/// callers that need concurrent readers open one handle each.
#[derive(Debug)]
pub struct SqliteStore {
    conn: Connection,
    db_path: Option<PathBuf>,
}

impl SqliteStore {
    /// Opens (creating if needed) the database file. No schema is installed
    /// here; schema changes are applied explicitly through the runner.
    pub fn open(db_path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let db_path = db_path.as_ref().to_path_buf();
        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(&db_path)?;
        conn.busy_timeout(BUSY_TIMEOUT)?;
        conn.execute_batch(
            "PRAGMA journal_mode=WAL;\n\
             PRAGMA synchronous=NORMAL;\n\
             PRAGMA foreign_keys=ON;",
        )?;

        Ok(Self {
            conn,
            db_path: Some(db_path),
        })
    }

    pub fn open_read_only(db_path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let db_path = db_path.as_ref().to_path_buf();
        let conn = Connection::open_with_flags(
            &db_path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        conn.busy_timeout(BUSY_TIMEOUT)?;

        Ok(Self {
            conn,
            db_path: Some(db_path),
        })
    }

    /// Ephemeral store, used by tests and dry runs.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self {
            conn,
            db_path: None,
        })
    }

    pub fn db_path(&self) -> Option<&Path> {
        self.db_path.as_deref()
    }

    pub fn table_exists(&self, table: &str) -> Result<bool, StoreError> {
        Ok(support::table_exists(&self.conn, table)?)
    }

    pub fn table_columns(&self, table: &str) -> Result<Vec<ColumnInfo>, StoreError> {
        Ok(support::table_columns(&self.conn, table)?)
    }
}
