#![forbid(unsafe_code)]

use super::super::ResolveError;
use rusqlite::Connection;
use std::time::{Duration, Instant};

// VM instructions between progress callbacks.
const PROGRESS_OPS: i32 = 1_000;

/// Caller-supplied bound on one resolution. While armed, SQLite interrupts
/// any statement that runs past the deadline; the handler is removed on drop.
pub(in crate::store) struct Deadline<'conn> {
    conn: &'conn Connection,
    at: Option<Instant>,
}

impl<'conn> Deadline<'conn> {
    pub(in crate::store) fn arm(conn: &'conn Connection, timeout: Option<Duration>) -> Self {
        let at = timeout.map(|timeout| Instant::now() + timeout);
        if let Some(at) = at {
            conn.progress_handler(PROGRESS_OPS, Some(move || Instant::now() >= at));
        }
        Self { conn, at }
    }

    pub(in crate::store) fn check(&self) -> Result<(), ResolveError> {
        match self.at {
            Some(at) if Instant::now() >= at => Err(ResolveError::Timeout),
            _ => Ok(()),
        }
    }
}

impl Drop for Deadline<'_> {
    fn drop(&mut self) {
        if self.at.is_some() {
            self.conn.progress_handler(0, None::<fn() -> bool>);
        }
    }
}
