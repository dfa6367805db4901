//! Single write connection behind a `std::sync::Mutex`.
//! Serialized writes, so conditional updates never interleave.

use std::path::Path;
use std::sync::Mutex;

use rusqlite::Connection;

use verdict_core::errors::VerdictResult;

use super::pragmas::apply_pragmas;
use crate::to_storage_err;

/// The only connection that writes.
pub struct WriteConnection {
    conn: Mutex<Connection>,
}

impl WriteConnection {
    /// Open a new write connection to the given database path.
    pub fn open(path: &Path, busy_timeout_ms: u32) -> VerdictResult<Self> {
        let conn = Connection::open(path).map_err(|e| to_storage_err(e.to_string()))?;
        apply_pragmas(&conn, busy_timeout_ms)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory() -> VerdictResult<Self> {
        let conn = Connection::open_in_memory().map_err(|e| to_storage_err(e.to_string()))?;
        apply_pragmas(&conn, 0)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Acquire the write lock and execute a closure with the connection.
    /// Safe to call from a thread that is driving an async runtime.
    pub fn with_conn_sync<F, T>(&self, f: F) -> VerdictResult<T>
    where
        F: FnOnce(&Connection) -> VerdictResult<T>,
    {
        let guard = self
            .conn
            .lock()
            .map_err(|e| to_storage_err(format!("write connection lock poisoned: {e}")))?;
        f(&guard)
    }
}
