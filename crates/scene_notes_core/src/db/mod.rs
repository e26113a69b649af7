//! Project document storage.
//!
//! # Responsibility
//! - Open the SQLite file that holds a project's notes and scene.
//! - Bring its schema up to date before any repository touches it.
//! - Group several repository saves into one all-or-nothing write batch.
//!
//! # Invariants
//! - The schema version lives in `PRAGMA user_version`.
//! - A document written by a newer build is refused, never downgraded.
//! - Inside a write batch, repository saves nest as savepoints and commit
//!   only with the batch.

use log::warn;
use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

/// Failure to open, migrate, or commit a project document.
#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    /// The document was saved by a build with a newer schema.
    ProjectFromNewerBuild { found: u32, supported: u32 },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "project storage error: {err}"),
            Self::ProjectFromNewerBuild { found, supported } => write!(
                f,
                "project uses schema v{found} but this build only understands up to v{supported}"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::ProjectFromNewerBuild { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

/// Runs `body` inside one immediate transaction.
///
/// Commits when `body` returns `Ok`; rolls back every write made inside it
/// otherwise, so a note cursor move and the matching scene restore land
/// together or not at all.
pub fn with_write_batch<T, E>(
    conn: &mut Connection,
    body: impl FnOnce(&mut Connection) -> Result<T, E>,
) -> Result<T, E>
where
    E: From<DbError>,
{
    conn.execute_batch("BEGIN IMMEDIATE;").map_err(DbError::from)?;

    let outcome = body(conn).and_then(|value| {
        conn.execute_batch("COMMIT;").map_err(DbError::from)?;
        Ok(value)
    });

    if outcome.is_err() && !conn.is_autocommit() {
        if let Err(err) = conn.execute_batch("ROLLBACK;") {
            warn!(
                "event=write_batch module=db status=error error_code=rollback_failed error={err}"
            );
        }
    }
    outcome
}
