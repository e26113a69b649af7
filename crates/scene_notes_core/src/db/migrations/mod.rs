//! Project schema history.
//!
//! # Responsibility
//! - List every schema step a project document can go through.
//! - Upgrade an older document in one transaction.
//!
//! # Invariants
//! - Step versions start at 1 and increase by exactly one.
//! - `PRAGMA user_version` always names the last step applied.

use crate::db::{DbError, DbResult};
use log::info;
use rusqlite::Connection;

struct SchemaStep {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

const SCHEMA_STEPS: &[SchemaStep] = &[
    SchemaStep {
        version: 1,
        name: "notes",
        sql: include_str!("0001_notes.sql"),
    },
    SchemaStep {
        version: 2,
        name: "scene",
        sql: include_str!("0002_scene.sql"),
    },
];

/// Schema version written by this build.
pub fn latest_version() -> u32 {
    SCHEMA_STEPS.last().map_or(0, |step| step.version)
}

/// Upgrades `conn` to `latest_version()`.
///
/// A document already at the latest version is left untouched.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let found: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    let supported = latest_version();
    if found > supported {
        return Err(DbError::ProjectFromNewerBuild { found, supported });
    }

    let pending = SCHEMA_STEPS
        .iter()
        .filter(|step| step.version > found)
        .collect::<Vec<_>>();
    if pending.is_empty() {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for step in &pending {
        tx.execute_batch(step.sql)?;
        tx.pragma_update(None, "user_version", step.version)?;
        info!(
            "event=db_migrate module=db status=step version={} name={}",
            step.version, step.name
        );
    }
    tx.commit()?;

    info!("event=db_migrate module=db status=ok from_version={found} to_version={supported}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::SCHEMA_STEPS;

    #[test]
    fn schema_steps_are_contiguous_from_one() {
        for (offset, step) in SCHEMA_STEPS.iter().enumerate() {
            assert_eq!(step.version as usize, offset + 1, "step {}", step.name);
        }
    }
}
