//! Schema upgrades for the blob database.
//!
//! # Responsibility
//! - List the `kv_blobs` schema steps in ascending version order.
//! - Bring a connection up to `latest_version` in one transaction and log
//!   each step as `event=db_migrate`.
//!
//! # Invariants
//! - The schema version lives in `PRAGMA user_version`.
//! - A database newer than this binary is never touched.
//! - Steps only shape the SQLite container; blob values pass through
//!   untouched because the notes JSON is owned by the store.

use crate::db::{DbError, DbResult};
use log::{debug, error, info};
use rusqlite::{Connection, Transaction};

struct SchemaStep {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

const SCHEMA_STEPS: &[SchemaStep] = &[SchemaStep {
    version: 1,
    name: "kv_blobs",
    sql: include_str!("0001_kv_blobs.sql"),
}];

/// Schema versions seen before and after `apply_migrations`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MigrationReport {
    pub from: u32,
    pub to: u32,
}

impl MigrationReport {
    /// Whether any step ran.
    pub fn upgraded(&self) -> bool {
        self.to > self.from
    }
}

/// Highest schema version this binary can write.
pub fn latest_version() -> u32 {
    SCHEMA_STEPS.last().map_or(0, |step| step.version)
}

/// Upgrades the `kv_blobs` schema on `conn` to `latest_version`.
///
/// # Errors
/// - `DbError::UnsupportedSchemaVersion` when the file was written by a newer
///   binary.
/// - Any SQLite failure; the transaction is rolled back and the version is
///   left as it was.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<MigrationReport> {
    let from = schema_version(conn)?;
    let to = latest_version();

    if from > to {
        error!(
            "event=db_migrate module=db status=error error_code=schema_too_new from={} latest={}",
            from, to
        );
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: from,
            latest_supported: to,
        });
    }
    if from == to {
        debug!("event=db_migrate module=db status=ok from={from} to={to} steps=0");
        return Ok(MigrationReport { from, to });
    }

    let tx = conn.transaction()?;
    let mut steps = 0;
    for step in SCHEMA_STEPS.iter().skip_while(|step| step.version <= from) {
        run_step(&tx, step)?;
        steps += 1;
    }
    tx.commit()?;

    info!("event=db_migrate module=db status=ok from={from} to={to} steps={steps}");
    Ok(MigrationReport { from, to })
}

/// Reads `PRAGMA user_version`.
pub fn schema_version(conn: &Connection) -> DbResult<u32> {
    Ok(conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?)
}

fn run_step(tx: &Transaction<'_>, step: &SchemaStep) -> DbResult<()> {
    tx.execute_batch(step.sql).map_err(|err| {
        error!(
            "event=db_migrate module=db status=error version={} step={} error={}",
            step.version, step.name, err
        );
        err
    })?;
    // PRAGMA values cannot be bound as parameters.
    tx.execute_batch(&format!("PRAGMA user_version = {};", step.version))?;
    debug!(
        "event=db_migrate module=db status=step version={} step={}",
        step.version, step.name
    );
    Ok(())
}
