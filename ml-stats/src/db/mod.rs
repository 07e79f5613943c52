//! Database access layer for ml-stats
//!
//! All connections are read-only: the result ledger is owned and
//! populated by an external ingestion process, this service only
//! aggregates over it.

use std::path::Path;

use sqlx::SqlitePool;

use crate::error::{Error, Result};

pub mod models;
pub mod queries;
pub mod rankings;
pub mod resolver;
pub mod similarity;

/// Connect to the ledger database in read-only mode
///
/// Safety: Uses SQLite mode=ro so no statement issued through this pool
/// can mutate the ledger, even by accident.
pub async fn connect_readonly(db_path: &Path) -> Result<SqlitePool> {
    if !db_path.exists() {
        return Err(Error::Config(format!(
            "Database not found: {} (the ledger is populated by the importer, run it first)",
            db_path.display()
        )));
    }

    // mode=ro: read-only mode
    // immutable=1: additional safety (SQLite won't write even for internal operations)
    let db_url = format!("sqlite://{}?mode=ro&immutable=1", db_path.display());

    let pool = SqlitePool::connect(&db_url).await?;

    // Verify read-only by attempting a write (should fail)
    #[cfg(debug_assertions)]
    {
        let write_test = sqlx::query("CREATE TABLE _test_write (id INTEGER)")
            .execute(&pool)
            .await;
        if write_test.is_ok() {
            panic!("SAFETY VIOLATION: Database connection is not read-only!");
        }
    }

    Ok(pool)
}
