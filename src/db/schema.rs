use anyhow::{Context, Result};
use rusqlite::Connection;

/// Schema change applied once, in version order.
struct Migration {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    name: "create_rockets",
    sql: include_str!("migrations/001_initial.sql"),
}];

pub fn run_migrations(conn: &Connection) -> Result<()> {
    run(conn, MIGRATIONS)
}

fn run(conn: &Connection, migrations: &[Migration]) -> Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_migrations (
            version INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            applied_at TEXT NOT NULL
        )",
    )
    .context("Failed to create schema_migrations table")?;

    let current = current_version(conn)?;
    for migration in migrations.iter().filter(|m| m.version > current) {
        apply(conn, migration)?;
    }
    Ok(())
}

/// Highest applied version, 0 on a fresh database.
fn current_version(conn: &Connection) -> Result<u32> {
    let version = conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_migrations",
        [],
        |row| row.get(0),
    )?;
    Ok(version)
}

/// The schema change and its bookkeeping row commit together.
fn apply(conn: &Connection, migration: &Migration) -> Result<()> {
    tracing::info!("Applying migration {:03} ({})", migration.version, migration.name);

    let tx = conn.unchecked_transaction()?;
    tx.execute_batch(migration.sql)
        .and_then(|_| {
            tx.execute(
                "INSERT INTO schema_migrations (version, name, applied_at) VALUES (?, ?, ?)",
                (
                    migration.version,
                    migration.name,
                    chrono::Utc::now().to_rfc3339(),
                ),
            )
        })
        .with_context(|| {
            format!(
                "Failed to apply migration {:03} ({})",
                migration.version, migration.name
            )
        })?;
    tx.commit()?;
    Ok(())
}
