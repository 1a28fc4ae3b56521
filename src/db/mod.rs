mod schema;

use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};

use anyhow::{Context, Result};
use rusqlite::{Connection, OptionalExtension};
use uuid::Uuid;

use crate::models::Rocket;
use crate::rocket::RocketStore;

/// SQLite-backed rocket store.
///
/// Cloning is cheap and every clone shares the same connection.
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    pub fn open(path: PathBuf) -> Result<Self> {
        let parent = path
            .parent()
            .ok_or_else(|| anyhow::anyhow!("Database path has no parent directory"))?;
        std::fs::create_dir_all(parent)?;
        let conn = Connection::open(&path)
            .with_context(|| format!("Failed to open database at {}", path.display()))?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn open_default() -> Result<Self> {
        Self::open(default_path()?)
    }

    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn migrate(&self) -> Result<()> {
        let conn = self.lock()?;
        schema::run_migrations(&conn)
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| anyhow::anyhow!("database lock poisoned"))
    }

    // ============================================================
    // Rocket operations
    // ============================================================

    pub fn get_rocket(&self, id: &str) -> Result<Option<Rocket>> {
        let id = canonical_id(id)?;
        let conn = self.lock()?;
        let rocket = conn
            .query_row(
                "SELECT id, type, name FROM rockets WHERE id = ?",
                [&id],
                |row| {
                    Ok(Rocket {
                        id: row.get(0)?,
                        rocket_type: row.get(1)?,
                        name: row.get(2)?,
                    })
                },
            )
            .optional()?;
        Ok(rocket)
    }

    pub fn insert_rocket(&self, rocket: &Rocket) -> Result<()> {
        let id = canonical_id(&rocket.id)?;
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO rockets (id, type, name) VALUES (?, ?, ?)",
            (&id, &rocket.rocket_type, &rocket.name),
        )?;
        Ok(())
    }

    /// Returns whether a row was removed.
    pub fn delete_rocket(&self, id: Uuid) -> Result<bool> {
        let conn = self.lock()?;
        let rows = conn.execute("DELETE FROM rockets WHERE id = ?", [id.to_string()])?;
        Ok(rows > 0)
    }
}

impl RocketStore for Database {
    fn fetch(&self, id: &str) -> Result<Rocket> {
        self.get_rocket(id)?
            .ok_or_else(|| anyhow::anyhow!("rocket {} not found", id))
    }

    fn insert(&self, rocket: &Rocket) -> Result<()> {
        self.insert_rocket(rocket)
    }

    fn delete(&self, id: Uuid) -> Result<()> {
        // Zero matched rows is not an error.
        if !self.delete_rocket(id)? {
            tracing::debug!("delete matched no rocket with id {}", id);
        }
        Ok(())
    }
}

/// Location of the database when none is configured.
pub fn default_path() -> Result<PathBuf> {
    let dirs = directories::ProjectDirs::from("", "", "rocket-grpc")
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
    Ok(dirs.data_dir().join("rockets.db"))
}

/// Ids are stored in lower-case hyphenated form so any accepted UUID spelling
/// finds the same row.
fn canonical_id(id: &str) -> Result<String> {
    let uuid = Uuid::parse_str(id).with_context(|| format!("invalid rocket id {:?}", id))?;
    Ok(uuid.to_string())
}
