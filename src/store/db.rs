//! SQLite connection handling and schema initialization.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use sea_orm::{ConnectionTrait, Database, DatabaseConnection};

/// Default database location: `<data_dir>/usher/state.db`.
pub fn default_db_path() -> Result<PathBuf> {
    dirs::data_dir()
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))
        .map(|dir| dir.join("usher").join("state.db"))
}

/// Open (and create if missing) a file-backed database.
pub async fn connect_file(path: &Path) -> Result<DatabaseConnection> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create data directory: {}", parent.display()))?;
    }
    let url = format!("sqlite://{}?mode=rwc", path.display());
    let conn = Database::connect(&url)
        .await
        .with_context(|| format!("Failed to open local store at {}", path.display()))?;
    init_schema(&conn).await?;
    Ok(conn)
}

/// Open a throwaway in-memory database, used by tests.
pub async fn connect_in_memory() -> Result<DatabaseConnection> {
    let conn = Database::connect("sqlite::memory:")
        .await
        .context("Failed to open in-memory store")?;
    init_schema(&conn).await?;
    Ok(conn)
}

/// Initialize database schema
async fn init_schema(conn: &DatabaseConnection) -> Result<()> {
    conn.execute_unprepared(
        r"
        CREATE TABLE IF NOT EXISTS recent_selections (
            kind TEXT NOT NULL,
            entity_id TEXT NOT NULL,
            label TEXT NOT NULL,
            selected_at TEXT NOT NULL,
            PRIMARY KEY (kind, entity_id)
        )
        ",
    )
    .await?;

    conn.execute_unprepared(
        r"
        CREATE TABLE IF NOT EXISTS generation_progress (
            event_id TEXT PRIMARY KEY,
            orders_total INTEGER NOT NULL DEFAULT 0,
            orders_done INTEGER NOT NULL DEFAULT 0,
            tickets_done INTEGER NOT NULL DEFAULT 0,
            rsvps_done INTEGER NOT NULL DEFAULT 0,
            finished BOOLEAN NOT NULL DEFAULT 0,
            updated_at TEXT NOT NULL
        )
        ",
    )
    .await?;

    Ok(())
}
