use anyhow::Result;
use rusqlite::Connection;

/// Current schema version, stamped into `PRAGMA user_version`.
pub const SCHEMA_VERSION: i32 = 1;

/// Initialize database schema
///
/// # Errors
///
/// Returns an error if table or index creation fails
pub fn init_schema(conn: &Connection) -> Result<()> {
    // Projects table - the portfolio entries, keyed by id with a secondary
    // index on category
    conn.execute(
        "CREATE TABLE IF NOT EXISTS projects (
            id TEXT PRIMARY KEY,
            title TEXT NOT NULL,
            description TEXT NOT NULL,
            category TEXT NOT NULL,
            image_url TEXT,
            invite_link TEXT,
            demo_link TEXT,
            cost TEXT,
            technologies TEXT NOT NULL,
            created_at INTEGER NOT NULL
        )",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_projects_category ON projects(category)",
        [],
    )?;

    // Sync config table - single row, read and written as a unit
    conn.execute(
        "CREATE TABLE IF NOT EXISTS sync_config (
            id INTEGER PRIMARY KEY CHECK (id = 1),
            token TEXT NOT NULL,
            repo TEXT NOT NULL,
            branch TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )",
        [],
    )?;

    // Sync state table - single row tracking whether local edits have been
    // published since the last reconciliation with the remote document
    conn.execute(
        "CREATE TABLE IF NOT EXISTS sync_state (
            id INTEGER PRIMARY KEY CHECK (id = 1),
            dirty INTEGER NOT NULL,
            last_synced TEXT
        )",
        [],
    )?;

    conn.pragma_update(None, "user_version", SCHEMA_VERSION)?;

    Ok(())
}

/// Insert the initial sync state row if none exists
///
/// # Errors
///
/// Returns an error if the insert fails
pub fn insert_default_state(conn: &Connection) -> Result<()> {
    conn.execute(
        "INSERT OR IGNORE INTO sync_state (id, dirty, last_synced) VALUES (1, 0, NULL)",
        [],
    )?;
    Ok(())
}
