//! Database operations split into domain-specific modules.
//!
//! This module holds the `Database` wrapper plus the sync config and sync
//! state operations; project table operations live in `projects`.

mod projects;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use std::path::PathBuf;

use crate::migrations;
use crate::models::SyncConfig;

/// Database connection wrapper
pub struct Database {
    pub(crate) conn: Connection,
}

impl Database {
    /// Create a new database connection
    ///
    /// # Errors
    ///
    /// Returns an error if database directory creation, connection opening,
    /// or schema initialization fails
    pub fn new(db_path: Option<PathBuf>) -> Result<Self> {
        let path = db_path.unwrap_or_else(Self::default_db_path);

        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create database directory")?;
        }

        let conn = Connection::open(&path).context("Failed to open database connection")?;

        migrations::init_schema(&conn)?;
        migrations::insert_default_state(&conn)?;

        log::info!("Database initialized at: {}", path.display());

        Ok(Self { conn })
    }

    /// Get default database path
    fn default_db_path() -> PathBuf {
        let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("folio");
        path.push("folio.db");
        path
    }

    // ==================== Sync Config Methods ====================

    /// Read the sync configuration, defaulting when none has been saved
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub fn get_sync_config(&self) -> Result<SyncConfig> {
        let result = self.conn.query_row(
            "SELECT token, repo, branch FROM sync_config WHERE id = 1",
            [],
            |row| {
                Ok(SyncConfig {
                    token: row.get(0)?,
                    repo: row.get(1)?,
                    branch: row.get(2)?,
                })
            },
        );

        match result {
            Ok(config) => Ok(config),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(SyncConfig::default()),
            Err(e) => Err(e.into()),
        }
    }

    /// Save the sync configuration as a unit
    ///
    /// # Errors
    ///
    /// Returns an error if the database upsert fails
    pub fn save_sync_config(&self, config: &SyncConfig) -> Result<()> {
        self.conn.execute(
            "INSERT INTO sync_config (id, token, repo, branch, updated_at)
             VALUES (1, ?1, ?2, ?3, ?4)
             ON CONFLICT(id) DO UPDATE SET
                token = excluded.token,
                repo = excluded.repo,
                branch = excluded.branch,
                updated_at = excluded.updated_at",
            params![
                config.token,
                config.repo,
                config.branch,
                Utc::now().to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    // ==================== Sync State Methods ====================

    /// Whether the local store holds edits not yet published to the remote
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub fn is_dirty(&self) -> Result<bool> {
        let dirty: i32 = self
            .conn
            .query_row("SELECT dirty FROM sync_state WHERE id = 1", [], |row| {
                row.get(0)
            })?;
        Ok(dirty != 0)
    }

    /// Flag the local store as holding unpublished edits
    pub(crate) fn mark_dirty(&self) -> Result<()> {
        self.conn
            .execute("UPDATE sync_state SET dirty = 1 WHERE id = 1", [])?;
        Ok(())
    }

    /// Record that local and remote agree again (after a remote replace or a
    /// successful publish)
    ///
    /// # Errors
    ///
    /// Returns an error if the database update fails
    pub fn clear_dirty(&self) -> Result<()> {
        self.conn.execute(
            "UPDATE sync_state SET dirty = 0, last_synced = ?1 WHERE id = 1",
            params![Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }

    /// When local and remote last agreed, if ever
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub fn last_synced(&self) -> Result<Option<DateTime<Utc>>> {
        let raw: Option<String> = self.conn.query_row(
            "SELECT last_synced FROM sync_state WHERE id = 1",
            [],
            |row| row.get(0),
        )?;
        Ok(raw
            .and_then(|s| DateTime::parse_from_rfc3339(&s).ok())
            .map(|dt| dt.with_timezone(&Utc)))
    }
}
