use anyhow::Result;
use rusqlite::{params, OptionalExtension};

use crate::models::{Project, ProjectCategory};

use super::Database;

impl Database {
    /// Insert or fully replace a project by id. Marks the store dirty: the
    /// edit has not been published yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the database upsert fails
    pub fn upsert_project(&self, project: &Project) -> Result<()> {
        self.conn.execute(
            "INSERT INTO projects (id, title, description, category, image_url,
                                   invite_link, demo_link, cost, technologies, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
             ON CONFLICT(id) DO UPDATE SET
                title = excluded.title,
                description = excluded.description,
                category = excluded.category,
                image_url = excluded.image_url,
                invite_link = excluded.invite_link,
                demo_link = excluded.demo_link,
                cost = excluded.cost,
                technologies = excluded.technologies,
                created_at = excluded.created_at",
            params![
                project.id,
                project.title,
                project.description,
                project.category.to_string(),
                project.image_url,
                project.invite_link,
                project.demo_link,
                project.cost,
                serde_json::to_string(&project.technologies)?,
                project.created_at,
            ],
        )?;
        self.mark_dirty()?;
        log::debug!("Saved project: {}", project.id);
        Ok(())
    }

    /// Remove a project by id. Returns whether a record existed; only an
    /// actual removal marks the store dirty.
    ///
    /// # Errors
    ///
    /// Returns an error if the database delete fails
    pub fn delete_project(&self, id: &str) -> Result<bool> {
        let deleted = self
            .conn
            .execute("DELETE FROM projects WHERE id = ?1", params![id])?;
        if deleted > 0 {
            self.mark_dirty()?;
            log::debug!("Deleted project: {id}");
        }
        Ok(deleted > 0)
    }

    /// Get a project by id
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub fn get_project(&self, id: &str) -> Result<Option<Project>> {
        let result = self
            .conn
            .query_row(
                "SELECT id, title, description, category, image_url, invite_link,
                        demo_link, cost, technologies, created_at
                 FROM projects WHERE id = ?1",
                params![id],
                Self::row_to_project,
            )
            .optional()?;

        Ok(result)
    }

    /// Get all projects, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub fn get_all_projects(&self) -> Result<Vec<Project>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, title, description, category, image_url, invite_link,
                    demo_link, cost, technologies, created_at
             FROM projects ORDER BY created_at DESC",
        )?;

        let projects = stmt
            .query_map([], Self::row_to_project)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(projects)
    }

    /// Get projects in one category, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub fn get_projects_by_category(&self, category: ProjectCategory) -> Result<Vec<Project>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, title, description, category, image_url, invite_link,
                    demo_link, cost, technologies, created_at
             FROM projects WHERE category = ?1 ORDER BY created_at DESC",
        )?;

        let projects = stmt
            .query_map(params![category.to_string()], Self::row_to_project)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(projects)
    }

    /// Number of projects in the local store
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub fn count_projects(&self) -> Result<u64> {
        let count: u64 =
            self.conn
                .query_row("SELECT COUNT(*) FROM projects", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Replace the entire table with a remote snapshot: clear + bulk insert
    /// in one transaction. The store is clean afterwards - it mirrors the
    /// remote document exactly.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction fails; the prior contents are
    /// left untouched in that case
    pub fn replace_all_projects(&self, projects: &[Project]) -> Result<()> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute("DELETE FROM projects", [])?;
        for project in projects {
            tx.execute(
                "INSERT INTO projects (id, title, description, category, image_url,
                                       invite_link, demo_link, cost, technologies, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
                params![
                    project.id,
                    project.title,
                    project.description,
                    project.category.to_string(),
                    project.image_url,
                    project.invite_link,
                    project.demo_link,
                    project.cost,
                    serde_json::to_string(&project.technologies)?,
                    project.created_at,
                ],
            )?;
        }
        tx.execute(
            "UPDATE sync_state SET dirty = 0, last_synced = ?1 WHERE id = 1",
            params![chrono::Utc::now().to_rfc3339()],
        )?;
        tx.commit()?;
        log::info!("Replaced local store with {} projects", projects.len());
        Ok(())
    }

    /// Bulk insert the seed set into an empty store. Seeding is neither a
    /// local edit nor a reconciliation, so the dirty flag is left alone.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction fails
    pub fn insert_projects(&self, projects: &[Project]) -> Result<()> {
        let tx = self.conn.unchecked_transaction()?;
        for project in projects {
            tx.execute(
                "INSERT INTO projects (id, title, description, category, image_url,
                                       invite_link, demo_link, cost, technologies, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
                params![
                    project.id,
                    project.title,
                    project.description,
                    project.category.to_string(),
                    project.image_url,
                    project.invite_link,
                    project.demo_link,
                    project.cost,
                    serde_json::to_string(&project.technologies)?,
                    project.created_at,
                ],
            )?;
        }
        tx.commit()?;
        Ok(())
    }

    /// Helper function to parse `Project` from database row
    fn row_to_project(row: &rusqlite::Row) -> rusqlite::Result<Project> {
        let technologies_json: String = row.get(8)?;
        Ok(Project {
            id: row.get(0)?,
            title: row.get(1)?,
            description: row.get(2)?,
            category: row
                .get::<_, String>(3)?
                .parse()
                .unwrap_or(ProjectCategory::Other),
            image_url: row.get(4)?,
            invite_link: row.get(5)?,
            demo_link: row.get(6)?,
            cost: row.get(7)?,
            technologies: serde_json::from_str(&technologies_json).unwrap_or_default(),
            created_at: row.get(9)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::models::{Project, ProjectCategory, SyncConfig};
    use crate::seed;
    use crate::Database;

    fn open_test_db() -> (Database, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::new(Some(dir.path().join("folio.db"))).unwrap();
        (db, dir)
    }

    fn sample_project(id: i64, title: &str) -> Project {
        Project {
            id: id.to_string(),
            title: title.to_string(),
            description: format!("{title} description"),
            category: ProjectCategory::DiscordBot,
            image_url: None,
            invite_link: None,
            demo_link: None,
            cost: Some("$10".to_string()),
            technologies: vec!["Python".to_string()],
            created_at: id,
        }
    }

    #[test]
    fn test_upsert_and_get_project() {
        let (db, _dir) = open_test_db();
        let project = sample_project(100, "Aegis");
        db.upsert_project(&project).unwrap();

        let loaded = db.get_project("100").unwrap().unwrap();
        assert_eq!(loaded, project);
        assert!(db.get_project("999").unwrap().is_none());
    }

    #[test]
    fn test_upsert_replaces_instead_of_duplicating() {
        let (db, _dir) = open_test_db();
        db.upsert_project(&sample_project(100, "Aegis")).unwrap();

        let mut updated = sample_project(100, "Aegis v2");
        updated.technologies = vec!["C#".to_string(), ".NET".to_string()];
        db.upsert_project(&updated).unwrap();

        assert_eq!(db.count_projects().unwrap(), 1);
        let loaded = db.get_project("100").unwrap().unwrap();
        assert_eq!(loaded.title, "Aegis v2");
        assert_eq!(loaded.technologies, vec!["C#", ".NET"]);
    }

    #[test]
    fn test_delete_project_by_id() {
        let (db, _dir) = open_test_db();
        db.upsert_project(&sample_project(100, "Aegis")).unwrap();

        assert!(db.delete_project("100").unwrap());
        assert!(!db.delete_project("100").unwrap());
        assert_eq!(db.count_projects().unwrap(), 0);
    }

    #[test]
    fn test_get_all_projects_orders_newest_first() {
        let (db, _dir) = open_test_db();
        db.upsert_project(&sample_project(100, "old")).unwrap();
        db.upsert_project(&sample_project(300, "new")).unwrap();
        db.upsert_project(&sample_project(200, "mid")).unwrap();

        let titles: Vec<String> = db
            .get_all_projects()
            .unwrap()
            .into_iter()
            .map(|p| p.title)
            .collect();
        assert_eq!(titles, vec!["new", "mid", "old"]);
    }

    #[test]
    fn test_get_projects_by_category() {
        let (db, _dir) = open_test_db();
        let mut panel = sample_project(200, "Orders Panel");
        panel.category = ProjectCategory::Panel;
        db.upsert_project(&sample_project(100, "Aegis")).unwrap();
        db.upsert_project(&panel).unwrap();

        let bots = db
            .get_projects_by_category(ProjectCategory::DiscordBot)
            .unwrap();
        assert_eq!(bots.len(), 1);
        assert_eq!(bots[0].title, "Aegis");
        assert!(db
            .get_projects_by_category(ProjectCategory::AiAgent)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_replace_all_is_a_full_swap() {
        let (db, _dir) = open_test_db();
        db.upsert_project(&sample_project(100, "stale")).unwrap();

        let snapshot = vec![sample_project(200, "fresh"), sample_project(300, "fresher")];
        db.replace_all_projects(&snapshot).unwrap();

        let stored = db.get_all_projects().unwrap();
        assert_eq!(stored.len(), 2);
        assert!(stored.iter().all(|p| p.id != "100"));
    }

    #[test]
    fn test_dirty_flag_lifecycle() {
        let (db, _dir) = open_test_db();
        assert!(!db.is_dirty().unwrap());
        assert!(db.last_synced().unwrap().is_none());

        db.upsert_project(&sample_project(100, "Aegis")).unwrap();
        assert!(db.is_dirty().unwrap());

        db.replace_all_projects(&[sample_project(200, "fresh")])
            .unwrap();
        assert!(!db.is_dirty().unwrap());
        assert!(db.last_synced().unwrap().is_some());

        db.delete_project("200").unwrap();
        assert!(db.is_dirty().unwrap());

        db.clear_dirty().unwrap();
        assert!(!db.is_dirty().unwrap());
    }

    #[test]
    fn test_seeding_leaves_dirty_flag_alone() {
        let (db, _dir) = open_test_db();
        db.insert_projects(&seed::initial_projects()).unwrap();
        assert!(!db.is_dirty().unwrap());
        assert_eq!(db.count_projects().unwrap() as usize, seed::initial_projects().len());
    }

    #[test]
    fn test_sync_config_round_trip() {
        let (db, _dir) = open_test_db();
        assert_eq!(db.get_sync_config().unwrap(), SyncConfig::default());

        let config = SyncConfig {
            token: "ghp_example".to_string(),
            repo: "osama-dev/portfolio".to_string(),
            branch: "production".to_string(),
        };
        db.save_sync_config(&config).unwrap();
        assert_eq!(db.get_sync_config().unwrap(), config);

        // Saved as a unit: a second save overwrites every field
        let cleared = SyncConfig::default();
        db.save_sync_config(&cleared).unwrap();
        assert_eq!(db.get_sync_config().unwrap(), cleared);
    }
}
