//! Precedence logic between the remote canonical document and the local
//! store: remote wins on read when reachable, writes stay local until an
//! explicit publish pushes them out.

use anyhow::{Context, Result};

use folio_storage::models::{sort_by_recency, Project};
use folio_storage::{seed, Database};

use crate::github::GitHubRemote;
use crate::traits::{PublishError, RemoteDocument};

/// Repository read from when no sync configuration has been saved yet.
pub const FALLBACK_REPO: &str = "osama-dev/portfolio";

/// Commit message used when the caller does not supply one.
pub const DEFAULT_COMMIT_MESSAGE: &str = "Update projects from portfolio admin";

/// Total write attempts before a persistent version conflict is surfaced.
const MAX_PUBLISH_ATTEMPTS: u32 = 3;

/// How a read should treat the remote document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadMode {
    /// Remote wins when reachable: fetch and replace the local store.
    RemoteFirst,
    /// Admin editing context: never touch the remote, read the local store
    /// only, so in-progress edits cannot be overwritten behind the editor's
    /// back.
    LocalOnly,
}

/// Outcome of a publish attempt, safe to show to the operator as-is.
#[derive(Debug, Clone)]
pub struct PublishOutcome {
    pub success: bool,
    pub message: String,
}

impl PublishOutcome {
    fn published(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// Decides precedence between the remote document, the local store and the
/// built-in seed set, and routes writes.
pub struct Reconciler {
    db: Database,
    remote: Box<dyn RemoteDocument>,
}

impl Reconciler {
    /// Create a reconciler backed by the public GitHub endpoints
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created
    pub fn new(db: Database) -> Result<Self> {
        Ok(Self::with_remote(db, Box::new(GitHubRemote::new()?)))
    }

    /// Create a reconciler against a specific remote host
    #[must_use]
    pub fn with_remote(db: Database, remote: Box<dyn RemoteDocument>) -> Self {
        Self { db, remote }
    }

    /// The underlying local store.
    #[must_use]
    pub fn store(&self) -> &Database {
        &self.db
    }

    /// Best-known project set, newest first. Never fails: remote wins when
    /// reachable, then the local cache, then the built-in seed set.
    ///
    /// In [`ReadMode::RemoteFirst`], a store holding unpublished local edits
    /// suppresses the remote overwrite; publish or force-refresh to
    /// reconcile.
    pub async fn get_projects(&self, mode: ReadMode) -> Vec<Project> {
        if mode == ReadMode::RemoteFirst {
            match self.db.is_dirty() {
                Ok(true) => {
                    log::info!("Local store has unpublished edits, skipping remote sync");
                }
                Ok(false) => match self.refresh_from_remote().await {
                    Ok(projects) => return projects,
                    Err(e) => {
                        log::warn!("Remote fetch failed, falling back to local store: {e:#}");
                    }
                },
                Err(e) => {
                    log::warn!("Could not read sync state, falling back to local store: {e:#}");
                }
            }
        }
        self.local_snapshot()
    }

    /// Explicit fetch-and-replace. Unlike [`Self::get_projects`] this
    /// propagates failure so the caller learns whether new data arrived,
    /// and it ignores the unpublished-edits flag because the caller asked
    /// for the remote state outright.
    ///
    /// # Errors
    ///
    /// Returns an error when the remote document is unreachable or
    /// malformed, or when the local replace fails.
    pub async fn force_refresh(&self) -> Result<Vec<Project>> {
        self.refresh_from_remote().await
    }

    /// Upsert into the local store only; remote propagation is a separate,
    /// explicit publish.
    ///
    /// # Errors
    ///
    /// Returns an error if the local store write fails
    pub fn save_project(&self, project: &Project) -> Result<()> {
        self.db.upsert_project(project)
    }

    /// Remove by id from the local store only. Returns whether a record
    /// existed.
    ///
    /// # Errors
    ///
    /// Returns an error if the local store delete fails
    pub fn delete_project(&self, id: &str) -> Result<bool> {
        self.db.delete_project(id)
    }

    /// Publish the given set as the canonical document using the two-step
    /// read-token/write protocol. A version conflict is retried with a
    /// fresh token a bounded number of times; every failure is folded into
    /// the outcome, never thrown past this boundary.
    pub async fn publish_projects(&self, projects: &[Project], message: &str) -> PublishOutcome {
        let config = match self.db.get_sync_config() {
            Ok(config) => config,
            Err(e) => {
                return PublishOutcome::failed(format!("Could not read sync configuration: {e:#}"))
            }
        };
        if !config.can_publish() {
            return PublishOutcome::failed(
                "GitHub token and repository are not configured; set them before publishing",
            );
        }

        let content = match serde_json::to_string_pretty(projects) {
            Ok(content) => content,
            Err(e) => return PublishOutcome::failed(format!("Could not encode projects: {e}")),
        };

        let mut last_conflict = String::new();
        for attempt in 1..=MAX_PUBLISH_ATTEMPTS {
            let sha = match self.remote.read_sha(&config).await {
                Ok(sha) => sha,
                Err(e) => return PublishOutcome::failed(describe_publish_error(&e)),
            };

            match self
                .remote
                .write_document(&config, &content, message, sha.as_deref())
                .await
            {
                Ok(()) => {
                    // Local and remote agree once the push lands
                    if let Err(e) = self.db.clear_dirty() {
                        log::warn!("Published but failed to record sync state: {e:#}");
                    }
                    return PublishOutcome::published(format!(
                        "Successfully synced {} projects to {}",
                        projects.len(),
                        config.repo
                    ));
                }
                Err(PublishError::Conflict { message }) => {
                    log::warn!("Publish attempt {attempt} hit a version conflict: {message}");
                    last_conflict = message;
                }
                Err(e) => return PublishOutcome::failed(describe_publish_error(&e)),
            }
        }

        PublishOutcome::failed(format!(
            "The remote document kept changing while publishing: {last_conflict}"
        ))
    }

    async fn refresh_from_remote(&self) -> Result<Vec<Project>> {
        let config = self.db.get_sync_config().unwrap_or_default();
        let repo = if config.repo.is_empty() {
            FALLBACK_REPO.to_string()
        } else {
            config.repo
        };

        let mut projects = self.remote.fetch_snapshot(&repo, &config.branch).await?;
        self.db
            .replace_all_projects(&projects)
            .context("Failed to replace local store with remote snapshot")?;

        sort_by_recency(&mut projects);
        Ok(projects)
    }

    /// Local store contents, seeding the built-in examples when empty.
    fn local_snapshot(&self) -> Vec<Project> {
        let stored = match self.db.get_all_projects() {
            Ok(projects) => projects,
            Err(e) => {
                log::error!("Local store read failed, serving seed set: {e:#}");
                return seed::initial_projects();
            }
        };
        if !stored.is_empty() {
            return stored;
        }

        let seeded = seed::initial_projects();
        if let Err(e) = self.db.insert_projects(&seeded) {
            log::warn!("Failed to seed local store: {e:#}");
        }
        seeded
    }
}

fn describe_publish_error(error: &PublishError) -> String {
    match error {
        PublishError::Network(detail) => {
            format!("Connection error, check your network and token: {detail}")
        }
        PublishError::Read { status, message } => {
            format!("GitHub rejected the document read ({status}): {message}")
        }
        PublishError::Conflict { message } => {
            format!("The remote document changed during publish: {message}")
        }
        PublishError::Write { status, message } => {
            format!("GitHub rejected the write ({status}): {message}")
        }
    }
}
