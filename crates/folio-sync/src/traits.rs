//! Seam between the reconciler and the host of the canonical document.

use anyhow::Result;
use async_trait::async_trait;
use thiserror::Error;

use folio_storage::models::{Project, SyncConfig};

/// Failure classes of the publish protocol, kept distinct so the caller can
/// show the remote system's message for each.
#[derive(Debug, Error)]
pub enum PublishError {
    /// The request never completed (network, DNS, TLS).
    #[error("connection error: {0}")]
    Network(String),

    /// The version-token read failed with something other than "not found".
    #[error("document read failed ({status}): {message}")]
    Read { status: u16, message: String },

    /// The document changed between the version-token read and the write.
    #[error("document changed during publish: {message}")]
    Conflict { message: String },

    /// The write was rejected for a reason other than a version conflict.
    #[error("document write failed ({status}): {message}")]
    Write { status: u16, message: String },
}

/// A host serving the canonical projects document: anonymous snapshot reads
/// plus the versioned read-token/write pair used for publishing.
#[async_trait]
pub trait RemoteDocument: Send + Sync {
    /// Fetch and decode the canonical document, bypassing intermediate HTTP
    /// caches.
    ///
    /// # Errors
    ///
    /// Returns an error when the document is unreachable, the response is
    /// not successful, or the body is not an array of project records.
    async fn fetch_snapshot(&self, repo: &str, branch: &str) -> Result<Vec<Project>>;

    /// Current content version token of the published document, or `None`
    /// when it does not exist yet.
    async fn read_sha(&self, config: &SyncConfig) -> Result<Option<String>, PublishError>;

    /// Write `content` as the new document, guarded by `sha` when the
    /// document already exists so a concurrent change is rejected instead
    /// of clobbered.
    async fn write_document(
        &self,
        config: &SyncConfig,
        content: &str,
        message: &str,
        sha: Option<&str>,
    ) -> Result<(), PublishError>;
}
