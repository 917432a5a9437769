//! HTTP utilities shared by the remote document client.

use anyhow::Result;

/// Extension trait for `reqwest::Response` to handle common error patterns.
#[async_trait::async_trait]
pub trait ResponseExt {
    /// Ensure the response status is successful.
    ///
    /// # Errors
    ///
    /// Returns an error carrying the status code and response body when the
    /// status is not 2xx.
    async fn ensure_success(self, source: &str) -> Result<Self>
    where
        Self: Sized;
}

#[async_trait::async_trait]
impl ResponseExt for reqwest::Response {
    async fn ensure_success(self, source: &str) -> Result<Self> {
        if !self.status().is_success() {
            let status = self.status();
            let body = self.text().await.unwrap_or_default();
            anyhow::bail!("{source} returned {status}: {body}");
        }
        Ok(self)
    }
}
