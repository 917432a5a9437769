//! GitHub-backed host for the canonical projects document.
//!
//! Reads go through raw content (public, unauthenticated); publishes go
//! through the contents API with the token from the sync configuration.

use anyhow::{Context, Result};
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::Utc;
use reqwest::{header, Client, StatusCode};
use serde::Serialize;

use folio_storage::models::{Project, SyncConfig};

use crate::http::ResponseExt;
use crate::traits::{PublishError, RemoteDocument};

/// Path of the canonical document inside the repository.
pub const DOCUMENT_PATH: &str = "projects.json";

/// GitHub client for the raw document and the contents API.
pub struct GitHubRemote {
    client: Client,
    api_base: String,
    raw_base: String,
}

/// Body of a contents-API PUT. `sha` is omitted entirely when creating a
/// new document.
#[derive(Debug, Serialize)]
struct ContentsPut<'a> {
    message: &'a str,
    content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    sha: Option<&'a str>,
    branch: &'a str,
}

impl GitHubRemote {
    /// Create a client against the public GitHub endpoints
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created
    pub fn new() -> Result<Self> {
        Self::with_base_urls("https://api.github.com", "https://raw.githubusercontent.com")
    }

    /// Create a client with custom endpoints (GitHub Enterprise)
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created
    pub fn with_base_urls(api_base: &str, raw_base: &str) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "X-GitHub-Api-Version",
            header::HeaderValue::from_static("2022-11-28"),
        );
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_static("folio-portfolio-sync"),
        );

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            api_base: api_base.trim_end_matches('/').to_string(),
            raw_base: raw_base.trim_end_matches('/').to_string(),
        })
    }

    fn contents_url(&self, repo: &str) -> String {
        format!("{}/repos/{}/contents/{}", self.api_base, repo, DOCUMENT_PATH)
    }

    fn raw_url(&self, repo: &str, branch: &str) -> String {
        format!("{}/{}/{}/{}", self.raw_base, repo, branch, DOCUMENT_PATH)
    }
}

/// Pull the `message` field out of a GitHub error body, falling back to the
/// raw text or the status line when the body is not the usual shape.
async fn remote_message(response: reqwest::Response) -> String {
    let status = response.status();
    let text = response.text().await.unwrap_or_default();
    serde_json::from_str::<serde_json::Value>(&text)
        .ok()
        .and_then(|body| body["message"].as_str().map(str::to_string))
        .unwrap_or_else(|| {
            if text.is_empty() {
                status.to_string()
            } else {
                text
            }
        })
}

#[async_trait]
impl RemoteDocument for GitHubRemote {
    async fn fetch_snapshot(&self, repo: &str, branch: &str) -> Result<Vec<Project>> {
        // Timestamp query parameter defeats intermediate HTTP caches
        let url = format!(
            "{}?t={}",
            self.raw_url(repo, branch),
            Utc::now().timestamp_millis()
        );

        let response = self
            .client
            .get(&url)
            .header(header::CACHE_CONTROL, "no-cache")
            .send()
            .await
            .context("Failed to fetch canonical document")?
            .ensure_success("GitHub raw content")
            .await?;

        let projects: Vec<Project> = response
            .json()
            .await
            .context("Canonical document is not an array of projects")?;

        log::debug!("Fetched {} projects from {repo}@{branch}", projects.len());
        Ok(projects)
    }

    async fn read_sha(&self, config: &SyncConfig) -> Result<Option<String>, PublishError> {
        let url = format!(
            "{}?ref={}&t={}",
            self.contents_url(&config.repo),
            config.branch,
            Utc::now().timestamp_millis()
        );

        let response = self
            .client
            .get(&url)
            .bearer_auth(&config.token)
            .header(header::CACHE_CONTROL, "no-cache")
            .send()
            .await
            .map_err(|e| PublishError::Network(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            // Document does not exist yet; the write will create it
            return Ok(None);
        }
        if !status.is_success() {
            return Err(PublishError::Read {
                status: status.as_u16(),
                message: remote_message(response).await,
            });
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| PublishError::Network(e.to_string()))?;
        body["sha"]
            .as_str()
            .map(|sha| Some(sha.to_string()))
            .ok_or_else(|| PublishError::Read {
                status: status.as_u16(),
                message: "response is missing the content sha".to_string(),
            })
    }

    async fn write_document(
        &self,
        config: &SyncConfig,
        content: &str,
        message: &str,
        sha: Option<&str>,
    ) -> Result<(), PublishError> {
        let body = ContentsPut {
            message,
            content: STANDARD.encode(content),
            sha,
            branch: &config.branch,
        };

        let response = self
            .client
            .put(self.contents_url(&config.repo))
            .bearer_auth(&config.token)
            .json(&body)
            .send()
            .await
            .map_err(|e| PublishError::Network(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let detail = remote_message(response).await;
        if status == StatusCode::CONFLICT {
            Err(PublishError::Conflict { message: detail })
        } else {
            Err(PublishError::Write {
                status: status.as_u16(),
                message: detail,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls_target_the_document_path() {
        let remote =
            GitHubRemote::with_base_urls("https://api.github.com/", "https://raw.example.com")
                .unwrap();
        assert_eq!(
            remote.contents_url("osama-dev/portfolio"),
            "https://api.github.com/repos/osama-dev/portfolio/contents/projects.json"
        );
        assert_eq!(
            remote.raw_url("osama-dev/portfolio", "main"),
            "https://raw.example.com/osama-dev/portfolio/main/projects.json"
        );
    }

    #[test]
    fn test_contents_put_omits_sha_on_create() {
        let body = ContentsPut {
            message: "Update projects",
            content: STANDARD.encode("[]"),
            sha: None,
            branch: "main",
        };
        let json = serde_json::to_value(&body).unwrap();
        assert!(json.get("sha").is_none());
        assert_eq!(json["branch"], "main");
    }

    #[test]
    fn test_contents_put_encodes_payload_as_base64() {
        let payload = r#"[{"id":"1","title":"Aegis"}]"#;
        let body = ContentsPut {
            message: "Update projects",
            content: STANDARD.encode(payload),
            sha: Some("abc123"),
            branch: "main",
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["sha"], "abc123");
        let decoded = STANDARD.decode(json["content"].as_str().unwrap()).unwrap();
        assert_eq!(String::from_utf8(decoded).unwrap(), payload);
    }
}
