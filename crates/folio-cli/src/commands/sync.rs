/// Remote refresh and publish command handlers
use anyhow::Result;

use folio_sync::{ReadMode, DEFAULT_COMMIT_MESSAGE};

use super::helpers::open_reconciler;

pub async fn handle_refresh() -> Result<()> {
    let reconciler = open_reconciler()?;

    match reconciler.force_refresh().await {
        Ok(projects) => {
            println!("Projects updated from the remote document ({} records).", projects.len());
        }
        Err(e) => {
            log::debug!("Forced refresh failed: {e:#}");
            println!("No updates available or connection failed.");
        }
    }

    Ok(())
}

pub async fn handle_publish(message: Option<&str>) -> Result<()> {
    let reconciler = open_reconciler()?;

    // Publish what the admin sees locally, never a freshly pulled remote set
    let projects = reconciler.get_projects(ReadMode::LocalOnly).await;
    let outcome = reconciler
        .publish_projects(&projects, message.unwrap_or(DEFAULT_COMMIT_MESSAGE))
        .await;

    println!("{}", outcome.message);

    Ok(())
}
