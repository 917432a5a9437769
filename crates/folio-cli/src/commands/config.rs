/// Sync configuration command handlers
use anyhow::Result;

use folio_storage::Database;

use super::helpers::mask_secret;

pub fn handle_get(key: &str) -> Result<()> {
    let db = Database::new(None)?;
    let config = db.get_sync_config()?;

    let value = match key {
        "token" => mask_secret(&config.token),
        "repo" => config.repo,
        "branch" => config.branch,
        _ => anyhow::bail!("Unknown key: {key}. Use token, repo, or branch"),
    };
    println!("{key} = {value}");

    Ok(())
}

pub fn handle_set(key: &str, value: &str) -> Result<()> {
    let db = Database::new(None)?;
    let mut config = db.get_sync_config()?;

    match key {
        "token" => config.token = value.to_string(),
        "repo" => config.repo = value.to_string(),
        "branch" => config.branch = value.to_string(),
        _ => anyhow::bail!("Unknown key: {key}. Use token, repo, or branch"),
    }

    // The three settings are written back as a unit
    db.save_sync_config(&config)?;
    println!("Set {key}");

    Ok(())
}

pub fn handle_list() -> Result<()> {
    let db = Database::new(None)?;
    let config = db.get_sync_config()?;

    println!("Configuration:");
    println!("\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}");
    println!("\n[sync]");
    println!("  token = {}", mask_secret(&config.token));
    println!("  repo = {}", if config.repo.is_empty() { "(not set)" } else { &config.repo });
    println!("  branch = {}", config.branch);
    if !config.can_publish() {
        println!("  (publishing disabled until token and repo are set)");
    }

    println!("\n[store]");
    println!("  projects = {}", db.count_projects()?);
    println!(
        "  unpublished edits = {}",
        if db.is_dirty()? { "yes" } else { "no" }
    );
    match db.last_synced()? {
        Some(when) => println!("  last synced = {}", when.to_rfc3339()),
        None => println!("  last synced = never"),
    }

    Ok(())
}
