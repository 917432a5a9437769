/// Shared helpers for command handlers
use anyhow::Result;
use folio_storage::Database;
use folio_sync::Reconciler;

/// Open the default local store and wrap it in a reconciler.
pub fn open_reconciler() -> Result<Reconciler> {
    Reconciler::new(Database::new(None)?)
}

/// Split a comma-separated label list, dropping empty entries.
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|label| !label.is_empty())
        .map(str::to_string)
        .collect()
}

/// Mask a secret for display.
pub fn mask_secret(secret: &str) -> String {
    if secret.is_empty() {
        "(not set)".to_string()
    } else {
        format!("{}***", secret.chars().take(8).collect::<String>())
    }
}

/// Safely truncate a string to a maximum number of characters (not bytes).
/// This avoids panics when slicing multi-byte UTF-8 characters.
pub fn truncate_str(s: &str, max_chars: usize) -> String {
    let char_count = s.chars().count();
    if char_count > max_chars {
        let truncated: String = s.chars().take(max_chars).collect();
        format!("{truncated}...")
    } else {
        s.to_string()
    }
}
