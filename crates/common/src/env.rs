//! Environment/runtime helpers
//!
//! Sanity checks to ensure the SQLite database location is usable at startup.

use std::path::PathBuf;

use tracing::{info, warn};

/// Returns the on-disk file behind a SQLite URL, or `None` for in-memory databases.
pub fn sqlite_file_path(url: &str) -> Option<PathBuf> {
    let rest = url
        .strip_prefix("sqlite://")
        .or_else(|| url.strip_prefix("sqlite:"))?;
    let path = rest.split('?').next()?;
    if path.is_empty() || path == ":memory:" || path.starts_with("file:") {
        return None;
    }
    Some(PathBuf::from(path))
}

/// Ensure the directory holding the database file exists.
pub async fn ensure_env(database_url: &str) -> anyhow::Result<()> {
    let Some(path) = sqlite_file_path(database_url) else {
        warn!(%database_url, "database is not file-backed; data will not survive a restart");
        return Ok(());
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| anyhow::anyhow!("cannot create {}: {e}", parent.display()))?;
    }
    if tokio::fs::metadata(&path).await.is_err() {
        info!(path = %path.display(), "database file not found; it will be created");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_urls_resolve_to_paths() {
        assert_eq!(sqlite_file_path("sqlite://data/peaks.db?mode=rwc"), Some(PathBuf::from("data/peaks.db")));
        assert_eq!(sqlite_file_path("sqlite:database.db"), Some(PathBuf::from("database.db")));
    }

    #[test]
    fn memory_and_foreign_urls_have_no_path() {
        assert_eq!(sqlite_file_path("sqlite::memory:"), None);
        assert_eq!(sqlite_file_path("sqlite://:memory:"), None);
        assert_eq!(sqlite_file_path("postgres://localhost/db"), None);
    }

    #[tokio::test]
    async fn ensure_env_creates_parent_directory() -> anyhow::Result<()> {
        let dir = std::env::temp_dir().join(format!("peaks-env-{}", std::process::id()));
        let url = format!("sqlite://{}/nested/peaks.db?mode=rwc", dir.display());
        ensure_env(&url).await?;
        assert!(dir.join("nested").is_dir());
        tokio::fs::remove_dir_all(&dir).await?;
        Ok(())
    }
}
