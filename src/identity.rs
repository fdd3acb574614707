//! Signed-in user remembered between sessions, stored as one JSON file.
//!
//! A missing, unreadable or malformed file reads as "nobody signed in".

use crate::config::ConsoleSettings;
use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Path, PathBuf};

pub const DEFAULT_IDENTITY_FILE: &str = ".admin_console_user.json";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedUser {
    pub user_name: String,
    #[serde(default)]
    pub right: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
}

#[derive(Clone, Debug)]
pub struct IdentityCache {
    path: PathBuf,
}

impl IdentityCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn from_settings(settings: &ConsoleSettings) -> Self {
        Self::new(
            settings
                .identity_path
                .clone()
                .unwrap_or_else(|| PathBuf::from(DEFAULT_IDENTITY_FILE)),
        )
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn get(&self) -> Option<CachedUser> {
        let raw = tokio::fs::read_to_string(&self.path).await.ok()?;
        match serde_json::from_str::<CachedUser>(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                tracing::debug!(path = %self.path.display(), error = %e, "ignoring malformed identity cache");
                None
            }
        }
    }

    pub async fn set(&self, user: &CachedUser) -> io::Result<()> {
        let json = serde_json::to_vec(user).map_err(io::Error::other)?;
        tokio::fs::write(&self.path, json).await
    }

    /// Forget the user. Clearing an absent cache is not an error.
    pub async fn clear(&self) -> io::Result<()> {
        match tokio::fs::remove_file(&self.path).await {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cache(dir: &tempfile::TempDir) -> IdentityCache {
        IdentityCache::new(dir.path().join("user.json"))
    }

    #[tokio::test]
    async fn set_get_clear() {
        let dir = tempfile::tempdir().unwrap();
        let cache = cache(&dir);
        assert_eq!(cache.get().await, None);

        let user = CachedUser {
            user_name: "sita".into(),
            right: "admin".into(),
            user_id: Some(4),
        };
        cache.set(&user).await.unwrap();
        assert_eq!(cache.get().await, Some(user));

        cache.clear().await.unwrap();
        assert_eq!(cache.get().await, None);
        cache.clear().await.unwrap();
    }

    #[tokio::test]
    async fn malformed_reads_as_absent() {
        let dir = tempfile::tempdir().unwrap();
        let cache = cache(&dir);
        for raw in ["not json", "null", r#"{"right":"admin"}"#, r#"{"user_name":42,"right":"admin"}"#] {
            tokio::fs::write(cache.path(), raw).await.unwrap();
            assert_eq!(cache.get().await, None, "{raw}");
        }
        tokio::fs::write(cache.path(), r#"{"user_name":"ram"}"#).await.unwrap();
        assert_eq!(cache.get().await.map(|u| u.right), Some(String::new()));
    }
}
