//! Per-thread stores backed by JSON files.

use crate::error::StoreError;
use crate::file::JsonFile;
use crate::types::*;
use std::path::PathBuf;
use tracing::{info, instrument};

/// Per-thread set of user ids (ban list, mute list).
///
/// Stored as a list per thread; a user id appears at most once.
pub struct UserListStore {
    name: &'static str,
    file: JsonFile<ThreadUserLists>,
}

impl UserListStore {
    /// `name` only labels log lines ("banned", "muted").
    pub fn new(name: &'static str, path: impl Into<PathBuf>) -> Self {
        Self {
            name,
            file: JsonFile::new(path),
        }
    }

    /// Add a user. Returns false if they were already listed.
    #[instrument(skip(self), fields(list = self.name))]
    pub async fn add(&self, thread_id: &str, user_id: &str) -> Result<bool, StoreError> {
        let added = self
            .file
            .update(|lists| {
                let users = lists.entry(thread_id.to_string()).or_default();
                if users.iter().any(|u| u == user_id) {
                    false
                } else {
                    users.push(user_id.to_string());
                    true
                }
            })
            .await?;

        if added {
            info!("Added {} to {} list of {}", user_id, self.name, thread_id);
        }
        Ok(added)
    }

    /// Remove a user. Returns false if they were not listed; the file is
    /// left untouched in that case.
    #[instrument(skip(self), fields(list = self.name))]
    pub async fn remove(&self, thread_id: &str, user_id: &str) -> Result<bool, StoreError> {
        if !self.contains(thread_id, user_id).await? {
            return Ok(false);
        }

        let removed = self
            .file
            .update(|lists| {
                let Some(users) = lists.get_mut(thread_id) else {
                    return false;
                };
                let before = users.len();
                users.retain(|u| u != user_id);
                let removed = users.len() != before;
                if users.is_empty() {
                    lists.remove(thread_id);
                }
                removed
            })
            .await?;

        if removed {
            info!("Removed {} from {} list of {}", user_id, self.name, thread_id);
        }
        Ok(removed)
    }

    pub async fn contains(&self, thread_id: &str, user_id: &str) -> Result<bool, StoreError> {
        Ok(self
            .file
            .read()
            .await?
            .get(thread_id)
            .is_some_and(|users| users.iter().any(|u| u == user_id)))
    }

    /// Users listed for a thread.
    pub async fn list(&self, thread_id: &str) -> Result<Vec<String>, StoreError> {
        Ok(self
            .file
            .read()
            .await?
            .remove(thread_id)
            .unwrap_or_default())
    }

    /// Whole document, every thread.
    pub async fn snapshot(&self) -> Result<ThreadUserLists, StoreError> {
        self.file.read().await
    }
}

/// Registry of `(thread, user) -> game id`.
pub struct GameIdStore {
    file: JsonFile<ThreadGameIds>,
}

impl GameIdStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            file: JsonFile::new(path),
        }
    }

    /// Set (or overwrite) a user's game id in a thread.
    #[instrument(skip(self, game_id))]
    pub async fn set(
        &self,
        thread_id: &str,
        user_id: &str,
        game_id: &str,
    ) -> Result<(), StoreError> {
        self.file
            .update(|ids| {
                ids.entry(thread_id.to_string())
                    .or_default()
                    .insert(user_id.to_string(), game_id.to_string());
            })
            .await
    }

    pub async fn get(&self, thread_id: &str, user_id: &str) -> Result<Option<String>, StoreError> {
        Ok(self
            .file
            .read()
            .await?
            .get(thread_id)
            .and_then(|users| users.get(user_id).cloned()))
    }
}
