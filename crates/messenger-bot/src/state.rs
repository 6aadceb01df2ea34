//! Process-lifetime bot state and persistent stores.

use crate::config::StorageConfig;
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::sync::Arc;
use thread_store::{GameIdStore, UserListStore};
use tokio::sync::RwLock;
use tracing::info;

/// In-memory per-thread state. Reset on restart.
#[derive(Default)]
pub struct BotState {
    admin_mode: RwLock<HashMap<String, bool>>,
    /// Admin ids per thread, filled on first gated command and dropped
    /// whenever admin mode is toggled for that thread.
    admin_cache: RwLock<HashMap<String, HashSet<String>>>,
}

impl BotState {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn is_admin_mode(&self, thread_id: &str) -> bool {
        self.admin_mode
            .read()
            .await
            .get(thread_id)
            .copied()
            .unwrap_or(false)
    }

    /// Flip admin mode for a thread and return the new value.
    pub async fn toggle_admin_mode(&self, thread_id: &str) -> bool {
        let enabled = {
            let mut modes = self.admin_mode.write().await;
            let flag = modes.entry(thread_id.to_string()).or_insert(false);
            *flag = !*flag;
            *flag
        };
        self.admin_cache.write().await.remove(thread_id);

        info!(
            "Admin mode {} for {}",
            if enabled { "enabled" } else { "disabled" },
            thread_id
        );
        enabled
    }

    pub async fn cached_admins(&self, thread_id: &str) -> Option<HashSet<String>> {
        self.admin_cache.read().await.get(thread_id).cloned()
    }

    pub async fn cache_admins(&self, thread_id: &str, admins: HashSet<String>) {
        self.admin_cache
            .write()
            .await
            .insert(thread_id.to_string(), admins);
    }
}

/// The bot's JSON stores. One instance per file.
#[derive(Clone)]
pub struct Stores {
    pub bans: Arc<UserListStore>,
    pub mutes: Arc<UserListStore>,
    pub game_ids: Arc<GameIdStore>,
}

impl Stores {
    pub fn new(
        bans_path: impl Into<PathBuf>,
        mutes_path: impl Into<PathBuf>,
        game_ids_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            bans: Arc::new(UserListStore::new("banned", bans_path)),
            mutes: Arc::new(UserListStore::new("muted", mutes_path)),
            game_ids: Arc::new(GameIdStore::new(game_ids_path)),
        }
    }

    pub fn open(config: &StorageConfig) -> Self {
        Self::new(
            config.bans_path.clone(),
            config.mutes_path.clone(),
            config.game_ids_path.clone(),
        )
    }
}
