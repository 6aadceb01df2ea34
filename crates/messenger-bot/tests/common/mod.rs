//! Common test utilities for integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use messenger_bot::commands::standard_handlers;
use messenger_bot::{BotState, CommandCatalog, CommandRouter, Stores, WelcomeFlow};
use messenger_client::{
    ChatApi, ChatError, OutgoingMessage, ParticipantRef, ThreadInfo, UserInfo,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

pub const BOT_ID: &str = "bot";
pub const THREAD: &str = "t1";

const CATALOG: &str = include_str!("../../data/commands.json");

/// A message as the fake saw it, with the attachment read at send time.
#[derive(Debug, Clone)]
pub struct Sent {
    pub thread_id: String,
    pub message: OutgoingMessage,
    pub attachment_bytes: Option<Vec<u8>>,
}

#[derive(Default)]
struct Recorded {
    sent: Vec<Sent>,
    removed: Vec<(String, String)>,
    nicknames: Vec<(String, String, String)>,
    colors: Vec<(String, String)>,
    thread_info_calls: usize,
}

/// Recording in-memory `ChatApi`.
#[derive(Default)]
pub struct FakeChat {
    recorded: Mutex<Recorded>,
    thread: Mutex<ThreadInfo>,
    users: Mutex<HashMap<String, UserInfo>>,
    fail_remove: Mutex<bool>,
    fail_thread_info: Mutex<bool>,
    fail_attachment_send: Mutex<bool>,
}

impl FakeChat {
    pub fn new() -> Self {
        let fake = Self::default();
        fake.set_thread(&[BOT_ID, "admin", "alice", "bob"], &["admin"]);
        fake
    }

    pub fn set_thread(&self, participants: &[&str], admins: &[&str]) {
        *self.thread.lock().unwrap() = ThreadInfo {
            participant_ids: participants.iter().map(|s| s.to_string()).collect(),
            admin_ids: admins
                .iter()
                .map(|id| ParticipantRef { id: id.to_string() })
                .collect(),
            thread_name: Some("Test Group".into()),
        };
    }

    pub fn add_user(&self, id: &str, name: &str, avatar: Option<String>) {
        self.users.lock().unwrap().insert(
            id.to_string(),
            UserInfo {
                name: name.to_string(),
                profile_image_url: avatar,
            },
        );
    }

    pub fn fail_remove(&self) {
        *self.fail_remove.lock().unwrap() = true;
    }

    pub fn fail_thread_info(&self) {
        *self.fail_thread_info.lock().unwrap() = true;
    }

    pub fn fail_attachment_send(&self) {
        *self.fail_attachment_send.lock().unwrap() = true;
    }

    pub fn sent(&self) -> Vec<Sent> {
        self.recorded.lock().unwrap().sent.clone()
    }

    pub fn sent_bodies(&self) -> Vec<String> {
        self.sent().into_iter().map(|s| s.message.body).collect()
    }

    pub fn removed(&self) -> Vec<(String, String)> {
        self.recorded.lock().unwrap().removed.clone()
    }

    pub fn nicknames(&self) -> Vec<(String, String, String)> {
        self.recorded.lock().unwrap().nicknames.clone()
    }

    pub fn colors(&self) -> Vec<(String, String)> {
        self.recorded.lock().unwrap().colors.clone()
    }

    pub fn thread_info_calls(&self) -> usize {
        self.recorded.lock().unwrap().thread_info_calls
    }
}

#[async_trait]
impl ChatApi for FakeChat {
    async fn send_message(&self, thread_id: &str, message: &OutgoingMessage) -> Result<(), ChatError> {
        let attachment_bytes = match &message.attachment {
            Some(path) => {
                if *self.fail_attachment_send.lock().unwrap() {
                    return Err(ChatError::SendFailed("attachment rejected".into()));
                }
                Some(std::fs::read(path)?)
            }
            None => None,
        };

        self.recorded.lock().unwrap().sent.push(Sent {
            thread_id: thread_id.to_string(),
            message: message.clone(),
            attachment_bytes,
        });
        Ok(())
    }

    async fn remove_user_from_group(&self, user_id: &str, thread_id: &str) -> Result<(), ChatError> {
        if *self.fail_remove.lock().unwrap() {
            return Err(ChatError::Api("not allowed".into()));
        }
        self.recorded
            .lock()
            .unwrap()
            .removed
            .push((thread_id.to_string(), user_id.to_string()));
        Ok(())
    }

    async fn change_nickname(&self, nickname: &str, thread_id: &str, user_id: &str) -> Result<(), ChatError> {
        self.recorded.lock().unwrap().nicknames.push((
            thread_id.to_string(),
            user_id.to_string(),
            nickname.to_string(),
        ));
        Ok(())
    }

    async fn change_thread_color(&self, color: &str, thread_id: &str) -> Result<(), ChatError> {
        self.recorded
            .lock()
            .unwrap()
            .colors
            .push((thread_id.to_string(), color.to_string()));
        Ok(())
    }

    async fn get_thread_info(&self, _thread_id: &str) -> Result<ThreadInfo, ChatError> {
        self.recorded.lock().unwrap().thread_info_calls += 1;
        if *self.fail_thread_info.lock().unwrap() {
            return Err(ChatError::Api("thread unavailable".into()));
        }
        Ok(self.thread.lock().unwrap().clone())
    }

    async fn get_user_info(&self, user_id: &str) -> Result<UserInfo, ChatError> {
        self.users
            .lock()
            .unwrap()
            .get(user_id)
            .cloned()
            .ok_or_else(|| ChatError::Api(format!("unknown user {}", user_id)))
    }
}

/// Router, welcome flow and stores wired to a `FakeChat`.
pub struct Harness {
    pub chat: Arc<FakeChat>,
    pub stores: Stores,
    pub state: Arc<BotState>,
    pub router: CommandRouter,
    pub welcome: WelcomeFlow,
    pub temp_dir: TempDir,
    _data: TempDir,
}

impl Harness {
    pub fn new() -> Self {
        let chat = Arc::new(FakeChat::new());
        Self::with_chat(chat)
    }

    pub fn with_chat(chat: Arc<FakeChat>) -> Self {
        let data = TempDir::new().unwrap();
        let temp_dir = TempDir::new().unwrap();
        let stores = Stores::new(
            data.path().join("bans.json"),
            data.path().join("mutes.json"),
            data.path().join("gameIDs.json"),
        );
        let state = Arc::new(BotState::new());
        let catalog = Arc::new(CommandCatalog::from_json(CATALOG).unwrap());
        let api: Arc<dyn ChatApi> = chat.clone();

        let router = CommandRouter::new(
            api.clone(),
            catalog,
            state.clone(),
            stores.mutes.clone(),
            BOT_ID,
        )
        .with_handlers(standard_handlers(api.clone(), &stores, state.clone(), BOT_ID));

        let welcome = WelcomeFlow::new(api, stores.bans.clone(), temp_dir.path(), BOT_ID).unwrap();

        Self {
            chat,
            stores,
            state,
            router,
            welcome,
            temp_dir,
            _data: data,
        }
    }

    /// Temp files left behind by the welcome flow.
    pub fn temp_files(&self) -> Vec<std::path::PathBuf> {
        std::fs::read_dir(self.temp_dir.path())
            .unwrap()
            .map(|e| e.unwrap().path())
            .collect()
    }
}
