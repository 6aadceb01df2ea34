//! Messenger bridge API types.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Log message type the bridge emits when participants join a thread.
pub const LOG_SUBSCRIBE: &str = "log:subscribe";

/// Raw event as delivered by `GET /v1/events`.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum RawEvent {
    Message(RawMessage),
    Event(RawLogEvent),
    #[serde(other)]
    Unsupported,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawMessage {
    #[serde(rename = "threadID")]
    pub thread_id: String,
    #[serde(rename = "senderID")]
    pub sender_id: String,
    #[serde(default)]
    pub body: Option<String>,
    /// Mentioned user id -> display name as typed in the body.
    #[serde(default)]
    pub mentions: Option<BTreeMap<String, String>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawLogEvent {
    #[serde(rename = "logMessageType")]
    pub log_message_type: String,
    #[serde(rename = "threadID")]
    pub thread_id: String,
    #[serde(rename = "logMessageData", default)]
    pub log_message_data: LogMessageData,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LogMessageData {
    #[serde(rename = "addedParticipants", default)]
    pub added_participants: Vec<AddedParticipant>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AddedParticipant {
    #[serde(rename = "userFbId")]
    pub user_id: String,
}

/// A mention inside an outgoing message body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mention {
    pub id: String,
    pub tag: String,
    /// Offset of `tag` inside the body in UTF-16 code units.
    pub from_index: usize,
}

/// Message to send to a thread.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutgoingMessage {
    pub body: String,
    pub mentions: Vec<Mention>,
    /// Local file uploaded alongside the body.
    pub attachment: Option<PathBuf>,
}

impl OutgoingMessage {
    /// Plain text message.
    pub fn text(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            ..Default::default()
        }
    }

    pub fn with_mentions(mut self, mentions: Vec<Mention>) -> Self {
        self.mentions = mentions;
        self
    }

    pub fn with_attachment(mut self, path: impl Into<PathBuf>) -> Self {
        self.attachment = Some(path.into());
        self
    }
}

impl From<String> for OutgoingMessage {
    fn from(body: String) -> Self {
        Self::text(body)
    }
}

impl From<&str> for OutgoingMessage {
    fn from(body: &str) -> Self {
        Self::text(body)
    }
}

/// Wire body for `POST /v1/threads/{thread}/messages`.
#[derive(Debug, Clone, Serialize)]
pub struct SendMessageRequest {
    pub body: String,
    pub mentions: Vec<Mention>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub base64_attachments: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    #[serde(rename = "appState")]
    pub app_state: serde_json::Value,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    #[serde(rename = "userID")]
    pub user_id: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct NicknameRequest<'a> {
    pub nickname: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub struct ColorRequest<'a> {
    pub color: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ParticipantRef {
    pub id: String,
}

/// Thread metadata.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ThreadInfo {
    #[serde(rename = "participantIDs", default)]
    pub participant_ids: Vec<String>,
    #[serde(rename = "adminIDs", default)]
    pub admin_ids: Vec<ParticipantRef>,
    #[serde(rename = "threadName", default)]
    pub thread_name: Option<String>,
}

impl ThreadInfo {
    pub fn is_admin(&self, user_id: &str) -> bool {
        self.admin_ids.iter().any(|a| a.id == user_id)
    }
}

/// User profile.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserInfo {
    pub name: String,
    #[serde(rename = "thumbSrc", alias = "profileImageURL", default)]
    pub profile_image_url: Option<String>,
}

/// Parsed text message for bot processing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomingMessage {
    pub thread_id: String,
    pub sender_id: String,
    /// Message text, already trimmed and never empty.
    pub body: String,
    pub mentions: BTreeMap<String, String>,
}

impl IncomingMessage {
    pub fn new(
        thread_id: impl Into<String>,
        sender_id: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            thread_id: thread_id.into(),
            sender_id: sender_id.into(),
            body: body.into(),
            mentions: BTreeMap::new(),
        }
    }

    pub fn with_mention(mut self, user_id: impl Into<String>, name: impl Into<String>) -> Self {
        self.mentions.insert(user_id.into(), name.into());
        self
    }
}

/// Event the bot acts on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BotEvent {
    Message(IncomingMessage),
    MembersAdded {
        thread_id: String,
        user_ids: Vec<String>,
    },
}

impl BotEvent {
    /// Convert a raw bridge event, dropping anything the bot ignores.
    pub fn from_raw(raw: RawEvent) -> Option<Self> {
        match raw {
            RawEvent::Message(msg) => {
                let body = msg.body?.trim().to_string();
                if body.is_empty() {
                    return None;
                }
                Some(Self::Message(IncomingMessage {
                    thread_id: msg.thread_id,
                    sender_id: msg.sender_id,
                    body,
                    mentions: msg.mentions.unwrap_or_default(),
                }))
            }
            RawEvent::Event(ev) if ev.log_message_type == LOG_SUBSCRIBE => {
                let user_ids: Vec<String> = ev
                    .log_message_data
                    .added_participants
                    .into_iter()
                    .map(|p| p.user_id)
                    .collect();
                if user_ids.is_empty() {
                    return None;
                }
                Some(Self::MembersAdded {
                    thread_id: ev.thread_id,
                    user_ids,
                })
            }
            RawEvent::Event(_) | RawEvent::Unsupported => None,
        }
    }

    pub fn thread_id(&self) -> &str {
        match self {
            Self::Message(m) => &m.thread_id,
            Self::MembersAdded { thread_id, .. } => thread_id,
        }
    }
}
