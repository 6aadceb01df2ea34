//! Platform operations the bot depends on.

use crate::error::ChatError;
use crate::types::{OutgoingMessage, ThreadInfo, UserInfo};
use async_trait::async_trait;

/// Messaging and group-management calls against the chat platform.
#[async_trait]
pub trait ChatApi: Send + Sync {
    /// Send a message (text, mentions, optional attachment) to a thread.
    async fn send_message(&self, thread_id: &str, message: &OutgoingMessage)
        -> Result<(), ChatError>;

    /// Remove a participant from a group thread.
    async fn remove_user_from_group(&self, user_id: &str, thread_id: &str)
        -> Result<(), ChatError>;

    /// Set a participant's nickname in a thread.
    async fn change_nickname(
        &self,
        nickname: &str,
        thread_id: &str,
        user_id: &str,
    ) -> Result<(), ChatError>;

    /// Change the thread's theme color (hex code).
    async fn change_thread_color(&self, color: &str, thread_id: &str) -> Result<(), ChatError>;

    /// Fetch participants, admins and name of a thread.
    async fn get_thread_info(&self, thread_id: &str) -> Result<ThreadInfo, ChatError>;

    /// Fetch a user's profile.
    async fn get_user_info(&self, user_id: &str) -> Result<UserInfo, ChatError>;
}
