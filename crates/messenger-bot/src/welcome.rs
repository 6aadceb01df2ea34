//! New-member welcome flow.

use crate::error::AppResult;
use chrono::{DateTime, Local, TimeZone, Timelike};
use messenger_client::{ChatApi, Mention, OutgoingMessage};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use thread_store::UserListStore;
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

const APOLOGY: &str = "Sorry, something went wrong while welcoming our new member.";

/// Greets members added to a thread, or removes them again if banned.
pub struct WelcomeFlow {
    chat: Arc<dyn ChatApi>,
    bans: Arc<UserListStore>,
    http: reqwest::Client,
    temp_dir: PathBuf,
    bot_id: String,
}

impl WelcomeFlow {
    pub fn new(
        chat: Arc<dyn ChatApi>,
        bans: Arc<UserListStore>,
        temp_dir: impl Into<PathBuf>,
        bot_id: impl Into<String>,
    ) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            chat,
            bans,
            http,
            temp_dir: temp_dir.into(),
            bot_id: bot_id.into(),
        })
    }

    /// Handle one membership event. Failures are answered with an apology.
    pub async fn handle(&self, thread_id: &str, user_ids: &[String]) {
        for user_id in user_ids.iter().filter(|id| **id != self.bot_id) {
            if let Err(e) = self.welcome(thread_id, user_id).await {
                error!("Failed to welcome {} in {}: {}", user_id, thread_id, e);
                if let Err(e) = self.chat.send_message(thread_id, &APOLOGY.into()).await {
                    error!("Failed to send apology: {}", e);
                }
            }
        }
    }

    #[instrument(skip(self))]
    async fn welcome(&self, thread_id: &str, user_id: &str) -> AppResult<()> {
        if self.bans.contains(thread_id, user_id).await? {
            info!("Banned user rejoined, removing again");
            self.chat.remove_user_from_group(user_id, thread_id).await?;
            let notice = format!("User {} is banned from this group and was removed.", user_id);
            self.chat.send_message(thread_id, &notice.into()).await?;
            return Ok(());
        }

        let thread = self.chat.get_thread_info(thread_id).await?;
        let user = self.chat.get_user_info(user_id).await?;
        let now = Local::now();

        let nickname = format!("{} ({})", user.name, now.format("%d/%m/%Y"));
        self.chat
            .change_nickname(&nickname, thread_id, user_id)
            .await?;

        let body = welcome_text(
            &user.name,
            thread.thread_name.as_deref().unwrap_or("this group"),
            thread.participant_ids.len(),
            &now,
        );
        let mention = Mention {
            id: user_id.to_string(),
            tag: user.name.clone(),
            from_index: utf16_index(&body, &user.name),
        };
        let message = OutgoingMessage::text(body).with_mentions(vec![mention]);

        if let Some(url) = user
            .profile_image_url
            .as_deref()
            .filter(|u| u.starts_with("http"))
        {
            match self.send_with_avatar(thread_id, &message, url).await {
                Ok(()) => return Ok(()),
                Err(e) => warn!("Sending welcome with avatar failed, falling back to text: {}", e),
            }
        }

        self.chat.send_message(thread_id, &message).await?;
        Ok(())
    }

    async fn send_with_avatar(
        &self,
        thread_id: &str,
        message: &OutgoingMessage,
        url: &str,
    ) -> AppResult<()> {
        let bytes = self
            .http
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;

        let path = self
            .temp_dir
            .join(format!("welcome-{}.jpg", Uuid::new_v4()));
        if let Err(e) = tokio::fs::write(&path, &bytes).await {
            discard(&path).await;
            return Err(e.into());
        }

        let result = self
            .chat
            .send_message(thread_id, &message.clone().with_attachment(&path))
            .await;

        discard(&path).await;
        Ok(result?)
    }
}

/// Best-effort removal of a staged avatar.
async fn discard(path: &Path) {
    match tokio::fs::remove_file(path).await {
        Ok(()) => {}
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => warn!("Failed to delete {}: {}", path.display(), e),
    }
}

/// Welcome text for a new member.
pub fn welcome_text<Tz: TimeZone>(
    name: &str,
    thread_name: &str,
    member_count: usize,
    at: &DateTime<Tz>,
) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!(
        "Hello {}!\nWelcome to | {} |\nYou are member number {} of the group.\nHave a nice {}!\nJoined: {} at {}",
        name,
        thread_name,
        member_count,
        period_of_day(at.hour()),
        at.format("%d/%m/%Y"),
        at.format("%H:%M:%S"),
    )
}

/// Part of the day for an hour in 0..24.
pub fn period_of_day(hour: u32) -> &'static str {
    match hour {
        5..=11 => "morning",
        12..=17 => "afternoon",
        _ => "evening",
    }
}

/// Offset of `needle` in UTF-16 code units, the unit the bridge uses for
/// mention positions.
fn utf16_index(haystack: &str, needle: &str) -> usize {
    haystack
        .find(needle)
        .map(|byte| haystack[..byte].encode_utf16().count())
        .unwrap_or(0)
}
