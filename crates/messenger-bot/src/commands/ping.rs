//! Mention-all command.

use crate::commands::{CommandContext, CommandHandler};
use crate::error::AppResult;
use async_trait::async_trait;
use messenger_client::{ChatApi, Mention, OutgoingMessage};
use std::sync::Arc;
use tracing::error;

/// Zero-width space. Each participant is mentioned on one of these.
pub const INVISIBLE_TAG: &str = "\u{200B}";

/// Build a message mentioning every participant except the bot.
///
/// The body is one [`INVISIBLE_TAG`] per participant followed by `text`;
/// mention `k` sits at offset `k` (each tag is one UTF-16 code unit).
pub fn mention_all(participants: &[String], bot_id: &str, text: &str) -> OutgoingMessage {
    let mentions: Vec<Mention> = participants
        .iter()
        .filter(|id| id.as_str() != bot_id)
        .enumerate()
        .map(|(k, id)| Mention {
            id: id.clone(),
            tag: INVISIBLE_TAG.to_string(),
            from_index: k,
        })
        .collect();

    let body = format!("{}{}", INVISIBLE_TAG.repeat(mentions.len()), text);
    OutgoingMessage::text(body).with_mentions(mentions)
}

pub struct PingHandler {
    chat: Arc<dyn ChatApi>,
    bot_id: String,
}

impl PingHandler {
    pub fn new(chat: Arc<dyn ChatApi>, bot_id: impl Into<String>) -> Self {
        Self {
            chat,
            bot_id: bot_id.into(),
        }
    }
}

#[async_trait]
impl CommandHandler for PingHandler {
    fn key(&self) -> &str {
        ".ping"
    }

    async fn execute(&self, ctx: &CommandContext<'_>) -> AppResult<OutgoingMessage> {
        let text = &ctx.command.content_after_command;
        if text.is_empty() {
            return Ok(ctx.usage(self.key()));
        }

        match self.chat.get_thread_info(ctx.thread_id()).await {
            Ok(info) => Ok(mention_all(&info.participant_ids, &self.bot_id, text)),
            Err(e) => {
                error!("Failed to fetch participants of {}: {}", ctx.thread_id(), e);
                Ok(format!("Could not fetch the member list. Error: {}", e).into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mention_all_skips_bot() {
        let participants = vec!["a".to_string(), "bot".to_string(), "b".to_string()];
        let message = mention_all(&participants, "bot", "wake up");

        assert_eq!(message.body, "\u{200B}\u{200B}wake up");
        assert_eq!(message.mentions.len(), 2);
        assert_eq!(message.mentions[0].id, "a");
        assert_eq!(message.mentions[1].id, "b");

        let chars: Vec<char> = message.body.chars().collect();
        for (k, mention) in message.mentions.iter().enumerate() {
            assert_eq!(mention.from_index, k);
            assert_eq!(chars[mention.from_index], '\u{200B}');
        }
    }

    #[test]
    fn test_mention_all_empty_group() {
        let message = mention_all(&["bot".to_string()], "bot", "anyone?");
        assert_eq!(message.body, "anyone?");
        assert!(message.mentions.is_empty());
    }
}
