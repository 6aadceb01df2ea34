//! Set-nickname command.

use crate::commands::{CommandContext, CommandHandler};
use crate::error::AppResult;
use async_trait::async_trait;
use messenger_client::{ChatApi, OutgoingMessage};
use std::sync::Arc;
use tracing::error;

pub struct NicknameHandler {
    chat: Arc<dyn ChatApi>,
}

impl NicknameHandler {
    pub fn new(chat: Arc<dyn ChatApi>) -> Self {
        Self { chat }
    }
}

#[async_trait]
impl CommandHandler for NicknameHandler {
    fn key(&self) -> &str {
        "setbd"
    }

    async fn execute(&self, ctx: &CommandContext<'_>) -> AppResult<OutgoingMessage> {
        let target = ctx.command.target_or_sender(ctx.sender_id());
        let nickname = ctx.command.target_text();
        if nickname.is_empty() {
            return Ok(ctx.usage(self.key()));
        }

        match self
            .chat
            .change_nickname(nickname, ctx.thread_id(), &target.id)
            .await
        {
            Ok(()) => Ok(ctx
                .catalog
                .render(
                    self.key(),
                    &[("user", target.tag.as_str()), ("nickname", nickname)],
                )
                .into()),
            Err(e) => {
                error!("Failed to change nickname of {}: {}", target.id, e);
                Ok(format!("Could not change the nickname. Error: {}", e).into())
            }
        }
    }
}
