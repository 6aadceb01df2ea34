//! Kick command - removes the tagged user from the thread.

use crate::commands::{CommandContext, CommandHandler};
use crate::error::AppResult;
use async_trait::async_trait;
use messenger_client::{ChatApi, OutgoingMessage};
use std::sync::Arc;
use tracing::error;

pub struct KickHandler {
    chat: Arc<dyn ChatApi>,
}

impl KickHandler {
    pub fn new(chat: Arc<dyn ChatApi>) -> Self {
        Self { chat }
    }
}

#[async_trait]
impl CommandHandler for KickHandler {
    fn key(&self) -> &str {
        "kick"
    }

    async fn execute(&self, ctx: &CommandContext<'_>) -> AppResult<OutgoingMessage> {
        let Some(target) = &ctx.command.tagged else {
            return Ok(ctx.usage(self.key()));
        };

        match self
            .chat
            .remove_user_from_group(&target.id, ctx.thread_id())
            .await
        {
            Ok(()) => Ok(ctx
                .catalog
                .render(self.key(), &[("user", target.tag.as_str())])
                .into()),
            Err(e) => {
                error!("Failed to kick {}: {}", target.id, e);
                Ok(format!("Could not kick {}. Error: {}", target.tag, e).into())
            }
        }
    }
}
