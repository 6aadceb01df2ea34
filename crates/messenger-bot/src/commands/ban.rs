//! Ban and unban commands.

use crate::commands::{CommandContext, CommandHandler};
use crate::error::AppResult;
use async_trait::async_trait;
use messenger_client::{ChatApi, OutgoingMessage};
use std::sync::Arc;
use thread_store::UserListStore;
use tracing::{error, info};

/// Records the ban, then removes the user.
pub struct BanHandler {
    chat: Arc<dyn ChatApi>,
    bans: Arc<UserListStore>,
}

impl BanHandler {
    pub fn new(chat: Arc<dyn ChatApi>, bans: Arc<UserListStore>) -> Self {
        Self { chat, bans }
    }
}

#[async_trait]
impl CommandHandler for BanHandler {
    fn key(&self) -> &str {
        "ban"
    }

    async fn execute(&self, ctx: &CommandContext<'_>) -> AppResult<OutgoingMessage> {
        let Some(target) = &ctx.command.tagged else {
            return Ok(ctx.usage(self.key()));
        };

        if let Err(e) = self.bans.add(ctx.thread_id(), &target.id).await {
            error!("Failed to record ban of {}: {}", target.id, e);
            return Ok(format!("Could not save the ban: {}", e).into());
        }

        if let Err(e) = self
            .chat
            .remove_user_from_group(&target.id, ctx.thread_id())
            .await
        {
            error!("Failed to remove banned user {}: {}", target.id, e);
            return Ok(format!(
                "{} is banned but could not be removed. Error: {}",
                target.tag, e
            )
            .into());
        }

        info!("Banned {} from {}", target.id, ctx.thread_id());
        Ok(ctx
            .catalog
            .render(self.key(), &[("user", target.tag.as_str())])
            .into())
    }
}

/// Lifts a ban by raw user id.
pub struct UnbanHandler {
    bans: Arc<UserListStore>,
}

impl UnbanHandler {
    pub fn new(bans: Arc<UserListStore>) -> Self {
        Self { bans }
    }
}

#[async_trait]
impl CommandHandler for UnbanHandler {
    fn key(&self) -> &str {
        "unban"
    }

    async fn execute(&self, ctx: &CommandContext<'_>) -> AppResult<OutgoingMessage> {
        let Some(user_id) = ctx.command.args.first() else {
            return Ok(ctx.usage(self.key()));
        };

        if self.bans.remove(ctx.thread_id(), user_id).await? {
            Ok(ctx
                .catalog
                .render(self.key(), &[("userID", user_id.as_str())])
                .into())
        } else {
            Ok(format!("User {} is not banned.", user_id).into())
        }
    }
}
