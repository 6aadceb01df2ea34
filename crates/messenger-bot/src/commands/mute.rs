//! Mute and unmute commands. Muted senders are skipped by the router.

use crate::commands::{CommandContext, CommandHandler};
use crate::error::AppResult;
use async_trait::async_trait;
use messenger_client::OutgoingMessage;
use std::sync::Arc;
use thread_store::UserListStore;

pub struct MuteHandler {
    mutes: Arc<UserListStore>,
}

impl MuteHandler {
    pub fn new(mutes: Arc<UserListStore>) -> Self {
        Self { mutes }
    }
}

#[async_trait]
impl CommandHandler for MuteHandler {
    fn key(&self) -> &str {
        "mute"
    }

    async fn execute(&self, ctx: &CommandContext<'_>) -> AppResult<OutgoingMessage> {
        let Some(target) = &ctx.command.tagged else {
            return Ok(ctx.usage(self.key()));
        };

        self.mutes.add(ctx.thread_id(), &target.id).await?;
        Ok(ctx
            .catalog
            .render(self.key(), &[("user", target.tag.as_str())])
            .into())
    }
}

pub struct UnmuteHandler {
    mutes: Arc<UserListStore>,
}

impl UnmuteHandler {
    pub fn new(mutes: Arc<UserListStore>) -> Self {
        Self { mutes }
    }
}

#[async_trait]
impl CommandHandler for UnmuteHandler {
    fn key(&self) -> &str {
        "unmute"
    }

    async fn execute(&self, ctx: &CommandContext<'_>) -> AppResult<OutgoingMessage> {
        let Some(target) = &ctx.command.tagged else {
            return Ok(ctx.usage(self.key()));
        };

        if self.mutes.remove(ctx.thread_id(), &target.id).await? {
            Ok(ctx
                .catalog
                .render(self.key(), &[("user", target.tag.as_str())])
                .into())
        } else {
            Ok(format!("{} is not muted.", target.tag).into())
        }
    }
}
