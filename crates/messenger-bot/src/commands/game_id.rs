//! Game id registry commands.

use crate::commands::{CommandContext, CommandHandler};
use crate::error::AppResult;
use async_trait::async_trait;
use messenger_client::OutgoingMessage;
use std::sync::Arc;
use thread_store::GameIdStore;

pub struct SetGameIdHandler {
    game_ids: Arc<GameIdStore>,
}

impl SetGameIdHandler {
    pub fn new(game_ids: Arc<GameIdStore>) -> Self {
        Self { game_ids }
    }
}

#[async_trait]
impl CommandHandler for SetGameIdHandler {
    fn key(&self) -> &str {
        ".setidgame"
    }

    async fn execute(&self, ctx: &CommandContext<'_>) -> AppResult<OutgoingMessage> {
        let target = ctx.command.target_or_sender(ctx.sender_id());
        let game_id = ctx.command.target_text_or_rest();
        if game_id.is_empty() {
            return Ok(ctx.usage(self.key()));
        }

        self.game_ids
            .set(ctx.thread_id(), &target.id, game_id)
            .await?;
        Ok(ctx
            .catalog
            .render(
                self.key(),
                &[("user", target.tag.as_str()), ("newGameId", game_id)],
            )
            .into())
    }
}

pub struct GameIdHandler {
    game_ids: Arc<GameIdStore>,
}

impl GameIdHandler {
    pub fn new(game_ids: Arc<GameIdStore>) -> Self {
        Self { game_ids }
    }
}

#[async_trait]
impl CommandHandler for GameIdHandler {
    fn key(&self) -> &str {
        ".id"
    }

    async fn execute(&self, ctx: &CommandContext<'_>) -> AppResult<OutgoingMessage> {
        let target = ctx.command.target_or_sender(ctx.sender_id());

        match self.game_ids.get(ctx.thread_id(), &target.id).await? {
            Some(game_id) => Ok(ctx
                .catalog
                .render(
                    self.key(),
                    &[("user", target.tag.as_str()), ("gameId", game_id.as_str())],
                )
                .into()),
            None => Ok(format!("No game ID found for {}.", target.tag).into()),
        }
    }
}
