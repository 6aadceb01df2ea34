//! Hello command - fixed greeting.

use crate::commands::{CommandContext, CommandHandler};
use crate::error::AppResult;
use async_trait::async_trait;
use messenger_client::OutgoingMessage;

pub struct HelloHandler;

#[async_trait]
impl CommandHandler for HelloHandler {
    fn key(&self) -> &str {
        "hello"
    }

    async fn execute(&self, ctx: &CommandContext<'_>) -> AppResult<OutgoingMessage> {
        Ok(ctx.catalog.response(self.key()).into())
    }
}
