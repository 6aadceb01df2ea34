//! Time command - current local date and time.

use crate::commands::{CommandContext, CommandHandler};
use crate::error::AppResult;
use async_trait::async_trait;
use chrono::Local;
use messenger_client::OutgoingMessage;

pub struct TimeHandler;

#[async_trait]
impl CommandHandler for TimeHandler {
    fn key(&self) -> &str {
        "time"
    }

    async fn execute(&self, ctx: &CommandContext<'_>) -> AppResult<OutgoingMessage> {
        let now = Local::now().format("%H:%M:%S %d/%m/%Y");
        Ok(format!("{}{}", ctx.catalog.response(self.key()), now).into())
    }
}
