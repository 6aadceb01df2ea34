//! Admin mode toggle.

use crate::commands::{CommandContext, CommandHandler};
use crate::error::AppResult;
use crate::state::BotState;
use async_trait::async_trait;
use messenger_client::OutgoingMessage;
use std::sync::Arc;

pub struct AdminModeHandler {
    state: Arc<BotState>,
}

impl AdminModeHandler {
    pub fn new(state: Arc<BotState>) -> Self {
        Self { state }
    }
}

#[async_trait]
impl CommandHandler for AdminModeHandler {
    fn key(&self) -> &str {
        ".admin"
    }

    async fn execute(&self, ctx: &CommandContext<'_>) -> AppResult<OutgoingMessage> {
        let enabled = self.state.toggle_admin_mode(ctx.thread_id()).await;
        let status = if enabled { "on" } else { "off" };
        Ok(ctx.catalog.render(self.key(), &[("status", status)]).into())
    }
}
