//! Thread color command.

use crate::commands::{CommandContext, CommandHandler};
use crate::error::AppResult;
use async_trait::async_trait;
use messenger_client::{ChatApi, OutgoingMessage};
use rand::seq::SliceRandom;
use std::sync::Arc;
use tracing::error;

/// Thread colors the bridge accepts.
pub const PALETTE: &[&str] = &[
    "#0084ff", "#44bec7", "#ffc300", "#fa3c4c", "#d696bb", "#6699cc", "#13cf13", "#ff7e29",
    "#e68585", "#7646ff", "#20cef5", "#67b868", "#d4a88c", "#ff5ca1", "#a695c7",
];

pub struct ColorHandler {
    chat: Arc<dyn ChatApi>,
}

impl ColorHandler {
    pub fn new(chat: Arc<dyn ChatApi>) -> Self {
        Self { chat }
    }
}

#[async_trait]
impl CommandHandler for ColorHandler {
    fn key(&self) -> &str {
        ".color"
    }

    async fn execute(&self, ctx: &CommandContext<'_>) -> AppResult<OutgoingMessage> {
        let color = {
            let mut rng = rand::thread_rng();
            PALETTE.choose(&mut rng).copied().unwrap_or(PALETTE[0])
        };

        match self.chat.change_thread_color(color, ctx.thread_id()).await {
            Ok(()) => Ok(ctx.catalog.render(self.key(), &[("color", color)]).into()),
            Err(e) => {
                error!("Failed to change color of {}: {}", ctx.thread_id(), e);
                Ok(format!("Could not change the thread color. Error: {}", e).into())
            }
        }
    }
}
