//! Help command - lists every described command.

use crate::commands::{CommandContext, CommandHandler};
use crate::error::AppResult;
use async_trait::async_trait;
use messenger_client::OutgoingMessage;

pub struct HelpHandler;

#[async_trait]
impl CommandHandler for HelpHandler {
    fn key(&self) -> &str {
        "help"
    }

    async fn execute(&self, ctx: &CommandContext<'_>) -> AppResult<OutgoingMessage> {
        let mut text = format!("{}\n\n", ctx.catalog.response(self.key()));

        for (key, spec) in ctx.catalog.iter() {
            let Some(description) = &spec.description else {
                continue;
            };
            text.push_str(&format!("- {}: {}\n", key, description));
            if let Some(usage) = &spec.usage {
                text.push_str(&format!("  Usage: {}\n", usage));
            }
            if spec.admin_only {
                text.push_str("  (Admins only when admin mode is on)\n");
            }
            text.push('\n');
        }

        Ok(text.trim_end().to_string().into())
    }
}
