//! Command router: parse, gate, dispatch.

use crate::catalog::CommandCatalog;
use crate::commands::{CommandContext, CommandHandler};
use crate::error::AppResult;
use crate::parse::ParsedCommand;
use crate::state::BotState;
use messenger_client::{ChatApi, ChatError, IncomingMessage, OutgoingMessage};
use std::collections::HashMap;
use std::sync::Arc;
use thread_store::UserListStore;
use tracing::{debug, error, info, instrument, warn};

/// Routes incoming messages to their command handler.
pub struct CommandRouter {
    chat: Arc<dyn ChatApi>,
    catalog: Arc<CommandCatalog>,
    state: Arc<BotState>,
    mutes: Arc<UserListStore>,
    bot_id: String,
    handlers: HashMap<String, Box<dyn CommandHandler>>,
}

impl CommandRouter {
    pub fn new(
        chat: Arc<dyn ChatApi>,
        catalog: Arc<CommandCatalog>,
        state: Arc<BotState>,
        mutes: Arc<UserListStore>,
        bot_id: impl Into<String>,
    ) -> Self {
        Self {
            chat,
            catalog,
            state,
            mutes,
            bot_id: bot_id.into(),
            handlers: HashMap::new(),
        }
    }

    /// Register a handler. Commands missing from the catalog stay disabled.
    pub fn register(&mut self, handler: Box<dyn CommandHandler>) {
        let key = handler.key().to_lowercase();
        if !self.catalog.contains(&key) {
            warn!("No catalog entry for '{}', command disabled", key);
            return;
        }
        self.handlers.insert(key, handler);
    }

    pub fn with_handlers(
        mut self,
        handlers: impl IntoIterator<Item = Box<dyn CommandHandler>>,
    ) -> Self {
        for handler in handlers {
            self.register(handler);
        }
        self
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    /// Answer a message and send the reply, if any.
    pub async fn handle(&self, message: &IncomingMessage) -> AppResult<()> {
        if let Some(reply) = self.respond(message).await {
            self.chat.send_message(&message.thread_id, &reply).await?;
        }
        Ok(())
    }

    /// Compute the reply for a message without sending it.
    ///
    /// Handler side effects (removals, store writes) still happen here.
    #[instrument(skip_all, fields(thread = %message.thread_id, sender = %message.sender_id))]
    pub async fn respond(&self, message: &IncomingMessage) -> Option<OutgoingMessage> {
        if message.sender_id == self.bot_id {
            return None;
        }

        let command = ParsedCommand::parse(message)?;

        match self
            .mutes
            .contains(&message.thread_id, &message.sender_id)
            .await
        {
            Ok(true) => {
                debug!("Ignoring muted sender");
                return None;
            }
            Ok(false) => {}
            Err(e) => warn!("Failed to read mute list: {}", e),
        }

        let Some(handler) = self.handlers.get(&command.key) else {
            debug!("Unknown command '{}'", command.key);
            return Some(self.catalog.unknown_message().into());
        };

        if self.catalog.is_admin_only(&command.key)
            && self.state.is_admin_mode(&message.thread_id).await
        {
            match self.is_admin(&message.thread_id, &message.sender_id).await {
                Ok(true) => {}
                Ok(false) => {
                    info!("Rejected '{}' from non-admin", command.key);
                    return Some(self.catalog.admin_only_message().into());
                }
                Err(e) => {
                    error!("Failed to resolve admins: {}", e);
                    return Some(
                        format!("Could not check admin permissions. Error: {}", e).into(),
                    );
                }
            }
        }

        let ctx = CommandContext {
            message,
            command: &command,
            catalog: &self.catalog,
        };

        info!("Executing '{}'", command.key);
        match handler.execute(&ctx).await {
            Ok(reply) if reply.body.is_empty() && reply.attachment.is_none() => None,
            Ok(reply) => Some(reply),
            Err(e) => {
                error!("Handler '{}' failed: {}", command.key, e);
                Some(format!("Sorry, something went wrong: {}", e).into())
            }
        }
    }

    async fn is_admin(&self, thread_id: &str, user_id: &str) -> Result<bool, ChatError> {
        if let Some(admins) = self.state.cached_admins(thread_id).await {
            return Ok(admins.contains(user_id));
        }

        let info = self.chat.get_thread_info(thread_id).await?;
        let is_admin = info.is_admin(user_id);
        self.state
            .cache_admins(thread_id, info.admin_ids.into_iter().map(|a| a.id).collect())
            .await;
        Ok(is_admin)
    }
}
