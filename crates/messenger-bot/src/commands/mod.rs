//! Bot command handlers.

mod admin;
mod ban;
mod color;
mod game_id;
mod greeting;
mod help;
mod kick;
mod mute;
mod nickname;
mod ping;
mod time;

pub use admin::AdminModeHandler;
pub use ban::{BanHandler, UnbanHandler};
pub use color::{ColorHandler, PALETTE};
pub use game_id::{GameIdHandler, SetGameIdHandler};
pub use greeting::HelloHandler;
pub use help::HelpHandler;
pub use kick::KickHandler;
pub use mute::{MuteHandler, UnmuteHandler};
pub use nickname::NicknameHandler;
pub use ping::{mention_all, PingHandler, INVISIBLE_TAG};
pub use time::TimeHandler;

use crate::catalog::CommandCatalog;
use crate::error::AppResult;
use crate::parse::ParsedCommand;
use crate::state::{BotState, Stores};
use async_trait::async_trait;
use messenger_client::{ChatApi, IncomingMessage, OutgoingMessage};
use std::sync::Arc;

/// Everything a handler needs to answer one message.
pub struct CommandContext<'a> {
    pub message: &'a IncomingMessage,
    pub command: &'a ParsedCommand,
    pub catalog: &'a CommandCatalog,
}

impl CommandContext<'_> {
    pub fn thread_id(&self) -> &str {
        &self.message.thread_id
    }

    pub fn sender_id(&self) -> &str {
        &self.message.sender_id
    }

    /// Usage hint reply for a command.
    pub fn usage(&self, key: &str) -> OutgoingMessage {
        self.catalog.usage(key).into()
    }
}

/// Command handler trait.
#[async_trait]
pub trait CommandHandler: Send + Sync {
    /// Command token this handler answers (e.g. "kick", ".ping").
    fn key(&self) -> &str;

    /// Execute the command and return the reply.
    ///
    /// Platform failures are reported in the reply; an `Err` is reserved
    /// for failures the handler cannot describe itself.
    async fn execute(&self, ctx: &CommandContext<'_>) -> AppResult<OutgoingMessage>;
}

/// The full command set.
pub fn standard_handlers(
    chat: Arc<dyn ChatApi>,
    stores: &Stores,
    state: Arc<BotState>,
    bot_id: &str,
) -> Vec<Box<dyn CommandHandler>> {
    vec![
        Box::new(HelloHandler),
        Box::new(HelpHandler),
        Box::new(TimeHandler),
        Box::new(AdminModeHandler::new(state)),
        Box::new(KickHandler::new(chat.clone())),
        Box::new(BanHandler::new(chat.clone(), stores.bans.clone())),
        Box::new(UnbanHandler::new(stores.bans.clone())),
        Box::new(MuteHandler::new(stores.mutes.clone())),
        Box::new(UnmuteHandler::new(stores.mutes.clone())),
        Box::new(NicknameHandler::new(chat.clone())),
        Box::new(SetGameIdHandler::new(stores.game_ids.clone())),
        Box::new(GameIdHandler::new(stores.game_ids.clone())),
        Box::new(PingHandler::new(chat.clone(), bot_id)),
        Box::new(ColorHandler::new(chat)),
    ]
}
