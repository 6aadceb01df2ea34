//! Group chat moderation bot.
//!
//! Messages are parsed into commands, gated by the per-thread admin mode and
//! answered by the handlers in [`commands`]. Membership events go to the
//! [`welcome`] flow.

pub mod bot;
pub mod catalog;
pub mod commands;
pub mod config;
pub mod error;
pub mod parse;
pub mod router;
pub mod state;
pub mod welcome;

pub use bot::Bot;
pub use catalog::CommandCatalog;
pub use config::Config;
pub use error::{AppError, AppResult};
pub use router::CommandRouter;
pub use state::{BotState, Stores};
pub use welcome::WelcomeFlow;
