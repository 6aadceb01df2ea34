//! Client for the messenger bridge: a small HTTP sidecar that owns the
//! platform session and exposes messaging and group-management calls.

mod api;
mod client;
mod error;
mod receiver;
mod types;

pub use api::ChatApi;
pub use client::MessengerClient;
pub use error::ChatError;
pub use receiver::EventReceiver;
pub use types::*;
