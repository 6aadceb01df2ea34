//! Top-level event dispatch.

use crate::router::CommandRouter;
use crate::welcome::WelcomeFlow;
use messenger_client::BotEvent;
use tracing::error;

/// Routes each bridge event to the router or the welcome flow.
pub struct Bot {
    router: CommandRouter,
    welcome: WelcomeFlow,
}

impl Bot {
    pub fn new(router: CommandRouter, welcome: WelcomeFlow) -> Self {
        Self { router, welcome }
    }

    pub fn router(&self) -> &CommandRouter {
        &self.router
    }

    /// Handle one event. Errors are logged, never returned.
    pub async fn handle_event(&self, event: BotEvent) {
        match event {
            BotEvent::Message(message) => {
                if let Err(e) = self.router.handle(&message).await {
                    error!("Failed to reply in {}: {}", message.thread_id, e);
                }
            }
            BotEvent::MembersAdded { thread_id, user_ids } => {
                self.welcome.handle(&thread_id, &user_ids).await;
            }
        }
    }
}
