//! Polling event source.

use crate::client::MessengerClient;
use crate::error::ChatError;
use crate::types::{BotEvent, RawEvent};
use std::time::Duration;
use tokio::time::{interval, sleep, MissedTickBehavior};
use tokio_stream::Stream;
use tracing::{debug, error};

/// Pause after a failed poll before asking the bridge again.
const ERROR_BACKOFF: Duration = Duration::from_secs(5);

/// Turns repeated `GET /v1/events` calls into a stream of [`BotEvent`]s.
pub struct EventReceiver {
    client: MessengerClient,
    poll_interval: Duration,
}

impl EventReceiver {
    pub fn new(client: MessengerClient, poll_interval: Duration) -> Self {
        Self {
            client,
            poll_interval,
        }
    }

    /// One drain of the bridge queue, filtered down to events the bot acts on.
    pub async fn poll(&self) -> Result<Vec<BotEvent>, ChatError> {
        let raw = self.client.receive().await?;
        Ok(actionable(raw))
    }

    /// Endless event stream. Failed polls are logged and retried after
    /// [`ERROR_BACKOFF`].
    pub fn stream(self) -> impl Stream<Item = BotEvent> {
        async_stream::stream! {
            let mut ticker = interval(self.poll_interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;

                let events = match self.poll().await {
                    Ok(events) => events,
                    Err(e) => {
                        error!("Polling events failed: {}", e);
                        sleep(ERROR_BACKOFF).await;
                        continue;
                    }
                };

                for event in events {
                    debug!("Event for thread {}", event.thread_id());
                    yield event;
                }
            }
        }
    }
}

fn actionable(raw: Vec<RawEvent>) -> Vec<BotEvent> {
    raw.into_iter().filter_map(BotEvent::from_raw).collect()
}
