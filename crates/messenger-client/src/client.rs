//! Messenger bridge HTTP client.

use crate::api::ChatApi;
use crate::error::ChatError;
use crate::types::*;
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;
use tracing::{debug, info, instrument, warn};
use urlencoding::encode;

/// Client for the HTTP bridge wrapping the platform session.
#[derive(Clone)]
pub struct MessengerClient {
    client: Client,
    base_url: String,
    user_id: String,
}

impl MessengerClient {
    /// Create a client for an already logged-in bridge session.
    pub fn new(
        base_url: impl Into<String>,
        user_id: impl Into<String>,
    ) -> Result<Self, ChatError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            user_id: user_id.into(),
        })
    }

    /// Log the bridge in with a saved app state and return a client bound
    /// to the resulting account.
    #[instrument(skip(base_url, app_state))]
    pub async fn login(
        base_url: impl Into<String>,
        app_state: &SecretString,
    ) -> Result<Self, ChatError> {
        let mut this = Self::new(base_url, "")?;
        let request = LoginRequest {
            app_state: serde_json::from_str(app_state.expose_secret())?,
        };

        let response = this
            .client
            .post(format!("{}/v1/login", this.base_url))
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let msg = response.text().await.unwrap_or_default();
            return Err(ChatError::LoginFailed(msg));
        }

        let login: LoginResponse = response.json().await?;
        info!("Logged in as {}", login.user_id);
        this.user_id = login.user_id;
        Ok(this)
    }

    /// The bot account's own user id.
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Check if the bridge is reachable.
    pub async fn health_check(&self) -> bool {
        self.client
            .get(format!("{}/v1/health", self.base_url))
            .send()
            .await
            .map(|r| r.status().is_success())
            .unwrap_or(false)
    }

    /// Drain pending events from the bridge.
    ///
    /// Each event is decoded on its own; one that does not decode is logged
    /// and skipped without losing the rest of the batch.
    #[instrument(skip(self))]
    pub async fn receive(&self) -> Result<Vec<RawEvent>, ChatError> {
        let response = self
            .client
            .get(format!("{}/v1/events", self.base_url))
            .send()
            .await?;

        let batch: Vec<serde_json::Value> = check(response).await?.json().await?;
        let total = batch.len();
        let events: Vec<RawEvent> = batch
            .into_iter()
            .filter_map(|value| match serde_json::from_value::<RawEvent>(value) {
                Ok(event) => Some(event),
                Err(e) => {
                    warn!("Skipping malformed event: {}", e);
                    None
                }
            })
            .collect();

        debug!("Received {} of {} events", events.len(), total);
        Ok(events)
    }

    fn thread_url(&self, thread_id: &str) -> String {
        format!("{}/v1/threads/{}", self.base_url, encode(thread_id))
    }
}

/// Turn a non-2xx response into an API error carrying the body text.
async fn check(response: Response) -> Result<Response, ChatError> {
    if response.status().is_success() {
        return Ok(response);
    }
    let status = response.status();
    let msg = response.text().await.unwrap_or_default();
    if msg.is_empty() {
        Err(ChatError::Api(status.to_string()))
    } else {
        Err(ChatError::Api(msg))
    }
}

#[async_trait]
impl ChatApi for MessengerClient {
    #[instrument(skip(self, message))]
    async fn send_message(
        &self,
        thread_id: &str,
        message: &OutgoingMessage,
    ) -> Result<(), ChatError> {
        let mut base64_attachments = Vec::new();
        if let Some(path) = &message.attachment {
            let bytes = tokio::fs::read(path).await?;
            base64_attachments.push(STANDARD.encode(bytes));
        }

        let request = SendMessageRequest {
            body: message.body.clone(),
            mentions: message.mentions.clone(),
            base64_attachments,
        };

        let response = self
            .client
            .post(format!("{}/messages", self.thread_url(thread_id)))
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let msg = response.text().await.unwrap_or_default();
            warn!("Send failed: {}", msg);
            return Err(ChatError::SendFailed(msg));
        }

        debug!("Sent message to {}", thread_id);
        Ok(())
    }

    #[instrument(skip(self))]
    async fn remove_user_from_group(
        &self,
        user_id: &str,
        thread_id: &str,
    ) -> Result<(), ChatError> {
        let response = self
            .client
            .delete(format!(
                "{}/participants/{}",
                self.thread_url(thread_id),
                encode(user_id)
            ))
            .send()
            .await?;

        check(response).await?;
        info!("Removed {} from {}", user_id, thread_id);
        Ok(())
    }

    #[instrument(skip(self))]
    async fn change_nickname(
        &self,
        nickname: &str,
        thread_id: &str,
        user_id: &str,
    ) -> Result<(), ChatError> {
        let response = self
            .client
            .put(format!(
                "{}/nicknames/{}",
                self.thread_url(thread_id),
                encode(user_id)
            ))
            .json(&NicknameRequest { nickname })
            .send()
            .await?;

        check(response).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn change_thread_color(&self, color: &str, thread_id: &str) -> Result<(), ChatError> {
        let response = self
            .client
            .put(format!("{}/color", self.thread_url(thread_id)))
            .json(&ColorRequest { color })
            .send()
            .await?;

        check(response).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_thread_info(&self, thread_id: &str) -> Result<ThreadInfo, ChatError> {
        let response = self.client.get(self.thread_url(thread_id)).send().await?;
        Ok(check(response).await?.json().await?)
    }

    #[instrument(skip(self))]
    async fn get_user_info(&self, user_id: &str) -> Result<UserInfo, ChatError> {
        let response = self
            .client
            .get(format!("{}/v1/users/{}", self.base_url, encode(user_id)))
            .send()
            .await?;
        Ok(check(response).await?.json().await?)
    }
}
