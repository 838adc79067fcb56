//! REST client delivering replies and publishing commands.
//!
//! Wraps `reqwest::Client` with an [`ApiConfig`] and implements both
//! [`ReplyTransport`] and [`CommandPublisher`].

use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::command::domain::ApplicationCommand;
use crate::config::ApiConfig;
use crate::interaction::domain::{Interaction, InteractionCallback, MessagePayload, Snowflake};
use crate::interaction::error::ProtocolError;
use crate::interaction::ports::{
    CommandPublisher, PublishResult, ReplyTransport, TransportError, TransportResult,
};

/// Returns the initial-response callback path for an interaction.
#[must_use]
pub fn callback_path(interaction_id: Snowflake, token: &str) -> String {
    format!("/interactions/{interaction_id}/{token}/callback")
}

/// Returns the follow-up webhook path for an interaction token.
#[must_use]
pub fn followup_path(application_id: Snowflake, token: &str) -> String {
    format!("/webhooks/{application_id}/{token}")
}

/// Returns the bulk-overwrite path for global application commands.
#[must_use]
pub fn commands_path(application_id: Snowflake) -> String {
    format!("/applications/{application_id}/commands")
}

/// HTTP adapter for the platform REST API.
#[derive(Debug, Clone)]
pub struct HttpPlatformClient {
    http: reqwest::Client,
    config: ApiConfig,
}

enum Method {
    Post,
    Put,
}

impl HttpPlatformClient {
    /// Creates a client for the given configuration.
    #[must_use]
    pub fn new(config: ApiConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    /// Creates a client reusing an existing `reqwest` client.
    #[must_use]
    pub const fn with_client(http: reqwest::Client, config: ApiConfig) -> Self {
        Self { http, config }
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &ApiConfig {
        &self.config
    }

    fn application_id(&self, interaction: &Interaction) -> Option<Snowflake> {
        interaction.application_id.or(self.config.application_id)
    }

    async fn send<T: Serialize + Sync>(
        &self,
        method: Method,
        path: &str,
        body: &T,
        authorize: bool,
    ) -> TransportResult<()> {
        let url = self.config.endpoint(path);
        let mut request = match method {
            Method::Post => self.http.post(&url),
            Method::Put => self.http.put(&url),
        };
        if authorize && let Some(token) = &self.config.bot_token {
            request = request.header(reqwest::header::AUTHORIZATION, format!("Bot {token}"));
        }

        let response = request
            .json(body)
            .send()
            .await
            .map_err(TransportError::request)?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let detail = response.text().await.unwrap_or_default();
        warn!(path, status = status.as_u16(), "platform rejected request");
        Err(TransportError::Status {
            status: status.as_u16(),
            body: detail,
        })
    }
}

#[async_trait]
impl ReplyTransport for HttpPlatformClient {
    async fn create_response(
        &self,
        interaction: &Interaction,
        callback: &InteractionCallback,
    ) -> TransportResult<()> {
        debug!(interaction_id = %interaction.id, "posting interaction callback");
        let path = callback_path(interaction.id, &interaction.token);
        self.send(Method::Post, &path, callback, false).await
    }

    async fn create_followup(
        &self,
        interaction: &Interaction,
        message: &MessagePayload,
    ) -> TransportResult<()> {
        let application_id = self.application_id(interaction).ok_or_else(|| {
            TransportError::MissingRoute("follow-up requires an application id".to_owned())
        })?;
        debug!(interaction_id = %interaction.id, "posting follow-up message");
        let path = followup_path(application_id, &interaction.token);
        self.send(Method::Post, &path, message, false).await
    }
}

#[async_trait]
impl CommandPublisher for HttpPlatformClient {
    async fn publish(&self, commands: &[ApplicationCommand]) -> PublishResult<()> {
        let application_id = self.config.application_id.ok_or_else(|| {
            ProtocolError::NotInitialized("application id is not configured".to_owned())
        })?;
        let path = commands_path(application_id);
        self.send(Method::Put, &path, &commands, true).await?;
        info!(%application_id, commands = commands.len(), "published application commands");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn callback_path_uses_interaction_id_and_token() {
        assert_eq!(
            callback_path(Snowflake::new(42), "tok"),
            "/interactions/42/tok/callback"
        );
    }

    #[rstest]
    fn followup_path_uses_application_webhook() {
        assert_eq!(followup_path(Snowflake::new(7), "tok"), "/webhooks/7/tok");
    }

    #[rstest]
    fn commands_path_targets_global_commands() {
        assert_eq!(
            commands_path(Snowflake::new(7)),
            "/applications/7/commands"
        );
    }

    #[rstest]
    #[tokio::test]
    async fn publish_without_application_id_is_not_initialized() {
        let client = HttpPlatformClient::new(ApiConfig::new("token"));

        let err = client
            .publish(&[])
            .await
            .expect_err("publish should fail without application id");

        assert!(matches!(
            err,
            crate::interaction::ports::PublishError::Protocol(ProtocolError::NotInitialized(_))
        ));
    }

    #[rstest]
    fn debug_output_redacts_token() {
        let client = HttpPlatformClient::new(ApiConfig::new("super-secret"));
        assert!(!format!("{client:?}").contains("super-secret"));
    }
}
