//! Platform API endpoint configuration.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::interaction::domain::Snowflake;

/// Default REST base URL for the platform API.
pub const DEFAULT_BASE_URL: &str = "https://discord.com/api";

/// Default REST API version used for interaction callbacks.
pub const DEFAULT_API_VERSION: u8 = 9;

/// Configuration for outbound platform API calls.
///
/// Hosts usually deserialize this from their own configuration file; every
/// field has a default so partial documents are accepted.
///
/// # Examples
///
/// ```
/// use slashgate::config::ApiConfig;
///
/// let config = ApiConfig::new("bot-token").with_api_version(10);
/// assert_eq!(
///     config.endpoint("/applications/1/commands"),
///     "https://discord.com/api/v10/applications/1/commands",
/// );
/// ```
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// REST base URL without a trailing slash or version segment.
    pub base_url: String,
    /// REST API version inserted as `/v{version}`.
    pub api_version: u8,
    /// Bot token used to authorize command publishing. Never serialized.
    #[serde(skip_serializing)]
    pub bot_token: Option<String>,
    /// Application identifier, required for publishing and follow-ups.
    pub application_id: Option<Snowflake>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            api_version: DEFAULT_API_VERSION,
            bot_token: None,
            application_id: None,
        }
    }
}

impl ApiConfig {
    /// Creates a configuration authorized with the given bot token.
    #[must_use]
    pub fn new(bot_token: impl Into<String>) -> Self {
        Self {
            bot_token: Some(bot_token.into()),
            ..Self::default()
        }
    }

    /// Overrides the REST base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_owned();
        self
    }

    /// Overrides the REST API version.
    #[must_use]
    pub const fn with_api_version(mut self, api_version: u8) -> Self {
        self.api_version = api_version;
        self
    }

    /// Sets the application identifier.
    #[must_use]
    pub const fn with_application_id(mut self, application_id: Snowflake) -> Self {
        self.application_id = Some(application_id);
        self
    }

    /// Builds a versioned endpoint URL for `path` (which must start with `/`).
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/v{}{path}", self.base_url, self.api_version)
    }
}

impl fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiConfig")
            .field("base_url", &self.base_url)
            .field("api_version", &self.api_version)
            .field("bot_token", &self.bot_token.as_ref().map(|_| "<redacted>"))
            .field("application_id", &self.application_id)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn default_targets_version_nine() {
        let config = ApiConfig::default();

        assert_eq!(
            config.endpoint("/interactions/1/abc/callback"),
            "https://discord.com/api/v9/interactions/1/abc/callback"
        );
        assert!(config.bot_token.is_none());
    }

    #[rstest]
    fn base_url_trailing_slash_is_trimmed() {
        let config = ApiConfig::default().with_base_url("http://localhost:8080/api/");

        assert_eq!(
            config.endpoint("/webhooks/1/t"),
            "http://localhost:8080/api/v9/webhooks/1/t"
        );
    }

    #[rstest]
    fn debug_output_redacts_token() {
        let config = ApiConfig::new("super-secret");
        let rendered = format!("{config:?}");

        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("<redacted>"));
    }

    #[rstest]
    fn serialized_config_omits_token() {
        let config = ApiConfig::new("super-secret");

        let rendered = serde_json::to_string(&config).expect("config should serialize");

        assert!(!rendered.contains("super-secret"));
        assert!(!rendered.contains("bot_token"));
    }

    #[rstest]
    fn partial_documents_fill_defaults() {
        let config: ApiConfig =
            serde_json::from_str(r#"{"application_id":"42"}"#).expect("config should parse");

        assert_eq!(config.api_version, DEFAULT_API_VERSION);
        assert_eq!(config.application_id, Some(Snowflake::new(42)));
    }
}
