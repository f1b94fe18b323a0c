//! Identity provider configuration.
//!
//! The browser build receives the Firebase web config object as JSON; native
//! callers read the same fields from environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

pub const DEFAULT_IDENTITY_BASE_URL: &str = "https://identitytoolkit.googleapis.com";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config parse failed: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("missing config value: env var {var} not set")]
    Missing { var: &'static str },

    #[error("invalid config value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Web app config as issued by the provider console.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderConfig {
    pub api_key: String,
    #[serde(default)]
    pub auth_domain: String,
    #[serde(default)]
    pub project_id: String,
    #[serde(default)]
    pub storage_bucket: String,
    #[serde(default)]
    pub messaging_sender_id: String,
    #[serde(default)]
    pub app_id: String,
    #[serde(default = "default_identity_base_url")]
    pub identity_base_url: String,
}

fn default_identity_base_url() -> String {
    DEFAULT_IDENTITY_BASE_URL.to_owned()
}

impl ProviderConfig {
    /// Config with only an API key; every other field empty or default.
    #[must_use]
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            auth_domain: String::new(),
            project_id: String::new(),
            storage_bucket: String::new(),
            messaging_sender_id: String::new(),
            app_id: String::new(),
            identity_base_url: default_identity_base_url(),
        }
    }

    /// Parse the JSON config object embedded in the page.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or fails [`Self::validate`].
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()
    }

    /// Build config from environment variables.
    ///
    /// Required:
    /// - `AUTHGATE_API_KEY`
    ///
    /// Optional:
    /// - `AUTHGATE_AUTH_DOMAIN`, `AUTHGATE_PROJECT_ID`, `AUTHGATE_STORAGE_BUCKET`,
    ///   `AUTHGATE_MESSAGING_SENDER_ID`, `AUTHGATE_APP_ID`
    /// - `AUTHGATE_IDENTITY_BASE_URL`: default `https://identitytoolkit.googleapis.com`
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is missing or a value is invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Same as [`Self::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_key = lookup("AUTHGATE_API_KEY").ok_or(ConfigError::Missing { var: "AUTHGATE_API_KEY" })?;
        let optional = |key: &str| lookup(key).unwrap_or_default();
        let config = Self {
            api_key,
            auth_domain: optional("AUTHGATE_AUTH_DOMAIN"),
            project_id: optional("AUTHGATE_PROJECT_ID"),
            storage_bucket: optional("AUTHGATE_STORAGE_BUCKET"),
            messaging_sender_id: optional("AUTHGATE_MESSAGING_SENDER_ID"),
            app_id: optional("AUTHGATE_APP_ID"),
            identity_base_url: lookup("AUTHGATE_IDENTITY_BASE_URL").unwrap_or_else(default_identity_base_url),
        };
        config.validate()
    }

    /// Reject unusable values and normalize the base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for a blank API key or a base URL
    /// that is not `http(s)`.
    pub fn validate(mut self) -> Result<Self, ConfigError> {
        if self.api_key.trim().is_empty() {
            return Err(ConfigError::Invalid { field: "apiKey", reason: "must not be empty".into() });
        }
        let base = self.identity_base_url.trim().trim_end_matches('/');
        if !(base.starts_with("https://") || base.starts_with("http://")) {
            return Err(ConfigError::Invalid {
                field: "identityBaseUrl",
                reason: format!("expected http(s) URL, got {base:?}"),
            });
        }
        self.identity_base_url = base.to_owned();
        Ok(self)
    }
}
