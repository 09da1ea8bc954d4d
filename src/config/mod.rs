#[cfg(feature = "cli")]
pub mod cli;
#[cfg(feature = "lambda")]
pub mod lambda;
pub mod toml_config;

use crate::utils::error::{RelayError, Result};
use crate::utils::validation::{
    validate_email_address, validate_non_empty_string, validate_range, validate_url, Validate,
};
use serde::Deserialize;
use std::fmt;
use std::time::Duration;

pub const DEFAULT_RECIPIENT_EMAIL: &str = "nvidal@synotec.cl";
pub const DEFAULT_SENDER_NAME: &str = "SYNOTEC Contacto";
pub const DEFAULT_SENDGRID_ENDPOINT: &str = "https://api.sendgrid.com/v3/mail/send";
pub const DEFAULT_ALLOWED_ORIGIN: &str = "*";

pub const ENV_API_KEY: &str = "SENDGRID_API_KEY";
pub const ENV_SENDER_EMAIL: &str = "SENDER_EMAIL";
pub const ENV_SENDER_NAME: &str = "SENDER_NAME";
pub const ENV_RECIPIENT_EMAIL: &str = "RECIPIENT_EMAIL";
pub const ENV_SENDGRID_ENDPOINT: &str = "SENDGRID_ENDPOINT";
pub const ENV_ALLOWED_ORIGIN: &str = "CORS_ALLOW_ORIGIN";
pub const ENV_TIMEOUT_SECONDS: &str = "SENDGRID_TIMEOUT_SECONDS";

/// Deployment-time settings for the relay. The two secrets stay optional so a
/// misconfigured deployment still starts and reports the problem per request.
#[derive(Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RelayConfig {
    pub api_key: Option<String>,
    pub sender_email: Option<String>,
    pub sender_name: String,
    pub recipient_email: String,
    pub sendgrid_endpoint: String,
    pub allowed_origin: String,
    pub timeout_seconds: Option<u64>,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            sender_email: None,
            sender_name: DEFAULT_SENDER_NAME.to_string(),
            recipient_email: DEFAULT_RECIPIENT_EMAIL.to_string(),
            sendgrid_endpoint: DEFAULT_SENDGRID_ENDPOINT.to_string(),
            allowed_origin: DEFAULT_ALLOWED_ORIGIN.to_string(),
            timeout_seconds: None,
        }
    }
}

impl fmt::Debug for RelayConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RelayConfig")
            .field("api_key", &self.api_key().map(|_| "<redacted>"))
            .field("sender_email", &self.sender_email)
            .field("sender_name", &self.sender_name)
            .field("recipient_email", &self.recipient_email)
            .field("sendgrid_endpoint", &self.sendgrid_endpoint)
            .field("allowed_origin", &self.allowed_origin)
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}

impl RelayConfig {
    pub fn from_env() -> Result<Self> {
        Self::default().with_overrides(|key| std::env::var(key).ok())
    }

    /// Overlays every variable `lookup` yields on top of `self`. Empty values are ignored.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.is_empty());

        if let Some(api_key) = get(ENV_API_KEY) {
            self.api_key = Some(api_key);
        }
        if let Some(sender_email) = get(ENV_SENDER_EMAIL) {
            self.sender_email = Some(sender_email);
        }
        if let Some(sender_name) = get(ENV_SENDER_NAME) {
            self.sender_name = sender_name;
        }
        if let Some(recipient_email) = get(ENV_RECIPIENT_EMAIL) {
            self.recipient_email = recipient_email;
        }
        if let Some(endpoint) = get(ENV_SENDGRID_ENDPOINT) {
            self.sendgrid_endpoint = endpoint;
        }
        if let Some(origin) = get(ENV_ALLOWED_ORIGIN) {
            self.allowed_origin = origin;
        }
        if let Some(timeout) = get(ENV_TIMEOUT_SECONDS) {
            let seconds = timeout
                .parse()
                .map_err(|_| RelayError::InvalidConfigValueError {
                    field: ENV_TIMEOUT_SECONDS.to_string(),
                    value: timeout.clone(),
                    reason: "Value must be a whole number of seconds".to_string(),
                })?;
            self.timeout_seconds = Some(seconds);
        }

        Ok(self)
    }

    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|key| !key.is_empty())
    }

    pub fn sender_email(&self) -> Option<&str> {
        self.sender_email.as_deref().filter(|email| !email.is_empty())
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_seconds.map(Duration::from_secs)
    }

    /// Environment names of the secrets that are not set.
    pub fn missing_secrets(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.api_key().is_none() {
            missing.push(ENV_API_KEY);
        }
        if self.sender_email().is_none() {
            missing.push(ENV_SENDER_EMAIL);
        }
        missing
    }
}

impl Validate for RelayConfig {
    fn validate(&self) -> Result<()> {
        validate_url("sendgrid_endpoint", &self.sendgrid_endpoint)?;
        validate_email_address("recipient_email", &self.recipient_email)?;
        validate_non_empty_string("sender_name", &self.sender_name)?;
        validate_non_empty_string("allowed_origin", &self.allowed_origin)?;

        if let Some(sender_email) = self.sender_email() {
            validate_email_address("sender_email", sender_email)?;
        }

        if let Some(timeout) = self.timeout_seconds {
            validate_range("timeout_seconds", timeout, 1, 300)?;
        }

        tracing::debug!("✅ Relay configuration validation passed");
        Ok(())
    }
}
