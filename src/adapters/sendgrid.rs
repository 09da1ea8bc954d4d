use crate::config::RelayConfig;
use crate::domain::model::EmailSendRequest;
use crate::domain::ports::{EmailProvider, ProviderResponse};
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;

/// `EmailProvider` backed by the SendGrid v3 `mail/send` endpoint.
#[derive(Debug, Clone)]
pub struct SendGridClient {
    client: Client,
    endpoint: String,
    timeout: Option<Duration>,
}

impl SendGridClient {
    pub fn new(config: &RelayConfig) -> Self {
        Self::with_client(Client::new(), config)
    }

    pub fn with_client(client: Client, config: &RelayConfig) -> Self {
        Self {
            client,
            endpoint: config.sendgrid_endpoint.clone(),
            timeout: config.timeout(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl EmailProvider for SendGridClient {
    async fn send(&self, api_key: &str, request: &EmailSendRequest) -> Result<ProviderResponse> {
        tracing::debug!("Making SendGrid request to: {}", self.endpoint);

        let mut builder = self
            .client
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(request);
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        let response = builder.send().await?;
        let status = response.status();
        tracing::debug!("SendGrid response status: {}", status);

        // Accepted messages come back with an empty body; only read it when it explains a failure.
        let body = if status == StatusCode::ACCEPTED {
            String::new()
        } else {
            response.text().await?
        };

        Ok(ProviderResponse {
            status: status.as_u16(),
            body,
        })
    }
}
