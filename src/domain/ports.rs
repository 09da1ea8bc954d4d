use crate::domain::model::EmailSendRequest;
use crate::utils::error::Result;
use async_trait::async_trait;

/// What the email provider answered. Any status is a response; only
/// transport failures are errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderResponse {
    pub status: u16,
    pub body: String,
}

#[async_trait]
pub trait EmailProvider: Send + Sync {
    async fn send(&self, api_key: &str, request: &EmailSendRequest) -> Result<ProviderResponse>;
}
