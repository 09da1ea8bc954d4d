use crate::config::RelayConfig;
use crate::core::form::decode_form;
use crate::domain::model::{
    ContactSubmission, EmailSendRequest, HandlerResult, FIELD_EMAIL, FIELD_MESSAGE, FIELD_NAME,
};
use crate::domain::ports::EmailProvider;
use crate::utils::error::{RelayError, Result, MSG_METHOD_NOT_ALLOWED, MSG_SENT};
use bytes::Bytes;
use http::header::{
    ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN, ALLOW,
    CONTENT_TYPE,
};
use http::{HeaderMap, HeaderValue, Method, Request, Response, StatusCode};

const ALLOWED_METHODS: &str = "POST, OPTIONS";
const ALLOWED_HEADERS: &str = "Content-Type";
const APPLICATION_JSON: &str = "application/json";

/// Turns one contact-form request into one response. Holds no per-request
/// state, so a single instance serves every concurrent request.
pub struct ContactRelayHandler<P: EmailProvider> {
    config: RelayConfig,
    provider: P,
    allow_origin: HeaderValue,
}

impl<P: EmailProvider> ContactRelayHandler<P> {
    pub fn new(config: RelayConfig, provider: P) -> Result<Self> {
        let allow_origin = HeaderValue::from_str(&config.allowed_origin).map_err(|e| {
            RelayError::InvalidConfigValueError {
                field: "allowed_origin".to_string(),
                value: config.allowed_origin.clone(),
                reason: e.to_string(),
            }
        })?;

        Ok(Self {
            config,
            provider,
            allow_origin,
        })
    }

    pub async fn handle(&self, request: Request<Bytes>) -> Response<String> {
        tracing::debug!("Received {} {}", request.method(), request.uri().path());

        let method = request.method().clone();
        match method {
            Method::OPTIONS => self.respond(StatusCode::NO_CONTENT, String::new()),
            Method::POST => {
                let (parts, body) = request.into_parts();
                match self.relay(&parts.headers, body).await {
                    Ok(()) => self.json(StatusCode::OK, &HandlerResult::ok(MSG_SENT)),
                    Err(e) => self.error_response(&e),
                }
            }
            _ => {
                let mut response = self.json(
                    StatusCode::METHOD_NOT_ALLOWED,
                    &HandlerResult::failure(MSG_METHOD_NOT_ALLOWED),
                );
                response
                    .headers_mut()
                    .insert(ALLOW, HeaderValue::from_static(ALLOWED_METHODS));
                response
            }
        }
    }

    /// Decode, validate, and forward one submission. Exactly one provider call
    /// is made, and only when every earlier step succeeded.
    pub async fn relay(&self, headers: &HeaderMap, body: Bytes) -> Result<()> {
        let content_type = headers
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok());
        let mut form = decode_form(content_type, body).await?;

        let submission = ContactSubmission::from_fields(
            form.take(FIELD_NAME),
            form.take(FIELD_EMAIL),
            form.take(FIELD_MESSAGE),
        )?;

        let (api_key, sender_email) = match (self.config.api_key(), self.config.sender_email()) {
            (Some(api_key), Some(sender_email)) => (api_key, sender_email),
            _ => {
                return Err(RelayError::MissingSecretsError {
                    fields: self.config.missing_secrets(),
                })
            }
        };

        let email = EmailSendRequest::from_submission(
            &submission,
            &self.config.recipient_email,
            sender_email,
            &self.config.sender_name,
        );

        let response = self.provider.send(api_key, &email).await?;
        if response.status != StatusCode::ACCEPTED.as_u16() {
            return Err(RelayError::ProviderRejectedError {
                status: response.status,
                body: response.body,
            });
        }

        tracing::info!("✅ Contact message accepted for delivery");
        Ok(())
    }

    /// Logs `error` and renders the caller-facing response for it.
    pub fn error_response(&self, error: &RelayError) -> Response<String> {
        match error {
            RelayError::FormDecodeError { .. } | RelayError::MissingFieldsError { .. } => {
                tracing::debug!("Rejected submission: {}", error);
            }
            RelayError::ProviderRejectedError { status, body } => {
                tracing::error!(status = *status, body = %body, "❌ SendGrid rejected the message");
            }
            RelayError::NetworkError(e) => {
                tracing::error!(error = %e, "❌ Could not reach SendGrid");
            }
            other => {
                tracing::error!("❌ Contact relay failed: {}", other);
            }
        }

        self.json(
            error.status_code(),
            &HandlerResult::failure(error.user_message()),
        )
    }

    fn json(&self, status: StatusCode, result: &HandlerResult) -> Response<String> {
        let mut response = self.respond(status, result.to_json());
        response
            .headers_mut()
            .insert(CONTENT_TYPE, HeaderValue::from_static(APPLICATION_JSON));
        response
    }

    fn respond(&self, status: StatusCode, body: String) -> Response<String> {
        let mut response = Response::new(body);
        *response.status_mut() = status;

        let headers = response.headers_mut();
        headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, self.allow_origin.clone());
        headers.insert(
            ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(ALLOWED_METHODS),
        );
        headers.insert(
            ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(ALLOWED_HEADERS),
        );
        response
    }
}
