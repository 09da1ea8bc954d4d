use serde::{Deserialize, Serialize};

use crate::utils::error::{RelayError, Result};

pub const FIELD_NAME: &str = "nombre";
pub const FIELD_EMAIL: &str = "email";
pub const FIELD_MESSAGE: &str = "mensaje";

/// A contact-form submission whose three fields are all present and non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactSubmission {
    /// Empty strings count as missing. Whitespace is kept as submitted.
    pub fn from_fields(
        name: Option<String>,
        email: Option<String>,
        message: Option<String>,
    ) -> Result<Self> {
        let present = |value: &Option<String>| value.as_deref().is_some_and(|v| !v.is_empty());

        let missing: Vec<&'static str> = [
            (FIELD_NAME, &name),
            (FIELD_EMAIL, &email),
            (FIELD_MESSAGE, &message),
        ]
        .into_iter()
        .filter(|(_, value)| !present(value))
        .map(|(field, _)| field)
        .collect();

        match (name, email, message) {
            (Some(name), Some(email), Some(message)) if missing.is_empty() => Ok(Self {
                name,
                email,
                message,
            }),
            _ => Err(RelayError::MissingFieldsError { fields: missing }),
        }
    }

    pub fn subject(&self) -> String {
        format!("[SYNOTEC Contacto] Nuevo mensaje de {}", self.name)
    }

    pub fn plain_text_body(&self) -> String {
        format!(
            "Nuevo mensaje de contacto de SYNOTEC:\n\
             \n\
             Nombre: {}\n\
             Email: {}\n\
             Mensaje:\n\
             ---\n\
             {}\n\
             ---\n",
            self.name, self.email, self.message
        )
    }
}

/// Mailbox in the SendGrid v3 `mail/send` schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Personalization {
    pub to: Vec<Address>,
    pub subject: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Content {
    #[serde(rename = "type")]
    pub content_type: String,
    pub value: String,
}

/// Body of a SendGrid v3 `POST /v3/mail/send` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailSendRequest {
    pub personalizations: Vec<Personalization>,
    pub from: Address,
    pub content: Vec<Content>,
    pub reply_to: Address,
}

impl EmailSendRequest {
    pub fn from_submission(
        submission: &ContactSubmission,
        recipient_email: &str,
        sender_email: &str,
        sender_name: &str,
    ) -> Self {
        Self {
            personalizations: vec![Personalization {
                to: vec![Address {
                    email: recipient_email.to_string(),
                    name: None,
                }],
                subject: submission.subject(),
            }],
            from: Address {
                email: sender_email.to_string(),
                name: Some(sender_name.to_string()),
            },
            content: vec![Content {
                content_type: "text/plain".to_string(),
                value: submission.plain_text_body(),
            }],
            reply_to: Address {
                email: submission.email.clone(),
                name: Some(submission.name.clone()),
            },
        }
    }
}

/// JSON body returned to the form caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandlerResult {
    pub success: bool,
    pub message: String,
}

impl HandlerResult {
    pub fn ok(message: &str) -> Self {
        Self {
            success: true,
            message: message.to_string(),
        }
    }

    pub fn failure(message: &str) -> Self {
        Self {
            success: false,
            message: message.to_string(),
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::json!({ "success": self.success, "message": self.message }).to_string()
    }
}
