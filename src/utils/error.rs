use http::StatusCode;
use thiserror::Error;

pub const MSG_SENT: &str = "¡Gracias! Su mensaje ha sido enviado con éxito.";
pub const MSG_INVALID_FORM: &str = "Invalid content type. Expected FormData.";
pub const MSG_MISSING_FIELDS: &str = "Por favor, complete todos los campos requeridos.";
pub const MSG_MISSING_CONFIG: &str =
    "Error de configuración del Worker: Faltan claves API o email del remitente.";
pub const MSG_PROVIDER_FAILED: &str = "Error al enviar el correo. Intente más tarde.";
pub const MSG_NETWORK_FAILED: &str = "Error de red al intentar enviar el correo.";
pub const MSG_METHOD_NOT_ALLOWED: &str = "Method Not Allowed";

#[derive(Error, Debug)]
pub enum RelayError {
    #[error("Form decoding failed: {message}")]
    FormDecodeError { message: String },

    #[error("Required form fields are missing: {}", .fields.join(", "))]
    MissingFieldsError { fields: Vec<&'static str> },

    #[error("Relay is not configured: missing {}", .fields.join(", "))]
    MissingSecretsError { fields: Vec<&'static str> },

    #[error("Email provider rejected the message with status {status}: {body}")]
    ProviderRejectedError { status: u16, body: String },

    #[error("Email provider request failed: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

impl RelayError {
    /// Status returned to the form caller for this failure.
    pub fn status_code(&self) -> StatusCode {
        match self {
            RelayError::FormDecodeError { .. } | RelayError::MissingFieldsError { .. } => {
                StatusCode::BAD_REQUEST
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Fixed, caller-facing message. Provider and network details stay in the log.
    pub fn user_message(&self) -> &'static str {
        match self {
            RelayError::FormDecodeError { .. } => MSG_INVALID_FORM,
            RelayError::MissingFieldsError { .. } => MSG_MISSING_FIELDS,
            RelayError::MissingSecretsError { .. } => MSG_MISSING_CONFIG,
            RelayError::NetworkError(_) => MSG_NETWORK_FAILED,
            RelayError::ProviderRejectedError { .. }
            | RelayError::IoError(_)
            | RelayError::ConfigError { .. }
            | RelayError::InvalidConfigValueError { .. } => MSG_PROVIDER_FAILED,
        }
    }
}

pub type Result<T> = std::result::Result<T, RelayError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_errors_map_to_bad_request() {
        let decode = RelayError::FormDecodeError {
            message: "missing boundary".to_string(),
        };
        assert_eq!(decode.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(decode.user_message(), MSG_INVALID_FORM);

        let missing = RelayError::MissingFieldsError {
            fields: vec!["nombre", "mensaje"],
        };
        assert_eq!(missing.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(missing.user_message(), MSG_MISSING_FIELDS);
        assert_eq!(
            missing.to_string(),
            "Required form fields are missing: nombre, mensaje"
        );
    }

    #[test]
    fn test_provider_details_never_reach_user_message() {
        let rejected = RelayError::ProviderRejectedError {
            status: 401,
            body: "{\"errors\":[{\"message\":\"bad key\"}]}".to_string(),
        };
        assert_eq!(rejected.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(rejected.user_message(), MSG_PROVIDER_FAILED);
        assert!(rejected.to_string().contains("401"));
        assert!(!rejected.user_message().contains("bad key"));
    }

    #[test]
    fn test_missing_secrets_message() {
        let err = RelayError::MissingSecretsError {
            fields: vec!["SENDGRID_API_KEY"],
        };
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.user_message(), MSG_MISSING_CONFIG);
    }
}
