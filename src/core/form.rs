use crate::utils::error::{RelayError, Result};
use bytes::Bytes;
use std::convert::Infallible;

const URL_ENCODED: &str = "application/x-www-form-urlencoded";
const MULTIPART: &str = "multipart/form-data";

/// Decoded form fields in submission order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    fields: Vec<(String, String)>,
}

impl FormFields {
    /// Removes and returns the first value submitted under `name`.
    pub fn take(&mut self, name: &str) -> Option<String> {
        let index = self.fields.iter().position(|(key, _)| key == name)?;
        Some(self.fields.remove(index).1)
    }
}

impl FromIterator<(String, String)> for FormFields {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

/// Decodes a urlencoded or multipart body according to its `Content-Type`.
pub async fn decode_form(content_type: Option<&str>, body: Bytes) -> Result<FormFields> {
    let content_type = content_type.ok_or_else(|| RelayError::FormDecodeError {
        message: "missing Content-Type header".to_string(),
    })?;

    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    match essence.as_str() {
        URL_ENCODED => Ok(decode_url_encoded(&body)),
        MULTIPART => decode_multipart(content_type, body).await,
        other => Err(RelayError::FormDecodeError {
            message: format!("unsupported Content-Type: {}", other),
        }),
    }
}

fn decode_url_encoded(body: &[u8]) -> FormFields {
    url::form_urlencoded::parse(body).into_owned().collect()
}

async fn decode_multipart(content_type: &str, body: Bytes) -> Result<FormFields> {
    let boundary = multer::parse_boundary(content_type).map_err(|e| RelayError::FormDecodeError {
        message: format!("invalid multipart boundary: {}", e),
    })?;

    let stream = futures::stream::once(async move { Ok::<Bytes, Infallible>(body) });
    let mut multipart = multer::Multipart::new(stream, boundary);
    let mut fields = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(multipart_error)?
    {
        // Parts without a name cannot be looked up; skip them.
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };
        let value = field.text().await.map_err(multipart_error)?;
        fields.push((name, value));
    }

    Ok(FormFields { fields })
}

fn multipart_error(e: multer::Error) -> RelayError {
    RelayError::FormDecodeError {
        message: format!("malformed multipart body: {}", e),
    }
}

#[cfg(test)]
impl FormFields {
    fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    fn len(&self) -> usize {
        self.fields.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn multipart_body(boundary: &str, parts: &[(&str, &str)]) -> Bytes {
        let mut body = String::new();
        for (name, value) in parts {
            body.push_str(&format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
                boundary, name, value
            ));
        }
        body.push_str(&format!("--{}--\r\n", boundary));
        Bytes::from(body)
    }

    #[tokio::test]
    async fn test_decode_url_encoded() {
        let body = Bytes::from_static(b"nombre=Ana+Mar%C3%ADa&email=ana%40example.com&mensaje=Hola%21");
        let fields = decode_form(Some("application/x-www-form-urlencoded"), body)
            .await
            .unwrap();

        assert_eq!(fields.get("nombre"), Some("Ana María"));
        assert_eq!(fields.get("email"), Some("ana@example.com"));
        assert_eq!(fields.get("mensaje"), Some("Hola!"));
    }

    #[tokio::test]
    async fn test_decode_url_encoded_with_charset_and_repeated_keys() {
        let body = Bytes::from_static(b"nombre=Ana&nombre=Bea");
        let fields = decode_form(
            Some("Application/X-WWW-Form-Urlencoded; charset=UTF-8"),
            body,
        )
        .await
        .unwrap();

        assert_eq!(fields.len(), 2);
        assert_eq!(fields.get("nombre"), Some("Ana"));
    }

    #[tokio::test]
    async fn test_decode_multipart() {
        let boundary = "----relayboundary";
        let body = multipart_body(
            boundary,
            &[("nombre", "Ana"), ("email", "ana@example.com"), ("mensaje", "Hola\nqué tal")],
        );

        let mut fields = decode_form(
            Some(&format!("multipart/form-data; boundary={}", boundary)),
            body,
        )
        .await
        .unwrap();

        assert_eq!(fields.take("mensaje").as_deref(), Some("Hola\nqué tal"));
        assert_eq!(fields.get("nombre"), Some("Ana"));
        assert_eq!(fields.get("mensaje"), None);
    }

    #[tokio::test]
    async fn test_rejects_missing_or_foreign_content_type() {
        let body = Bytes::from_static(br#"{"nombre":"Ana"}"#);

        assert!(matches!(
            decode_form(None, body.clone()).await,
            Err(RelayError::FormDecodeError { .. })
        ));
        assert!(matches!(
            decode_form(Some("application/json"), body).await,
            Err(RelayError::FormDecodeError { .. })
        ));
    }

    #[tokio::test]
    async fn test_rejects_multipart_without_boundary() {
        let result = decode_form(Some("multipart/form-data"), Bytes::from_static(b"nombre=Ana")).await;
        assert!(matches!(result, Err(RelayError::FormDecodeError { .. })));
    }

    #[tokio::test]
    async fn test_rejects_truncated_multipart() {
        let body = Bytes::from_static(
            b"--xyz\r\nContent-Disposition: form-data; name=\"nombre\"\r\n\r\nAna",
        );
        let result = decode_form(Some("multipart/form-data; boundary=xyz"), body).await;
        assert!(matches!(result, Err(RelayError::FormDecodeError { .. })));
    }
}
