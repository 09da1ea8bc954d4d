use crate::core::handler::ContactRelayHandler;
use crate::domain::ports::EmailProvider;
use bytes::Bytes;
use lambda_http::{Body, Error, Request, Response};

/// Bridges an API Gateway / Function URL event to the handler.
pub async fn handle_event<P: EmailProvider>(
    handler: &ContactRelayHandler<P>,
    event: Request,
) -> Result<Response<Body>, Error> {
    let (parts, body) = event.into_parts();
    let body = match body {
        Body::Empty => Bytes::new(),
        Body::Text(text) => Bytes::from(text),
        Body::Binary(bytes) => Bytes::from(bytes),
    };

    let response = handler
        .handle(http::Request::from_parts(parts, body))
        .await;

    Ok(response.map(|body| {
        if body.is_empty() {
            Body::Empty
        } else {
            Body::Text(body)
        }
    }))
}
