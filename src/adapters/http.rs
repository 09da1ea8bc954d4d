use crate::core::handler::ContactRelayHandler;
use crate::domain::ports::EmailProvider;
use crate::utils::error::{RelayError, Result};
use axum::body::{to_bytes, Body};
use axum::extract::{Request, State};
use axum::response::{IntoResponse, Response};
use axum::Router;
use bytes::Bytes;
use http::Method;
use std::sync::Arc;
use tokio::net::TcpListener;

struct AppState<P: EmailProvider> {
    handler: Arc<ContactRelayHandler<P>>,
    max_body_bytes: usize,
}

impl<P: EmailProvider> Clone for AppState<P> {
    fn clone(&self) -> Self {
        Self {
            handler: Arc::clone(&self.handler),
            max_body_bytes: self.max_body_bytes,
        }
    }
}

/// Serves the handler on every path and method.
pub fn router<P>(handler: Arc<ContactRelayHandler<P>>, max_body_bytes: usize) -> Router
where
    P: EmailProvider + 'static,
{
    Router::new().fallback(relay::<P>).with_state(AppState {
        handler,
        max_body_bytes,
    })
}

async fn relay<P>(State(state): State<AppState<P>>, request: Request) -> Response
where
    P: EmailProvider + 'static,
{
    let (parts, body) = request.into_parts();

    let body = match to_bytes(body, state.max_body_bytes).await {
        Ok(bytes) => bytes,
        Err(e) if parts.method == Method::POST => {
            let error = RelayError::FormDecodeError {
                message: format!("unreadable request body: {}", e),
            };
            return state.handler.error_response(&error).map(Body::from).into_response();
        }
        // Only POST bodies are ever read.
        Err(_) => Bytes::new(),
    };

    state
        .handler
        .handle(http::Request::from_parts(parts, body))
        .await
        .map(Body::from)
        .into_response()
}

pub async fn serve(listener: TcpListener, router: Router) -> Result<()> {
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(RelayError::IoError)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Could not listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down contact relay");
}
