#![cfg(feature = "cli")]

use std::sync::Arc;

use anyhow::Result;
use contact_relay::adapters::http::router;
use contact_relay::core::HandlerResult;
use contact_relay::{ContactRelayHandler, RelayConfig, SendGridClient};
use httpmock::prelude::*;
use tokio::net::TcpListener;

/// Starts the relay on an ephemeral port and returns its base URL.
async fn spawn_relay(sendgrid_url: String, max_body_bytes: usize) -> Result<String> {
    let config = RelayConfig {
        api_key: Some("SG.test-key".to_string()),
        sender_email: Some("no-reply@synotec.cl".to_string()),
        sendgrid_endpoint: sendgrid_url,
        ..RelayConfig::default()
    };
    let provider = SendGridClient::new(&config);
    let handler = Arc::new(ContactRelayHandler::new(config, provider)?);

    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let address = listener.local_addr()?;
    let app = router(handler, max_body_bytes);

    tokio::spawn(async move {
        axum::serve(listener, app).await.ok();
    });

    Ok(format!("http://{}", address))
}

#[tokio::test]
async fn test_form_post_over_tcp() -> Result<()> {
    let sendgrid = MockServer::start_async().await;
    let send_mock = sendgrid
        .mock_async(|when, then| {
            when.method(POST)
                .path("/v3/mail/send")
                .json_body_partial(r#"{ "reply_to": { "email": "ana@example.com", "name": "Ana" } }"#);
            then.status(202);
        })
        .await;

    let base_url = spawn_relay(sendgrid.url("/v3/mail/send"), 1024 * 1024).await?;

    let response = reqwest::Client::new()
        .post(format!("{}/contacto", base_url))
        .form(&[("nombre", "Ana"), ("email", "ana@example.com"), ("mensaje", "Hola")])
        .send()
        .await?;

    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(
        response.headers()["access-control-allow-origin"],
        "*"
    );
    let result: HandlerResult = response.json().await?;
    assert!(result.success);

    send_mock.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn test_preflight_and_wrong_method_over_tcp() -> Result<()> {
    let base_url = spawn_relay("http://127.0.0.1:1/v3/mail/send".to_string(), 1024 * 1024).await?;
    let client = reqwest::Client::new();

    let preflight = client
        .request(reqwest::Method::OPTIONS, &base_url)
        .header("Origin", "https://synotec.cl")
        .send()
        .await?;
    assert_eq!(preflight.status().as_u16(), 204);
    assert_eq!(
        preflight.headers()["access-control-allow-methods"],
        "POST, OPTIONS"
    );
    assert!(preflight.bytes().await?.is_empty());

    let get = client.get(&base_url).send().await?;
    assert_eq!(get.status().as_u16(), 405);
    assert_eq!(get.headers()["allow"], "POST, OPTIONS");
    Ok(())
}

#[tokio::test]
async fn test_oversized_body_is_rejected_as_bad_form() -> Result<()> {
    let sendgrid = MockServer::start_async().await;
    let send_mock = sendgrid
        .mock_async(|when, then| {
            when.method(POST).path("/v3/mail/send");
            then.status(202);
        })
        .await;

    let base_url = spawn_relay(sendgrid.url("/v3/mail/send"), 1024).await?;
    let message = "a".repeat(4096);

    let response = reqwest::Client::new()
        .post(&base_url)
        .form(&[
            ("nombre", "Ana"),
            ("email", "ana@example.com"),
            ("mensaje", message.as_str()),
        ])
        .send()
        .await?;

    assert_eq!(response.status().as_u16(), 400);
    let result: HandlerResult = response.json().await?;
    assert!(!result.success);
    assert_eq!(result.message, "Invalid content type. Expected FormData.");

    send_mock.assert_hits_async(0).await;
    Ok(())
}
