use std::sync::Arc;

use clap::Parser;
use contact_relay::adapters::http::{router, serve};
use contact_relay::utils::{logger, validation::Validate};
use contact_relay::{ContactRelayHandler, SendGridClient, ServeConfig};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServeConfig::parse();

    logger::init_server_logger(config.verbose);

    tracing::info!("Starting contact-relay server");
    if config.verbose {
        tracing::debug!("Server config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Server configuration validation failed: {}", e);
        std::process::exit(1);
    }

    let relay_config = config.relay_config()?;
    if let Err(e) = relay_config.validate() {
        tracing::error!("❌ Relay configuration validation failed: {}", e);
        std::process::exit(1);
    }

    let missing = relay_config.missing_secrets();
    if !missing.is_empty() {
        tracing::warn!(
            "⚠️ {} not set; submissions will be answered with a configuration error",
            missing.join(", ")
        );
    }

    let provider = SendGridClient::new(&relay_config);
    tracing::info!("📮 Relaying to {} via {}", relay_config.recipient_email, provider.endpoint());
    let handler = Arc::new(ContactRelayHandler::new(relay_config, provider)?);

    let listener = TcpListener::bind(config.bind_address()).await?;
    tracing::info!("✅ Listening on http://{}", listener.local_addr()?);

    serve(listener, router(handler, config.max_body_bytes)).await?;
    Ok(())
}
