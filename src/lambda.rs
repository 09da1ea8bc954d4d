#[cfg(feature = "lambda")]
use contact_relay::adapters::lambda::handle_event;
#[cfg(feature = "lambda")]
use contact_relay::utils::{logger, validation::Validate};
#[cfg(feature = "lambda")]
use contact_relay::{ContactRelayHandler, LambdaConfig, SendGridClient};
#[cfg(feature = "lambda")]
use lambda_http::{run, service_fn, Error, Request};
#[cfg(feature = "lambda")]
use std::sync::Arc;

#[cfg(feature = "lambda")]
#[tokio::main]
async fn main() -> Result<(), Error> {
    logger::init_lambda_logger();

    tracing::info!("Starting contact-relay Lambda function");

    let lambda_config = LambdaConfig::from_env()?;
    lambda_config.validate()?;

    let missing = lambda_config.relay.missing_secrets();
    if !missing.is_empty() {
        tracing::warn!(
            "⚠️ {} not set; submissions will be answered with a configuration error",
            missing.join(", ")
        );
    }

    let provider = SendGridClient::new(&lambda_config.relay);
    let handler = Arc::new(ContactRelayHandler::new(lambda_config.relay, provider)?);

    run(service_fn(move |event: Request| {
        let handler = Arc::clone(&handler);
        async move { handle_event(&handler, event).await }
    }))
    .await
}
