pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::ServeConfig;

#[cfg(feature = "lambda")]
pub use config::lambda::LambdaConfig;

pub use adapters::sendgrid::SendGridClient;
pub use config::RelayConfig;
pub use core::handler::ContactRelayHandler;
pub use utils::error::{RelayError, Result};
