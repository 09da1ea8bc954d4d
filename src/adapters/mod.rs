// Adapters layer: concrete implementations for external systems.

#[cfg(feature = "cli")]
pub mod http;
#[cfg(feature = "lambda")]
pub mod lambda;
pub mod sendgrid;
