use crate::config::RelayConfig;
use crate::utils::error::Result;
use crate::utils::validation::{validate_non_empty_string, validate_range, Validate};
use clap::Parser;
use std::net::SocketAddr;

#[derive(Debug, Clone, Parser)]
#[command(name = "contact-relay")]
#[command(about = "Relays contact-form submissions to SendGrid")]
pub struct ServeConfig {
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    #[arg(long, default_value = "8787")]
    pub port: u16,

    #[arg(long, help = "TOML file with relay settings; environment variables override it")]
    pub config: Option<String>,

    #[arg(long, default_value = "1048576", help = "Largest accepted request body")]
    pub max_body_bytes: usize,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl ServeConfig {
    pub fn relay_config(&self) -> Result<RelayConfig> {
        match &self.config {
            Some(path) => RelayConfig::from_file(path),
            None => RelayConfig::from_env(),
        }
    }

    pub fn bind_address(&self) -> String {
        // Bracket bare IPv6 hosts so the result parses as a socket address.
        if self.host.contains(':') && !self.host.starts_with('[') {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }
}

impl Validate for ServeConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("host", &self.host)?;
        validate_range("max_body_bytes", self.max_body_bytes, 1024, 64 * 1024 * 1024)?;

        if self.host.parse::<std::net::IpAddr>().is_ok() {
            let addr = self.bind_address();
            addr.parse::<SocketAddr>().map_err(|e| {
                crate::utils::error::RelayError::InvalidConfigValueError {
                    field: "host".to_string(),
                    value: addr.clone(),
                    reason: e.to_string(),
                }
            })?;
        }

        Ok(())
    }
}
