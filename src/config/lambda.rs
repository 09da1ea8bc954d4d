#[cfg(feature = "lambda")]
use crate::config::RelayConfig;
#[cfg(feature = "lambda")]
use crate::utils::error::Result;
#[cfg(feature = "lambda")]
use crate::utils::validation::Validate;

/// Lambda deployments take their settings from function environment variables only.
#[cfg(feature = "lambda")]
#[derive(Debug, Clone)]
pub struct LambdaConfig {
    pub relay: RelayConfig,
}

#[cfg(feature = "lambda")]
impl LambdaConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            relay: RelayConfig::from_env()?,
        })
    }
}

#[cfg(feature = "lambda")]
impl Validate for LambdaConfig {
    fn validate(&self) -> Result<()> {
        self.relay.validate()?;
        tracing::info!("✅ Lambda configuration validation passed");
        Ok(())
    }
}
