use crate::config::RelayConfig;
use crate::utils::error::{RelayError, Result};
use regex::{Captures, Regex};
use std::path::Path;

impl RelayConfig {
    /// Loads a TOML file, then lets the environment override what it sets.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        tracing::debug!("Loaded relay configuration from {}", path.as_ref().display());
        Self::from_toml_str(&content)?.with_overrides(|key| std::env::var(key).ok())
    }

    /// Parses TOML after replacing `${VAR}` references with environment values.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = substitute_env_vars(content, |key| std::env::var(key).ok())?;

        toml::from_str(&processed_content).map_err(|e| RelayError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }
}

/// Unset variables become empty strings, so an unset secret reads as missing.
pub(crate) fn substitute_env_vars<F>(content: &str, lookup: F) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    let re = Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").map_err(|e| RelayError::ConfigError {
        message: format!("Invalid substitution pattern: {}", e),
    })?;

    let result = re.replace_all(content, |caps: &Captures| {
        let var_name = &caps[1];
        lookup(var_name).unwrap_or_else(|| {
            tracing::warn!("⚠️ Environment variable {} is not set", var_name);
            String::new()
        })
    });

    Ok(result.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_substitute_env_vars() {
        let lookup = |key: &str| match key {
            "SG_KEY" => Some("SG.abc".to_string()),
            _ => None,
        };

        let result = substitute_env_vars(
            "api_key = \"${SG_KEY}\"\nsender_email = \"${UNSET_SENDER}\"",
            lookup,
        )
        .unwrap();

        assert_eq!(
            result,
            "api_key = \"SG.abc\"\nsender_email = \"\""
        );
    }

    #[test]
    fn test_from_toml_str_applies_defaults() {
        let config = RelayConfig::from_toml_str(
            r#"
sender_email = "no-reply@synotec.cl"
timeout_seconds = 10
"#,
        )
        .unwrap();

        assert_eq!(config.sender_email(), Some("no-reply@synotec.cl"));
        assert_eq!(config.timeout_seconds, Some(10));
        assert_eq!(config.recipient_email, crate::config::DEFAULT_RECIPIENT_EMAIL);
        assert_eq!(config.api_key(), None);
    }

    #[test]
    fn test_unset_secret_reference_reads_as_missing() {
        let config = RelayConfig::from_toml_str(
            r#"
api_key = "${CONTACT_RELAY_TEST_UNSET_API_KEY}"
sender_email = "no-reply@synotec.cl"
"#,
        )
        .unwrap();

        assert_eq!(config.api_key(), None);
        assert_eq!(config.missing_secrets(), vec![crate::config::ENV_API_KEY]);
    }

    #[test]
    fn test_from_toml_str_rejects_unknown_keys() {
        let result = RelayConfig::from_toml_str("recipients = [\"a@b.cl\"]");
        assert!(matches!(result, Err(RelayError::ConfigError { .. })));
    }
}
