use std::{env, time::Duration};

use tracing::debug;

use crate::error::ClientError;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:9090";

/// Text used for an error result whose response carried no message
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FallbackMessage {
    /// Fixed wording chosen per error cause
    #[default]
    Generic,
    /// The HTTP reason phrase of the response status, e.g. "Service Unavailable"
    StatusText,
}

impl FallbackMessage {
    fn parse(value: &str) -> Result<Self, ClientError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "generic" => Ok(Self::Generic),
            "status-text" | "status_text" => Ok(Self::StatusText),
            other => Err(ClientError::InvalidConfig(format!(
                "unknown fallback message mode '{}'",
                other
            ))),
        }
    }
}

#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub base_url: String,
    /// Applied to the HTTP transport; `None` waits indefinitely
    pub timeout: Option<Duration>,
    pub fallback_message: FallbackMessage,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
            fallback_message: FallbackMessage::Generic,
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Read `MSWEEPER_BASE_URL`, `MSWEEPER_TIMEOUT_SECS` and
    /// `MSWEEPER_FALLBACK_MESSAGE`, falling back to the defaults for unset variables
    pub fn from_env() -> Result<Self, ClientError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ClientError> {
        let base_url = lookup("MSWEEPER_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let timeout = match lookup("MSWEEPER_TIMEOUT_SECS").filter(|v| !v.trim().is_empty()) {
            Some(secs) => {
                let secs: u64 = secs.trim().parse().map_err(|_| {
                    ClientError::InvalidConfig(format!("MSWEEPER_TIMEOUT_SECS is not a number: {}", secs))
                })?;
                Some(Duration::from_secs(secs))
            }
            None => None,
        };

        let fallback_message = match lookup("MSWEEPER_FALLBACK_MESSAGE") {
            Some(mode) => FallbackMessage::parse(&mode)?,
            None => FallbackMessage::default(),
        };

        debug!(
            "Loaded client configuration: base_url={}, timeout={:?}, fallback={:?}",
            base_url, timeout, fallback_message
        );

        Ok(Self {
            base_url,
            timeout,
            fallback_message,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = ClientConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout, None);
        assert_eq!(config.fallback_message, FallbackMessage::Generic);
    }

    #[test]
    fn reads_all_variables() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("MSWEEPER_BASE_URL", "https://msweeper.example.com"),
            ("MSWEEPER_TIMEOUT_SECS", "5"),
            ("MSWEEPER_FALLBACK_MESSAGE", "status-text"),
        ]))
        .unwrap();
        assert_eq!(config.base_url, "https://msweeper.example.com");
        assert_eq!(config.timeout, Some(Duration::from_secs(5)));
        assert_eq!(config.fallback_message, FallbackMessage::StatusText);
    }

    #[test]
    fn rejects_bad_values() {
        let err = ClientConfig::from_lookup(lookup(&[("MSWEEPER_TIMEOUT_SECS", "soon")]));
        assert!(matches!(err, Err(ClientError::InvalidConfig(_))));

        let err = ClientConfig::from_lookup(lookup(&[("MSWEEPER_FALLBACK_MESSAGE", "loud")]));
        assert!(matches!(err, Err(ClientError::InvalidConfig(_))));
    }
}
