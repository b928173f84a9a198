//! Client configuration.
//!
//! A [`ClientConfig`] is built once per client and shared read-only by every
//! request issued through it.

use std::time::Duration;

use thiserror::Error;

use crate::environment::{BinanceEnvironment, ParseEnvironmentError, ENVIRONMENT_VAR};

const BASE_URL_VAR: &str = "BINANCE_BASE_URL";
const TIMEOUT_MS_VAR: &str = "BINANCE_TIMEOUT_MS";
const PROXY_VAR: &str = "BINANCE_PROXY";
const SHOW_LIMIT_USAGE_VAR: &str = "BINANCE_SHOW_LIMIT_USAGE";
const SHOW_HEADER_VAR: &str = "BINANCE_SHOW_HEADER";

/// Errors raised while reading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Environment(#[from] ParseEnvironmentError),

    /// A variable is present but cannot be parsed.
    #[error("invalid value for {name}: '{value}'")]
    InvalidValue { name: &'static str, value: String },
}

/// Transport and response-shaping settings for one client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    base_url: String,
    timeout: Option<Duration>,
    proxy: Option<String>,
    show_limit_usage: bool,
    show_header: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::for_environment(BinanceEnvironment::Production)
    }
}

impl ClientConfig {
    /// Create a config for the given base URL with no timeout, no proxy and
    /// bare response bodies.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout: None,
            proxy: None,
            show_limit_usage: false,
            show_header: false,
        }
    }

    pub fn for_environment(environment: BinanceEnvironment) -> Self {
        Self::new(environment.rest_base_url())
    }

    /// Per-request timeout handed to the transport.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Proxy URL for all outbound requests, e.g. `http://127.0.0.1:8080`.
    pub fn with_proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    /// Attach rate-limit usage counters to every response.
    pub fn with_limit_usage(mut self, enabled: bool) -> Self {
        self.show_limit_usage = enabled;
        self
    }

    /// Attach the full response header map to every response.
    pub fn with_header(mut self, enabled: bool) -> Self {
        self.show_header = enabled;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub fn proxy(&self) -> Option<&str> {
        self.proxy.as_deref()
    }

    pub fn show_limit_usage(&self) -> bool {
        self.show_limit_usage
    }

    pub fn show_header(&self) -> bool {
        self.show_header
    }

    /// True when responses are wrapped with usage counters and/or headers.
    pub fn annotates_responses(&self) -> bool {
        self.show_limit_usage || self.show_header
    }

    /// Load configuration from the process environment (and `.env`, if present).
    ///
    /// Reads `BINANCE_ENVIRONMENT`, `BINANCE_BASE_URL`, `BINANCE_TIMEOUT_MS`,
    /// `BINANCE_PROXY`, `BINANCE_SHOW_LIMIT_USAGE` and `BINANCE_SHOW_HEADER`.
    ///
    /// # Errors
    /// Returns `ConfigError` if any variable is set to an unparseable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build a config from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let environment = match get(ENVIRONMENT_VAR) {
            Some(value) => value.parse::<BinanceEnvironment>()?,
            None => BinanceEnvironment::default(),
        };

        let mut config = match get(BASE_URL_VAR) {
            Some(url) => Self::new(url.trim()),
            None => Self::for_environment(environment),
        };

        if let Some(value) = get(TIMEOUT_MS_VAR) {
            let ms = value
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidValue {
                    name: TIMEOUT_MS_VAR,
                    value: value.clone(),
                })?;
            config = config.with_timeout(Duration::from_millis(ms));
        }

        if let Some(proxy) = get(PROXY_VAR) {
            config = config.with_proxy(proxy.trim());
        }

        if let Some(value) = get(SHOW_LIMIT_USAGE_VAR) {
            config = config.with_limit_usage(parse_flag(SHOW_LIMIT_USAGE_VAR, &value)?);
        }

        if let Some(value) = get(SHOW_HEADER_VAR) {
            config = config.with_header(parse_flag(SHOW_HEADER_VAR, &value)?);
        }

        Ok(config)
    }
}

fn parse_flag(name: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            name,
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_default_is_production_plain() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url(), "https://api.binance.com");
        assert_eq!(config.timeout(), None);
        assert_eq!(config.proxy(), None);
        assert!(!config.annotates_responses());
    }

    #[test]
    fn test_new_strips_trailing_slash() {
        let config = ClientConfig::new("https://example.com/");
        assert_eq!(config.base_url(), "https://example.com");
    }

    #[test]
    fn test_builder_flags() {
        let config = ClientConfig::new("https://example.com")
            .with_timeout(Duration::from_millis(1500))
            .with_proxy("http://1.2.3.4:8080")
            .with_limit_usage(true);

        assert_eq!(config.timeout(), Some(Duration::from_millis(1500)));
        assert_eq!(config.proxy(), Some("http://1.2.3.4:8080"));
        assert!(config.show_limit_usage());
        assert!(!config.show_header());
        assert!(config.annotates_responses());
    }

    #[test]
    fn test_from_lookup_empty_uses_defaults() {
        let config = ClientConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn test_from_lookup_testnet() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("BINANCE_ENVIRONMENT", "testnet"),
            ("BINANCE_TIMEOUT_MS", "2500"),
            ("BINANCE_SHOW_HEADER", "true"),
        ]))
        .unwrap();

        assert_eq!(config.base_url(), "https://testnet.binance.vision");
        assert_eq!(config.timeout(), Some(Duration::from_millis(2500)));
        assert!(config.show_header());
        assert!(!config.show_limit_usage());
    }

    #[test]
    fn test_from_lookup_base_url_override_wins() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("BINANCE_ENVIRONMENT", "testnet"),
            ("BINANCE_BASE_URL", "http://localhost:9000/"),
        ]))
        .unwrap();

        assert_eq!(config.base_url(), "http://localhost:9000");
    }

    #[test]
    fn test_from_lookup_rejects_bad_values() {
        let err = ClientConfig::from_lookup(lookup(&[("BINANCE_TIMEOUT_MS", "soon")])).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                name: "BINANCE_TIMEOUT_MS",
                ..
            }
        ));

        let err =
            ClientConfig::from_lookup(lookup(&[("BINANCE_SHOW_LIMIT_USAGE", "maybe")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));

        let err = ClientConfig::from_lookup(lookup(&[("BINANCE_ENVIRONMENT", "moon")])).unwrap_err();
        assert!(matches!(err, ConfigError::Environment(_)));
    }
}
