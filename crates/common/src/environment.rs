//! Exchange environment selection.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Environment variable naming the target environment.
pub const ENVIRONMENT_VAR: &str = "BINANCE_ENVIRONMENT";

/// Target exchange environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BinanceEnvironment {
    /// Live exchange.
    #[default]
    Production,
    /// Spot testnet.
    Testnet,
}

impl BinanceEnvironment {
    /// REST API base URL.
    pub fn rest_base_url(&self) -> &'static str {
        match self {
            Self::Production => "https://api.binance.com",
            Self::Testnet => "https://testnet.binance.vision",
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    pub fn is_testnet(&self) -> bool {
        matches!(self, Self::Testnet)
    }

    /// Read `BINANCE_ENVIRONMENT`, falling back to `Production` when unset.
    ///
    /// # Errors
    /// Returns `ParseEnvironmentError` if the variable is set to an unknown value.
    pub fn from_env() -> Result<Self, ParseEnvironmentError> {
        match std::env::var(ENVIRONMENT_VAR) {
            Ok(value) if !value.trim().is_empty() => value.parse(),
            _ => Ok(Self::default()),
        }
    }
}

impl fmt::Display for BinanceEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Production => write!(f, "production"),
            Self::Testnet => write!(f, "testnet"),
        }
    }
}

impl FromStr for BinanceEnvironment {
    type Err = ParseEnvironmentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "production" | "prod" | "mainnet" | "main" => Ok(Self::Production),
            "testnet" | "test" | "sandbox" => Ok(Self::Testnet),
            _ => Err(ParseEnvironmentError(s.to_string())),
        }
    }
}

/// Error parsing an environment name.
#[derive(Debug, Clone, Error)]
#[error("invalid environment '{0}', expected 'production' or 'testnet'")]
pub struct ParseEnvironmentError(String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_urls() {
        assert_eq!(
            BinanceEnvironment::Production.rest_base_url(),
            "https://api.binance.com"
        );
        assert_eq!(
            BinanceEnvironment::Testnet.rest_base_url(),
            "https://testnet.binance.vision"
        );
        assert!(BinanceEnvironment::Production.is_production());
        assert!(BinanceEnvironment::Testnet.is_testnet());
    }

    #[test]
    fn test_parse_aliases() {
        assert_eq!(
            "MAINNET".parse::<BinanceEnvironment>().unwrap(),
            BinanceEnvironment::Production
        );
        assert_eq!(
            " sandbox ".parse::<BinanceEnvironment>().unwrap(),
            BinanceEnvironment::Testnet
        );
    }

    #[test]
    fn test_parse_invalid() {
        let err = "staging".parse::<BinanceEnvironment>().unwrap_err();
        assert!(err.to_string().contains("staging"));
    }

    #[test]
    fn test_default_and_display() {
        assert_eq!(
            BinanceEnvironment::default(),
            BinanceEnvironment::Production
        );
        assert_eq!(BinanceEnvironment::Testnet.to_string(), "testnet");
    }
}
