//! Secure API credential management.
//!
//! Secrets are wrapped in `secrecy` containers so they never show up in
//! `Debug` output and are zeroed on drop.

use crate::error::AuthError;
use secrecy::{ExposeSecret, SecretSlice, SecretString};

const API_KEY_VAR: &str = "BINANCE_API_KEY";
const SECRET_KEY_VAR: &str = "BINANCE_SECRET_KEY";
const PRIVATE_KEY_PATH_VAR: &str = "BINANCE_PRIVATE_KEY_PATH";
const PRIVATE_KEY_PASSPHRASE_VAR: &str = "BINANCE_PRIVATE_KEY_PASSPHRASE";

/// API credentials for authenticated requests.
///
/// Holds the public API key plus whichever signing material the account uses:
/// an HMAC secret, a PEM/DER private key (Ed25519 or RSA), or both. When both
/// are present the private key is used.
pub struct ApiCredentials {
    api_key: String,
    api_secret: Option<SecretString>,
    private_key: Option<SecretSlice<u8>>,
    private_key_passphrase: Option<SecretString>,
}

impl ApiCredentials {
    /// Create HMAC credentials from an API key and secret.
    pub fn new(api_key: String, secret_key: String) -> Self {
        Self::api_key_only(api_key).with_secret(secret_key)
    }

    /// Credentials carrying only an API key, enough for key-gated unsigned endpoints.
    pub fn api_key_only(api_key: String) -> Self {
        Self {
            api_key,
            api_secret: None,
            private_key: None,
            private_key_passphrase: None,
        }
    }

    /// No credentials at all, for public market data.
    pub fn anonymous() -> Self {
        Self::api_key_only(String::new())
    }

    /// Create credentials that sign with an Ed25519 or RSA private key.
    ///
    /// `private_key` is the PEM (or PKCS#8 DER) key file content.
    pub fn with_private_key(
        api_key: String,
        private_key: Vec<u8>,
        passphrase: Option<String>,
    ) -> Self {
        let mut credentials = Self::api_key_only(api_key);
        credentials.private_key = Some(SecretSlice::from(private_key));
        credentials.private_key_passphrase = passphrase.map(SecretString::from);
        credentials
    }

    /// Attach an HMAC secret.
    pub fn with_secret(mut self, secret_key: String) -> Self {
        self.api_secret = Some(SecretString::from(secret_key));
        self
    }

    /// Load credentials from environment variables.
    ///
    /// Looks for:
    /// - `BINANCE_API_KEY` (required)
    /// - `BINANCE_SECRET_KEY` (optional HMAC secret)
    /// - `BINANCE_PRIVATE_KEY_PATH` (optional path to a PEM private key)
    /// - `BINANCE_PRIVATE_KEY_PASSPHRASE` (optional, for encrypted keys)
    ///
    /// # Errors
    /// Returns `AuthError::MissingEnvVar` if the API key is not set and
    /// `AuthError::KeyFile` if the key path cannot be read.
    pub fn from_env() -> Result<Self, AuthError> {
        // Load .env file if present (ignores errors if file doesn't exist)
        dotenvy::dotenv().ok();

        let api_key = std::env::var(API_KEY_VAR)
            .map_err(|_| AuthError::MissingEnvVar(API_KEY_VAR.into()))?;

        let mut credentials = Self::api_key_only(api_key);

        if let Ok(secret) = std::env::var(SECRET_KEY_VAR) {
            credentials = credentials.with_secret(secret);
        }

        if let Ok(path) = std::env::var(PRIVATE_KEY_PATH_VAR) {
            let key = std::fs::read(&path).map_err(|source| AuthError::KeyFile {
                path: path.clone(),
                source,
            })?;
            credentials.private_key = Some(SecretSlice::from(key));
            credentials.private_key_passphrase = std::env::var(PRIVATE_KEY_PASSPHRASE_VAR)
                .ok()
                .map(SecretString::from);
        }

        Ok(credentials)
    }

    /// Get the API key (public, safe to log).
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn has_api_key(&self) -> bool {
        !self.api_key.is_empty()
    }

    pub fn has_secret(&self) -> bool {
        self.api_secret.is_some()
    }

    pub fn has_private_key(&self) -> bool {
        self.private_key.is_some()
    }

    /// Expose the HMAC secret for signing.
    ///
    /// **WARNING**: Only use this for cryptographic operations.
    pub(crate) fn expose_secret(&self) -> Option<&str> {
        self.api_secret.as_ref().map(|s| s.expose_secret())
    }

    pub(crate) fn expose_private_key(&self) -> Option<&[u8]> {
        self.private_key.as_ref().map(|k| k.expose_secret())
    }

    pub(crate) fn expose_passphrase(&self) -> Option<&str> {
        self.private_key_passphrase
            .as_ref()
            .map(|p| p.expose_secret())
    }
}

impl std::fmt::Debug for ApiCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let redact = |present: bool| if present { "[REDACTED]" } else { "None" };
        f.debug_struct("ApiCredentials")
            .field("api_key", &self.api_key)
            .field("api_secret", &redact(self.api_secret.is_some()))
            .field("private_key", &redact(self.private_key.is_some()))
            .field(
                "private_key_passphrase",
                &redact(self.private_key_passphrase.is_some()),
            )
            .finish()
    }
}
