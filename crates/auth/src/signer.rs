//! Request signing for the Binance REST API.
//!
//! The scheme is chosen on every call from the credentials:
//! 1. a configured private key signs with Ed25519 or RSA, whichever the key is;
//! 2. otherwise the API secret signs with HMAC-SHA256 (lowercase hex).

use crate::credentials::ApiCredentials;
use crate::error::AuthError;
use crate::key::{KeyAlgorithm, PrivateKey};
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Signature scheme used for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignatureMethod {
    HmacSha256,
    Ed25519,
    Rsa,
}

impl From<KeyAlgorithm> for SignatureMethod {
    fn from(algorithm: KeyAlgorithm) -> Self {
        match algorithm {
            KeyAlgorithm::Ed25519 => Self::Ed25519,
            KeyAlgorithm::Rsa => Self::Rsa,
        }
    }
}

/// Request signer for authenticated Binance API calls.
pub struct RequestSigner<'a> {
    credentials: &'a ApiCredentials,
}

impl<'a> RequestSigner<'a> {
    /// Create a new request signer with the given credentials.
    pub fn new(credentials: &'a ApiCredentials) -> Self {
        Self { credentials }
    }

    /// Sign an encoded query string.
    ///
    /// Returns a lowercase hex HMAC digest, or a base64 Ed25519/RSA signature
    /// when a private key is configured.
    ///
    /// # Errors
    /// `MissingSecret` when no signing material is configured, or any key
    /// decoding error from [`PrivateKey::decode`].
    pub fn sign(&self, payload: &str) -> Result<String, AuthError> {
        if let Some(material) = self.credentials.expose_private_key() {
            let key = PrivateKey::decode(material, self.credentials.expose_passphrase())?;
            tracing::trace!(algorithm = ?key.algorithm(), "Signing with private key");
            return key.sign(payload.as_bytes());
        }

        self.sign_hmac(payload)
    }

    /// Sign with the HMAC secret only, ignoring any private key.
    ///
    /// The websocket API session signature is HMAC-only.
    pub fn sign_hmac(&self, payload: &str) -> Result<String, AuthError> {
        let secret = self
            .credentials
            .expose_secret()
            .ok_or(AuthError::MissingSecret)?;
        hmac_sha256_hex(secret, payload)
    }

    /// The scheme [`sign`](Self::sign) would use with the current credentials.
    pub fn method(&self) -> Result<SignatureMethod, AuthError> {
        if let Some(material) = self.credentials.expose_private_key() {
            let key = PrivateKey::decode(material, self.credentials.expose_passphrase())?;
            return Ok(key.algorithm().into());
        }
        if self.credentials.has_secret() {
            Ok(SignatureMethod::HmacSha256)
        } else {
            Err(AuthError::MissingSecret)
        }
    }
}

/// HMAC-SHA256 of `message` keyed by `secret`, as lowercase hex.
pub fn hmac_sha256_hex(secret: &str, message: &str) -> Result<String, AuthError> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| AuthError::Signing(e.to_string()))?;

    mac.update(message.as_bytes());
    Ok(hex::encode(mac.finalize().into_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::tests::{ed25519_pem, rsa_key, rsa_pkcs8_pem, verify_rsa};

    const BINANCE_TEST_SECRET: &str =
        "NhqPtmdSJYdKjVHjA7PZj4Mge3R5YNiP1e3UZjInClVN65XAbvqqM6A7H5fATj0j";

    #[test]
    fn test_sign_known_vector() {
        // Test vector from Binance API documentation
        // https://binance-docs.github.io/apidocs/spot/en/#signed-trade-and-user_data-endpoint-security
        let creds = ApiCredentials::new(
            "vmPUZE6mv9SD5VNHk4HlWFsOr6aKE2zvsw0MuIgwCIPy6utIco14y7Ju91duEh8A".into(),
            BINANCE_TEST_SECRET.into(),
        );
        let signer = RequestSigner::new(&creds);

        let query = "symbol=LTCBTC&side=BUY&type=LIMIT&timeInForce=GTC&quantity=1&price=0.1&recvWindow=5000&timestamp=1499827319559";

        assert_eq!(
            signer.sign(query).unwrap(),
            "c8db56825ae71d6d79447849e617115f4a920fa2acdcab2b053c4b2838bd6b71"
        );
        assert_eq!(signer.method().unwrap(), SignatureMethod::HmacSha256);
    }

    #[test]
    fn test_sign_timestamp_vector() {
        let signature = hmac_sha256_hex(BINANCE_TEST_SECRET, "timestamp=1578963600000").unwrap();
        assert_eq!(
            signature,
            "d84e6641b1e328e7b418fff030caed655c266299c9355e36ce801ed14631eed4"
        );
    }

    #[test]
    fn test_hmac_is_deterministic() {
        let creds = ApiCredentials::new("key".into(), "secret".into());
        let signer = RequestSigner::new(&creds);

        let first = signer.sign("symbol=BTCUSDT&timestamp=1000").unwrap();
        let second = signer.sign("symbol=BTCUSDT&timestamp=1000").unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), 64);
        assert!(first.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_sign_empty_message() {
        let creds = ApiCredentials::new("key".into(), "secret".into());
        let signer = RequestSigner::new(&creds);

        // Should not panic on empty message
        let signature = signer.sign("").unwrap();
        assert!(!signature.is_empty());
    }

    #[test]
    fn test_missing_secret() {
        let creds = ApiCredentials::api_key_only("key".into());
        let signer = RequestSigner::new(&creds);

        assert!(matches!(signer.sign("a=1"), Err(AuthError::MissingSecret)));
        assert!(matches!(signer.method(), Err(AuthError::MissingSecret)));
    }

    #[test]
    fn test_private_key_takes_precedence_over_secret() {
        let (pem, _) = ed25519_pem();
        let creds = ApiCredentials::with_private_key("key".into(), pem.into_bytes(), None)
            .with_secret("secret".into());
        let signer = RequestSigner::new(&creds);

        assert_eq!(signer.method().unwrap(), SignatureMethod::Ed25519);
        let signature = signer.sign("a=1").unwrap();
        assert_ne!(signature, hmac_sha256_hex("secret", "a=1").unwrap());
    }

    #[test]
    fn test_rsa_key_uses_rsa() {
        let rsa = rsa_key();
        let creds = ApiCredentials::with_private_key(
            "key".into(),
            rsa_pkcs8_pem(&rsa).into_bytes(),
            Some("unused".into()),
        );
        let signer = RequestSigner::new(&creds);

        assert_eq!(signer.method().unwrap(), SignatureMethod::Rsa);
        let signature = signer.sign("symbol=BTCUSDT&timestamp=1").unwrap();
        assert!(verify_rsa(&rsa, b"symbol=BTCUSDT&timestamp=1", &signature));
    }

    #[test]
    fn test_sign_hmac_ignores_private_key() {
        let (pem, _) = ed25519_pem();
        let creds = ApiCredentials::with_private_key("key".into(), pem.into_bytes(), None)
            .with_secret("secret".into());
        let signer = RequestSigner::new(&creds);

        assert_eq!(
            signer.sign_hmac("a=1").unwrap(),
            hmac_sha256_hex("secret", "a=1").unwrap()
        );
    }

    #[test]
    fn test_malformed_private_key_propagates() {
        let creds = ApiCredentials::with_private_key("key".into(), b"garbage".to_vec(), None)
            .with_secret("secret".into());
        let signer = RequestSigner::new(&creds);

        assert!(matches!(signer.sign("a=1"), Err(AuthError::InvalidKey(_))));
    }
}
