//! Private key decoding and algorithm detection.
//!
//! The exchange accepts Ed25519 and RSA keys on the same endpoints. The
//! algorithm is read from the key itself (PEM label and PKCS#8 algorithm
//! identifier) so callers never have to declare it.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use ed25519_dalek::Signer as _;
use pkcs8::{DecodePrivateKey, EncryptedPrivateKeyInfo, ObjectIdentifier, PrivateKeyInfo};
use rsa::pkcs1::DecodeRsaPrivateKey;
use rsa::pkcs1v15::SigningKey as RsaSigningKey;
use rsa::signature::{SignatureEncoding, Signer as _};
use rsa::RsaPrivateKey;
use sha2::Sha256;

use crate::error::AuthError;

/// id-Ed25519 (RFC 8410).
const ED25519_OID: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.101.112");
/// rsaEncryption (RFC 8017).
const RSA_OID: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.1");

const PEM_PKCS8: &str = "PRIVATE KEY";
const PEM_PKCS8_ENCRYPTED: &str = "ENCRYPTED PRIVATE KEY";
const PEM_PKCS1_RSA: &str = "RSA PRIVATE KEY";

/// Asymmetric algorithm of a decoded private key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAlgorithm {
    Ed25519,
    Rsa,
}

/// A decoded private key ready to sign.
pub enum PrivateKey {
    Ed25519(ed25519_dalek::SigningKey),
    Rsa(RsaPrivateKey),
}

impl PrivateKey {
    /// Decode PEM or PKCS#8 DER key material.
    ///
    /// Supported forms:
    /// - `PRIVATE KEY` (PKCS#8, Ed25519 or RSA)
    /// - `ENCRYPTED PRIVATE KEY` (PKCS#8 PBES2, needs `passphrase`)
    /// - `RSA PRIVATE KEY` (PKCS#1, unencrypted)
    /// - raw PKCS#8 DER
    ///
    /// The passphrase is ignored for unencrypted keys.
    ///
    /// # Errors
    /// `MissingPassphrase` for an encrypted key without a passphrase,
    /// `LegacyEncryptedKey` for a `DEK-Info` encrypted PKCS#1 key,
    /// `UnsupportedAlgorithm` for keys that are neither Ed25519 nor RSA, and
    /// `InvalidKey` for anything that fails to decode.
    pub fn decode(material: &[u8], passphrase: Option<&str>) -> Result<Self, AuthError> {
        if !is_pem(material) {
            return Self::from_pkcs8_der(material);
        }

        let pem = pem::parse(material).map_err(|e| AuthError::InvalidKey(e.to_string()))?;
        match pem.tag() {
            PEM_PKCS8 => Self::from_pkcs8_der(pem.contents()),
            PEM_PKCS8_ENCRYPTED => {
                let passphrase = passphrase.ok_or(AuthError::MissingPassphrase)?;
                let encrypted = EncryptedPrivateKeyInfo::try_from(pem.contents())
                    .map_err(|e| AuthError::InvalidKey(e.to_string()))?;
                let document = encrypted
                    .decrypt(passphrase)
                    .map_err(|e| AuthError::InvalidKey(format!("decryption failed: {e}")))?;
                Self::from_pkcs8_der(document.as_bytes())
            }
            PEM_PKCS1_RSA if is_legacy_encrypted(&pem) => Err(AuthError::LegacyEncryptedKey),
            PEM_PKCS1_RSA => RsaPrivateKey::from_pkcs1_der(pem.contents())
                .map(Self::Rsa)
                .map_err(|e| AuthError::InvalidKey(e.to_string())),
            other => Err(AuthError::InvalidKey(format!(
                "unsupported PEM label '{other}'"
            ))),
        }
    }

    fn from_pkcs8_der(der: &[u8]) -> Result<Self, AuthError> {
        let info =
            PrivateKeyInfo::try_from(der).map_err(|e| AuthError::InvalidKey(e.to_string()))?;
        let oid = info.algorithm.oid;

        if oid == ED25519_OID {
            ed25519_dalek::SigningKey::from_pkcs8_der(der)
                .map(Self::Ed25519)
                .map_err(|e| AuthError::InvalidKey(e.to_string()))
        } else if oid == RSA_OID {
            RsaPrivateKey::from_pkcs8_der(der)
                .map(Self::Rsa)
                .map_err(|e| AuthError::InvalidKey(e.to_string()))
        } else {
            Err(AuthError::UnsupportedAlgorithm(oid.to_string()))
        }
    }

    pub fn algorithm(&self) -> KeyAlgorithm {
        match self {
            Self::Ed25519(_) => KeyAlgorithm::Ed25519,
            Self::Rsa(_) => KeyAlgorithm::Rsa,
        }
    }

    /// Sign `payload` and return the base64 (standard alphabet) signature.
    ///
    /// RSA keys sign with PKCS#1 v1.5 over SHA-256.
    pub fn sign(&self, payload: &[u8]) -> Result<String, AuthError> {
        let bytes = match self {
            Self::Ed25519(key) => key
                .try_sign(payload)
                .map_err(|e| AuthError::Signing(e.to_string()))?
                .to_bytes()
                .to_vec(),
            Self::Rsa(key) => RsaSigningKey::<Sha256>::new(key.clone())
                .try_sign(payload)
                .map_err(|e| AuthError::Signing(e.to_string()))?
                .to_vec(),
        };
        Ok(BASE64.encode(bytes))
    }
}

impl std::fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("PrivateKey")
            .field(&self.algorithm())
            .field(&"[REDACTED]")
            .finish()
    }
}

/// OpenSSL "traditional" encryption: `Proc-Type: 4,ENCRYPTED` plus `DEK-Info`.
fn is_legacy_encrypted(pem: &pem::Pem) -> bool {
    pem.headers()
        .get("Proc-Type")
        .is_some_and(|v| v.contains("ENCRYPTED"))
        || pem.headers().get("DEK-Info").is_some()
}

fn is_pem(material: &[u8]) -> bool {
    let start = material
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(material.len());
    material[start..].starts_with(b"-----BEGIN")
}
