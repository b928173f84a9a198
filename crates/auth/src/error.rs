use thiserror::Error;

/// Errors that can occur while loading credentials or signing a payload.
#[derive(Debug, Error)]
pub enum AuthError {
    /// A required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),

    /// The private key file could not be read.
    #[error("Failed to read private key file {path}: {source}")]
    KeyFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The operation needs an API key but none is configured.
    #[error("API key is required")]
    MissingApiKey,

    /// Neither an API secret nor a private key is configured.
    #[error("API secret or private key is required for signing")]
    MissingSecret,

    /// The private key is encrypted and no passphrase was supplied.
    #[error("Private key is encrypted but no passphrase was provided")]
    MissingPassphrase,

    /// A PKCS#1 key using OpenSSL's legacy `DEK-Info` encryption.
    #[error(
        "Legacy encrypted RSA key is not supported; convert it with \
         `openssl pkcs8 -topk8 -in old.pem -out new.pem`"
    )]
    LegacyEncryptedKey,

    /// The key material cannot be decoded (bad PEM/DER, wrong passphrase).
    #[error("Invalid private key: {0}")]
    InvalidKey(String),

    /// The key decodes but uses an algorithm other than Ed25519 or RSA.
    #[error("Unsupported private key algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// The signature primitive itself failed.
    #[error("Signing failed: {0}")]
    Signing(String),
}
