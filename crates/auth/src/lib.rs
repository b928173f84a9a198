//! Authentication and signing for the Binance REST API.
//!
//! # Features
//!
//! - **Secure Credentials**: API secrets and private keys are wrapped in
//!   `secrecy` containers to prevent accidental logging and are zeroed on drop.
//! - **Three signing schemes**: HMAC-SHA256 (hex), Ed25519 and RSA PKCS#1 v1.5
//!   (base64). The asymmetric algorithm is detected from the key itself.
//! - **Environment Loading**: Credentials can be loaded from environment
//!   variables or a `.env` file.
//!
//! # Example
//!
//! ```rust,ignore
//! use auth::{ApiCredentials, RequestSigner};
//!
//! let credentials = ApiCredentials::from_env()?;
//! let signer = RequestSigner::new(&credentials);
//! let signature = signer.sign("symbol=BTCUSDT&timestamp=1499827319559")?;
//! ```

mod credentials;
mod error;
mod key;
mod signer;

pub use credentials::ApiCredentials;
pub use error::AuthError;
pub use key::{KeyAlgorithm, PrivateKey};
pub use signer::{hmac_sha256_hex, RequestSigner, SignatureMethod};
