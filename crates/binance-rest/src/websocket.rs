//! Session-logon signature for the websocket API.

use auth::{ApiCredentials, AuthError, RequestSigner};

use crate::error::BinanceResult;
use crate::params::ParameterMap;

/// Sign a websocket API request.
///
/// `timestamp` and `apiKey` are added, keys are sorted, and the sorted
/// form encoding is signed with HMAC-SHA256. The returned map is the sorted
/// parameters followed by `signature`.
///
/// # Errors
/// `Signing(MissingApiKey)` or `Signing(MissingSecret)` when either half of
/// the HMAC credentials is absent. A configured private key is ignored.
pub fn websocket_api_signature(
    credentials: &ApiCredentials,
    params: Option<ParameterMap>,
    timestamp: i64,
) -> BinanceResult<ParameterMap> {
    if !credentials.has_api_key() {
        return Err(AuthError::MissingApiKey.into());
    }

    let mut params = params.unwrap_or_default();
    params.insert("timestamp", timestamp);
    params.insert("apiKey", credentials.api_key());

    let mut sorted = params.normalized().sorted();
    let signature = RequestSigner::new(credentials).sign_hmac(&sorted.encode_sorted())?;
    sorted.insert("signature", signature);
    Ok(sorted)
}
