//! Binance REST API client.
//!
//! Every call goes through one of four entry operations:
//!
//! | operation | API key | signature |
//! |---|---|---|
//! | [`query`](BinanceRestClient::query) | sent if set | no |
//! | [`limit_request`](BinanceRestClient::limit_request) | required | no |
//! | [`sign_request`](BinanceRestClient::sign_request) | sent if set | `signature` parameter |
//! | [`limited_encoded_sign_request`](BinanceRestClient::limited_encoded_sign_request) | sent if set | embedded in the path |
//!
//! Parameters are always transmitted in the URL query string.

use std::sync::Arc;

use auth::{ApiCredentials, RequestSigner};
use common::ClientConfig;
use rest_client::{build_url, HttpRequest, HttpTransport, Method, RestClient};

use crate::error::{BinanceError, BinanceResult};
use crate::observer::{NoopObserver, RequestObserver};
use crate::params::ParameterMap;
use crate::response::{self, ApiResponse};

const USER_AGENT: &str = concat!("binance-rest/", env!("CARGO_PKG_VERSION"));
const CONTENT_TYPE: &str = "application/json;charset=utf-8";
const API_KEY_HEADER: &str = "X-MBX-APIKEY";

/// Binance REST API client with authentication support.
///
/// Credentials and configuration are fixed at construction; one instance
/// can be shared across tasks.
pub struct BinanceRestClient {
    transport: Arc<dyn HttpTransport>,
    credentials: ApiCredentials,
    config: ClientConfig,
    observer: Arc<dyn RequestObserver>,
    clock: fn() -> i64,
}

impl BinanceRestClient {
    /// Create a client backed by `reqwest`, using the timeout and proxy from `config`.
    ///
    /// # Errors
    /// Returns an error if the proxy URL is invalid or the HTTP client cannot be built.
    pub fn new(credentials: ApiCredentials, config: ClientConfig) -> BinanceResult<Self> {
        let transport = RestClient::new(config.timeout(), config.proxy())?;
        Ok(Self::with_transport(credentials, config, Arc::new(transport)))
    }

    /// Create a client over an arbitrary transport.
    pub fn with_transport(
        credentials: ApiCredentials,
        config: ClientConfig,
        transport: Arc<dyn HttpTransport>,
    ) -> Self {
        Self {
            transport,
            credentials,
            config,
            observer: Arc::new(NoopObserver),
            clock: common::timestamp_ms,
        }
    }

    pub fn with_observer(mut self, observer: impl RequestObserver + 'static) -> Self {
        self.observer = Arc::new(observer);
        self
    }

    /// Replace the millisecond clock used for request timestamps.
    pub fn with_clock(mut self, clock: fn() -> i64) -> Self {
        self.clock = clock;
        self
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Get the API key (for logging/debugging).
    pub fn api_key(&self) -> &str {
        self.credentials.api_key()
    }

    /// Unsigned GET.
    pub async fn query(&self, path: &str, params: Option<ParameterMap>) -> BinanceResult<ApiResponse> {
        self.send_request(Method::Get, path, params).await
    }

    /// Unsigned request that needs the API key header.
    ///
    /// # Errors
    /// `ParameterRequired("api_key")` when the key is empty, before any network access.
    pub async fn limit_request(
        &self,
        method: Method,
        path: &str,
        params: Option<ParameterMap>,
    ) -> BinanceResult<ApiResponse> {
        if !self.credentials.has_api_key() {
            return Err(BinanceError::required("api_key"));
        }
        self.send_request(method, path, params).await
    }

    /// Signed request with the signature sent as a regular parameter.
    ///
    /// `timestamp` is set from the client clock; the transmitted query string
    /// is `<encoded params>&signature=<sig>`.
    pub async fn sign_request(
        &self,
        method: Method,
        path: &str,
        params: Option<ParameterMap>,
    ) -> BinanceResult<ApiResponse> {
        let mut params = params.unwrap_or_default();
        let signature = self.sign_params(&mut params)?;
        params.insert("signature", signature);
        self.send_request(method, path, Some(params)).await
    }

    /// Signed request with the query and signature appended to the path directly.
    ///
    /// Used by endpoints whose path does not survive normal parameter encoding.
    pub async fn limited_encoded_sign_request(
        &self,
        method: Method,
        path: &str,
        params: Option<ParameterMap>,
    ) -> BinanceResult<ApiResponse> {
        let mut params = params.unwrap_or_default();
        let signature = self.sign_params(&mut params)?;
        let signature: String = form_urlencoded::byte_serialize(signature.as_bytes()).collect();
        let path = format!("{path}?{}&signature={signature}", params.encode());
        self.send_request(method, &path, None).await
    }

    /// Dispatch one request and classify the response.
    ///
    /// No retries: transport failures surface as `Transport`, 4xx as
    /// `ClientError` and 5xx as `ServerError`.
    pub async fn send_request(
        &self,
        method: Method,
        path: &str,
        params: Option<ParameterMap>,
    ) -> BinanceResult<ApiResponse> {
        let query = params.map(|p| p.encode());
        let url = build_url(self.config.base_url(), path, query.as_deref());

        let mut headers = vec![
            ("Content-Type".to_string(), CONTENT_TYPE.to_string()),
            ("User-Agent".to_string(), USER_AGENT.to_string()),
        ];
        if self.credentials.has_api_key() {
            headers.push((API_KEY_HEADER.to_string(), self.credentials.api_key().to_string()));
        }

        self.observer.on_request(method, &url);

        let raw = self
            .transport
            .execute(HttpRequest {
                method,
                url,
                headers,
            })
            .await?;

        self.observer.on_response(raw.status, &raw.body);

        let (data, headers) = response::classify(raw)?;
        Ok(response::shape(data, headers, &self.config))
    }

    /// Stamp `params` with the current time and sign its encoding.
    fn sign_params(&self, params: &mut ParameterMap) -> BinanceResult<String> {
        params.insert("timestamp", (self.clock)());
        let payload = params.encode();
        let signature = RequestSigner::new(&self.credentials).sign(&payload)?;
        Ok(signature)
    }
}
