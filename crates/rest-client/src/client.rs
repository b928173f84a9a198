//! HTTP transport trait and its reqwest implementation.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::Client;

use crate::error::RestError;
use crate::method::Method;

/// A fully assembled outbound request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: Method,
    /// Absolute URL including any query string.
    pub url: String,
    pub headers: Vec<(String, String)>,
}

/// Status, headers and undecoded body of a completed round trip.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub headers: HeaderMap,
    pub body: String,
}

/// Executes one request and returns the raw response.
///
/// Implementations perform no retries and no status interpretation; any
/// failure to complete the round trip is a [`RestError`].
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn execute(&self, request: HttpRequest) -> Result<RawResponse, RestError>;
}

/// Reqwest-backed transport.
///
/// The inner `reqwest::Client` pools keep-alive connections and is safe to
/// share across tasks.
#[derive(Debug, Clone)]
pub struct RestClient {
    client: Client,
}

impl RestClient {
    /// Create a transport with an optional per-request timeout and proxy.
    ///
    /// # Errors
    /// Returns an error if the proxy URL is invalid or the HTTP client cannot be built.
    pub fn new(timeout: Option<Duration>, proxy: Option<&str>) -> Result<Self, RestError> {
        let mut builder = Client::builder();

        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        if let Some(proxy) = proxy {
            let proxy =
                reqwest::Proxy::all(proxy).map_err(|e| RestError::InvalidProxy(e.to_string()))?;
            builder = builder.proxy(proxy);
        }

        let client = builder
            .build()
            .map_err(|e| RestError::RequestBuild(e.to_string()))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl HttpTransport for RestClient {
    async fn execute(&self, request: HttpRequest) -> Result<RawResponse, RestError> {
        tracing::debug!(method = %request.method, url = %request.url, "HTTP request");

        let mut builder = self.client.request(request.method.into(), &request.url);
        for (key, value) in &request.headers {
            builder = builder.header(key.as_str(), value.as_str());
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let body = response.text().await?;

        tracing::debug!(status = status, bytes = body.len(), "HTTP response");

        Ok(RawResponse {
            status,
            headers,
            body,
        })
    }
}

/// Join a base URL, a path and an optional query string (without leading `?`).
pub fn build_url(base_url: &str, path: &str, query: Option<&str>) -> String {
    let base = base_url.trim_end_matches('/');
    match query {
        Some(q) if !q.is_empty() => format!("{base}{path}?{q}"),
        _ => format!("{base}{path}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_url_no_query() {
        assert_eq!(
            build_url("https://api.example.com", "/api/v1/time", None),
            "https://api.example.com/api/v1/time"
        );
    }

    #[test]
    fn test_build_url_with_query() {
        assert_eq!(
            build_url(
                "https://api.example.com",
                "/api/v1/order",
                Some("symbol=BTCUSDT&side=BUY")
            ),
            "https://api.example.com/api/v1/order?symbol=BTCUSDT&side=BUY"
        );
    }

    #[test]
    fn test_build_url_strips_trailing_slash() {
        assert_eq!(
            build_url("https://api.example.com/", "/api/v1/time", None),
            "https://api.example.com/api/v1/time"
        );
    }

    #[test]
    fn test_build_url_empty_query() {
        assert_eq!(
            build_url("https://api.example.com", "/api/v1/time", Some("")),
            "https://api.example.com/api/v1/time"
        );
    }

    #[test]
    fn test_new_rejects_bad_proxy() {
        let err = RestClient::new(None, Some("http://[::1")).unwrap_err();
        assert!(matches!(err, RestError::InvalidProxy(_)));
    }

    #[test]
    fn test_new_with_timeout_and_proxy() {
        let client = RestClient::new(
            Some(Duration::from_millis(500)),
            Some("http://127.0.0.1:8080"),
        );
        assert!(client.is_ok());
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_error() {
        let client = RestClient::new(Some(Duration::from_secs(2)), None).unwrap();
        let request = HttpRequest {
            method: Method::Get,
            url: "http://127.0.0.1:1/api/v3/ping".to_string(),
            headers: Vec::new(),
        };

        let err = client.execute(request).await.unwrap_err();
        assert!(matches!(
            err,
            RestError::Connection(_) | RestError::Timeout(_)
        ));
    }
}
