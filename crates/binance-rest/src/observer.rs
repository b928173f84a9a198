//! Per-request notification hooks.

use rest_client::Method;

/// Notified around every dispatched request.
///
/// Both hooks default to doing nothing.
pub trait RequestObserver: Send + Sync {
    fn on_request(&self, _method: Method, _url: &str) {}

    fn on_response(&self, _status: u16, _body: &str) {}
}

/// Observer that ignores everything. The client default.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl RequestObserver for NoopObserver {}

/// Forwards requests and raw responses to `tracing` at debug level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl RequestObserver for TracingObserver {
    fn on_request(&self, method: Method, url: &str) {
        tracing::debug!(%method, url, "Sending request");
    }

    fn on_response(&self, status: u16, body: &str) {
        tracing::debug!(status, body, "Raw response");
    }
}
