//! HTTP transport for the Binance REST engine.
//!
//! This crate provides:
//!
//! - [`Method`]: strict GET/POST/PUT/DELETE verb parsing
//! - [`HttpTransport`]: the single network boundary, mockable in tests
//! - [`RestClient`]: a thin `reqwest` implementation with timeout and proxy
//! - Consistent transport errors via [`RestError`]
//!
//! # Example
//!
//! ```rust,ignore
//! use rest_client::{HttpRequest, HttpTransport, Method, RestClient};
//!
//! let client = RestClient::new(None, None)?;
//! let response = client
//!     .execute(HttpRequest {
//!         method: Method::Get,
//!         url: "https://api.binance.com/api/v3/time".into(),
//!         headers: Vec::new(),
//!     })
//!     .await?;
//! ```

mod client;
mod error;
mod method;

pub use client::{build_url, HttpRequest, HttpTransport, RawResponse, RestClient};
pub use error::RestError;
pub use method::Method;
pub use reqwest::header::HeaderMap;
