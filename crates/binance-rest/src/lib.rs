//! Binance REST API client.
//!
//! This crate provides the request engine for the Binance REST API:
//!
//! - **Parameter encoding**: insertion-ordered canonical query strings via [`ParameterMap`]
//! - **Signing**: HMAC-SHA256, Ed25519 or RSA, chosen from the configured credentials
//! - **Dispatch**: `query`, `limit_request`, `sign_request` and `limited_encoded_sign_request`
//! - **Error handling**: parameter, client (4xx), server (5xx) and transport errors,
//!   distinguishable through [`ErrorKind`]
//! - **Market data**: public spot endpoints such as `depth`, `klines` and `ticker_price`
//!
//! # Example
//!
//! ```rust,ignore
//! use auth::ApiCredentials;
//! use binance_rest::{BinanceRestClient, DepthResponse, Method, ParameterMap};
//! use common::ClientConfig;
//!
//! let credentials = ApiCredentials::from_env()?;
//! let client = BinanceRestClient::new(credentials, ClientConfig::from_env()?)?;
//!
//! let depth: DepthResponse = client
//!     .depth("BTCUSDT", Some(ParameterMap::new().with("limit", 5)))
//!     .await?
//!     .json()?;
//!
//! let account = client
//!     .sign_request(Method::Get, "/api/v3/account", None)
//!     .await?;
//! ```

mod client;
mod error;
mod market;
mod observer;
mod params;
mod response;
mod responses;
mod validation;
mod websocket;

pub use client::BinanceRestClient;
pub use error::{BinanceError, BinanceResult, ErrorKind};
pub use observer::{NoopObserver, RequestObserver, TracingObserver};
pub use params::{convert_list_to_json_array, purge_map, ParameterMap};
pub use response::{ApiResponse, ResponseData};
pub use responses::{
    AvgPriceResponse, BookTicker, DepthResponse, PriceLevel, PriceTicker, ServerTimeResponse,
};
pub use rest_client::Method;
pub use validation::{
    check_enum_parameter, check_required_parameter, check_required_parameters,
    check_type_parameter, ParamType,
};
pub use websocket::websocket_api_signature;
