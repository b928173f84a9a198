//! Response classification and shaping.

use std::collections::BTreeMap;

use common::ClientConfig;
use rest_client::{HeaderMap, RawResponse};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::error::{BinanceError, BinanceResult};

/// Lowercase header-name prefixes reported as limit usage.
const LIMIT_USAGE_PREFIXES: [&str; 3] = ["x-mbx-used-weight", "x-mbx-order-count", "x-sapi-used"];

/// Decoded body of a successful response.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseData {
    Json(Value),
    /// Body that is not valid JSON, kept verbatim.
    Text(String),
}

impl ResponseData {
    fn from_body(body: String) -> Self {
        match serde_json::from_str(&body) {
            Ok(value) => Self::Json(value),
            Err(_) => Self::Text(body),
        }
    }

    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Self::Json(value) => Some(value),
            Self::Text(_) => None,
        }
    }
}

/// Result of a successful call.
///
/// Which variant is returned depends only on the client configuration:
/// `Plain` when neither limit usage nor headers are requested, `Annotated`
/// otherwise.
#[derive(Debug, Clone)]
pub enum ApiResponse {
    Plain(ResponseData),
    Annotated {
        data: ResponseData,
        limit_usage: Option<BTreeMap<String, String>>,
        headers: Option<HeaderMap>,
    },
}

impl ApiResponse {
    pub fn data(&self) -> &ResponseData {
        match self {
            Self::Plain(data) | Self::Annotated { data, .. } => data,
        }
    }

    pub fn into_data(self) -> ResponseData {
        match self {
            Self::Plain(data) | Self::Annotated { data, .. } => data,
        }
    }

    /// Decode the body into `T`.
    ///
    /// A text body is decoded as a JSON string.
    pub fn json<T: DeserializeOwned>(&self) -> BinanceResult<T> {
        let value = match self.data() {
            ResponseData::Json(value) => value.clone(),
            ResponseData::Text(text) => Value::String(text.clone()),
        };
        Ok(serde_json::from_value(value)?)
    }

    pub fn limit_usage(&self) -> Option<&BTreeMap<String, String>> {
        match self {
            Self::Annotated { limit_usage, .. } => limit_usage.as_ref(),
            Self::Plain(_) => None,
        }
    }

    pub fn headers(&self) -> Option<&HeaderMap> {
        match self {
            Self::Annotated { headers, .. } => headers.as_ref(),
            Self::Plain(_) => None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    code: Option<i64>,
    msg: Option<String>,
    data: Option<Value>,
}

/// Classify a completed round trip by status code.
///
/// Returns the decoded body and the response headers on success.
pub(crate) fn classify(response: RawResponse) -> BinanceResult<(ResponseData, HeaderMap)> {
    let RawResponse {
        status,
        headers,
        body,
    } = response;

    if status < 400 {
        return Ok((ResponseData::from_body(body), headers));
    }

    if status >= 500 {
        return Err(BinanceError::ServerError {
            status,
            message: body,
        });
    }

    match serde_json::from_str::<ErrorEnvelope>(&body) {
        Ok(envelope) => Err(BinanceError::ClientError {
            status,
            code: envelope.code,
            message: Some(envelope.msg.unwrap_or(body)),
            headers: Some(headers),
            data: envelope.data,
        }),
        Err(_) => Err(BinanceError::ClientError {
            status,
            code: None,
            message: Some(body),
            headers: None,
            data: None,
        }),
    }
}

/// Collect quota headers, keyed by lowercase name.
pub(crate) fn limit_usage(headers: &HeaderMap) -> BTreeMap<String, String> {
    headers
        .iter()
        .filter(|(name, _)| {
            LIMIT_USAGE_PREFIXES
                .iter()
                .any(|prefix| name.as_str().starts_with(prefix))
        })
        .map(|(name, value)| {
            (
                name.as_str().to_string(),
                String::from_utf8_lossy(value.as_bytes()).into_owned(),
            )
        })
        .collect()
}

/// Wrap a successful body according to the client's display flags.
pub(crate) fn shape(data: ResponseData, headers: HeaderMap, config: &ClientConfig) -> ApiResponse {
    if !config.annotates_responses() {
        return ApiResponse::Plain(data);
    }

    ApiResponse::Annotated {
        data,
        limit_usage: config.show_limit_usage().then(|| limit_usage(&headers)),
        headers: config.show_header().then_some(headers),
    }
}
