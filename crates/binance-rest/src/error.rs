//! Binance REST API error types.

use auth::AuthError;
use rest_client::{HeaderMap, RestError};
use serde_json::Value;
use thiserror::Error;

/// Fieldless discriminant of [`BinanceError`], for branching on the kind of
/// failure without matching payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    ParameterRequired,
    ParameterInvalidValue,
    ParameterInvalidType,
    ParameterArgumentConflict,
    UnsupportedMethod,
    ClientError,
    ServerError,
    Transport,
    Signing,
    Json,
}

/// Errors that can occur when interacting with the Binance REST API.
///
/// Parameter errors are raised before any network access. `ClientError` and
/// `ServerError` are raised only after a completed round trip.
#[derive(Debug, Error)]
pub enum BinanceError {
    /// One or more mandatory arguments are missing or empty.
    #[error("{} is mandatory, but received empty.", .0.join(", "))]
    ParameterRequired(Vec<String>),

    /// A value is outside its allowed enumeration.
    #[error("The enum value {} is invalid.", .0.join(", "))]
    ParameterInvalidValue(Vec<String>),

    /// A value has the wrong type.
    #[error("Parameter {name} should be {expected} type.")]
    ParameterInvalidType { name: String, expected: String },

    /// Mutually exclusive arguments were supplied together.
    #[error("{0}")]
    ParameterArgumentConflict(String),

    /// The HTTP verb is not one of GET, POST, PUT, DELETE.
    #[error("Unsupported HTTP method: {0}")]
    UnsupportedMethod(String),

    /// 4xx response from the exchange.
    #[error(
        "Client error (status {status}): code={code:?} msg={}",
        .message.as_deref().unwrap_or("")
    )]
    ClientError {
        status: u16,
        /// Exchange error code, when the body is a JSON error envelope.
        code: Option<i64>,
        /// `msg` from the envelope, or the raw body when it is not JSON.
        message: Option<String>,
        headers: Option<HeaderMap>,
        data: Option<Value>,
    },

    /// 5xx response from the exchange.
    #[error("Server error (status {status}): {message}")]
    ServerError { status: u16, message: String },

    /// The round trip did not complete (connection, timeout, body read).
    #[error("Transport error: {0}")]
    Transport(RestError),

    /// Key material or secret problem while signing.
    #[error("Signing error: {0}")]
    Signing(#[from] AuthError),

    /// A successful body could not be decoded into the requested type.
    #[error("JSON decode error: {0}")]
    Json(#[from] serde_json::Error),
}

impl BinanceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ParameterRequired(_) => ErrorKind::ParameterRequired,
            Self::ParameterInvalidValue(_) => ErrorKind::ParameterInvalidValue,
            Self::ParameterInvalidType { .. } => ErrorKind::ParameterInvalidType,
            Self::ParameterArgumentConflict(_) => ErrorKind::ParameterArgumentConflict,
            Self::UnsupportedMethod(_) => ErrorKind::UnsupportedMethod,
            Self::ClientError { .. } => ErrorKind::ClientError,
            Self::ServerError { .. } => ErrorKind::ServerError,
            Self::Transport(_) => ErrorKind::Transport,
            Self::Signing(_) => ErrorKind::Signing,
            Self::Json(_) => ErrorKind::Json,
        }
    }

    /// HTTP status for errors raised after a round trip.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::ClientError { status, .. } | Self::ServerError { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Exchange error code from a 4xx JSON envelope.
    pub fn code(&self) -> Option<i64> {
        match self {
            Self::ClientError { code, .. } => *code,
            _ => None,
        }
    }

    /// True for errors raised before any request was sent.
    pub fn is_parameter_error(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::ParameterRequired
                | ErrorKind::ParameterInvalidValue
                | ErrorKind::ParameterInvalidType
                | ErrorKind::ParameterArgumentConflict
        )
    }

    /// True when the transport gave up waiting for a response.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Transport(err) if err.is_timeout())
    }

    pub(crate) fn required(name: &str) -> Self {
        Self::ParameterRequired(vec![name.to_string()])
    }
}

impl From<RestError> for BinanceError {
    fn from(err: RestError) -> Self {
        match err {
            RestError::UnsupportedMethod(method) => Self::UnsupportedMethod(method),
            other => Self::Transport(other),
        }
    }
}

/// Result type for Binance REST operations.
pub type BinanceResult<T> = Result<T, BinanceError>;
