//! HTTP verbs accepted by the exchange.

use std::fmt;
use std::str::FromStr;

use crate::error::RestError;

/// The four verbs the REST API uses.
///
/// Parsing is strict: anything else is rejected instead of defaulting to GET.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = RestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "GET" => Ok(Self::Get),
            "POST" => Ok(Self::Post),
            "PUT" => Ok(Self::Put),
            "DELETE" => Ok(Self::Delete),
            other => Err(RestError::UnsupportedMethod(other.to_string())),
        }
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_verbs() {
        for verb in ["GET", "POST", "PUT", "DELETE"] {
            let method: Method = verb.parse().unwrap();
            assert_eq!(method.as_str(), verb);
        }
    }

    #[test]
    fn test_unknown_verb_fails_closed() {
        for verb in ["PATCH", "get", "", "HEAD"] {
            let err = verb.parse::<Method>().unwrap_err();
            assert!(matches!(err, RestError::UnsupportedMethod(ref v) if v == verb));
        }
    }

    #[test]
    fn test_into_reqwest() {
        assert_eq!(reqwest::Method::from(Method::Delete), reqwest::Method::DELETE);
    }
}
