//! Argument checks run before any request is built.

use std::fmt;

use serde_json::Value;

use crate::error::{BinanceError, BinanceResult};

/// JSON type expected by [`check_type_parameter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamType {
    String,
    Integer,
    Number,
    Bool,
    List,
}

impl ParamType {
    fn matches(self, value: &Value) -> bool {
        match self {
            Self::String => value.is_string(),
            Self::Integer => value.is_i64() || value.is_u64(),
            Self::Number => value.is_number(),
            Self::Bool => value.is_boolean(),
            Self::List => value.is_array(),
        }
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::String => "str",
            Self::Integer => "int",
            Self::Number => "number",
            Self::Bool => "bool",
            Self::List => "list",
        };
        f.write_str(name)
    }
}

/// Fails with `ParameterRequired` when `value` is empty.
///
/// Null, `false`, `""`, `[]` and `{}` count as empty. The number `0` does not.
pub fn check_required_parameter(value: &Value, name: &str) -> BinanceResult<()> {
    let empty = match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
        Value::Number(_) => false,
    };
    if empty {
        return Err(BinanceError::required(name));
    }
    Ok(())
}

/// Checks `(value, name)` pairs in order; the first empty value fails.
pub fn check_required_parameters(params: &[(Value, &str)]) -> BinanceResult<()> {
    params
        .iter()
        .try_for_each(|(value, name)| check_required_parameter(value, name))
}

/// Fails with `ParameterInvalidValue` when `value` is not one of `allowed`.
pub fn check_enum_parameter(value: &str, allowed: &[&str]) -> BinanceResult<()> {
    if allowed.contains(&value) {
        Ok(())
    } else {
        Err(BinanceError::ParameterInvalidValue(vec![value.to_string()]))
    }
}

/// Fails with `ParameterInvalidType` when a non-null `value` is not of `expected` type.
pub fn check_type_parameter(value: &Value, name: &str, expected: ParamType) -> BinanceResult<()> {
    if value.is_null() || expected.matches(value) {
        return Ok(());
    }
    Err(BinanceError::ParameterInvalidType {
        name: name.to_string(),
        expected: expected.to_string(),
    })
}

/// Fails with `ParameterArgumentConflict` when both `symbol` and `symbols` are given.
pub(crate) fn check_symbol_exclusive<T>(symbol: Option<&str>, symbols: Option<&[T]>) -> BinanceResult<()> {
    if symbol.is_some_and(|s| !s.is_empty()) && symbols.is_some_and(|s| !s.is_empty()) {
        return Err(BinanceError::ParameterArgumentConflict(
            "symbol and symbols cannot be sent together.".to_string(),
        ));
    }
    Ok(())
}
