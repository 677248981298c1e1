//! Request validation at the JSON boundary.
//!
//! A malformed request is an input error, never a deny: the two must stay
//! distinguishable all the way out to the process exit code.

use crate::model::Request;
use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("request must be a JSON object, got {found}")]
    NotAnObject { found: &'static str },

    #[error("missing required field `{field}`")]
    MissingField { field: &'static str },

    #[error("field `{field}` must be {expected}, got {found}")]
    InvalidType {
        field: &'static str,
        expected: &'static str,
        found: &'static str,
    },
}

/// A request field with its canonical (camelCase) and snake_case spellings.
struct FieldName {
    camel: &'static str,
    snake: &'static str,
}

const INTENT: FieldName = FieldName { camel: "intent", snake: "intent" };
const DOMAIN: FieldName = FieldName { camel: "domain", snake: "domain" };
const TTL: FieldName = FieldName { camel: "ttl", snake: "ttl" };
const CHILDREN: FieldName = FieldName { camel: "children", snake: "children" };
const CONCURRENCY: FieldName = FieldName { camel: "concurrency", snake: "concurrency" };
const RATE: FieldName = FieldName { camel: "rate", snake: "rate" };
const PAYLOAD: FieldName = FieldName { camel: "payload", snake: "payload" };
const PAUSE: FieldName = FieldName {
    camel: "pauseBeforePropagate",
    snake: "pause_before_propagate",
};

impl Request {
    /// Build a request from a decoded JSON value.
    ///
    /// Unknown fields are ignored. Integer fields reject fractional numbers and strings;
    /// `payload` may be absent or `null`.
    pub fn from_json(value: &Value) -> Result<Self, InputError> {
        let obj = value.as_object().ok_or(InputError::NotAnObject {
            found: json_kind(value),
        })?;

        Ok(Request {
            intent: required_str(obj, &INTENT)?,
            domain: required_str(obj, &DOMAIN)?,
            ttl: required_int(obj, &TTL)?,
            children: required_int(obj, &CHILDREN)?,
            concurrency: required_int(obj, &CONCURRENCY)?,
            rate: required_number(obj, &RATE)?,
            payload: optional_str(obj, &PAYLOAD)?,
            pause_before_propagate: required_bool(obj, &PAUSE)?,
        })
    }

    /// Parse and validate a request from JSON text.
    ///
    /// Syntax errors surface as `serde_json::Error`; shape errors as [`InputError`].
    pub fn from_json_str(text: &str) -> Result<Result<Self, InputError>, serde_json::Error> {
        let value: Value = serde_json::from_str(text)?;
        Ok(Self::from_json(&value))
    }
}

fn lookup<'a>(obj: &'a Map<String, Value>, name: &FieldName) -> Option<&'a Value> {
    obj.get(name.camel).or_else(|| obj.get(name.snake))
}

fn required<'a>(obj: &'a Map<String, Value>, name: &FieldName) -> Result<&'a Value, InputError> {
    lookup(obj, name).ok_or(InputError::MissingField { field: name.camel })
}

fn required_str(obj: &Map<String, Value>, name: &FieldName) -> Result<String, InputError> {
    let v = required(obj, name)?;
    v.as_str()
        .map(str::to_string)
        .ok_or_else(|| invalid(name, "a string", v))
}

fn required_int(obj: &Map<String, Value>, name: &FieldName) -> Result<i64, InputError> {
    let v = required(obj, name)?;
    v.as_i64().ok_or_else(|| invalid(name, "an integer", v))
}

fn required_number(obj: &Map<String, Value>, name: &FieldName) -> Result<f64, InputError> {
    let v = required(obj, name)?;
    v.as_f64().ok_or_else(|| invalid(name, "a number", v))
}

fn required_bool(obj: &Map<String, Value>, name: &FieldName) -> Result<bool, InputError> {
    let v = required(obj, name)?;
    v.as_bool().ok_or_else(|| invalid(name, "a boolean", v))
}

fn optional_str(obj: &Map<String, Value>, name: &FieldName) -> Result<Option<String>, InputError> {
    match lookup(obj, name) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(invalid(name, "a string", other)),
    }
}

fn invalid(name: &FieldName, expected: &'static str, found: &Value) -> InputError {
    InputError::InvalidType {
        field: name.camel,
        expected,
        found: json_kind(found),
    }
}

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(n) if n.is_i64() => "an integer",
        Value::Number(n) if n.is_u64() => "an out-of-range integer",
        Value::Number(_) => "a fractional number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
