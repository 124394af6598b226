//! Shape checks for batch submission parameters.
//!
//! These are free functions over dynamic values so request files (JSON/YAML)
//! get the same diagnostics as typed callers. Every failure is an
//! [`Error::InvalidArgument`] raised before anything is sent.

use crate::types::SessionId;
use crate::{Error, ErrorContext, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

static SIZE_FORMAT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\d+[kmgt]b?$").expect("size format pattern is a valid regex")
});

/// Validate a JVM memory size such as `512m`, `2g` or `1024kb`.
///
/// Empty input counts as "not provided" and passes.
pub fn validate_size_format(size: &str) -> Result<()> {
    if size.is_empty() || SIZE_FORMAT.is_match(size) {
        return Ok(());
    }
    Err(Error::invalid_argument_with_context(
        format!("Invalid java size format for string '{}'", size),
        ErrorContext::new()
            .with_details("expected digits followed by one of k/m/g/t and an optional 'b'")
            .with_source("size_validator"),
    ))
}

/// Validate that every element of a list can be rendered as a string.
pub fn validate_stringable_list(values: &Value) -> Result<()> {
    let stringable = values
        .as_array()
        .map(|items| items.iter().all(|v| v.is_string() || v.is_number()))
        .unwrap_or(false);
    if stringable {
        Ok(())
    } else {
        Err(Error::invalid_argument_with_context(
            "List of strings expected",
            ErrorContext::new()
                .with_details(format!("got {}", values))
                .with_source("list_validator"),
        ))
    }
}

/// Validate a Spark `conf` mapping: values must be non-empty strings or integers.
pub fn validate_conf_map(conf: &Value) -> Result<()> {
    let map = conf.as_object().ok_or_else(|| {
        Error::invalid_argument_with_context(
            "'conf' argument must be a map",
            ErrorContext::new()
                .with_field_path("conf")
                .with_source("conf_validator"),
        )
    })?;

    for (key, value) in map {
        let ok = match value {
            Value::String(s) => !s.is_empty(),
            Value::Number(n) => n.is_i64() || n.is_u64(),
            _ => false,
        };
        if !ok {
            return Err(Error::invalid_argument_with_context(
                "'conf' values must be either strings or ints",
                ErrorContext::new()
                    .with_field_path(format!("conf.{}", key))
                    .with_details(format!("got {}", value))
                    .with_source("conf_validator"),
            ));
        }
    }
    Ok(())
}

/// Validate a session id given as an integer or a numeric string.
pub fn validate_session_id(id: &Value) -> Result<SessionId> {
    SessionId::from_value(id)
}
