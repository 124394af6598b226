//! Typed batch submission parameters

use crate::validation::{validate_conf_map, validate_stringable_list};
use crate::{Error, ErrorContext, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A command line argument value; rendered to a string on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Stringable {
    Int(i64),
    Float(f64),
    Str(String),
}

impl fmt::Display for Stringable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stringable::Str(s) => f.write_str(s),
            Stringable::Int(i) => write!(f, "{}", i),
            Stringable::Float(x) => f.write_str(&render_float(*x)),
        }
    }
}

/// Shortest round-trip digits, positional for decimal exponents in `-4..16`
/// and `d.ddde+XX` otherwise. Whole floats keep their ".0" so `2.0` is not
/// sent as "2".
fn render_float(x: f64) -> String {
    if x.is_nan() {
        return "nan".to_string();
    }
    if x.is_infinite() {
        return if x > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if x == 0.0 {
        return if x.is_sign_negative() { "-0.0" } else { "0.0" }.to_string();
    }

    let scientific = format!("{:e}", x);
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (scientific.as_str(), 0),
    };
    if (-4..16).contains(&exponent) {
        let positional = x.to_string();
        if positional.contains('.') {
            positional
        } else {
            format!("{}.0", positional)
        }
    } else {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", mantissa, sign, exponent.abs())
    }
}

impl From<&str> for Stringable {
    fn from(s: &str) -> Self {
        Stringable::Str(s.to_string())
    }
}

impl From<String> for Stringable {
    fn from(s: String) -> Self {
        Stringable::Str(s)
    }
}

impl From<i64> for Stringable {
    fn from(i: i64) -> Self {
        Stringable::Int(i)
    }
}

impl From<i32> for Stringable {
    fn from(i: i32) -> Self {
        Stringable::Int(i as i64)
    }
}

impl From<f64> for Stringable {
    fn from(x: f64) -> Self {
        Stringable::Float(x)
    }
}

/// Core/executor counts: the service accepts an integer or a numeric string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Numeric {
    Int(i64),
    Str(String),
}

impl Numeric {
    /// Zero and the empty string are treated as "not provided".
    pub fn is_set(&self) -> bool {
        match self {
            Numeric::Int(i) => *i != 0,
            Numeric::Str(s) => !s.is_empty(),
        }
    }
}

impl From<i64> for Numeric {
    fn from(i: i64) -> Self {
        Numeric::Int(i)
    }
}

impl From<i32> for Numeric {
    fn from(i: i32) -> Self {
        Numeric::Int(i as i64)
    }
}

impl From<&str> for Numeric {
    fn from(s: &str) -> Self {
        Numeric::Str(s.to_string())
    }
}

/// A Spark configuration value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfValue {
    Int(i64),
    Str(String),
}

impl From<&str> for ConfValue {
    fn from(s: &str) -> Self {
        ConfValue::Str(s.to_string())
    }
}

impl From<String> for ConfValue {
    fn from(s: String) -> Self {
        ConfValue::Str(s)
    }
}

impl From<i64> for ConfValue {
    fn from(i: i64) -> Self {
        ConfValue::Int(i)
    }
}

impl From<i32> for ConfValue {
    fn from(i: i32) -> Self {
        ConfValue::Int(i as i64)
    }
}

/// Parameters of `POST /batches`.
///
/// Only `file` is required. Empty strings, empty lists, empty maps and zero
/// counts are treated as absent when the payload is built.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SubmissionRequest {
    pub file: String,
    pub class_name: Option<String>,
    pub args: Vec<Stringable>,
    pub jars: Vec<String>,
    pub py_files: Vec<String>,
    pub files: Vec<String>,
    pub archives: Vec<String>,
    pub driver_memory: Option<String>,
    pub driver_cores: Option<Numeric>,
    pub executor_memory: Option<String>,
    pub executor_cores: Option<Numeric>,
    pub num_executors: Option<Numeric>,
    pub queue: Option<String>,
    pub proxy_user: Option<String>,
    pub name: Option<String>,
    pub conf: BTreeMap<String, ConfValue>,
}

impl SubmissionRequest {
    pub fn new(file: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            ..Default::default()
        }
    }

    /// Build a request from a dynamic JSON/YAML document.
    ///
    /// List and `conf` fields are checked with the validators first, so a
    /// malformed document reports which field is wrong.
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        let object = value.as_object().ok_or_else(|| {
            Error::invalid_argument_with_context(
                "submission request must be a map",
                ErrorContext::new().with_source("submission_request"),
            )
        })?;
        if !object.get("file").map(|f| f.is_string()).unwrap_or(false) {
            return Err(Error::invalid_argument_with_context(
                "'file' is required and must be a string",
                ErrorContext::new()
                    .with_field_path("file")
                    .with_source("submission_request"),
            ));
        }
        for key in ["args", "jars", "pyFiles", "files", "archives"] {
            if let Some(list) = object.get(key).filter(|v| !v.is_null()) {
                validate_stringable_list(list).map_err(|e| with_field(e, key))?;
            }
        }
        if let Some(conf) = object.get("conf").filter(|v| !v.is_null()) {
            validate_conf_map(conf)?;
        }

        serde_json::from_value(value).map_err(|e| {
            Error::invalid_argument_with_context(
                format!("malformed submission request: {}", e),
                ErrorContext::new().with_source("submission_request"),
            )
        })
    }

    pub fn class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    pub fn args<I, T>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Stringable>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn jars<I: IntoIterator<Item = S>, S: Into<String>>(mut self, jars: I) -> Self {
        self.jars = jars.into_iter().map(Into::into).collect();
        self
    }

    pub fn py_files<I: IntoIterator<Item = S>, S: Into<String>>(mut self, py_files: I) -> Self {
        self.py_files = py_files.into_iter().map(Into::into).collect();
        self
    }

    pub fn files<I: IntoIterator<Item = S>, S: Into<String>>(mut self, files: I) -> Self {
        self.files = files.into_iter().map(Into::into).collect();
        self
    }

    pub fn archives<I: IntoIterator<Item = S>, S: Into<String>>(mut self, archives: I) -> Self {
        self.archives = archives.into_iter().map(Into::into).collect();
        self
    }

    pub fn driver_memory(mut self, size: impl Into<String>) -> Self {
        self.driver_memory = Some(size.into());
        self
    }

    pub fn driver_cores(mut self, cores: impl Into<Numeric>) -> Self {
        self.driver_cores = Some(cores.into());
        self
    }

    pub fn executor_memory(mut self, size: impl Into<String>) -> Self {
        self.executor_memory = Some(size.into());
        self
    }

    pub fn executor_cores(mut self, cores: impl Into<Numeric>) -> Self {
        self.executor_cores = Some(cores.into());
        self
    }

    pub fn num_executors(mut self, count: impl Into<Numeric>) -> Self {
        self.num_executors = Some(count.into());
        self
    }

    pub fn queue(mut self, queue: impl Into<String>) -> Self {
        self.queue = Some(queue.into());
        self
    }

    pub fn proxy_user(mut self, user: impl Into<String>) -> Self {
        self.proxy_user = Some(user.into());
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn conf_entry(mut self, key: impl Into<String>, value: impl Into<ConfValue>) -> Self {
        self.conf.insert(key.into(), value.into());
        self
    }
}

fn with_field(err: Error, field: &str) -> Error {
    match err {
        Error::InvalidArgument {
            message,
            context,
        } => Error::InvalidArgument {
            message,
            context: context.with_field_path(field),
        },
        other => other,
    }
}
