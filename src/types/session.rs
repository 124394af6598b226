//! Batch session identifiers

use crate::{Error, ErrorContext, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier assigned by the service on submission.
///
/// A `SessionId` only exists once its value has been checked as an integer,
/// so it can be embedded in endpoint paths as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(i64);

impl SessionId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn get(&self) -> i64 {
        self.0
    }

    /// Parse a textual id; surrounding whitespace is tolerated.
    pub fn parse(s: &str) -> Result<Self> {
        s.trim()
            .parse::<i64>()
            .map(Self)
            .map_err(|_| invalid_session_id(format!("got '{}'", s)))
    }

    /// Validate a dynamic value: an integer, or a string holding one.
    pub fn from_value(value: &serde_json::Value) -> Result<Self> {
        match value {
            serde_json::Value::Number(n) => n
                .as_i64()
                .map(Self)
                .ok_or_else(|| invalid_session_id(format!("got {}", n))),
            serde_json::Value::String(s) => Self::parse(s),
            other => Err(invalid_session_id(format!("got {}", other))),
        }
    }
}

fn invalid_session_id(details: String) -> Error {
    Error::invalid_argument_with_context(
        "session id must be an integer",
        ErrorContext::new()
            .with_details(details)
            .with_source("session_id_validator"),
    )
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SessionId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl From<i64> for SessionId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<i32> for SessionId {
    fn from(id: i32) -> Self {
        Self(id as i64)
    }
}

impl From<u32> for SessionId {
    fn from(id: u32) -> Self {
        Self(id as i64)
    }
}

/// Anything the client accepts as a session id. Conversion is where validation happens.
pub trait AsSessionId {
    fn as_session_id(&self) -> Result<SessionId>;
}

impl AsSessionId for SessionId {
    fn as_session_id(&self) -> Result<SessionId> {
        Ok(*self)
    }
}

impl AsSessionId for i64 {
    fn as_session_id(&self) -> Result<SessionId> {
        Ok(SessionId(*self))
    }
}

impl AsSessionId for i32 {
    fn as_session_id(&self) -> Result<SessionId> {
        Ok(SessionId::from(*self))
    }
}

impl AsSessionId for u32 {
    fn as_session_id(&self) -> Result<SessionId> {
        Ok(SessionId::from(*self))
    }
}

impl AsSessionId for u64 {
    fn as_session_id(&self) -> Result<SessionId> {
        i64::try_from(*self)
            .map(SessionId)
            .map_err(|_| invalid_session_id(format!("{} is out of range", self)))
    }
}

impl AsSessionId for str {
    fn as_session_id(&self) -> Result<SessionId> {
        SessionId::parse(self)
    }
}

impl AsSessionId for String {
    fn as_session_id(&self) -> Result<SessionId> {
        SessionId::parse(self)
    }
}

impl AsSessionId for serde_json::Value {
    fn as_session_id(&self) -> Result<SessionId> {
        SessionId::from_value(self)
    }
}

impl<T: AsSessionId + ?Sized> AsSessionId for &T {
    fn as_session_id(&self) -> Result<SessionId> {
        (**self).as_session_id()
    }
}
