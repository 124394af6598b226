use crate::transport::TransportError;
use crate::types::SessionId;
use thiserror::Error;

/// Structured error context for caller-input and configuration errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorContext {
    /// Field path or configuration key that caused the error (e.g., "driverMemory", "conf.k")
    pub field_path: Option<String>,
    /// Additional context about the error (e.g., expected shape, actual value)
    pub details: Option<String>,
    /// Source of the error (e.g., "size_validator", "connection_registry")
    pub source: Option<String>,
}

impl ErrorContext {
    pub fn new() -> Self {
        Self {
            field_path: None,
            details: None,
            source: None,
        }
    }

    pub fn with_field_path(mut self, path: impl Into<String>) -> Self {
        self.field_path = Some(path.into());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Unified error type for the batch client.
///
/// `InvalidArgument` is always raised locally before any request is sent.
/// The four remote variants map one-to-one onto the batch operations and
/// carry the HTTP status when the service answered at all.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid argument: {message}{}", format_context(.context))]
    InvalidArgument {
        message: String,
        context: ErrorContext,
    },

    #[error("Configuration error: {message}{}", format_context(.context))]
    Configuration {
        message: String,
        context: ErrorContext,
    },

    #[error("{message}")]
    Submission {
        status: Option<u16>,
        message: String,
    },

    #[error("{message}")]
    Fetch {
        session_id: SessionId,
        status: Option<u16>,
        message: String,
    },

    #[error("{message}")]
    Deletion {
        session_id: SessionId,
        status: Option<u16>,
        message: String,
    },

    #[error("{message}")]
    LogFetch {
        session_id: SessionId,
        status: Option<u16>,
        message: String,
    },

    #[error("Network transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

// Helper function to format error context for display
fn format_context(ctx: &ErrorContext) -> String {
    let mut parts = Vec::new();
    if let Some(ref field) = ctx.field_path {
        parts.push(format!("field: {}", field));
    }
    if let Some(ref details) = ctx.details {
        parts.push(format!("details: {}", details));
    }
    if let Some(ref source) = ctx.source {
        parts.push(format!("source: {}", source));
    }
    if parts.is_empty() {
        String::new()
    } else {
        format!(" ({})", parts.join(", "))
    }
}

impl Error {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Error::InvalidArgument {
            message: msg.into(),
            context: ErrorContext::new(),
        }
    }

    /// Create a new invalid-argument error with structured context
    pub fn invalid_argument_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::InvalidArgument {
            message: msg.into(),
            context,
        }
    }

    pub fn configuration(msg: impl Into<String>) -> Self {
        Error::Configuration {
            message: msg.into(),
            context: ErrorContext::new(),
        }
    }

    /// Create a new configuration error with structured context
    pub fn configuration_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Configuration {
            message: msg.into(),
            context,
        }
    }

    /// Extract error context if available
    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            Error::InvalidArgument { context, .. } | Error::Configuration { context, .. } => {
                Some(context)
            }
            _ => None,
        }
    }

    /// HTTP status reported by the service, for remote errors that got a response.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Submission { status, .. }
            | Error::Fetch { status, .. }
            | Error::Deletion { status, .. }
            | Error::LogFetch { status, .. } => *status,
            _ => None,
        }
    }

    /// Session the failed operation targeted, if any.
    pub fn session_id(&self) -> Option<SessionId> {
        match self {
            Error::Fetch { session_id, .. }
            | Error::Deletion { session_id, .. }
            | Error::LogFetch { session_id, .. } => Some(*session_id),
            _ => None,
        }
    }

    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Error::InvalidArgument { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_is_rendered_in_message() {
        let err = Error::invalid_argument_with_context(
            "Invalid java size format for string '12x'",
            ErrorContext::new()
                .with_field_path("request.driverMemory")
                .with_source("size_validator"),
        );
        assert_eq!(
            err.to_string(),
            "Invalid argument: Invalid java size format for string '12x' (field: request.driverMemory, source: size_validator)"
        );
        assert!(err.is_invalid_argument());
        assert!(err.context().is_some());
    }

    #[test]
    fn test_remote_errors_expose_status_and_session() {
        let err = Error::Deletion {
            session_id: SessionId::new(7),
            status: Some(404),
            message: "Could not kill the batch with session id: 7. Message: missing".into(),
        };
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.session_id(), Some(SessionId::new(7)));
        assert!(err.to_string().contains("Message: missing"));
        assert!(err.context().is_none());
    }
}
