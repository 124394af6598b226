//! Batch session states

use crate::{Error, ErrorContext, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle state reported by `GET /batches/{id}/state`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchState {
    NotStarted,
    Starting,
    Running,
    Idle,
    Busy,
    ShuttingDown,
    Error,
    Dead,
    Killed,
    Success,
}

/// States a batch never leaves once reached.
pub const TERMINAL_STATES: [BatchState; 4] = [
    BatchState::Success,
    BatchState::Dead,
    BatchState::Killed,
    BatchState::Error,
];

impl BatchState {
    pub const ALL: [BatchState; 10] = [
        BatchState::NotStarted,
        BatchState::Starting,
        BatchState::Running,
        BatchState::Idle,
        BatchState::Busy,
        BatchState::ShuttingDown,
        BatchState::Error,
        BatchState::Dead,
        BatchState::Killed,
        BatchState::Success,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BatchState::NotStarted => "not_started",
            BatchState::Starting => "starting",
            BatchState::Running => "running",
            BatchState::Idle => "idle",
            BatchState::Busy => "busy",
            BatchState::ShuttingDown => "shutting_down",
            BatchState::Error => "error",
            BatchState::Dead => "dead",
            BatchState::Killed => "killed",
            BatchState::Success => "success",
        }
    }

    pub fn is_terminal(&self) -> bool {
        TERMINAL_STATES.contains(self)
    }
}

impl FromStr for BatchState {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        BatchState::ALL
            .iter()
            .copied()
            .find(|state| state.as_str() == s)
            .ok_or_else(|| {
                Error::invalid_argument_with_context(
                    format!("'{}' is not a valid batch state", s),
                    ErrorContext::new()
                        .with_field_path("state")
                        .with_source("batch_state"),
                )
            })
    }
}

impl fmt::Display for BatchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_every_known_state() {
        for state in BatchState::ALL {
            assert_eq!(state.as_str().parse::<BatchState>().unwrap(), state);
        }
    }

    #[test]
    fn test_unknown_state_is_rejected() {
        let err = "bogus".parse::<BatchState>().unwrap_err();
        assert!(err.is_invalid_argument());
        assert!(err.to_string().contains("'bogus'"));
        // Parsing is case-sensitive, matching the wire values exactly.
        assert!("RUNNING".parse::<BatchState>().is_err());
    }

    #[test]
    fn test_terminal_states() {
        let terminal: Vec<_> = BatchState::ALL.iter().filter(|s| s.is_terminal()).collect();
        assert_eq!(terminal.len(), 4);
        assert!(BatchState::Success.is_terminal());
        assert!(BatchState::Dead.is_terminal());
        assert!(BatchState::Killed.is_terminal());
        assert!(BatchState::Error.is_terminal());
        assert!(!BatchState::ShuttingDown.is_terminal());
        assert!(!BatchState::NotStarted.is_terminal());
    }

    #[test]
    fn test_serde_uses_wire_names() {
        let json = serde_json::to_string(&BatchState::ShuttingDown).unwrap();
        assert_eq!(json, "\"shutting_down\"");
        let state: BatchState = serde_json::from_str("\"not_started\"").unwrap();
        assert_eq!(state, BatchState::NotStarted);
    }
}
