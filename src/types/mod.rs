//! # Types Module
//!
//! Strongly-typed representations of the values exchanged with the batch service.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`BatchState`] | Lifecycle state of a batch session |
//! | [`SessionId`] | Validated batch session identifier |
//! | [`LogPage`] | One page of the paginated batch log |
//! | [`SubmissionRequest`] | Typed parameters of a batch submission |
//!
//! ## Example
//!
//! ```rust
//! use livy_batch::types::{BatchState, SessionId};
//!
//! let state: BatchState = "running".parse().unwrap();
//! assert!(!state.is_terminal());
//!
//! let id = SessionId::parse("42").unwrap();
//! assert_eq!(id.get(), 42);
//! ```

pub mod log;
pub mod request;
pub mod session;
pub mod state;

pub use log::LogPage;
pub use request::{ConfValue, Numeric, Stringable, SubmissionRequest};
pub use session::{AsSessionId, SessionId};
pub use state::{BatchState, TERMINAL_STATES};
