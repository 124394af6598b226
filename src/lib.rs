//! # livy-batch
//!
//! Blocking client for the Apache Livy batch REST API.
//!
//! ## Overview
//!
//! The crate covers the lifecycle of a batch job on a Livy server: build and
//! validate a submission, submit it, poll its state, page through its log and
//! delete it. Every operation is a synchronous HTTP round-trip on the calling
//! thread; the client holds no mutable state and can be shared across threads.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use livy_batch::{LivyClient, SubmissionRequest, TracingLogSink};
//! use std::time::Duration;
//!
//! fn main() -> livy_batch::Result<()> {
//!     let client = LivyClient::builder()
//!         .base_url("http://localhost:8998")
//!         .header("X-Requested-By", "etl")
//!         .build()?;
//!
//!     let request = SubmissionRequest::new("hdfs:///jobs/pi.py")
//!         .args(["100"])
//!         .driver_memory("1g")
//!         .conf_entry("spark.dynamicAllocation.enabled", "false");
//!
//!     let id = client.submit_batch(&request)?;
//!     let state = client.poll_for_termination(id, Duration::from_secs(10), None)?;
//!     client.dump_batch_logs(id, &TracingLogSink)?;
//!     println!("batch {} finished as {}", id, state);
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`validation`] | Shape checks for submission parameters and session ids |
//! | [`payload`] | Submission payload construction |
//! | [`transport`] | Transport seam, default `reqwest` transport, retry policy |
//! | [`client`] | Batch operations, log paginator, termination poller |
//! | [`config`] | Connection configuration and registry |
//! | [`sink`] | Destinations for batch log lines |
//! | [`types`] | Batch state, session id, log page, submission request |

pub mod client;
pub mod config;
pub mod payload;
pub mod sink;
pub mod transport;
pub mod types;
pub mod validation;

// Re-export main types for convenience
pub use client::{LivyClient, LivyClientBuilder, LOG_PAGE_SIZE};
pub use config::{AuthConfig, ConnectionConfig, ConnectionRegistry, DEFAULT_CONNECTION_ID};
pub use payload::{build_submission_payload, SubmissionPayload};
pub use sink::{LogSink, MemoryLogSink, NoopLogSink, TracingLogSink};
pub use transport::{HttpMethod, HttpRequest, RawResponse, RetryPolicy, Transport};
pub use types::{BatchState, LogPage, SessionId, SubmissionRequest, TERMINAL_STATES};

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::{Error, ErrorContext};
