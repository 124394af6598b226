//! Batch lifecycle client.
//!
//! [`LivyClient`] maps the `/batches` REST resource onto typed operations:
//! submit, fetch, state, delete, log pages, plus the log paginator and a
//! termination poller built on top of them.

mod batch;
pub mod builder;
mod logs;
mod poll;

pub use builder::LivyClientBuilder;
pub use logs::LOG_PAGE_SIZE;

use crate::config::{ConnectionConfig, ConnectionRegistry};
use crate::transport::{RetryPolicy, TransportAdapter};
use crate::Result;
use reqwest::header::HeaderMap;

/// Client for one Livy server.
///
/// Holds no mutable state: share it behind an `Arc` to poll several
/// sessions from several threads.
#[derive(Clone)]
pub struct LivyClient {
    adapter: TransportAdapter,
    extra_headers: HeaderMap,
    default_retry: Option<RetryPolicy>,
}

impl LivyClient {
    pub fn builder() -> LivyClientBuilder {
        LivyClientBuilder::new()
    }

    /// Client for `base_url` with default settings.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        LivyClientBuilder::new().base_url(base_url).build()
    }

    pub fn from_config(config: ConnectionConfig) -> Result<Self> {
        LivyClientBuilder::new().connection(config).build()
    }

    /// Resolve `connection_id` through `LIVY_CONN_<ID>` or `LIVY_CONNECTIONS_FILE`.
    pub fn from_connection(connection_id: &str) -> Result<Self> {
        let config = ConnectionRegistry::from_env()?.resolve(connection_id)?;
        Self::from_config(config)
    }

    pub fn base_url(&self) -> &str {
        self.adapter.base_url()
    }

    /// Headers sent with every request, above the JSON defaults.
    pub fn extra_headers(&self) -> &HeaderMap {
        &self.extra_headers
    }

    pub fn default_retry(&self) -> Option<&RetryPolicy> {
        self.default_retry.as_ref()
    }
}
