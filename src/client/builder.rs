use super::LivyClient;
use crate::config::{AuthConfig, ConnectionConfig};
use crate::transport::{header_map, HttpTransport, RetryPolicy, Transport, TransportAdapter};
use crate::{Error, Result};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Builder for creating clients with custom configuration.
///
/// Either a connection (base URL plus transport settings) or a ready-made
/// [`Transport`] is required.
pub struct LivyClientBuilder {
    connection: Option<ConnectionConfig>,
    transport: Option<Arc<dyn Transport>>,
    headers: BTreeMap<String, String>,
    auth: Option<AuthConfig>,
    timeout_secs: Option<u64>,
    retry: Option<RetryPolicy>,
}

impl LivyClientBuilder {
    pub fn new() -> Self {
        Self {
            connection: None,
            transport: None,
            headers: BTreeMap::new(),
            auth: None,
            timeout_secs: None,
            retry: None,
        }
    }

    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        self.connection = Some(match self.connection.take() {
            Some(mut config) => {
                config.base_url = base_url;
                config
            }
            None => ConnectionConfig::new(base_url),
        });
        self
    }

    /// Start from a resolved connection. Settings made on the builder win over it.
    pub fn connection(mut self, config: ConnectionConfig) -> Self {
        self.connection = Some(config);
        self
    }

    /// Inject the transport, e.g. a fake in tests. Connection transport settings are then unused.
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn auth(mut self, auth: AuthConfig) -> Self {
        self.auth = Some(auth);
        self
    }

    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    /// Default retry policy for state queries.
    pub fn retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = Some(retry);
        self
    }

    pub fn build(self) -> Result<LivyClient> {
        let mut config = self.connection;
        if let Some(config) = config.as_mut() {
            if let Some(auth) = self.auth {
                config.auth = Some(auth);
            }
            if let Some(secs) = self.timeout_secs {
                config.timeout_secs = secs;
            }
        }

        let transport: Arc<dyn Transport> = match (self.transport, config.as_ref()) {
            (Some(transport), _) => transport,
            (None, Some(config)) => Arc::new(HttpTransport::new(config)?),
            (None, None) => {
                return Err(Error::configuration(
                    "a base url, connection or transport must be provided",
                ))
            }
        };

        let mut extra_headers = match config.as_ref() {
            Some(config) => header_map(&config.headers)?,
            None => Default::default(),
        };
        for (name, value) in header_map(&self.headers)? {
            if let Some(name) = name {
                extra_headers.insert(name, value);
            }
        }

        let default_retry = self.retry.or_else(|| config.and_then(|c| c.retry));

        Ok(LivyClient {
            adapter: TransportAdapter::new(transport),
            extra_headers,
            default_retry,
        })
    }
}

impl Default for LivyClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
