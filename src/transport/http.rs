use super::{HttpRequest, RawResponse, Transport, TransportError};
use crate::config::{AuthConfig, ConnectionConfig};
use crate::{Error, ErrorContext, Result};
use std::env;
use std::time::Duration;
use tracing::debug;

/// Overrides the connection's request timeout, in seconds.
pub const TIMEOUT_ENV: &str = "LIVY_HTTP_TIMEOUT_SECS";

/// A parseable override wins over the connection's own setting.
fn effective_timeout_secs(override_secs: Option<&str>, configured: u64) -> u64 {
    override_secs
        .and_then(|s| s.trim().parse::<u64>().ok())
        .unwrap_or(configured)
}

/// Blocking `reqwest` transport bound to one service base URL.
#[derive(Debug)]
pub struct HttpTransport {
    client: reqwest::blocking::Client,
    base_url: String,
    auth: Option<AuthConfig>,
    timeout: Duration,
}

impl HttpTransport {
    pub fn new(config: &ConnectionConfig) -> Result<Self> {
        let base_url = config.base_url.trim_end_matches('/').to_string();
        url::Url::parse(&base_url).map_err(|e| {
            Error::configuration_with_context(
                format!("invalid base url '{}': {}", config.base_url, e),
                ErrorContext::new()
                    .with_field_path("base_url")
                    .with_source("http_transport"),
            )
        })?;

        let timeout_secs = effective_timeout_secs(
            env::var(TIMEOUT_ENV).ok().as_deref(),
            config.timeout_secs,
        );

        let timeout = Duration::from_secs(timeout_secs);
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .pool_idle_timeout(Some(Duration::from_secs(90)))
            .build()
            .map_err(|e| Error::Transport(TransportError::Other(e.to_string())))?;

        Ok(Self {
            client,
            base_url,
            auth: config.auth.clone(),
            timeout,
        })
    }

    /// Per-request timeout in effect.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl Transport for HttpTransport {
    fn send(&self, request: &HttpRequest) -> Result<RawResponse> {
        let url = format!("{}{}", self.base_url, request.endpoint);
        debug!("{} {}", request.method, url);

        let mut builder = self
            .client
            .request(request.method.into(), &url)
            .headers(request.headers.clone());

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }
        builder = match &self.auth {
            Some(AuthConfig::Basic { username, password }) => {
                builder.basic_auth(username, password.as_ref())
            }
            Some(AuthConfig::Bearer { token }) => builder.bearer_auth(token),
            None => builder,
        };

        let response = builder
            .send()
            .map_err(|e| Error::Transport(TransportError::Http(e)))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .map_err(|e| Error::Transport(TransportError::Http(e)))?;

        Ok(RawResponse { status, body })
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_override() {
        assert_eq!(effective_timeout_secs(None, 30), 30);
        assert_eq!(effective_timeout_secs(Some("5"), 30), 5);
        assert_eq!(effective_timeout_secs(Some(" 120 "), 30), 120);
        assert_eq!(effective_timeout_secs(Some("soon"), 30), 30);
        assert_eq!(effective_timeout_secs(Some(""), 30), 30);
    }

    #[test]
    fn test_invalid_base_url() {
        let err = HttpTransport::new(&ConnectionConfig::new("livy.internal")).unwrap_err();
        assert!(matches!(err, Error::Configuration { .. }));
        assert_eq!(
            err.context().and_then(|c| c.field_path.as_deref()),
            Some("base_url")
        );
    }
}
