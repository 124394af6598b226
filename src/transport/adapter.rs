use super::{HttpRequest, RawResponse, RetryPolicy, Transport};
use crate::{Error, Result};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use std::sync::Arc;
use std::thread;
use tracing::warn;

/// Executes requests on an injected [`Transport`].
///
/// The method travels with each [`HttpRequest`], so the adapter holds no
/// mutable state and can be shared between threads.
#[derive(Clone)]
pub struct TransportAdapter {
    transport: Arc<dyn Transport>,
}

impl TransportAdapter {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    pub fn base_url(&self) -> &str {
        self.transport.base_url()
    }

    /// Send `request` with JSON default headers beneath its own headers.
    ///
    /// With a retry policy, transient outcomes are retried after a backoff
    /// until the attempt budget runs out; the last outcome is returned either way.
    pub fn execute(
        &self,
        request: HttpRequest,
        retry: Option<&RetryPolicy>,
    ) -> Result<RawResponse> {
        let request = with_default_headers(request);

        let max_attempts = retry.map(|p| p.max_attempts.max(1)).unwrap_or(1);
        let mut attempt = 0u32;
        loop {
            let outcome = self.transport.send(&request);
            attempt += 1;

            let policy = match retry {
                Some(policy) if attempt < max_attempts => policy,
                _ => return outcome,
            };
            let transient = match &outcome {
                Ok(response) => policy.retries_status(response.status),
                Err(Error::Transport(_)) => policy.retry_on_transport_error,
                Err(_) => false,
            };
            if !transient {
                return outcome;
            }

            let delay = policy.backoff(attempt - 1);
            match &outcome {
                Ok(response) => warn!(
                    "{} {} returned status {}, retrying in {:?} (attempt {}/{})",
                    request.method, request.endpoint, response.status, delay, attempt, max_attempts
                ),
                Err(e) => warn!(
                    "{} {} failed: {}, retrying in {:?} (attempt {}/{})",
                    request.method, request.endpoint, e, delay, attempt, max_attempts
                ),
            }
            thread::sleep(delay);
        }
    }
}

fn with_default_headers(mut request: HttpRequest) -> HttpRequest {
    let mut headers = HeaderMap::with_capacity(request.headers.len() + 2);
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    for (name, value) in &request.headers {
        headers.insert(name.clone(), value.clone());
    }
    request.headers = headers;
    request
}
