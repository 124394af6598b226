//! `/batches` operations

use super::LivyClient;
use crate::payload::build_submission_payload;
use crate::transport::{HttpMethod, HttpRequest, RawResponse, RetryPolicy};
use crate::types::{AsSessionId, BatchState, LogPage, SessionId, SubmissionRequest};
use crate::{Error, Result};
use serde_json::Value;
use tracing::{debug, info, warn};

const BATCHES_ENDPOINT: &str = "/batches";

impl LivyClient {
    fn send(
        &self,
        method: HttpMethod,
        endpoint: String,
        build: impl FnOnce(HttpRequest) -> HttpRequest,
        retry: Option<&RetryPolicy>,
    ) -> Result<RawResponse> {
        let request =
            build(HttpRequest::new(method, endpoint)).with_headers(&self.extra_headers);
        self.adapter.execute(request, retry)
    }

    /// Submit a batch and return the session id the service assigned.
    pub fn submit_batch(&self, request: &SubmissionRequest) -> Result<SessionId> {
        let body = build_submission_payload(request)?.to_json()?;
        info!("Submitting job {} to {}", body, self.base_url());

        let response = self.send(
            HttpMethod::Post,
            BATCHES_ENDPOINT.to_string(),
            |r| r.with_body(body),
            None,
        )?;
        debug!("Got response: {}", response.body);

        if response.is_error() {
            return Err(Error::Submission {
                status: Some(response.status),
                message: format!(
                    "Could not submit batch. Status code: {}. Message: '{}'",
                    response.status, response.body
                ),
            });
        }

        let session_id = response
            .json()
            .ok()
            .and_then(|json| json.get("id").and_then(|id| SessionId::from_value(id).ok()))
            .ok_or_else(|| Error::Submission {
                status: Some(response.status),
                message: "Unable to parse the batch session id".to_string(),
            })?;
        info!("Batch submitted with session id: {}", session_id);

        Ok(session_id)
    }

    /// Fetch the full description of a batch.
    pub fn get_batch(&self, session_id: impl AsSessionId) -> Result<Value> {
        let id = session_id.as_session_id()?;
        debug!("Fetching info for batch session {}", id);

        let response = self.send(
            HttpMethod::Get,
            format!("{}/{}", BATCHES_ENDPOINT, id),
            |r| r,
            None,
        )?;
        if response.is_error() {
            warn!("Got status code {} for session {}", response.status, id);
            return Err(Error::Fetch {
                session_id: id,
                status: Some(response.status),
                message: format!(
                    "Unable to fetch batch with id: {}. Message: {}",
                    id, response.body
                ),
            });
        }

        response.json().map_err(|e| Error::Fetch {
            session_id: id,
            status: Some(response.status),
            message: format!(
                "Unable to fetch batch with id: {}. Malformed response: {}",
                id, e
            ),
        })
    }

    /// Fetch the current state of a batch.
    ///
    /// `retry` falls back to the connection's default policy when `None`.
    pub fn get_batch_state(
        &self,
        session_id: impl AsSessionId,
        retry: Option<&RetryPolicy>,
    ) -> Result<BatchState> {
        let id = session_id.as_session_id()?;
        debug!("Fetching state for batch session {}", id);

        let retry = retry.or(self.default_retry.as_ref());
        let response = self.send(
            HttpMethod::Get,
            format!("{}/{}/state", BATCHES_ENDPOINT, id),
            |r| r,
            retry,
        )?;
        if response.is_error() {
            warn!("Got status code {} for session {}", response.status, id);
            return Err(Error::Fetch {
                session_id: id,
                status: Some(response.status),
                message: format!(
                    "Unable to fetch batch with id: {}. Message: {}",
                    id, response.body
                ),
            });
        }

        let state = response
            .json()
            .ok()
            .and_then(|json| json.get("state").cloned())
            .ok_or_else(|| Error::Fetch {
                session_id: id,
                status: Some(response.status),
                message: format!("Unable to get state for batch with id: {}", id),
            })?;

        match state {
            Value::String(s) => s.parse(),
            other => other.to_string().parse(),
        }
    }

    /// Kill and remove a batch.
    pub fn delete_batch(&self, session_id: impl AsSessionId) -> Result<Value> {
        let id = session_id.as_session_id()?;
        info!("Deleting batch session {}", id);

        let response = self.send(
            HttpMethod::Delete,
            format!("{}/{}", BATCHES_ENDPOINT, id),
            |r| r,
            None,
        )?;
        if response.is_error() {
            warn!("Got status code {} for session {}", response.status, id);
            return Err(Error::Deletion {
                session_id: id,
                status: Some(response.status),
                message: format!(
                    "Could not kill the batch with session id: {}. Message: {}",
                    id, response.body
                ),
            });
        }

        response.json().map_err(|e| Error::Deletion {
            session_id: id,
            status: Some(response.status),
            message: format!(
                "Could not kill the batch with session id: {}. Malformed response: {}",
                id, e
            ),
        })
    }

    /// Fetch `page_size` log lines starting at `start_line`.
    pub fn get_batch_logs(
        &self,
        session_id: impl AsSessionId,
        start_line: u64,
        page_size: u64,
    ) -> Result<LogPage> {
        let id = session_id.as_session_id()?;

        let response = self.send(
            HttpMethod::Get,
            format!("{}/{}/log", BATCHES_ENDPOINT, id),
            |r| r.with_query("from", start_line).with_query("size", page_size),
            None,
        )?;
        if response.is_error() {
            warn!("Got status code {} for session {}", response.status, id);
            return Err(Error::LogFetch {
                session_id: id,
                status: Some(response.status),
                message: format!(
                    "Could not fetch the logs for batch with session id: {}. Message: {}",
                    id, response.body
                ),
            });
        }

        serde_json::from_str::<LogPage>(&response.body).map_err(|e| Error::LogFetch {
            session_id: id,
            status: Some(response.status),
            message: format!(
                "Could not fetch the logs for batch with session id: {}. Malformed log page: {}",
                id, e
            ),
        })
    }
}
