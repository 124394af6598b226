use super::LivyClient;
use crate::transport::RetryPolicy;
use crate::types::{AsSessionId, BatchState};
use crate::Result;
use std::thread;
use std::time::Duration;
use tracing::{debug, info};

impl LivyClient {
    /// Block until the batch reaches a terminal state and return it.
    ///
    /// Each poll is a [`get_batch_state`](LivyClient::get_batch_state) call;
    /// the first error ends the wait.
    pub fn poll_for_termination(
        &self,
        session_id: impl AsSessionId,
        interval: Duration,
        retry: Option<&RetryPolicy>,
    ) -> Result<BatchState> {
        let id = session_id.as_session_id()?;
        let mut state = self.get_batch_state(id, retry)?;
        while !state.is_terminal() {
            debug!("Batch session {} is in state {}, sleeping for {:?}", id, state, interval);
            thread::sleep(interval);
            state = self.get_batch_state(id, retry)?;
        }
        info!("Batch session {} reached terminal state {}", id, state);
        Ok(state)
    }
}
