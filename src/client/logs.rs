use super::LivyClient;
use crate::sink::LogSink;
use crate::types::AsSessionId;
use crate::Result;
use tracing::info;

/// Lines requested per page when dumping a batch log.
pub const LOG_PAGE_SIZE: u64 = 100;

impl LivyClient {
    /// Forward the whole batch log, page by page, to `sink`.
    ///
    /// The loop runs while the next start line is `<=` the `total` reported
    /// by the latest page, so a batch with no log lines still costs one request.
    pub fn dump_batch_logs(&self, session_id: impl AsSessionId, sink: &dyn LogSink) -> Result<()> {
        let id = session_id.as_session_id()?;
        info!("Fetching the logs for batch session with id: {}", id);

        let mut start_line = 0u64;
        let mut total_lines = 0u64;
        while start_line <= total_lines {
            let page = self.get_batch_logs(id, start_line, LOG_PAGE_SIZE)?;
            total_lines = page.total;
            start_line += LOG_PAGE_SIZE;
            for line in &page.lines {
                sink.write_line(line);
            }
        }
        Ok(())
    }
}
