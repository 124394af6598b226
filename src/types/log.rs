//! Paginated batch log page

use serde::{Deserialize, Serialize};

/// One page returned by `GET /batches/{id}/log`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogPage {
    /// Total number of log lines the service currently holds for the batch.
    pub total: u64,
    #[serde(rename = "log")]
    pub lines: Vec<String>,
}

impl LogPage {
    pub fn new(total: u64, lines: Vec<String>) -> Self {
        Self { total, lines }
    }
}
