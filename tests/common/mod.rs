//! Shared fixtures: a mock Livy server and a scripted in-process transport.

#![allow(dead_code)]

use livy_batch::{HttpRequest, LivyClient, RawResponse, Result, Transport};
use mockito::{Matcher, Mock, Server, ServerGuard};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Test fixture that manages a mock server
pub struct MockServerFixture {
    pub server: ServerGuard,
    pub base_url: String,
}

impl MockServerFixture {
    pub fn new() -> Self {
        let server = Server::new();
        let base_url = server.url();
        Self { server, base_url }
    }

    /// Client pointed at the mock server, sending an `X-Requested-By` header.
    pub fn client(&self) -> LivyClient {
        LivyClient::builder()
            .base_url(&self.base_url)
            .header("X-Requested-By", "livy-batch-tests")
            .build()
            .expect("Failed to build client")
    }

    /// Create a mock answering `method path` with a JSON body
    pub fn mock_json(&mut self, method: &str, path: &str, status: usize, body: &str) -> Mock {
        self.server
            .mock(method, path)
            .with_status(status)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create()
    }

    /// Create a mock for one log page, matched on its `from`/`size` query.
    pub fn mock_log_page(&mut self, id: i64, from: u64, total: u64, lines: &[String]) -> Mock {
        let body = serde_json::json!({
            "id": id,
            "from": from,
            "total": total,
            "log": lines,
        });
        self.server
            .mock("GET", log_path(id))
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("from".into(), from.to_string()),
                Matcher::UrlEncoded("size".into(), "100".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .expect(1)
            .create()
    }
}

/// Path matcher for a batch log endpoint, tolerant of the query string.
pub fn log_path(id: i64) -> Matcher {
    Matcher::Regex(format!(r"^/batches/{}/log(\?.*)?$", id))
}

pub fn numbered_lines(range: std::ops::Range<u64>) -> Vec<String> {
    range.map(|i| format!("line {}", i)).collect()
}

/// In-process transport replaying canned responses and recording requests.
pub struct ScriptedTransport {
    responses: Mutex<VecDeque<RawResponse>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl ScriptedTransport {
    pub fn new(responses: Vec<RawResponse>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.into()),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn client(self: &Arc<Self>) -> LivyClient {
        LivyClient::builder()
            .transport(self.clone())
            .build()
            .expect("Failed to build client")
    }
}

impl Transport for ScriptedTransport {
    fn send(&self, request: &HttpRequest) -> Result<RawResponse> {
        self.requests.lock().unwrap().push(request.clone());
        Ok(self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| RawResponse::new(500, "no scripted response left")))
    }

    fn base_url(&self) -> &str {
        "http://scripted.livy"
    }
}
