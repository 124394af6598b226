//! Paginated log retrieval.

mod common;

use common::{log_path, numbered_lines, MockServerFixture, ScriptedTransport};
use livy_batch::{Error, HttpMethod, MemoryLogSink, RawResponse};
use serde_json::json;

#[test]
fn test_dump_batch_logs_fetches_every_page() {
    let mut fixture = MockServerFixture::new();
    let pages = [
        fixture.mock_log_page(9, 0, 250, &numbered_lines(0..100)),
        fixture.mock_log_page(9, 100, 250, &numbered_lines(100..200)),
        fixture.mock_log_page(9, 200, 250, &numbered_lines(200..250)),
    ];

    let sink = MemoryLogSink::new();
    fixture.client().dump_batch_logs(9, &sink).unwrap();

    for page in &pages {
        page.assert();
    }
    assert_eq!(sink.lines(), numbered_lines(0..250));
}

#[test]
fn test_dump_batch_logs_with_empty_log_fetches_one_page() {
    let mut fixture = MockServerFixture::new();
    let first = fixture.mock_log_page(4, 0, 0, &[]);
    let second = fixture
        .server
        .mock("GET", log_path(4))
        .match_query(mockito::Matcher::UrlEncoded("from".into(), "100".into()))
        .expect(0)
        .create();

    let sink = MemoryLogSink::new();
    fixture.client().dump_batch_logs(4, &sink).unwrap();

    first.assert();
    second.assert();
    assert!(sink.is_empty());
}

#[test]
fn test_get_batch_logs_returns_page() {
    let mut fixture = MockServerFixture::new();
    let _mock = fixture.mock_log_page(2, 100, 120, &numbered_lines(100..120));

    let page = fixture.client().get_batch_logs(2, 100, 100).unwrap();
    assert_eq!(page.total, 120);
    assert_eq!(page.lines.len(), 20);
    assert_eq!(page.lines[0], "line 100");
}

#[test]
fn test_get_batch_logs_http_error() {
    let mut fixture = MockServerFixture::new();
    let _mock = fixture
        .server
        .mock("GET", log_path(2))
        .with_status(404)
        .with_body("Session '2' not found.")
        .create();

    let err = fixture.client().get_batch_logs(2, 0, 100).unwrap_err();
    assert!(matches!(err, Error::LogFetch { status: Some(404), .. }));
    assert!(err
        .to_string()
        .starts_with("Could not fetch the logs for batch with session id: 2."));
}

#[test]
fn test_dump_batch_logs_propagates_page_errors() {
    let transport = ScriptedTransport::new(vec![
        RawResponse::new(200, json!({"total": 150, "log": numbered_lines(0..100)}).to_string()),
        RawResponse::new(500, "internal error"),
    ]);
    let sink = MemoryLogSink::new();

    let err = transport.client().dump_batch_logs(1, &sink).unwrap_err();

    assert!(matches!(err, Error::LogFetch { status: Some(500), .. }));
    assert_eq!(sink.len(), 100);
}

#[test]
fn test_dump_batch_logs_follows_latest_total() {
    // The second page reports a smaller total, which ends the loop early.
    let transport = ScriptedTransport::new(vec![
        RawResponse::new(200, json!({"total": 350, "log": numbered_lines(0..100)}).to_string()),
        RawResponse::new(200, json!({"total": 150, "log": numbered_lines(100..150)}).to_string()),
    ]);
    let sink = MemoryLogSink::new();

    transport.client().dump_batch_logs(8, &sink).unwrap();

    let requests = transport.requests();
    assert_eq!(requests.len(), 2);
    for (request, from) in requests.iter().zip(["0", "100"]) {
        assert_eq!(request.method, HttpMethod::Get);
        assert_eq!(request.endpoint, "/batches/8/log");
        assert_eq!(
            request.query,
            vec![
                ("from".to_string(), from.to_string()),
                ("size".to_string(), "100".to_string())
            ]
        );
    }
    assert_eq!(sink.lines(), numbered_lines(0..150));
}

#[test]
fn test_malformed_log_page() {
    let transport = ScriptedTransport::new(vec![RawResponse::new(200, r#"{"log": ["a"]}"#)]);
    let err = transport.client().get_batch_logs(1, 0, 100).unwrap_err();
    assert!(matches!(err, Error::LogFetch { .. }));
    assert!(err.to_string().contains("Malformed log page"));
}
