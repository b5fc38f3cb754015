//! Integration tests for structured request logging
//!
//! Runs requests under a JSON subscriber writing to a buffer and checks the
//! emitted fields, including that user text stays out of logs unless content
//! logging is enabled.

mod common;

use axum::body::Body;
use axum::http::Request;
use build_advisor::config::AdvisorConfig;
use common::{create_test_app_with_config, zen4_requirements, ScriptedAgent};
use std::io::Write;
use std::sync::{Arc, Mutex};
use tower::Service;
use tracing_subscriber::fmt::MakeWriter;

#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl Captured {
    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl Write for Captured {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for Captured {
    type Writer = Captured;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

async fn run_extract(config: AdvisorConfig) -> String {
    let captured = Captured::default();
    let subscriber = tracing_subscriber::fmt()
        .json()
        .with_max_level(tracing::Level::INFO)
        .with_writer(captured.clone())
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let agent = ScriptedAgent::new(vec![Ok(zen4_requirements())]);
    let mut app = create_test_app_with_config(agent, config);
    let request = Request::builder()
        .uri("/extract?message=my+secret+build")
        .body(Body::empty())
        .unwrap();
    app.call(request).await.unwrap();

    captured.contents()
}

#[tokio::test(flavor = "current_thread")]
async fn test_log_lines_are_json_with_request_context() {
    let output = run_extract(AdvisorConfig::default()).await;

    let lines: Vec<serde_json::Value> = output
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    let finished = lines
        .iter()
        .find(|line| line["fields"]["message"] == "Extraction finished")
        .expect("extraction outcome logged");

    assert_eq!(finished["fields"]["status"], "success");
    assert_eq!(finished["span"]["path"], "/extract");
    assert_eq!(finished["span"]["request_id"].as_str().unwrap().len(), 36);
}

#[tokio::test(flavor = "current_thread")]
async fn test_user_text_not_logged_by_default() {
    let output = run_extract(AdvisorConfig::default()).await;
    assert!(!output.contains("my secret build"));
}

#[tokio::test(flavor = "current_thread")]
async fn test_content_logging_includes_truncated_preview() {
    let mut config = AdvisorConfig::default();
    config.logging.enable_content_logging = true;
    config.logging.content_log_max_chars = 9;

    let output = run_extract(config).await;

    assert!(output.contains("my secret..."));
    assert!(!output.contains("my secret build"));
}
