//! Shared test utilities and mock infrastructure.

#![allow(dead_code, unused_imports)]

pub mod mock_api;

use deskboard::api::{Api, ClientSettings, RetryPolicy};
use std::net::TcpListener;
use std::path::PathBuf;
use std::time::Duration;
use tempfile::TempDir;

pub use mock_api::{CapturedRequest, MockApi, MockResponse};

/// Short timeout and backoff so retry tests finish quickly.
pub fn fast_settings(base_url: &str, max_retries: u32) -> ClientSettings {
    ClientSettings {
        base_url: base_url.to_string(),
        timeout: Duration::from_millis(200),
        retry: RetryPolicy::new(max_retries, Duration::from_millis(5)),
    }
}

pub fn api_for(mock: &MockApi) -> Api {
    Api::new(fast_settings(&mock.base_url(), 2)).expect("client builds")
}

/// Base URL of a port nothing listens on.
pub fn closed_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind to free port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{port}")
}

pub fn task_json(id: &str, title: &str, completed: bool, user_id: &str) -> String {
    serde_json::json!({
        "id": id,
        "title": title,
        "description": format!("{title} details"),
        "completed": completed,
        "startDate": "2024-03-01",
        "endDate": "2024-03-05",
        "assignedUserId": user_id,
    })
    .to_string()
}

pub fn user_json(id: &str, first: &str, last: &str) -> String {
    serde_json::json!({
        "id": id,
        "first_name": first,
        "last_name": last,
    })
    .to_string()
}

pub fn list(items: &[String]) -> String {
    format!("[{}]", items.join(","))
}

/// Writes `contents` to `config.toml` in a fresh temp dir.
pub fn temp_config(contents: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, contents).expect("Failed to write config");
    (temp_dir, config_path)
}
