//! Integration tests that run the real server on a random port.

use fishgpt_web::config::ServerSettings;
use fishgpt_web::services::metrics::init_metrics;
use fishgpt_web::services::providers::mock::MockProvider;
use fishgpt_web::services::AiClient;
use fishgpt_web::startup::Application;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;

/// Spawn the application on a random port and return the port number.
async fn spawn_app(ai: AiClient) -> u16 {
    let server = ServerSettings {
        host: "127.0.0.1".to_string(),
        port: 0, // Random port
        session_expiry_hours: 1,
        secure_cookies: false,
    };

    let app = Application::build_with_client(&server, ai)
        .await
        .expect("Failed to build application");

    let port = app.port();

    // Spawn the server in the background
    tokio::spawn(async move {
        let _ = app.run_until_stopped().await;
    });

    port
}

#[tokio::test]
async fn health_check_reports_available_assistant() {
    let port = spawn_app(AiClient::new(Arc::new(MockProvider::echo()))).await;

    let response = Client::new()
        .get(format!("http://127.0.0.1:{}/health", port))
        .timeout(Duration::from_secs(5))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    assert!(response.headers().contains_key("x-request-id"));

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "fishgpt-web");
    assert_eq!(body["assistant"], "available");
}

#[tokio::test]
async fn degraded_mode_is_healthy_and_ready() {
    let port = spawn_app(AiClient::unavailable()).await;
    let client = Client::new();

    let health: serde_json::Value = client
        .get(format!("http://127.0.0.1:{}/health", port))
        .timeout(Duration::from_secs(5))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse JSON");
    assert_eq!(health["assistant"], "degraded");

    let ready = client
        .get(format!("http://127.0.0.1:{}/ready", port))
        .timeout(Duration::from_secs(5))
        .send()
        .await
        .expect("Failed to send request");
    assert!(ready.status().is_success());
}

#[tokio::test]
async fn metrics_endpoint_exports_request_counters() {
    init_metrics().expect("Failed to initialize metrics");
    let port = spawn_app(AiClient::new(Arc::new(MockProvider::echo()))).await;
    let client = Client::new();

    client
        .get(format!("http://127.0.0.1:{}/", port))
        .timeout(Duration::from_secs(5))
        .send()
        .await
        .expect("Failed to send request");

    let text = client
        .get(format!("http://127.0.0.1:{}/metrics", port))
        .timeout(Duration::from_secs(5))
        .send()
        .await
        .expect("Failed to send request")
        .text()
        .await
        .expect("Failed to read body");

    assert!(text.contains("http_requests_total"));
}

#[tokio::test]
async fn pages_carry_security_headers() {
    let port = spawn_app(AiClient::unavailable()).await;

    let response = Client::new()
        .get(format!("http://127.0.0.1:{}/chat", port))
        .timeout(Duration::from_secs(5))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    assert_eq!(response.headers()["x-content-type-options"], "nosniff");
    assert!(response.headers().contains_key("content-security-policy"));
}
