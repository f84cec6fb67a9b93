//! Router construction and server lifecycle.

use crate::config::{ServerSettings, Settings};
use crate::handlers::{
    chat::{chat_message_handler, chat_page, reset_chat},
    health::{health_check, readiness_check},
    lookup::{index, lookup_handler},
    metrics::metrics,
};
use crate::middleware::http_metrics_middleware;
use crate::services::AiClient;
use crate::AppState;
use axum::{middleware::from_fn, routing::get, Router};
use service_core::error::AppError;
use service_core::middleware::{
    security_headers_middleware, request_id_middleware, REQUEST_ID_HEADER,
};
use time::Duration;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::trace::TraceLayer;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

pub fn build_router(state: AppState, server: &ServerSettings) -> Router {
    // Chat history lives in server-side sessions
    let session_store = MemoryStore::default();
    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(server.secure_cookies)
        .with_expiry(Expiry::OnInactivity(Duration::hours(
            server.session_expiry_hours,
        )));

    Router::new()
        .route("/", get(index).post(lookup_handler))
        .route("/chat", get(chat_page).post(chat_message_handler))
        .route("/reset_chat", get(reset_chat))
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check))
        .route("/metrics", get(metrics))
        .route_layer(from_fn(http_metrics_middleware))
        .layer(session_layer)
        .layer(from_fn(security_headers_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get(REQUEST_ID_HEADER)
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                    version = ?request.version(),
                )
            }),
        )
        // Outermost, so the span above already sees the request id
        .layer(from_fn(request_id_middleware))
        .with_state(state)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Build the application, creating the Gemini client from configuration.
    pub async fn build(settings: Settings) -> Result<Self, AppError> {
        let ai = AiClient::from_settings(&settings.gemini);
        Self::build_with_client(&settings.server, ai).await
    }

    /// Build the application around an existing client (tests inject mocks here).
    pub async fn build_with_client(server: &ServerSettings, ai: AiClient) -> Result<Self, AppError> {
        if !ai.is_available() {
            tracing::warn!("Starting without a language model client; lookups and chat are degraded");
        }

        let router = build_router(AppState::new(ai), server);

        // Port 0 = random port for testing
        let address = format!("{}:{}", server.host, server.port);
        let listener = TcpListener::bind(&address).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", address, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("fishgpt-web listening on {}:{}", server.host, port);

        Ok(Self {
            port,
            listener,
            router,
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Run the application until a shutdown signal arrives.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| {
                tracing::error!("HTTP server error: {}", e);
                e
            })
    }
}
