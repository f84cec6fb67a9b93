pub mod config;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod startup;

use services::AiClient;

/// Shared application state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    /// Process-wide language model handle; may be unavailable.
    pub ai: AiClient,
}

impl AppState {
    pub fn new(ai: AiClient) -> Self {
        Self { ai }
    }
}
