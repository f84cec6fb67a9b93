//! Language model provider abstractions and implementations.
//!
//! The assistant talks to a stateless text-generation backend: every call
//! carries an optional system instruction plus the full conversation so far.
//! Gemini is the production backend; the mock backs the tests.

pub mod gemini;
pub mod mock;

use crate::models::chat::Role;
use async_trait::async_trait;
use thiserror::Error;

/// Error type for provider operations.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Rate limited")]
    RateLimited,

    #[error("Content filtered")]
    ContentFiltered,

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Empty response from model")]
    EmptyResponse,
}

impl ProviderError {
    /// Short label used for metrics and structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            ProviderError::NotConfigured(_) => "not_configured",
            ProviderError::ApiError(_) => "api_error",
            ProviderError::RateLimited => "rate_limited",
            ProviderError::ContentFiltered => "content_filtered",
            ProviderError::NetworkError(_) => "network_error",
            ProviderError::EmptyResponse => "empty_response",
        }
    }
}

/// One message of a conversation sent to the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Message<'a> {
    pub role: Role,
    pub text: &'a str,
}

impl<'a> Message<'a> {
    pub fn user(text: &'a str) -> Self {
        Self {
            role: Role::User,
            text,
        }
    }

    pub fn assistant(text: &'a str) -> Self {
        Self {
            role: Role::Assistant,
            text,
        }
    }
}

/// Trait for text generation backends (e.g., Gemini).
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Model identifier, for logs and metrics.
    fn model(&self) -> &str;

    /// Generate the next assistant message for `messages`, oldest first.
    async fn generate(
        &self,
        system_instruction: Option<&str>,
        messages: &[Message<'_>],
    ) -> Result<String, ProviderError>;
}
