//! Mock provider for tests and local runs without a credential.

use super::{LanguageModel, Message, ProviderError};
use crate::models::chat::Role;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// A request as seen by the mock, owned so tests can inspect it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub system_instruction: Option<String>,
    pub messages: Vec<(Role, String)>,
}

/// Mock provider that echoes the last user message, or always fails.
pub struct MockProvider {
    fail_with: Option<String>,
    calls: AtomicUsize,
    last_request: Mutex<Option<RecordedRequest>>,
}

impl MockProvider {
    /// Answers `Echo: <last user message>`.
    pub fn echo() -> Self {
        Self {
            fail_with: None,
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    /// Fails every call with a network error carrying `detail`.
    pub fn failing(detail: impl Into<String>) -> Self {
        Self {
            fail_with: Some(detail.into()),
            ..Self::echo()
        }
    }

    /// Number of `generate` calls received so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.last_request
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or(None)
    }
}

#[async_trait]
impl LanguageModel for MockProvider {
    fn model(&self) -> &str {
        "mock"
    }

    async fn generate(
        &self,
        system_instruction: Option<&str>,
        messages: &[Message<'_>],
    ) -> Result<String, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Ok(mut last) = self.last_request.lock() {
            *last = Some(RecordedRequest {
                system_instruction: system_instruction.map(str::to_string),
                messages: messages
                    .iter()
                    .map(|m| (m.role, m.text.to_string()))
                    .collect(),
            });
        }

        if let Some(detail) = &self.fail_with {
            return Err(ProviderError::NetworkError(detail.clone()));
        }

        let last_user = messages
            .iter()
            .rev()
            .find(|m| m.role == Role::User)
            .map(|m| m.text)
            .unwrap_or_default();

        Ok(format!("Echo: {}", last_user))
    }
}
