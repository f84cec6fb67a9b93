//! The single handle to the language model, shared by all handlers.
//!
//! Built once at startup. When no credential is configured (or the HTTP
//! client cannot be created) the handle is empty for the whole life of the
//! process and every operation returns [`AiError::Unavailable`] without
//! touching the network.

use crate::config::GeminiSettings;
use crate::models::chat::ChatState;
use crate::services::metrics::{record_genai_request, record_provider_latency};
use crate::services::providers::gemini::{GeminiConfig, GeminiProvider};
use crate::services::providers::{LanguageModel, Message, ProviderError};
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AiError {
    /// No usable client: missing credential or failed initialization.
    #[error("language model client is not configured")]
    Unavailable,

    /// The call was made and failed.
    #[error(transparent)]
    Provider(#[from] ProviderError),
}

#[derive(Clone)]
pub struct AiClient {
    model: Option<Arc<dyn LanguageModel>>,
}

impl AiClient {
    pub fn new(model: Arc<dyn LanguageModel>) -> Self {
        Self { model: Some(model) }
    }

    pub fn unavailable() -> Self {
        Self { model: None }
    }

    /// Build the Gemini-backed client, or an unavailable one if that is not
    /// possible. Never fails.
    pub fn from_settings(settings: &GeminiSettings) -> Self {
        let Some(api_key) = settings.credential() else {
            tracing::error!(
                "Gemini API key not configured (set GEMINI_API_KEY); assistant runs in degraded mode"
            );
            return Self::unavailable();
        };

        let config = GeminiConfig {
            api_key: api_key.clone(),
            model: settings.model.clone(),
            base_url: settings.base_url.clone(),
            timeout: Duration::from_secs(settings.timeout_secs),
        };

        match GeminiProvider::new(config) {
            Ok(provider) => {
                tracing::info!(model = %settings.model, "Initialized Gemini provider");
                Self::new(Arc::new(provider))
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to initialize Gemini provider; assistant runs in degraded mode");
                Self::unavailable()
            }
        }
    }

    pub fn is_available(&self) -> bool {
        self.model.is_some()
    }

    /// One-shot generation for a standalone prompt.
    pub async fn generate(&self, prompt: &str) -> Result<String, AiError> {
        self.call("lookup", None, &[Message::user(prompt)]).await
    }

    /// Send `message` into the conversation held by `chat`. The persona and
    /// the replayable history are sent along, so no server-side chat object
    /// is needed.
    pub async fn send_chat(&self, chat: &ChatState, message: &str) -> Result<String, AiError> {
        let mut messages: Vec<Message<'_>> = chat
            .replayable_turns()
            .map(|turn| Message {
                role: turn.role(),
                text: turn.text(),
            })
            .collect();
        messages.push(Message::user(message));

        self.call("chat", chat.persona(), &messages).await
    }

    async fn call(
        &self,
        operation: &'static str,
        system_instruction: Option<&str>,
        messages: &[Message<'_>],
    ) -> Result<String, AiError> {
        let Some(model) = &self.model else {
            record_genai_request(operation, "unavailable");
            return Err(AiError::Unavailable);
        };

        let start = Instant::now();
        let result = model.generate(system_instruction, messages).await;
        let elapsed = start.elapsed().as_secs_f64();
        record_provider_latency(operation, model.model(), elapsed);

        match &result {
            Ok(text) => {
                record_genai_request(operation, "ok");
                tracing::debug!(
                    operation,
                    model = %model.model(),
                    response_len = text.len(),
                    elapsed_secs = elapsed,
                    "Language model request completed"
                );
            }
            Err(e) => {
                record_genai_request(operation, e.kind());
                tracing::warn!(
                    operation,
                    model = %model.model(),
                    error = %e,
                    "Language model request failed"
                );
            }
        }

        Ok(result?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::chat::{Role, Turn, FISHGPT_PERSONA};
    use crate::services::providers::mock::MockProvider;
    use secrecy::Secret;

    fn gemini_settings(api_key: Option<&str>) -> GeminiSettings {
        GeminiSettings {
            api_key: api_key.map(|k| Secret::new(k.to_string())),
            model: "gemini-2.5-flash".to_string(),
            base_url: "http://127.0.0.1:9".to_string(),
            timeout_secs: 5,
        }
    }

    #[test]
    fn missing_key_yields_unavailable_client() {
        assert!(!AiClient::from_settings(&gemini_settings(None)).is_available());
        assert!(!AiClient::from_settings(&gemini_settings(Some(""))).is_available());
    }

    #[test]
    fn configured_key_yields_available_client() {
        assert!(AiClient::from_settings(&gemini_settings(Some("key"))).is_available());
    }

    #[tokio::test]
    async fn unavailable_client_short_circuits() {
        let client = AiClient::unavailable();

        assert!(matches!(
            client.generate("prompt").await,
            Err(AiError::Unavailable)
        ));
        assert!(matches!(
            client
                .send_chat(&ChatState::active(FISHGPT_PERSONA), "oi")
                .await,
            Err(AiError::Unavailable)
        ));
    }

    #[tokio::test]
    async fn generate_sends_single_user_message() {
        let mock = Arc::new(MockProvider::echo());
        let client = AiClient::new(mock.clone());

        let text = client.generate("Fale do dourado").await.unwrap();

        assert_eq!(text, "Echo: Fale do dourado");
        let request = mock.last_request().unwrap();
        assert_eq!(request.system_instruction, None);
        assert_eq!(
            request.messages,
            vec![(Role::User, "Fale do dourado".to_string())]
        );
    }

    #[tokio::test]
    async fn send_chat_replays_persona_and_history() {
        let mock = Arc::new(MockProvider::echo());
        let client = AiClient::new(mock.clone());

        let mut chat = ChatState::active(FISHGPT_PERSONA);
        chat.record_exchange("oi", Turn::assistant("Olá, pescador!"));
        chat.record_exchange("isca?", Turn::assistant_failure("falhou"));

        client.send_chat(&chat, "qual vara?").await.unwrap();

        let request = mock.last_request().unwrap();
        assert_eq!(request.system_instruction.as_deref(), Some(FISHGPT_PERSONA));
        assert_eq!(
            request.messages,
            vec![
                (Role::User, "oi".to_string()),
                (Role::Assistant, "Olá, pescador!".to_string()),
                (Role::User, "qual vara?".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn provider_failure_is_reported_as_provider_error() {
        let client = AiClient::new(Arc::new(MockProvider::failing("connection reset")));

        let err = client.generate("prompt").await.unwrap_err();

        assert!(matches!(
            err,
            AiError::Provider(ProviderError::NetworkError(_))
        ));
        assert!(err.to_string().contains("connection reset"));
    }
}
