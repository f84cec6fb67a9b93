//! User-facing text shown in place of a model answer when a call fails.

use crate::services::AiError;

pub const LOOKUP_UNAVAILABLE: &str =
    "❌ Erro na API: O cliente Gemini não foi configurado (Verifique a GEMINI_API_KEY).";

pub const CHAT_UNAVAILABLE: &str =
    "❌ O cliente Gemini não está disponível para chat. (Verifique a chave de API)";

/// Text shown on the search page for a failed lookup.
pub fn lookup_failure(err: &AiError) -> String {
    match err {
        AiError::Unavailable => LOOKUP_UNAVAILABLE.to_string(),
        AiError::Provider(e) => format!(
            "❌ Erro na API: Não foi possível obter as informações. Detalhes: {}",
            e
        ),
    }
}

/// Text recorded as the assistant's turn for a failed chat message.
pub fn chat_failure(err: &AiError) -> String {
    match err {
        AiError::Unavailable => CHAT_UNAVAILABLE.to_string(),
        AiError::Provider(e) => format!("❌ Falha de comunicação com a IA. Detalhe: {}", e),
    }
}
