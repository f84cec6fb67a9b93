//! Chat history kept in the user's session.
//!
//! Only plain data lives in the session: the persona instruction and the
//! turns exchanged so far. The model-side conversation is rebuilt from them
//! on every message.

use serde::{Deserialize, Serialize};

/// Session key under which the [`ChatState`] is stored.
pub const CHAT_SESSION_KEY: &str = "chat";

/// System instruction establishing the FishGPT persona.
pub const FISHGPT_PERSONA: &str = "Você é um assistente de pesca muito amigável e especialista no Brasil. Suas respostas são focadas em dicas de pesca, regulamentação e biologia marinha. Seu nome é FishGPT.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One chat message. Never modified after it is appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    role: Role,
    text: String,
    /// Set on assistant turns that carry an error notice instead of an answer.
    #[serde(default)]
    failed: bool,
}

impl Turn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
            failed: false,
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            text: text.into(),
            failed: false,
        }
    }

    pub fn assistant_failure(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            text: text.into(),
            failed: true,
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_user(&self) -> bool {
        self.role == Role::User
    }

    pub fn failed(&self) -> bool {
        self.failed
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatState {
    /// `None` for a degraded session created while the assistant was unavailable.
    persona: Option<String>,
    turns: Vec<Turn>,
}

impl ChatState {
    /// A live chat with an empty history.
    pub fn active(persona: impl Into<String>) -> Self {
        Self {
            persona: Some(persona.into()),
            turns: Vec::new(),
        }
    }

    /// A chat whose only turn is the notice that the assistant is unavailable.
    pub fn degraded(notice: impl Into<String>) -> Self {
        Self {
            persona: None,
            turns: vec![Turn::assistant_failure(notice)],
        }
    }

    pub fn persona(&self) -> Option<&str> {
        self.persona.as_deref()
    }

    pub fn is_degraded(&self) -> bool {
        self.persona.is_none()
    }

    /// All turns, oldest first.
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// Append a user message and the assistant's reply to it.
    pub fn record_exchange(&mut self, message: impl Into<String>, reply: Turn) {
        self.turns.push(Turn::user(message));
        self.turns.push(reply);
    }

    /// Turns worth replaying to the model: failed replies are dropped
    /// together with the user message that triggered them.
    pub fn replayable_turns(&self) -> impl Iterator<Item = &Turn> {
        self.turns.iter().enumerate().filter_map(|(i, turn)| {
            if turn.failed {
                return None;
            }
            let answered_by_failure = turn.is_user()
                && self
                    .turns
                    .get(i + 1)
                    .is_some_and(|next| next.failed);
            (!answered_by_failure).then_some(turn)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn active_chat_starts_empty() {
        let chat = ChatState::active(FISHGPT_PERSONA);
        assert!(chat.turns().is_empty());
        assert_eq!(chat.persona(), Some(FISHGPT_PERSONA));
        assert!(!chat.is_degraded());
    }

    #[test]
    fn degraded_chat_has_single_assistant_notice() {
        let chat = ChatState::degraded("indisponível");
        assert!(chat.is_degraded());
        assert_eq!(chat.turns().len(), 1);
        assert_eq!(chat.turns()[0].role(), Role::Assistant);
        assert!(chat.turns()[0].failed());
    }

    #[test]
    fn each_exchange_appends_two_turns_in_order() {
        let mut chat = ChatState::active(FISHGPT_PERSONA);
        chat.record_exchange("oi", Turn::assistant("olá!"));
        chat.record_exchange("isca?", Turn::assistant_failure("falhou"));

        let roles: Vec<Role> = chat.turns().iter().map(Turn::role).collect();
        assert_eq!(
            roles,
            vec![Role::User, Role::Assistant, Role::User, Role::Assistant]
        );
        assert_eq!(chat.turns()[0].text(), "oi");
        assert_eq!(chat.turns()[3].text(), "falhou");
    }

    #[test]
    fn failed_exchanges_are_not_replayed() {
        let mut chat = ChatState::active(FISHGPT_PERSONA);
        chat.record_exchange("oi", Turn::assistant("olá!"));
        chat.record_exchange("isca?", Turn::assistant_failure("falhou"));
        chat.record_exchange("e agora?", Turn::assistant("minhoca"));

        let replayed: Vec<&str> = chat.replayable_turns().map(Turn::text).collect();
        assert_eq!(replayed, vec!["oi", "olá!", "e agora?", "minhoca"]);
    }

    #[test]
    fn survives_session_serialization() {
        let mut chat = ChatState::active(FISHGPT_PERSONA);
        chat.record_exchange("oi", Turn::assistant("olá!"));

        let json = serde_json::to_value(&chat).unwrap();
        assert_eq!(json["turns"][0]["role"], "user");
        let back: ChatState = serde_json::from_value(json).unwrap();
        assert_eq!(back, chat);
    }
}
