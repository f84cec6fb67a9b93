use crate::handlers::notices;
use crate::models::chat::{ChatState, Turn, CHAT_SESSION_KEY, FISHGPT_PERSONA};
use crate::services::markdown;
use crate::services::AiClient;
use crate::AppState;
use askama::Template;
use axum::{
    extract::{rejection::FormRejection, State},
    response::Redirect,
    Form,
};
use serde::Deserialize;
use service_core::error::AppError;
use tower_sessions::Session;

#[derive(Template)]
#[template(path = "chat.html")]
pub struct ChatTemplate {
    pub turns: Vec<TurnView>,
    pub degraded: bool,
    pub current_page: &'static str,
}

/// A turn prepared for display. Assistant text is rendered from Markdown;
/// user text is shown as typed.
pub struct TurnView {
    pub is_user: bool,
    pub failed: bool,
    pub text: String,
    pub html: String,
}

impl ChatTemplate {
    fn new(chat: &ChatState) -> Self {
        let turns = chat
            .turns()
            .iter()
            .map(|turn| TurnView {
                is_user: turn.is_user(),
                failed: turn.failed(),
                text: turn.text().to_string(),
                html: if turn.is_user() {
                    String::new()
                } else {
                    markdown::to_html(turn.text())
                },
            })
            .collect();

        Self {
            turns,
            degraded: chat.is_degraded(),
            current_page: "chat",
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ChatForm {
    pub message: Option<String>,
}

fn session_error(err: tower_sessions::session::Error) -> AppError {
    AppError::SessionError(err.to_string())
}

/// The session's chat, created on first use. A chat created while the
/// assistant is unavailable starts with the unavailability notice.
async fn load_or_start_chat(ai: &AiClient, session: &Session) -> Result<ChatState, AppError> {
    if let Some(chat) = session
        .get::<ChatState>(CHAT_SESSION_KEY)
        .await
        .map_err(session_error)?
    {
        return Ok(chat);
    }

    let chat = if ai.is_available() {
        ChatState::active(FISHGPT_PERSONA)
    } else {
        ChatState::degraded(notices::CHAT_UNAVAILABLE)
    };
    tracing::info!(degraded = chat.is_degraded(), "Started chat session");

    session
        .insert(CHAT_SESSION_KEY, &chat)
        .await
        .map_err(session_error)?;

    Ok(chat)
}

pub async fn chat_page(
    State(state): State<AppState>,
    session: Session,
) -> Result<ChatTemplate, AppError> {
    let chat = load_or_start_chat(&state.ai, &session).await?;
    Ok(ChatTemplate::new(&chat))
}

pub async fn chat_message_handler(
    State(state): State<AppState>,
    session: Session,
    form: Result<Form<ChatForm>, FormRejection>,
) -> Result<ChatTemplate, AppError> {
    let form = form.map(|Form(form)| form).unwrap_or_else(|rejection| {
        tracing::debug!(error = %rejection, "Unreadable chat form, treated as empty");
        ChatForm::default()
    });
    let mut chat = load_or_start_chat(&state.ai, &session).await?;

    if let Some(message) = form.message.filter(|m| !m.trim().is_empty()) {
        chat = send_message(&state.ai, chat, message).await;
        session
            .insert(CHAT_SESSION_KEY, &chat)
            .await
            .map_err(session_error)?;
    }

    Ok(ChatTemplate::new(&chat))
}

/// Send one message and record the exchange. A failed send is recorded as
/// the assistant's reply, so the history always grows by two turns.
pub async fn send_message(ai: &AiClient, mut chat: ChatState, message: String) -> ChatState {
    let reply = match ai.send_chat(&chat, &message).await {
        Ok(text) => Turn::assistant(text),
        Err(e) => Turn::assistant_failure(notices::chat_failure(&e)),
    };

    chat.record_exchange(message, reply);
    chat
}

pub async fn reset_chat(session: Session) -> Result<Redirect, AppError> {
    session
        .remove::<ChatState>(CHAT_SESSION_KEY)
        .await
        .map_err(session_error)?;
    tracing::info!("Chat session reset");

    Ok(Redirect::to("/chat"))
}
