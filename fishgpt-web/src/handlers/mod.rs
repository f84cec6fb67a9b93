//! HTTP handlers: the search page, the chat and operational endpoints.

pub mod chat;
pub mod health;
pub mod lookup;
pub mod metrics;
pub mod notices;
