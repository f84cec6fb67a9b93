pub mod ai_client;
pub mod image;
pub mod markdown;
pub mod metrics;
pub mod prompt;
pub mod providers;

pub use ai_client::{AiClient, AiError};
pub use prompt::InfoMode;
