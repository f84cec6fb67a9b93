use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Environment variable holding the Gemini credential. Takes precedence over
/// `gemini.api_key` from files or `APP_` variables.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub server: ServerSettings,
    pub gemini: GeminiSettings,
    pub observability: ObservabilitySettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    /// Sessions (and the chat history they hold) expire after this much inactivity.
    pub session_expiry_hours: i64,
    /// Mark the session cookie `Secure`. Enable behind HTTPS.
    pub secure_cookies: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GeminiSettings {
    /// Absent or blank means the assistant runs in degraded mode.
    #[serde(default)]
    pub api_key: Option<Secret<String>>,
    /// Model for both one-shot lookups and chat (e.g., gemini-2.5-flash)
    pub model: String,
    pub base_url: String,
    pub timeout_secs: u64,
}

impl GeminiSettings {
    /// The configured credential, if it is non-blank.
    pub fn credential(&self) -> Option<&Secret<String>> {
        self.api_key
            .as_ref()
            .filter(|key| !key.expose_secret().trim().is_empty())
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ObservabilitySettings {
    pub log_level: String,
    /// OTLP collector endpoint; span export is disabled when unset.
    #[serde(default)]
    pub otlp_endpoint: Option<String>,
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let base_path = std::env::current_dir().map_err(|e| {
        config::ConfigError::Message(format!("Failed to determine the current directory: {}", e))
    })?;

    // Check if we're already in fishgpt-web directory or at the workspace root
    let configuration_directory = if base_path.ends_with("fishgpt-web") {
        base_path.join("configuration")
    } else {
        base_path.join("fishgpt-web").join("configuration")
    };

    load_settings(&configuration_directory, std::env::var(API_KEY_ENV).ok())
}

/// Layer defaults, `base.yaml` from `configuration_directory` (optional),
/// `APP_*` environment variables and finally the credential override.
pub fn load_settings(
    configuration_directory: &Path,
    api_key_override: Option<String>,
) -> Result<Settings, config::ConfigError> {
    let base_file: PathBuf = configuration_directory.join("base.yaml");

    let settings = config::Config::builder()
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 8080_i64)?
        .set_default("server.session_expiry_hours", 24_i64)?
        .set_default("server.secure_cookies", false)?
        .set_default("gemini.model", "gemini-2.5-flash")?
        .set_default("gemini.base_url", DEFAULT_GEMINI_BASE_URL)?
        .set_default("gemini.timeout_secs", 120_i64)?
        .set_default("observability.log_level", "info")?
        .add_source(config::File::from(base_file).required(false))
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .set_override_option("gemini.api_key", api_key_override)?
        .build()?;

    settings.try_deserialize::<Settings>()
}
