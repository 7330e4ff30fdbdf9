use std::time::Duration;

pub mod formatting;
pub mod models;
pub mod translation;

/// Which summarization backend to build and how to reach it.
#[derive(Clone)]
pub struct Config {
    /// Backend name: "huggingface", "chat" or "extractive"
    pub backend: String,
    pub api_key: Option<String>,
    pub api_url: Option<String>,
    pub model_name: Option<String>,
    pub timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend: "huggingface".to_string(),
            api_key: None,
            api_url: None,
            model_name: None,
            timeout: Duration::from_secs(60),
        }
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("backend", &self.backend)
            .field("api_key", &self.api_key.as_deref().map(|_| "<redacted>"))
            .field("api_url", &self.api_url)
            .field("model_name", &self.model_name)
            .field("timeout", &self.timeout)
            .finish()
    }
}

pub mod prelude {
    pub use super::Config;
    pub use super::formatting::{format_bullets, needs_translation};
    pub use super::models::create_summarizer;
    pub use super::translation::GoogleTranslator;
    pub use ns_core::{Summarizer, Translator, Result, Error};
}

pub use formatting::{format_bullets, needs_translation};
pub use models::create_summarizer;
pub use translation::GoogleTranslator;
