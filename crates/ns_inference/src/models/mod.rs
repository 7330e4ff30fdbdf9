use std::sync::Arc;

use ns_core::{Error, Result, Summarizer};

use crate::Config;

pub mod chat;
pub mod extractive;
pub mod huggingface;

pub use chat::ChatSummarizer;
pub use extractive::ExtractiveSummarizer;
pub use huggingface::HuggingFaceSummarizer;

/// Builds the summarization backend named in `config.backend`.
pub fn create_summarizer(config: &Config) -> Result<Arc<dyn Summarizer>> {
    let summarizer: Arc<dyn Summarizer> = match config.backend.to_lowercase().as_str() {
        "huggingface" | "hf" => Arc::new(HuggingFaceSummarizer::new(config)?),
        "chat" | "openai" => Arc::new(ChatSummarizer::new(config)?),
        "extractive" | "local" => Arc::new(ExtractiveSummarizer::new()),
        other => {
            return Err(Error::Inference(format!(
                "Unknown summarizer backend: {}. Available: huggingface, chat, extractive",
                other
            )))
        }
    };
    tracing::info!(backend = summarizer.name(), "Summarizer ready");
    Ok(summarizer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_summarizer_by_name() {
        let names = [("huggingface", "HuggingFace"), ("chat", "Chat"), ("extractive", "Extractive")];
        for (backend, expected) in names {
            let config = Config {
                backend: backend.to_string(),
                ..Config::default()
            };
            let summarizer = create_summarizer(&config).unwrap();
            assert_eq!(summarizer.name(), expected);
        }
    }

    #[test]
    fn test_unknown_backend() {
        let config = Config {
            backend: "telepathy".to_string(),
            ..Config::default()
        };
        let err = create_summarizer(&config).err().unwrap();
        assert!(err.to_string().contains("telepathy"));
    }
}
