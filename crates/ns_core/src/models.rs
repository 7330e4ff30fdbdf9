use async_trait::async_trait;
use crate::types::LengthTarget;
use crate::Result;

#[async_trait]
pub trait Summarizer: Send + Sync {
    /// Returns the name of the backend, used in logs
    fn name(&self) -> &str;

    /// Produce an abstractive summary of `text` sized for `target`
    async fn summarize(&self, text: &str, target: LengthTarget) -> Result<String>;
}

#[async_trait]
pub trait Translator: Send + Sync {
    fn name(&self) -> &str;

    /// Translate `text` into `target_language` (an ISO 639-1 code such as "fr")
    async fn translate(&self, text: &str, target_language: &str) -> Result<String>;
}
