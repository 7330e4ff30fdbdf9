use std::fmt;

use ns_core::{LengthTarget, Result, Summarizer};

/// Local summarizer with no network dependency: keeps the leading
/// sentences of the article until the word budget is spent.
pub struct ExtractiveSummarizer;

impl fmt::Debug for ExtractiveSummarizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtractiveSummarizer").finish()
    }
}

impl ExtractiveSummarizer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ExtractiveSummarizer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl Summarizer for ExtractiveSummarizer {
    fn name(&self) -> &str {
        "Extractive"
    }

    async fn summarize(&self, text: &str, target: LengthTarget) -> Result<String> {
        let budget = target.max_tokens as usize;
        let mut words = 0;
        let mut sentences = Vec::new();

        for sentence in text
            .split(|c: char| c == '.' || c == '!' || c == '?')
            .map(|s| s.split_whitespace().collect::<Vec<_>>().join(" "))
            .filter(|s| !s.is_empty())
        {
            let count = sentence.split(' ').count();
            // Always keep the first sentence, even when it alone exceeds the budget.
            if !sentences.is_empty() && words + count > budget {
                break;
            }
            words += count;
            sentences.push(sentence);
        }

        if sentences.is_empty() {
            return Ok(String::new());
        }
        let summary = sentences.join(". ") + ".";
        tracing::debug!("Generated extractive summary: {}", summary);
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target(max_tokens: u32) -> LengthTarget {
        LengthTarget {
            max_tokens,
            min_tokens: 0,
        }
    }

    #[tokio::test]
    async fn test_extractive_summary() {
        let model = ExtractiveSummarizer::new();
        let text = "This is a test article. It has multiple sentences! This is the third sentence? And a fourth.";

        let summary = model.summarize(text, target(14)).await.unwrap();
        assert_eq!(
            summary,
            "This is a test article. It has multiple sentences. This is the third sentence."
        );
    }

    #[tokio::test]
    async fn test_first_sentence_always_kept() {
        let model = ExtractiveSummarizer::new();
        let summary = model
            .summarize("One two three four five. Six.", target(2))
            .await
            .unwrap();
        assert_eq!(summary, "One two three four five.");
    }

    #[tokio::test]
    async fn test_empty_input() {
        let model = ExtractiveSummarizer::new();
        assert_eq!(model.summarize("  ...  ", target(80)).await.unwrap(), "");
    }
}
