use std::fmt;

use ns_core::{ExtractedArticle, Result, Settings};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::scrapers::{default_strategies, utils, BoxedStrategy};

/// One failed strategy and why it failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attempt {
    pub strategy: String,
    pub reason: String,
}

impl fmt::Display for Attempt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.strategy, self.reason)
    }
}

/// Every strategy failed. Carries each attempt for diagnostics.
#[derive(Error, Debug)]
#[error("No strategy extracted enough text from {url} ({} attempts)", .attempts.len())]
pub struct ExtractionError {
    pub url: String,
    pub attempts: Vec<Attempt>,
}

impl ExtractionError {
    pub fn summary(&self) -> String {
        self.attempts
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// Runs extraction strategies in order and keeps the first one that yields
/// at least `min_words` words.
pub struct ExtractionPipeline {
    strategies: Vec<BoxedStrategy>,
    min_words: usize,
}

impl ExtractionPipeline {
    pub fn new(strategies: Vec<BoxedStrategy>, min_words: usize) -> Self {
        Self {
            strategies,
            min_words,
        }
    }

    pub fn default_chain(settings: &Settings) -> Result<Self> {
        Ok(Self::new(default_strategies(settings)?, settings.min_words))
    }

    pub fn strategy_names(&self) -> Vec<&str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    pub async fn run(&self, url: &str) -> std::result::Result<ExtractedArticle, ExtractionError> {
        let parsed = match utils::parse_url(url) {
            Ok(parsed) => parsed,
            Err(e) => {
                return Err(ExtractionError {
                    url: url.to_string(),
                    attempts: vec![Attempt {
                        strategy: "url".to_string(),
                        reason: e.to_string(),
                    }],
                });
            }
        };

        let mut attempts = Vec::with_capacity(self.strategies.len());

        for strategy in &self.strategies {
            debug!(strategy = strategy.name(), url = %parsed, "Trying extraction strategy");

            match strategy.extract(&parsed).await {
                Ok(mut article) => {
                    let words = article.word_count();
                    if words >= self.min_words {
                        if article.strategy.is_empty() {
                            article.strategy = strategy.name().to_string();
                        }
                        if article.final_url.is_empty() {
                            article.final_url = parsed.to_string();
                        }
                        info!(strategy = strategy.name(), words, url = %parsed, "Extracted article");
                        return Ok(article);
                    }
                    warn!(strategy = strategy.name(), words, min_words = self.min_words, "Not enough text");
                    attempts.push(Attempt {
                        strategy: strategy.name().to_string(),
                        reason: format!("only {} words (need {})", words, self.min_words),
                    });
                }
                Err(e) => {
                    warn!(strategy = strategy.name(), error = %e, "Extraction strategy failed");
                    attempts.push(Attempt {
                        strategy: strategy.name().to_string(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        Err(ExtractionError {
            url: parsed.to_string(),
            attempts,
        })
    }
}

impl fmt::Debug for ExtractionPipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtractionPipeline")
            .field("strategies", &self.strategy_names())
            .field("min_words", &self.min_words)
            .finish()
    }
}
