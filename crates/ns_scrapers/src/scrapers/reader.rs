use std::time::Duration;

use async_trait::async_trait;
use ns_core::{Error, ExtractedArticle, FetchConfig, Result};
use reqwest::Client;
use url::Url;

use super::{metadata, ExtractionStrategy};
use crate::fetch::build_client;

const READER_TIMEOUT: Duration = Duration::from_secs(20);
const TITLE_MAX_CHARS: usize = 150;

/// Asks a reader proxy (a service that returns the readable text of any
/// URL appended to its base) for the article.
#[derive(Debug, Clone)]
pub struct ReaderProxyStrategy {
    client: Client,
    base: String,
}

impl ReaderProxyStrategy {
    pub fn new(base: &str, config: &FetchConfig) -> Result<Self> {
        let config = FetchConfig {
            timeout: READER_TIMEOUT,
            ..config.clone()
        };
        Ok(Self {
            client: build_client(&config)?,
            base: base.to_string(),
        })
    }

    pub fn parse(text: &str, url: &Url) -> ExtractedArticle {
        let title = text
            .lines()
            .next()
            .map(|line| line.trim().trim_start_matches("Title:").trim())
            .filter(|line| !line.is_empty() && line.chars().count() < TITLE_MAX_CHARS)
            .map(str::to_string);

        let publish_date = text
            .lines()
            .find_map(|line| line.trim().strip_prefix("Published Time:"))
            .and_then(metadata::normalize_date);

        let body_text = match text.split_once("Markdown Content:") {
            Some((_, body)) => body.trim().to_string(),
            None => text.trim().to_string(),
        };

        ExtractedArticle {
            body_text,
            title,
            author: None,
            publish_date,
            image_url: None,
            final_url: url.to_string(),
            strategy: "reader".to_string(),
        }
    }
}

#[async_trait]
impl ExtractionStrategy for ReaderProxyStrategy {
    fn name(&self) -> &str {
        "reader"
    }

    async fn extract(&self, url: &Url) -> Result<ExtractedArticle> {
        let reader_url = format!("{}{}", self.base, url);
        let response = self.client.get(&reader_url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Scraping(format!("Reader proxy returned HTTP {}", status)));
        }

        let text = response.text().await?;
        Ok(Self::parse(&text, url))
    }
}
