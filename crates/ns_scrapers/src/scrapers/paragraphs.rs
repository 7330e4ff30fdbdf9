use async_trait::async_trait;
use ns_core::{ExtractedArticle, FetchConfig, Result};
use reqwest::Client;
use scraper::Html;
use url::Url;

use super::{metadata, utils, ExtractionStrategy};
use crate::fetch::{build_client, fetch_page};

/// Last resort: every `<p>` on the page, in document order.
#[derive(Debug, Clone)]
pub struct ParagraphStrategy {
    client: Client,
}

impl ParagraphStrategy {
    pub fn new(config: &FetchConfig) -> Result<Self> {
        Ok(Self {
            client: build_client(config)?,
        })
    }

    pub fn parse(html: &str, final_url: &Url) -> ExtractedArticle {
        let document = Html::parse_document(html);
        let body_text = utils::extract_texts(&document, "p")
            .unwrap_or_default()
            .join("\n\n");

        ExtractedArticle {
            body_text,
            title: utils::extract_text(&document, "title").ok(),
            author: None,
            publish_date: None,
            image_url: metadata::scan_image(html, final_url),
            final_url: final_url.to_string(),
            strategy: "paragraphs".to_string(),
        }
    }
}

#[async_trait]
impl ExtractionStrategy for ParagraphStrategy {
    fn name(&self) -> &str {
        "paragraphs"
    }

    async fn extract(&self, url: &Url) -> Result<ExtractedArticle> {
        let page = fetch_page(&self.client, url).await?;
        Ok(Self::parse(&page.html, &page.final_url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collects_all_paragraphs() {
        let html = r#"
            <html><head><title>Harvest</title></head><body>
                <div><p>First   paragraph.</p></div>
                <section><p>Second paragraph.</p><p></p></section>
                <p>Third paragraph.</p>
            </body></html>
        "#;
        let url = Url::parse("https://example.com/x").unwrap();
        let article = ParagraphStrategy::parse(html, &url);

        assert_eq!(
            article.body_text,
            "First paragraph.\n\nSecond paragraph.\n\nThird paragraph."
        );
        assert_eq!(article.title.as_deref(), Some("Harvest"));
        assert_eq!(article.strategy, "paragraphs");
    }

    #[test]
    fn test_no_paragraphs() {
        let url = Url::parse("https://example.com/x").unwrap();
        let article = ParagraphStrategy::parse("<html><body><div>Nothing</div></body></html>", &url);
        assert!(article.body_text.is_empty());
    }
}
