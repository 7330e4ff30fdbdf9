use async_trait::async_trait;
use ns_core::{text, ExtractedArticle, FetchConfig, Result};
use reqwest::Client;
use scraper::{Html, Selector};
use url::Url;

use super::{metadata, utils, ExtractionStrategy};
use crate::fetch::{build_client, fetch_page};

/// Generic content extractor for pages without article markup.
///
/// Follows redirects first, so aggregator links (Google News, MSN) are read
/// from the publisher's page, then keeps whichever candidate container holds
/// the most paragraph words.
#[derive(Debug, Clone)]
pub struct ReadabilityStrategy {
    client: Client,
}

const CANDIDATES: &[&str] = &[
    "article",
    "main",
    "[role='main']",
    ".post-content",
    ".entry-content",
    ".article-body",
    ".story-body",
    "#content",
];

const TITLE_MAX_CHARS: usize = 120;

impl ReadabilityStrategy {
    pub fn new(config: &FetchConfig) -> Result<Self> {
        Ok(Self {
            client: build_client(config)?,
        })
    }

    pub fn parse(html: &str, final_url: &Url) -> ExtractedArticle {
        let document = Html::parse_document(html);

        let body_text = CANDIDATES
            .iter()
            .filter_map(|s| Selector::parse(s).ok())
            .flat_map(|selector| {
                document
                    .select(&selector)
                    .map(|el| utils::paragraphs_within(&el).join("\n\n"))
                    .collect::<Vec<_>>()
            })
            .max_by_key(|candidate| text::word_count(candidate))
            .unwrap_or_default();

        let title = metadata::meta_content(&document, &["og:title"])
            .or_else(|| utils::extract_text(&document, "title").ok())
            .or_else(|| text::first_sentence(&body_text, TITLE_MAX_CHARS));

        ExtractedArticle {
            title,
            author: None,
            publish_date: None,
            image_url: metadata::scan_image(html, final_url),
            final_url: final_url.to_string(),
            strategy: "readability".to_string(),
            body_text,
        }
    }
}

#[async_trait]
impl ExtractionStrategy for ReadabilityStrategy {
    fn name(&self) -> &str {
        "readability"
    }

    async fn extract(&self, url: &Url) -> Result<ExtractedArticle> {
        let page = fetch_page(&self.client, url).await?;
        if page.final_url != *url {
            tracing::debug!(%url, final_url = %page.final_url, "Followed redirect");
        }
        Ok(Self::parse(&page.html, &page.final_url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_picks_densest_container() {
        let html = r#"
            <html><body>
                <main><p>Short teaser.</p></main>
                <div id="content">
                    <p>Flooding closed three highways across the region on Tuesday.</p>
                    <p>Officials expect the water to recede by the weekend.</p>
                </div>
            </body></html>
        "#;
        let url = Url::parse("https://example.com/floods").unwrap();
        let article = ReadabilityStrategy::parse(html, &url);

        assert!(article.body_text.starts_with("Flooding closed three highways"));
        assert!(article.body_text.contains("recede by the weekend."));
        assert!(!article.body_text.contains("Short teaser"));
    }

    #[test]
    fn test_title_falls_back_to_first_sentence() {
        let html = "<html><body><article><p>Storm hits coast. Thousands without power.</p></article></body></html>";
        let url = Url::parse("https://example.com/storm").unwrap();
        let article = ReadabilityStrategy::parse(html, &url);
        assert_eq!(article.title.as_deref(), Some("Storm hits coast"));
        assert_eq!(article.image_url, None);
    }

    #[test]
    fn test_image_from_pattern_scan() {
        let html = r#"<html><head><meta name="twitter:image" content="/lead.jpg"></head>
            <body><main><p>Body.</p></main></body></html>"#;
        let url = Url::parse("https://example.com/a/b").unwrap();
        let article = ReadabilityStrategy::parse(html, &url);
        assert_eq!(article.image_url.as_deref(), Some("https://example.com/lead.jpg"));
    }
}
