use async_trait::async_trait;
use ns_core::{ExtractedArticle, FetchConfig, Result};
use reqwest::Client;
use scraper::{Html, Selector};
use url::Url;

use super::{jsonld, metadata, utils, ExtractionStrategy};
use crate::fetch::{build_client, fetch_page};

/// Article-aware parser: reads the body from the article container and
/// metadata from JSON-LD, Open Graph and meta tags.
#[derive(Debug, Clone)]
pub struct StructuredStrategy {
    client: Client,
}

impl StructuredStrategy {
    pub fn new(config: &FetchConfig) -> Result<Self> {
        Ok(Self {
            client: build_client(config)?,
        })
    }

    // Checked in order; the first container holding paragraphs is the body.
    const BODY_SELECTORS: &'static [&'static str] = &[
        "[itemprop='articleBody']",
        "article",
        ".article-body",
        ".article__body",
        ".story-body",
        ".entry-content",
        ".post-content",
    ];

    pub fn parse(html: &str, final_url: &Url) -> ExtractedArticle {
        let document = Html::parse_document(html);
        let objects = jsonld::extract_objects(&document);

        let body_text = Self::BODY_SELECTORS
            .iter()
            .filter_map(|s| Selector::parse(s).ok())
            .find_map(|selector| {
                // Only the first matching container: nested articles and
                // teaser cards must not be merged into the body.
                document
                    .select(&selector)
                    .map(|el| utils::paragraphs_within(&el))
                    .find(|paragraphs| !paragraphs.is_empty())
                    .map(|paragraphs| paragraphs.join("\n\n"))
            })
            .unwrap_or_default();

        let image_url = metadata::extract_image(&document, &objects, final_url)
            .or_else(|| metadata::scan_image(html, final_url));

        ExtractedArticle {
            body_text,
            title: metadata::extract_title(&document, &objects),
            author: metadata::extract_author(&document, &objects),
            publish_date: metadata::extract_date(&document, &objects),
            image_url,
            final_url: final_url.to_string(),
            strategy: "structured".to_string(),
        }
    }
}

#[async_trait]
impl ExtractionStrategy for StructuredStrategy {
    fn name(&self) -> &str {
        "structured"
    }

    async fn extract(&self, url: &Url) -> Result<ExtractedArticle> {
        let page = fetch_page(&self.client, url).await?;
        Ok(Self::parse(&page.html, &page.final_url))
    }
}
