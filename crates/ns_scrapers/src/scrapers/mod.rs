use async_trait::async_trait;
use ns_core::{ExtractedArticle, Result, Settings};
use url::Url;

pub mod jsonld;
pub mod metadata;
pub mod paragraphs;
pub mod reader;
pub mod readability;
pub mod structured;

pub use paragraphs::ParagraphStrategy;
pub use reader::ReaderProxyStrategy;
pub use readability::ReadabilityStrategy;
pub use structured::StructuredStrategy;

/// One way of turning an article URL into body text and metadata.
#[async_trait]
pub trait ExtractionStrategy: Send + Sync {
    /// Short name used in logs and failure reports
    fn name(&self) -> &str;

    /// Fetches and extracts the article at `url`
    async fn extract(&self, url: &Url) -> Result<ExtractedArticle>;
}

pub type BoxedStrategy = Box<dyn ExtractionStrategy>;

/// The default chain: structured parser, content-density extractor,
/// raw paragraph harvest, then the reader proxy when one is configured.
pub fn default_strategies(settings: &Settings) -> Result<Vec<BoxedStrategy>> {
    let mut strategies: Vec<BoxedStrategy> = vec![
        Box::new(StructuredStrategy::new(&settings.fetch)?),
        Box::new(ReadabilityStrategy::new(&settings.fetch)?),
        Box::new(ParagraphStrategy::new(&settings.fetch)?),
    ];
    if let Some(base) = &settings.reader_proxy {
        strategies.push(Box::new(ReaderProxyStrategy::new(base, &settings.fetch)?));
    }
    Ok(strategies)
}

/// Common utilities for strategies
pub(crate) mod utils {
    use lazy_static::lazy_static;
    use ns_core::{text, Error, Result};
    use regex::Regex;
    use scraper::{ElementRef, Html, Selector};
    use url::Url;

    lazy_static! {
        static ref SCHEME_PREFIX: Option<Regex> = Regex::new(r"^[a-zA-Z][a-zA-Z0-9+.-]*://").ok();
    }

    fn has_scheme(url: &str) -> bool {
        SCHEME_PREFIX
            .as_ref()
            .map(|re| re.is_match(url))
            .unwrap_or(false)
    }

    /// Parses a user-supplied URL, assuming https when the scheme is missing.
    /// Only a leading scheme counts, so a URL carried in the query string of
    /// a redirect link does not.
    pub fn parse_url(url: &str) -> Result<Url> {
        let url = url.trim();
        let candidate = if has_scheme(url) {
            url.to_string()
        } else {
            format!("https://{}", url)
        };

        let parsed = Url::parse(&candidate)
            .map_err(|e| Error::InvalidUrl(format!("Failed to parse URL {}: {}", url, e)))?;
        match parsed.scheme() {
            "http" | "https" => Ok(parsed),
            scheme => Err(Error::InvalidUrl(format!("Unsupported scheme: {}", scheme))),
        }
    }

    pub fn element_text(el: &ElementRef) -> String {
        text::normalize_whitespace(&el.text().collect::<String>())
    }

    pub fn extract_text(document: &Html, selector: &str) -> Result<String> {
        let selector = Selector::parse(selector)
            .map_err(|e| Error::Scraping(format!("Invalid selector: {}", e)))?;

        document
            .select(&selector)
            .map(|el| element_text(&el))
            .find(|text| !text.is_empty())
            .ok_or_else(|| Error::Scraping(format!("No element found for selector: {:?}", selector)))
    }

    pub fn extract_texts(document: &Html, selector: &str) -> Result<Vec<String>> {
        let selector = Selector::parse(selector)
            .map_err(|e| Error::Scraping(format!("Invalid selector: {}", e)))?;

        Ok(document
            .select(&selector)
            .map(|el| element_text(&el))
            .filter(|text| !text.is_empty())
            .collect())
    }

    /// Text of every `<p>` under `root`, one entry per paragraph.
    pub fn paragraphs_within(root: &ElementRef) -> Vec<String> {
        let Ok(selector) = Selector::parse("p") else {
            return Vec::new();
        };
        root.select(&selector)
            .map(|el| element_text(&el))
            .filter(|text| !text.is_empty())
            .collect()
    }
}
