//! Title, author, date and lead-image lookups over a parsed page.

use chrono::{DateTime, NaiveDate};
use lazy_static::lazy_static;
use regex::Regex;
use scraper::{Html, Selector};
use serde_json::Value;
use url::Url;

use super::jsonld;
use super::utils;

lazy_static! {
    // Checked in order; the first pattern with a match wins.
    static ref IMAGE_PATTERNS: Vec<Regex> = [
        r#"<meta\s+property=["']og:image["']\s+content=["']([^"']+)["']"#,
        r#"<meta\s+name=["']twitter:image["']\s+content=["']([^"']+)["']"#,
        r#""thumbnailUrl"\s*:\s*"([^"]+)""#,
    ]
    .iter()
    .filter_map(|pattern| Regex::new(pattern).ok())
    .collect();
}

/// Returns the `content` of the first `<meta>` whose `property` or `name`
/// matches one of `keys`, trying keys in order.
pub fn meta_content(document: &Html, keys: &[&str]) -> Option<String> {
    let selector = Selector::parse("meta").ok()?;
    keys.iter().find_map(|key| {
        document.select(&selector).find_map(|el| {
            let attrs = el.value();
            let matches = [attrs.attr("property"), attrs.attr("name"), attrs.attr("itemprop")]
                .iter()
                .flatten()
                .any(|v| v.eq_ignore_ascii_case(key));
            if !matches {
                return None;
            }
            attrs
                .attr("content")
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(str::to_string)
        })
    })
}

pub fn extract_title(document: &Html, objects: &[Value]) -> Option<String> {
    jsonld::extract_headline(objects)
        .or_else(|| meta_content(document, &["og:title", "twitter:title"]))
        .or_else(|| utils::extract_text(document, "h1").ok())
        .or_else(|| utils::extract_text(document, "title").ok())
        .filter(|t| !t.is_empty())
}

pub fn extract_author(document: &Html, objects: &[Value]) -> Option<String> {
    let authors = jsonld::extract_authors(objects);
    if !authors.is_empty() {
        return Some(authors.join(", "));
    }

    // article:author is often a profile URL rather than a name.
    if let Some(author) = meta_content(document, &["author", "article:author", "DC.creator"])
        .filter(|a| !a.starts_with("http"))
    {
        return Some(author);
    }

    ["[rel=\"author\"]", "[itemprop=\"author\"]", ".byline"]
        .iter()
        .find_map(|selector| utils::extract_text(document, selector).ok())
        .filter(|a| !a.is_empty() && a.len() < 100)
}

pub fn extract_date(document: &Html, objects: &[Value]) -> Option<String> {
    jsonld::extract_date_published(objects)
        .or_else(|| {
            meta_content(
                document,
                &["article:published_time", "og:published_time", "pubdate", "date", "DC.date"],
            )
        })
        .or_else(|| {
            let selector = Selector::parse("time[datetime]").ok()?;
            document
                .select(&selector)
                .find_map(|el| el.value().attr("datetime"))
                .map(str::to_string)
        })
        .and_then(|raw| normalize_date(&raw))
}

/// ISO 8601 timestamps become `YYYY-MM-DD`; anything else is kept as written.
pub fn normalize_date(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.format("%Y-%m-%d").to_string());
    }
    if let Some(prefix) = raw.get(..10) {
        if let Ok(date) = NaiveDate::parse_from_str(prefix, "%Y-%m-%d") {
            return Some(date.format("%Y-%m-%d").to_string());
        }
    }
    Some(raw.to_string())
}

/// Lead image from structured metadata (Open Graph, Twitter card, JSON-LD).
pub fn extract_image(document: &Html, objects: &[Value], base: &Url) -> Option<String> {
    meta_content(document, &["og:image", "og:image:url", "twitter:image"])
        .or_else(|| jsonld::extract_image(objects))
        .and_then(|src| resolve_url(base, &src))
}

/// Pattern scan of raw HTML for pages whose metadata did not parse cleanly.
pub fn scan_image(html: &str, base: &Url) -> Option<String> {
    IMAGE_PATTERNS
        .iter()
        .find_map(|re| re.captures(html).and_then(|caps| caps.get(1)))
        .map(|m| m.as_str().replace("\\/", "/"))
        .and_then(|src| resolve_url(base, &src))
}

fn resolve_url(base: &Url, candidate: &str) -> Option<String> {
    let candidate = candidate.trim();
    if candidate.is_empty() {
        return None;
    }
    base.join(candidate).ok().map(|u| u.to_string())
}
