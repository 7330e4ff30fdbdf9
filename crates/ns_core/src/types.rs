use serde::{Deserialize, Serialize};

use crate::config::{BulletStyle, ResponseDefaults};

/// Size tier requested by the caller for the generated summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthPreset {
    Short,
    #[default]
    Medium,
    Long,
}

impl LengthPreset {
    /// Parses the `length` field as sent by the front end.
    /// Only "short" and "long" are recognised, everything else is medium.
    pub fn from_wire(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("short") => Self::Short,
            Some("long") => Self::Long,
            _ => Self::Medium,
        }
    }
}

/// Token budget handed to a summarization backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthTarget {
    pub max_tokens: u32,
    pub min_tokens: u32,
}

/// A single summarize call, after blank fields have been dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SummarizeRequest {
    pub url: Option<String>,
    pub text: Option<String>,
    pub target_language: Option<String>,
    pub length_preset: LengthPreset,
}

impl SummarizeRequest {
    pub fn new(
        url: Option<String>,
        text: Option<String>,
        language: Option<String>,
        length: Option<&str>,
    ) -> Self {
        Self {
            url: non_blank(url),
            text: non_blank(text),
            target_language: non_blank(language),
            length_preset: LengthPreset::from_wire(length),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Body text plus whatever metadata the winning extraction strategy found.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedArticle {
    pub body_text: String,
    pub title: Option<String>,
    pub author: Option<String>,
    pub publish_date: Option<String>,
    pub image_url: Option<String>,
    /// URL after redirects, or the requested URL when unknown.
    pub final_url: String,
    /// Name of the strategy that produced this article.
    pub strategy: String,
}

impl ExtractedArticle {
    pub fn word_count(&self) -> usize {
        crate::text::word_count(&self.body_text)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SummaryResult {
    pub bullets: Vec<String>,
}

impl SummaryResult {
    pub fn is_empty(&self) -> bool {
        self.bullets.is_empty()
    }

    pub fn joined(&self, style: &BulletStyle) -> String {
        self.bullets.join(&style.separator)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryResponse {
    pub title: String,
    pub author: String,
    pub date: String,
    pub image: String,
    pub summary: String,
}

impl SummaryResponse {
    /// Builds the success payload, filling metadata gaps from `defaults`.
    /// Pasted text has no article, so every field falls back.
    pub fn from_parts(
        article: Option<&ExtractedArticle>,
        summary: &SummaryResult,
        defaults: &ResponseDefaults,
        bullets: &BulletStyle,
    ) -> Self {
        let pick = |field: Option<&Option<String>>, fallback: &str| {
            field
                .and_then(|v| v.as_deref())
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .unwrap_or(fallback)
                .to_string()
        };

        Self {
            title: pick(article.map(|a| &a.title), &defaults.title),
            author: pick(article.map(|a| &a.author), &defaults.author),
            date: pick(article.map(|a| &a.publish_date), &defaults.date),
            image: pick(article.map(|a| &a.image_url), &defaults.image),
            summary: summary.joined(bullets),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self { error: error.into() }
    }
}
