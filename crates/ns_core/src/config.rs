use std::time::Duration;

use crate::types::{LengthPreset, LengthTarget};

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

/// Everything a request handler needs to know, built once at startup.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Minimum words of body text before a summarization call is allowed.
    pub min_words: usize,
    /// Words kept from the body text before it is sent to the summarizer.
    pub max_input_words: usize,
    pub default_language: String,
    pub length_targets: LengthTargets,
    pub bullets: BulletStyle,
    pub defaults: ResponseDefaults,
    pub fetch: FetchConfig,
    /// Base URL of a reader proxy; enables the reader extraction strategy.
    pub reader_proxy: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            min_words: 50,
            max_input_words: 900,
            default_language: "en".to_string(),
            length_targets: LengthTargets::default(),
            bullets: BulletStyle::default(),
            defaults: ResponseDefaults::default(),
            fetch: FetchConfig::default(),
            reader_proxy: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LengthTargets {
    pub short: u32,
    pub medium: u32,
    pub long: u32,
    pub min_tokens: u32,
}

impl Default for LengthTargets {
    fn default() -> Self {
        Self {
            short: 80,
            medium: 130,
            long: 200,
            min_tokens: 40,
        }
    }
}

impl LengthTargets {
    pub fn target(&self, preset: LengthPreset) -> LengthTarget {
        let max_tokens = match preset {
            LengthPreset::Short => self.short,
            LengthPreset::Medium => self.medium,
            LengthPreset::Long => self.long,
        };
        LengthTarget {
            max_tokens,
            min_tokens: self.min_tokens.min(max_tokens),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulletStyle {
    pub marker: String,
    pub separator: String,
    pub max_bullets: usize,
}

impl Default for BulletStyle {
    fn default() -> Self {
        Self {
            marker: "• ".to_string(),
            separator: "<br>".to_string(),
            max_bullets: 3,
        }
    }
}

/// Values shown by the front end when extraction found no metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseDefaults {
    pub title: String,
    pub author: String,
    pub date: String,
    pub image: String,
}

impl Default for ResponseDefaults {
    fn default() -> Self {
        Self {
            title: "News Article".to_string(),
            author: "Unknown".to_string(),
            date: "N/A".to_string(),
            image: "/static/news.jpg".to_string(),
        }
    }
}

/// HTTP settings for fetching article pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchConfig {
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(15),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}
