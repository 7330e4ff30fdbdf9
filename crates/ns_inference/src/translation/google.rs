use std::time::Duration;

use async_trait::async_trait;
use ns_core::{Error, Result, Translator};
use reqwest::Client;
use serde_json::Value;

const ENDPOINT: &str = "https://translate.googleapis.com/translate_a/single";

/// Client for the public Google Translate web endpoint.
#[derive(Debug, Clone)]
pub struct GoogleTranslator {
    client: Client,
    endpoint: String,
}

impl GoogleTranslator {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: ENDPOINT.to_string(),
        })
    }
}

/// Concatenates the translated segments of a `translate_a/single` reply.
///
/// The reply is a nested array; the first element lists one
/// `[translated, original, ...]` entry per input segment.
pub fn parse_translation(value: Value) -> Result<String> {
    let segments = value
        .get(0)
        .and_then(Value::as_array)
        .ok_or_else(|| Error::Translation(format!("Unexpected translation response: {}", value)))?;

    let translated: String = segments
        .iter()
        .filter_map(|segment| segment.get(0).and_then(Value::as_str))
        .collect();

    if translated.trim().is_empty() {
        return Err(Error::Translation("Translation came back empty".to_string()));
    }
    Ok(translated)
}

#[async_trait]
impl Translator for GoogleTranslator {
    fn name(&self) -> &str {
        "Google"
    }

    async fn translate(&self, text: &str, target_language: &str) -> Result<String> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("client", "gtx"),
                ("sl", "auto"),
                ("tl", target_language),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Translation(format!(
                "Translation to '{}' failed with HTTP {}",
                target_language, status
            )));
        }

        let value = response.json::<Value>().await?;
        let translated = parse_translation(value)?;
        tracing::debug!(target_language, chars = translated.len(), "Translated summary");
        Ok(translated)
    }
}
