use std::fmt;

use async_trait::async_trait;
use ns_core::{Error, LengthTarget, Result, Summarizer};
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;

use crate::Config;

pub const DEFAULT_API_URL: &str =
    "https://router.huggingface.co/hf-inference/models/facebook/bart-large-cnn";

#[derive(Serialize)]
struct SummarizationRequest<'a> {
    inputs: &'a str,
    parameters: Parameters,
}

#[derive(Serialize)]
struct Parameters {
    max_new_tokens: u32,
    min_new_tokens: u32,
}

/// Hosted inference endpoint running a summarization model.
pub struct HuggingFaceSummarizer {
    client: Client,
    api_key: Option<String>,
    api_url: String,
}

impl HuggingFaceSummarizer {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            api_url: config
                .api_url
                .clone()
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
        })
    }

    /// The endpoint answers with `[{"summary_text": ...}]` on success and
    /// `{"error": ...}` when the model is loading, rate limited, or rejects
    /// the input.
    pub fn parse_response(value: Value) -> Result<String> {
        if let Some(error) = value.get("error") {
            let message = error
                .as_str()
                .map(str::to_string)
                .unwrap_or_else(|| error.to_string());
            return Err(Error::Inference(message));
        }

        value
            .as_array()
            .and_then(|items| items.first())
            .and_then(|first| {
                first
                    .get("summary_text")
                    .or_else(|| first.get("generated_text"))
            })
            .and_then(Value::as_str)
            .map(|s| s.trim().to_string())
            .ok_or_else(|| Error::Inference(format!("Unexpected summarizer response: {}", value)))
    }
}

impl fmt::Debug for HuggingFaceSummarizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HuggingFaceSummarizer")
            .field("client", &"<reqwest::Client>")
            .field("api_key", &self.api_key.as_deref().map(|_| "<redacted>"))
            .field("api_url", &self.api_url)
            .finish()
    }
}

#[async_trait]
impl Summarizer for HuggingFaceSummarizer {
    fn name(&self) -> &str {
        "HuggingFace"
    }

    async fn summarize(&self, text: &str, target: LengthTarget) -> Result<String> {
        let request = SummarizationRequest {
            inputs: text,
            parameters: Parameters {
                max_new_tokens: target.max_tokens,
                min_new_tokens: target.min_tokens,
            },
        };

        let mut builder = self.client.post(&self.api_url).json(&request);
        if let Some(api_key) = &self.api_key {
            builder = builder.bearer_auth(api_key);
        }

        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;
        tracing::debug!(%status, bytes = body.len(), "Summarizer responded");

        let value: Value = serde_json::from_str(&body).map_err(|_| {
            Error::Inference(format!("Summarizer returned HTTP {} with a non-JSON body", status))
        })?;
        Self::parse_response(value)
    }
}
