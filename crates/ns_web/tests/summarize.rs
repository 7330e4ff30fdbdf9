use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use ns_core::{
    Error, ExtractedArticle, LengthTarget, Result, Settings, Summarizer, SummarizeRequest,
    Translator,
};
use ns_scrapers::{ExtractionPipeline, ExtractionStrategy};
use ns_web::{create_app, summarize_request, AppState, RequestError};
use serde_json::{json, Value};
use tower::ServiceExt;
use url::Url;

const SUMMARY: &str = "The council approved the budget. Taxes stay flat. Parks get more money. Roads wait a year.";

fn long_text(words: usize) -> String {
    (0..words).map(|i| format!("word{}", i)).collect::<Vec<_>>().join(" ")
}

struct CountingSummarizer {
    calls: Arc<AtomicUsize>,
    last_target: Arc<std::sync::Mutex<Option<(usize, LengthTarget)>>>,
    reply: std::result::Result<String, String>,
}

impl CountingSummarizer {
    fn new(calls: Arc<AtomicUsize>, reply: std::result::Result<&str, &str>) -> Self {
        Self {
            calls,
            last_target: Arc::new(std::sync::Mutex::new(None)),
            reply: reply.map(str::to_string).map_err(str::to_string),
        }
    }
}

#[async_trait]
impl Summarizer for CountingSummarizer {
    fn name(&self) -> &str {
        "counting"
    }

    async fn summarize(&self, text: &str, target: LengthTarget) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_target.lock().unwrap() = Some((text.split_whitespace().count(), target));
        self.reply.clone().map_err(Error::Inference)
    }
}

struct PanickingSummarizer;

#[async_trait]
impl Summarizer for PanickingSummarizer {
    fn name(&self) -> &str {
        "panicking"
    }

    async fn summarize(&self, _text: &str, _target: LengthTarget) -> Result<String> {
        let choices: Vec<String> = Vec::new();
        Ok(choices[0].clone())
    }
}

struct RecordingTranslator {
    calls: Arc<AtomicUsize>,
}

#[async_trait]
impl Translator for RecordingTranslator {
    fn name(&self) -> &str {
        "recording"
    }

    async fn translate(&self, _text: &str, target_language: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(format!("Traduit en {}. Deuxième phrase. Troisième phrase.", target_language))
    }
}

struct ArticleStrategy;

#[async_trait]
impl ExtractionStrategy for ArticleStrategy {
    fn name(&self) -> &str {
        "fixture"
    }

    async fn extract(&self, url: &Url) -> Result<ExtractedArticle> {
        Ok(ExtractedArticle {
            body_text: long_text(120),
            title: Some("Council passes budget".to_string()),
            author: Some("Jane Reporter".to_string()),
            publish_date: Some("2024-03-01".to_string()),
            image_url: None,
            final_url: url.to_string(),
            strategy: String::new(),
        })
    }
}

struct Harness {
    summarizer_calls: Arc<AtomicUsize>,
    last_input: Arc<std::sync::Mutex<Option<(usize, LengthTarget)>>>,
    translator_calls: Arc<AtomicUsize>,
    state: AppState,
}

fn harness(reply: std::result::Result<&str, &str>) -> Harness {
    let summarizer_calls = Arc::new(AtomicUsize::new(0));
    let translator_calls = Arc::new(AtomicUsize::new(0));
    let settings = Settings::default();
    let summarizer = CountingSummarizer::new(summarizer_calls.clone(), reply);
    let last_input = summarizer.last_target.clone();
    let state = AppState::new(
        ExtractionPipeline::new(vec![Box::new(ArticleStrategy)], settings.min_words),
        Arc::new(summarizer),
        Arc::new(RecordingTranslator {
            calls: translator_calls.clone(),
        }),
        settings,
    );
    Harness {
        summarizer_calls,
        last_input,
        translator_calls,
        state,
    }
}

async fn post(state: AppState, content_type: &str, body: String) -> (StatusCode, Value) {
    let app = create_app(state, None);
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/summarize")
                .header(header::CONTENT_TYPE, content_type)
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn short_text_fails_validation_without_backend_call() {
    let h = harness(Ok(SUMMARY));
    let calls = h.summarizer_calls.clone();

    let (status, body) = post(
        h.state,
        "application/json",
        json!({"text": "Too short to summarize."}).to_string(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"error": "Could not extract article text."}));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn pasted_text_gets_three_bullets_and_defaults() {
    let h = harness(Ok(SUMMARY));

    let (status, body) = post(
        h.state,
        "application/json",
        json!({"text": long_text(80), "length": "short"}).to_string(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "title": "News Article",
            "author": "Unknown",
            "date": "N/A",
            "image": "/static/news.jpg",
            "summary": "• The council approved the budget<br>• Taxes stay flat<br>• Parks get more money"
        })
    );
}

#[tokio::test]
async fn form_and_json_bodies_agree() {
    let text = long_text(60);

    let (_, from_json) = post(
        harness(Ok(SUMMARY)).state,
        "application/json",
        json!({"text": text, "language": "en"}).to_string(),
    )
    .await;
    let (_, from_form) = post(
        harness(Ok(SUMMARY)).state,
        "application/x-www-form-urlencoded",
        format!("text={}&language=en", text.replace(' ', "+")),
    )
    .await;

    assert_eq!(from_json, from_form);
    assert!(from_json.get("summary").is_some());
}

#[tokio::test]
async fn undecodable_body_is_an_empty_request() {
    let h = harness(Ok(SUMMARY));
    let (status, body) = post(h.state, "application/json", "{not json".to_string()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"error": "Could not extract article text."}));
}

#[tokio::test]
async fn summarizer_error_is_reported_in_envelope() {
    let h = harness(Err("Model is currently loading"));
    let (status, body) = post(
        h.state,
        "application/json",
        json!({"text": long_text(60)}).to_string(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"error": "Inference error: Model is currently loading"}));
}

#[tokio::test]
async fn url_article_metadata_and_input_size() {
    let h = harness(Ok(SUMMARY));
    let request = SummarizeRequest::new(
        Some("example.com/news/budget".to_string()),
        None,
        None,
        Some("long"),
    );

    let response = summarize_request(&h.state, request).await.unwrap();
    assert_eq!(response.title, "Council passes budget");
    assert_eq!(response.author, "Jane Reporter");
    assert_eq!(response.date, "2024-03-01");
    assert_eq!(response.image, "/static/news.jpg");
    assert_eq!(h.summarizer_calls.load(Ordering::SeqCst), 1);

    let (words, target) = h.last_input.lock().unwrap().unwrap();
    assert_eq!(words, 120);
    assert_eq!(target.max_tokens, 200);
}

#[tokio::test]
async fn long_input_is_truncated_before_summarizing() {
    let calls = Arc::new(AtomicUsize::new(0));
    let summarizer = Arc::new(CountingSummarizer::new(calls.clone(), Ok(SUMMARY)));
    let settings = Settings::default();
    let state = AppState::new(
        ExtractionPipeline::new(vec![], settings.min_words),
        summarizer.clone(),
        Arc::new(RecordingTranslator {
            calls: Arc::new(AtomicUsize::new(0)),
        }),
        settings,
    );

    let request = SummarizeRequest::new(None, Some(long_text(2000)), None, Some("long"));
    summarize_request(&state, request).await.unwrap();

    let (words, target) = summarizer.last_target.lock().unwrap().unwrap();
    assert_eq!(words, 900);
    assert_eq!(target.max_tokens, 200);
    assert_eq!(target.min_tokens, 40);
}

#[tokio::test]
async fn translation_only_for_non_default_language() {
    let h = harness(Ok(SUMMARY));
    let request = SummarizeRequest::new(None, Some(long_text(60)), Some("fr".to_string()), None);
    let response = summarize_request(&h.state, request).await.unwrap();
    assert_eq!(
        response.summary,
        "• Traduit en fr<br>• Deuxième phrase<br>• Troisième phrase."
    );
    assert_eq!(h.translator_calls.load(Ordering::SeqCst), 1);

    let request = SummarizeRequest::new(None, Some(long_text(60)), Some("en".to_string()), None);
    summarize_request(&h.state, request).await.unwrap();
    assert_eq!(h.translator_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn empty_summary_is_an_error() {
    let h = harness(Ok("   "));
    let request = SummarizeRequest::new(None, Some(long_text(60)), None, None);
    let err = summarize_request(&h.state, request).await.unwrap_err();
    assert!(matches!(err, RequestError::EmptySummary));
}

#[tokio::test]
async fn failed_extraction_falls_back_to_pasted_text() {
    let h = harness(Ok(SUMMARY));
    let request = SummarizeRequest::new(
        Some("ftp://example.com/file".to_string()),
        Some(long_text(60)),
        None,
        None,
    );
    let response = summarize_request(&h.state, request).await.unwrap();
    assert_eq!(response.title, "News Article");
    assert_eq!(h.summarizer_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn panicking_backend_gets_error_envelope() {
    let settings = Settings::default();
    let state = AppState::new(
        ExtractionPipeline::new(vec![], settings.min_words),
        Arc::new(PanickingSummarizer),
        Arc::new(RecordingTranslator {
            calls: Arc::new(AtomicUsize::new(0)),
        }),
        settings,
    );

    let (status, body) = post(
        state,
        "application/json",
        json!({"text": long_text(60)}).to_string(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"error": "Internal error"}));
}
