use ns_core::{text, Error, ExtractedArticle, SummarizeRequest, SummaryResponse};
use ns_inference::{format_bullets, needs_translation};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::AppState;

#[derive(Error, Debug)]
pub enum RequestError {
    /// Not enough text to summarize, from either the URL or the pasted text.
    #[error("Could not extract article text.")]
    Validation { words: usize, min_words: usize },

    #[error("{0}")]
    Summarization(#[source] Error),

    #[error("{0}")]
    Translation(#[source] Error),

    #[error("The summarizer returned an empty summary.")]
    EmptySummary,
}

/// Runs one summarize request end to end: extract, validate, truncate,
/// summarize, translate, format.
pub async fn summarize_request(
    state: &AppState,
    request: SummarizeRequest,
) -> Result<SummaryResponse, RequestError> {
    let settings = &state.settings;

    let mut article: Option<ExtractedArticle> = None;
    if let Some(url) = request.url.as_deref() {
        match state.pipeline.run(url).await {
            Ok(extracted) => article = Some(extracted),
            Err(e) => warn!(url, attempts = %e.summary(), "{}", e),
        }
    }

    let body = match (&article, request.text.as_deref()) {
        (Some(article), _) => article.body_text.as_str(),
        (None, Some(text)) => text,
        (None, None) => "",
    };

    let words = text::word_count(body);
    if words < settings.min_words {
        info!(words, min_words = settings.min_words, "Rejecting request with too little text");
        return Err(RequestError::Validation {
            words,
            min_words: settings.min_words,
        });
    }

    let input = text::truncate_words(body, settings.max_input_words);
    let target = settings.length_targets.target(request.length_preset);
    debug!(
        words,
        kept = settings.max_input_words.min(words),
        max_tokens = target.max_tokens,
        summarizer = state.summarizer.name(),
        "Summarizing"
    );

    let mut summary = state
        .summarizer
        .summarize(&input, target)
        .await
        .map_err(RequestError::Summarization)?;

    if let Some(language) = request
        .target_language
        .as_deref()
        .filter(|lang| needs_translation(Some(lang), &settings.default_language))
    {
        summary = state
            .translator
            .translate(&summary, language)
            .await
            .map_err(RequestError::Translation)?;
    }

    let bullets = format_bullets(&summary, &settings.bullets);
    if bullets.is_empty() {
        return Err(RequestError::EmptySummary);
    }

    Ok(SummaryResponse::from_parts(
        article.as_ref(),
        &bullets,
        &settings.defaults,
        &settings.bullets,
    ))
}
