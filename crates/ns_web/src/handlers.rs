use std::convert::Infallible;
use std::sync::Arc;

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request, State},
    http::header,
    response::IntoResponse,
    Form, Json,
};
use ns_core::{ErrorResponse, SummarizeRequest, SummaryResponse};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::service::{summarize_request, RequestError};
use crate::AppState;

/// Wire fields of a summarize call, shared by the JSON and form encodings.
#[derive(Debug, Default, Deserialize)]
pub struct SummarizeFields {
    pub url: Option<String>,
    pub text: Option<String>,
    pub language: Option<String>,
    pub length: Option<String>,
}

impl From<SummarizeFields> for SummarizeRequest {
    fn from(fields: SummarizeFields) -> Self {
        SummarizeRequest::new(fields.url, fields.text, fields.language, fields.length.as_deref())
    }
}

/// Accepts a form-encoded or JSON body. Anything undecodable becomes an
/// empty request, which then fails validation.
pub struct SummarizePayload(pub SummarizeRequest);

#[async_trait]
impl<S> FromRequest<S> for SummarizePayload
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_form = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.starts_with("application/x-www-form-urlencoded"))
            .unwrap_or(false);

        let fields = if is_form {
            match Form::<SummarizeFields>::from_request(req, state).await {
                Ok(Form(fields)) => fields,
                Err(rejection) => {
                    info!("Ignoring undecodable form body: {}", rejection);
                    SummarizeFields::default()
                }
            }
        } else {
            match Bytes::from_request(req, state).await {
                Ok(bytes) => serde_json::from_slice(&bytes).unwrap_or_else(|e| {
                    info!("Ignoring undecodable JSON body: {}", e);
                    SummarizeFields::default()
                }),
                Err(rejection) => {
                    info!("Could not read request body: {}", rejection);
                    SummarizeFields::default()
                }
            }
        };

        Ok(SummarizePayload(fields.into()))
    }
}

/// Either shape of the `/summarize` reply; both are sent with status 200.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum SummarizeReply {
    Summary(SummaryResponse),
    Error(ErrorResponse),
}

impl From<Result<SummaryResponse, RequestError>> for SummarizeReply {
    fn from(result: Result<SummaryResponse, RequestError>) -> Self {
        match result {
            Ok(summary) => SummarizeReply::Summary(summary),
            Err(e) => SummarizeReply::Error(ErrorResponse::new(e.to_string())),
        }
    }
}

pub async fn summarize(
    State(state): State<Arc<AppState>>,
    SummarizePayload(request): SummarizePayload,
) -> impl IntoResponse {
    let result = summarize_request(&state, request).await;
    match &result {
        Ok(summary) => info!(title = %summary.title, "Summary ready"),
        Err(RequestError::Validation { words, min_words }) => {
            info!(words, min_words, "Validation failed")
        }
        Err(e) => error!(error = ?e, "Summarize request failed: {}", e),
    }
    Json(SummarizeReply::from(result))
}
