use axum::{
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use ns_core::ErrorResponse;
use std::any::Any;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::{
    catch_panic::CatchPanicLayer, cors::CorsLayer, services::ServeDir, trace::TraceLayer,
};

pub mod handlers;
pub mod service;
pub mod state;

pub use service::{summarize_request, RequestError};
pub use state::AppState;

/// Builds the HTTP application. When `static_dir` is set, every path other
/// than `/summarize` is served from it.
pub fn create_app(state: AppState, static_dir: Option<PathBuf>) -> Router {
    let cors = CorsLayer::permissive();

    let mut router = Router::new().route("/summarize", post(handlers::summarize));
    if let Some(dir) = static_dir {
        router = router.fallback_service(ServeDir::new(dir));
    }

    router
        .layer(CatchPanicLayer::custom(panic_reply))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

/// A panicking request still gets the usual `{"error": ...}` envelope.
fn panic_reply(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    tracing::error!(panic = detail, "Request handler panicked");
    Json(ErrorResponse::new("Internal error")).into_response()
}

pub mod prelude {
    pub use ns_core::{Result, Error, SummaryResponse, ErrorResponse};
    pub use crate::{create_app, summarize_request, AppState, RequestError};
}
