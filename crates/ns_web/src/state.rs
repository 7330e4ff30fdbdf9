use std::sync::Arc;

use ns_core::{Settings, Summarizer, Translator};
use ns_scrapers::ExtractionPipeline;

/// Shared, read-only request context built once at startup.
pub struct AppState {
    pub pipeline: ExtractionPipeline,
    pub summarizer: Arc<dyn Summarizer>,
    pub translator: Arc<dyn Translator>,
    pub settings: Settings,
}

impl AppState {
    pub fn new(
        pipeline: ExtractionPipeline,
        summarizer: Arc<dyn Summarizer>,
        translator: Arc<dyn Translator>,
        settings: Settings,
    ) -> Self {
        Self {
            pipeline,
            summarizer,
            translator,
            settings,
        }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("pipeline", &self.pipeline)
            .field("summarizer", &self.summarizer.name())
            .field("translator", &self.translator.name())
            .field("settings", &self.settings)
            .finish()
    }
}
