pub mod fetch;
pub mod pipeline;
pub mod scrapers;

pub use pipeline::{Attempt, ExtractionError, ExtractionPipeline};
pub use scrapers::{BoxedStrategy, ExtractionStrategy};

pub mod prelude {
    pub use super::scrapers::ExtractionStrategy;
    pub use super::pipeline::ExtractionPipeline;
    pub use ns_core::{ExtractedArticle, Result, Error};
}
