pub mod config;
pub mod error;
pub mod models;
pub mod text;
pub mod types;

pub use config::{BulletStyle, FetchConfig, LengthTargets, ResponseDefaults, Settings};
pub use error::{Error, Result};
pub use models::{Summarizer, Translator};
pub use types::{
    ErrorResponse, ExtractedArticle, LengthPreset, LengthTarget, SummarizeRequest, SummaryResponse,
    SummaryResult,
};
