pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod types;

pub use config::{Limits, Settings};
pub use error::{Error, Result};
pub use models::{ArticleFetcher, InferenceModel, SearchProvider};
pub use types::{truncate_chars, ArticleContent, PipelineStage, SummaryReport};

pub mod prelude {
    pub use super::{ArticleContent, Error, Result};
    pub use super::{ArticleFetcher, InferenceModel, SearchProvider};
}
