use async_trait::async_trait;
use std::fmt;
use crate::types::ArticleContent;
use crate::Result;

#[async_trait]
pub trait InferenceModel: Send + Sync + fmt::Debug {
    /// Name used in logs
    fn name(&self) -> &str;

    /// Run the prompt through the model once and return its text output
    async fn generate(&self, prompt: &str) -> Result<String>;
}

#[async_trait]
pub trait SearchProvider: Send + Sync {
    fn name(&self) -> &str;

    /// Returns result URLs in the provider's relevance order, at most `max_results`
    async fn search(&self, topic: &str, max_results: usize) -> Result<Vec<String>>;
}

#[async_trait]
pub trait ArticleFetcher: Send + Sync {
    /// Downloads `url` and extracts its body text, cut to `max_chars`.
    /// Empty text is an error, never an `Ok` with an empty string.
    async fn fetch(&self, url: &str, max_chars: usize) -> Result<ArticleContent>;
}
