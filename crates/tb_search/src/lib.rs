use tb_core::SearchProvider;
use tracing::error;

pub mod google;

pub use google::GoogleSearchProvider;

/// Runs one search and collapses every failure into an empty list.
///
/// Misconfiguration and provider errors are logged here; callers only see
/// "no results".
pub async fn search_articles(
    provider: &dyn SearchProvider,
    topic: &str,
    max_results: usize,
) -> Vec<String> {
    match provider.search(topic, max_results).await {
        Ok(mut links) => {
            links.truncate(max_results);
            links
        }
        Err(e) => {
            error!("❌ {} search failed for {:?}: {}", provider.name(), topic, e);
            Vec::new()
        }
    }
}

pub mod prelude {
    pub use super::google::GoogleSearchProvider;
    pub use super::search_articles;
}
