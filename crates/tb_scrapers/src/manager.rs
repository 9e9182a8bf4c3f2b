use std::sync::Arc;
use tb_core::{ArticleContent, ArticleFetcher};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{error, info};

use crate::fetcher::fetch_article_content;

/// Fans URLs out to a fixed number of concurrent fetch workers.
///
/// Every URL gets its own task, but only `workers` of them hold a permit at
/// once; the rest wait for a free slot. Results come back in completion
/// order and failed fetches are dropped.
#[derive(Clone)]
pub struct FetchCoordinator {
    fetcher: Arc<dyn ArticleFetcher>,
    semaphore_size: usize,
    max_chars: usize,
}

impl FetchCoordinator {
    pub fn new(fetcher: Arc<dyn ArticleFetcher>, workers: usize, max_chars: usize) -> Self {
        Self {
            fetcher,
            semaphore_size: workers.max(1),
            max_chars,
        }
    }

    pub fn workers(&self) -> usize {
        self.semaphore_size
    }

    pub async fn fetch_all(&self, urls: &[String]) -> Vec<ArticleContent> {
        if urls.is_empty() {
            return Vec::new();
        }

        let semaphore = Arc::new(Semaphore::new(self.semaphore_size));
        let mut tasks = JoinSet::new();

        for url in urls {
            let fetcher = self.fetcher.clone();
            let semaphore = semaphore.clone();
            let url = url.clone();
            let max_chars = self.max_chars;
            tasks.spawn(async move {
                let _permit = semaphore.acquire_owned().await.ok()?;
                fetch_article_content(fetcher.as_ref(), &url, max_chars).await
            });
        }

        let mut articles = Vec::with_capacity(urls.len());
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(Some(article)) => articles.push(article),
                Ok(None) => {}
                Err(e) => error!("❌ Fetch worker aborted: {}", e),
            }
        }

        info!(
            total = urls.len(),
            successful = articles.len(),
            failed = urls.len() - articles.len(),
            "📰 Completed parallel article fetch"
        );
        articles
    }
}
