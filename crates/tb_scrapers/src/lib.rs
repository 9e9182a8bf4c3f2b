pub mod extractor;
pub mod fetcher;
pub mod manager;

pub use fetcher::{fetch_article_content, HttpArticleFetcher};
pub use manager::FetchCoordinator;

pub mod prelude {
    pub use super::{fetch_article_content, FetchCoordinator, HttpArticleFetcher};
    pub use tb_core::{ArticleContent, ArticleFetcher, Error, Result};
}
