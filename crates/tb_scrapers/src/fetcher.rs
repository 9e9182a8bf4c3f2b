use async_trait::async_trait;
use reqwest::{redirect, Client};
use std::time::Duration;
use tb_core::{truncate_chars, ArticleContent, ArticleFetcher, Error, Result};
use tracing::{debug, error, info};
use url::Url;

use crate::extractor::extract;

const USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

/// Downloads pages over HTTP and pulls the article body out of the HTML.
#[derive(Debug, Clone)]
pub struct HttpArticleFetcher {
    client: Client,
}

impl HttpArticleFetcher {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .redirect(redirect::Policy::limited(5))
            .build()?;
        Ok(Self { client })
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

pub fn parse_url(url: &str) -> Result<Url> {
    let parsed = Url::parse(url).map_err(|e| Error::InvalidUrl(format!("{}: {}", url, e)))?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        scheme => Err(Error::InvalidUrl(format!("{}: unsupported scheme {}", url, scheme))),
    }
}

#[async_trait]
impl ArticleFetcher for HttpArticleFetcher {
    async fn fetch(&self, url: &str, max_chars: usize) -> Result<ArticleContent> {
        let parsed = parse_url(url)?;

        debug!("Downloading {}", url);
        let response = self.client.get(parsed).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::extraction(url, format!("HTTP {}", status.as_u16())));
        }
        let html = response.text().await?;

        let extracted = extract(&html);
        if extracted.text.trim().is_empty() {
            return Err(Error::extraction(url, "Article text is empty"));
        }

        Ok(ArticleContent {
            url: url.to_string(),
            title: extracted.title,
            text: truncate_chars(&extracted.text, max_chars).to_string(),
        })
    }
}

/// Fetches one article and turns every failure into `None`.
///
/// The cut to `max_chars` and the empty-text check are applied here as well,
/// so the guarantee holds for any [`ArticleFetcher`].
pub async fn fetch_article_content(
    fetcher: &dyn ArticleFetcher,
    url: &str,
    max_chars: usize,
) -> Option<ArticleContent> {
    let result = fetcher.fetch(url, max_chars).await.and_then(|mut content| {
        if content.text.trim().is_empty() {
            return Err(Error::extraction(url, "Article text is empty"));
        }
        content.text = truncate_chars(&content.text, max_chars).to_string();
        Ok(content)
    });

    match result {
        Ok(content) => {
            info!("✅ Extracted content from: {}", url);
            Some(content)
        }
        Err(e) => {
            error!("❌ Failed to extract content from {}: {}", url, e);
            None
        }
    }
}
