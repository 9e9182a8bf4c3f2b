use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::fmt;
use std::time::Duration;
use tb_core::config::{non_blank, SearchSettings};
use tb_core::{Error, Result, SearchProvider};
use tracing::{debug, info};

const CUSTOM_SEARCH_URL: &str = "https://www.googleapis.com/customsearch/v1";
/// The Custom Search API rejects `num` outside 1..=10.
const MAX_NUM_PER_REQUEST: usize = 10;

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Deserialize)]
struct SearchItem {
    link: Option<String>,
}

/// Google Custom Search Engine provider.
///
/// Missing credentials do not prevent construction; they surface as
/// [`Error::ConfigurationMissing`] on every search instead.
pub struct GoogleSearchProvider {
    client: Client,
    api_key: Option<String>,
    engine_id: Option<String>,
    base_url: String,
}

impl GoogleSearchProvider {
    pub fn new(settings: &SearchSettings) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            api_key: non_blank(settings.api_key.as_deref()).map(str::to_string),
            engine_id: non_blank(settings.engine_id.as_deref()).map(str::to_string),
            base_url: CUSTOM_SEARCH_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some() && self.engine_id.is_some()
    }

    fn credentials(&self) -> Result<(&str, &str)> {
        match (self.api_key.as_deref(), self.engine_id.as_deref()) {
            (Some(key), Some(cx)) => Ok((key, cx)),
            (None, _) => Err(Error::ConfigurationMissing("GOOGLE_API_KEY".to_string())),
            (_, None) => Err(Error::ConfigurationMissing("GOOGLE_CSE_ID".to_string())),
        }
    }
}

impl fmt::Debug for GoogleSearchProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GoogleSearchProvider")
            .field("api_key", &self.api_key.as_deref().map(|_| "<redacted>"))
            .field("engine_id", &self.engine_id)
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[async_trait]
impl SearchProvider for GoogleSearchProvider {
    fn name(&self) -> &str {
        "google"
    }

    async fn search(&self, topic: &str, max_results: usize) -> Result<Vec<String>> {
        let (key, cx) = self.credentials()?;
        let num = max_results.clamp(1, MAX_NUM_PER_REQUEST).to_string();

        debug!("Querying Google Custom Search for {:?} (num={})", topic, num);
        let response = self
            .client
            .get(&self.base_url)
            .query(&[("key", key), ("cx", cx), ("q", topic), ("num", num.as_str())])
            .send()
            .await?;

        let status = response.status();
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                return Err(Error::Search(format!("credentials rejected (HTTP {})", status.as_u16())));
            }
            StatusCode::TOO_MANY_REQUESTS => {
                return Err(Error::Search("quota exhausted (HTTP 429)".to_string()));
            }
            s if !s.is_success() => {
                let body = response.text().await.unwrap_or_default();
                return Err(Error::Search(format!("HTTP {}: {}", s.as_u16(), body.trim())));
            }
            _ => {}
        }

        let data: SearchResponse = response.json().await?;
        let links: Vec<String> = data
            .items
            .into_iter()
            .filter_map(|item| item.link)
            .take(max_results)
            .collect();

        info!("🔍 Found {} links from Google Search", links.len());
        Ok(links)
    }
}
