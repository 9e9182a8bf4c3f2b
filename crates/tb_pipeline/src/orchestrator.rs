use chrono::Utc;
use std::sync::Arc;
use tb_core::logging::Logger;
use tb_core::{ArticleFetcher, PipelineStage, Result, SearchProvider, Settings, SummaryReport};
use tb_inference::SummaryGenerator;
use tb_scrapers::{FetchCoordinator, HttpArticleFetcher};
use tb_search::{search_articles, GoogleSearchProvider};

use crate::render::markdown_to_html;

pub const EMPTY_TOPIC: &str = "Please enter a valid topic to summarize.";
pub const NO_ARTICLES: &str = "❌ Could not find any relevant articles for this topic. Please check your API keys or try a different topic.";
pub const EXTRACTION_FAILED: &str =
    "❌ Found articles, but failed to extract content from all of them.";

/// search -> fetch -> generate -> render, stopping at the first stage that
/// comes back empty.
#[derive(Clone)]
pub struct Pipeline {
    search: Arc<dyn SearchProvider>,
    coordinator: FetchCoordinator,
    generator: SummaryGenerator,
    max_results: usize,
}

impl Pipeline {
    pub fn new(
        search: Arc<dyn SearchProvider>,
        coordinator: FetchCoordinator,
        generator: SummaryGenerator,
        max_results: usize,
    ) -> Self {
        Self {
            search,
            coordinator,
            generator,
            max_results,
        }
    }

    /// Wires the Google search provider, the HTTP fetcher and the configured
    /// model. Missing credentials only degrade the affected stage.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let limits = settings.limits;
        let search = GoogleSearchProvider::new(&settings.search);
        if !search.is_configured() {
            tracing::error!("Google API key or CSE ID not configured; every search will come back empty");
        }

        let fetcher: Arc<dyn ArticleFetcher> = Arc::new(HttpArticleFetcher::new(limits.fetch_timeout)?);
        let coordinator = FetchCoordinator::new(fetcher, limits.workers, limits.max_chars);
        let generator = SummaryGenerator::from_settings(&settings.inference, limits.prompt_ceiling);

        Ok(Self::new(Arc::new(search), coordinator, generator, limits.max_results))
    }

    pub fn generator(&self) -> &SummaryGenerator {
        &self.generator
    }

    pub async fn run(&self, topic: &str) -> SummaryReport {
        let topic = topic.trim();
        if topic.is_empty() {
            return report(PipelineStage::EmptyTopic, "", Vec::new(), EMPTY_TOPIC.to_string());
        }

        let log = Logger::new().with_prefix(format!("[{}]", topic));
        log.info("🔍 Searching for articles");
        let links = search_articles(self.search.as_ref(), topic, self.max_results).await;
        if links.is_empty() {
            log.warn("No links found, stopping");
            return report(PipelineStage::NoArticles, topic, Vec::new(), NO_ARTICLES.to_string());
        }

        log.info(&format!("🦗 Fetching {} articles", links.len()));
        let articles = self.coordinator.fetch_all(&links).await;
        if articles.is_empty() {
            log.warn("Every article failed to extract, stopping");
            return report(PipelineStage::ExtractionFailed, topic, links, EXTRACTION_FAILED.to_string());
        }

        log.info(&format!("🤖 Generating summary from {} articles", articles.len()));
        let texts: Vec<&str> = articles.iter().map(|a| a.text.as_str()).collect();
        let markdown = self.generator.generate(topic, &texts).await;
        let html = markdown_to_html(&markdown);

        log.info("✨ Summary ready");
        report(PipelineStage::SummaryReady, topic, links, html)
    }
}

fn report(stage: PipelineStage, topic: &str, links: Vec<String>, summary_html: String) -> SummaryReport {
    SummaryReport {
        stage,
        topic: topic.to_string(),
        links,
        summary_html,
        generated_at: Utc::now(),
    }
}
