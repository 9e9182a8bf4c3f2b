use std::fmt;
use tb_core::{InferenceModel, Result};

use crate::prompt::{ARTICLES_HEADING, ARTICLE_SEPARATOR};

/// Offline model: one bullet per article, made of that article's first
/// sentence. Useful for demos and for running the pipeline without a key.
pub struct DummyModel;

impl fmt::Debug for DummyModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DummyModel").finish()
    }
}

impl DummyModel {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DummyModel {
    fn default() -> Self {
        Self::new()
    }
}

fn first_sentence(text: &str) -> Option<String> {
    let text = text.trim();
    let end = text
        .find(|c: char| c == '.' || c == '!' || c == '?')
        .map(|i| i + 1)
        .unwrap_or(text.len());
    let sentence = text[..end].split_whitespace().collect::<Vec<_>>().join(" ");
    (!sentence.is_empty()).then_some(sentence)
}

#[async_trait::async_trait]
impl InferenceModel for DummyModel {
    fn name(&self) -> &str {
        "dummy"
    }

    async fn generate(&self, prompt: &str) -> Result<String> {
        let articles = prompt
            .split_once(ARTICLES_HEADING)
            .map(|(_, rest)| rest)
            .unwrap_or(prompt);

        let bullets: Vec<String> = articles
            .split(ARTICLE_SEPARATOR)
            .filter_map(first_sentence)
            .map(|s| format!("- {}", s))
            .collect();

        tracing::debug!("Dummy model produced {} bullets", bullets.len());
        if bullets.is_empty() {
            return Ok("- No content was available to summarize.".to_string());
        }
        Ok(bullets.join("\n"))
    }
}
