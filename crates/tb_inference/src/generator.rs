use std::sync::Arc;
use tb_core::config::InferenceSettings;
use tb_core::{Error, InferenceModel, Result};
use tracing::{debug, error, info};

use crate::models::create_model;
use crate::prompt::build_prompt;

pub const MODEL_UNAVAILABLE: &str =
    "The generative model is not available due to a configuration error.";
pub const GENERATION_FAILED: &str =
    "An error occurred while generating the summary. Please try again.";

/// Turns a topic plus article texts into a Markdown summary with one model call.
#[derive(Clone)]
pub struct SummaryGenerator {
    model: Option<Arc<dyn InferenceModel>>,
    prompt_ceiling: usize,
}

impl SummaryGenerator {
    pub fn new(model: Option<Arc<dyn InferenceModel>>, prompt_ceiling: usize) -> Self {
        Self {
            model,
            prompt_ceiling,
        }
    }

    /// Builds the model from settings. A failure is logged and leaves the
    /// generator without a model rather than aborting startup.
    pub fn from_settings(settings: &InferenceSettings, prompt_ceiling: usize) -> Self {
        let model = match create_model(settings) {
            Ok(model) => {
                info!("🧠 Inference model configured (using {})", model.name());
                Some(model)
            }
            Err(e) => {
                error!("Failed to configure the generative model: {}", e);
                None
            }
        };
        Self::new(model, prompt_ceiling)
    }

    pub fn is_available(&self) -> bool {
        self.model.is_some()
    }

    pub fn prompt_ceiling(&self) -> usize {
        self.prompt_ceiling
    }

    pub async fn try_generate<S: AsRef<str> + Sync>(&self, topic: &str, articles: &[S]) -> Result<String> {
        let model = self
            .model
            .as_ref()
            .ok_or_else(|| Error::ConfigurationMissing("generative model".to_string()))?;

        let prompt = build_prompt(topic, articles, self.prompt_ceiling);
        debug!(
            "Prompt for {:?}: {} article chars (truncated: {})",
            topic, prompt.combined_chars, prompt.truncated
        );
        model.generate(&prompt.text).await
    }

    /// Never fails: a missing model or a failed call yields a fixed message.
    pub async fn generate<S: AsRef<str> + Sync>(&self, topic: &str, articles: &[S]) -> String {
        let Some(model) = self.model.as_ref() else {
            return MODEL_UNAVAILABLE.to_string();
        };

        match self.try_generate(topic, articles).await {
            Ok(text) => text,
            Err(e) => {
                error!("{} call failed: {}", model.name(), e);
                GENERATION_FAILED.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    #[derive(Debug, Default)]
    struct RecordingModel {
        prompts: Mutex<Vec<String>>,
        calls: AtomicUsize,
        fail: bool,
    }

    #[async_trait]
    impl InferenceModel for RecordingModel {
        fn name(&self) -> &str {
            "recording"
        }

        async fn generate(&self, prompt: &str) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.prompts.lock().unwrap().push(prompt.to_string());
            if self.fail {
                return Err(Error::Generation("quota exceeded".to_string()));
            }
            Ok("- Alpha is beta.".to_string())
        }
    }

    #[tokio::test]
    async fn test_unavailable_model_returns_apology() {
        let generator = SummaryGenerator::new(None, 20000);
        assert!(!generator.is_available());
        assert_eq!(generator.generate("x", &["Alpha beta."]).await, MODEL_UNAVAILABLE);
        assert!(generator.try_generate("x", &["Alpha beta."]).await.is_err());
    }

    #[tokio::test]
    async fn test_generate_passes_output_through() {
        let model = Arc::new(RecordingModel::default());
        let generator = SummaryGenerator::new(Some(model.clone()), 20000);
        let summary = generator.generate("x", &["Alpha beta."]).await;
        assert_eq!(summary, "- Alpha is beta.");
        assert_eq!(model.calls.load(Ordering::SeqCst), 1);
        assert!(model.prompts.lock().unwrap()[0].ends_with("Alpha beta."));
    }

    #[tokio::test]
    async fn test_failure_is_not_retried() {
        let model = Arc::new(RecordingModel {
            fail: true,
            ..Default::default()
        });
        let generator = SummaryGenerator::new(Some(model.clone()), 20000);
        assert_eq!(generator.generate("x", &["a"]).await, GENERATION_FAILED);
        assert_eq!(model.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_empty_articles_still_return_a_string() {
        let model = Arc::new(RecordingModel::default());
        let generator = SummaryGenerator::new(Some(model), 20000);
        let summary = generator.generate::<String>("x", &[]).await;
        assert!(!summary.is_empty());
    }

    #[tokio::test]
    async fn test_prompt_respects_ceiling() {
        let model = Arc::new(RecordingModel::default());
        let generator = SummaryGenerator::new(Some(model.clone()), 20000);
        let articles: Vec<String> = (0..10).map(|_| "z".repeat(3000)).collect();
        generator.generate("x", &articles).await;

        let prompt = model.prompts.lock().unwrap()[0].clone();
        let blob = prompt.split_once("### Articles for Analysis:\n").unwrap().1;
        assert_eq!(blob.chars().count(), 20000);
    }

    #[test]
    fn test_from_settings_without_key() {
        let generator = SummaryGenerator::from_settings(&InferenceSettings::default(), 20000);
        assert!(!generator.is_available());
        assert_eq!(generator.prompt_ceiling(), 20000);
    }
}
