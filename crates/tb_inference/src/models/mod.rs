use std::sync::Arc;
use tb_core::config::InferenceSettings;
use tb_core::{Error, InferenceModel, Result};

pub mod dummy;
pub mod gemini;

pub use dummy::DummyModel;
pub use gemini::GeminiModel;

/// Builds the configured model once at startup.
///
/// An error here means the generator runs without a model and answers every
/// request with its fixed apology.
pub fn create_model(settings: &InferenceSettings) -> Result<Arc<dyn InferenceModel>> {
    match settings.model.trim().to_lowercase().as_str() {
        "gemini" => Ok(Arc::new(GeminiModel::new(
            settings.api_key.as_deref(),
            &settings.model_name,
        )?)),
        "dummy" => Ok(Arc::new(DummyModel::new())),
        other => Err(Error::ConfigurationMissing(format!(
            "unknown model backend '{}' (expected gemini or dummy)",
            other
        ))),
    }
}
