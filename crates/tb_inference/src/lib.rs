pub mod generator;
pub mod models;
pub mod prompt;

pub use generator::{SummaryGenerator, GENERATION_FAILED, MODEL_UNAVAILABLE};
pub use models::create_model;
pub use prompt::{build_prompt, GroundingPrompt};

pub mod prelude {
    pub use super::models::create_model;
    pub use super::SummaryGenerator;
    pub use tb_core::{Error, InferenceModel, Result};
}
