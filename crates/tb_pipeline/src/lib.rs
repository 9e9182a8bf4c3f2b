pub mod orchestrator;
pub mod render;

pub use orchestrator::{Pipeline, EMPTY_TOPIC, EXTRACTION_FAILED, NO_ARTICLES};
pub use render::{escape_text, markdown_to_html};

pub mod prelude {
    pub use super::Pipeline;
    pub use tb_core::{PipelineStage, Settings, SummaryReport};
}
