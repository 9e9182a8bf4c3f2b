use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Extracted body text of one article, already cut to the fetch budget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleContent {
    pub url: String,
    pub title: Option<String>,
    pub text: String,
}

/// Which terminal state a pipeline run ended in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStage {
    EmptyTopic,
    NoArticles,
    ExtractionFailed,
    SummaryReady,
}

impl PipelineStage {
    pub fn is_success(&self) -> bool {
        matches!(self, PipelineStage::SummaryReady)
    }
}

/// Everything the rendering layer needs to show the result of one run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryReport {
    pub stage: PipelineStage,
    pub topic: String,
    pub links: Vec<String>,
    /// Rendered summary HTML, or the plain user-facing message for failed stages.
    pub summary_html: String,
    pub generated_at: DateTime<Utc>,
}

/// Cuts `text` to at most `max_chars` characters. A plain prefix cut, never
/// splitting a UTF-8 sequence.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_chars_prefix_cut() {
        let text = "a".repeat(7000);
        assert_eq!(truncate_chars(&text, 3000).chars().count(), 3000);
        assert_eq!(truncate_chars("short", 3000), "short");
        assert_eq!(truncate_chars("abc", 0), "");
    }

    #[test]
    fn test_truncate_chars_multibyte() {
        let text = "ñandú café";
        assert_eq!(truncate_chars(text, 5), "ñandú");
    }

    #[test]
    fn test_stage_serializes_snake_case() {
        let json = serde_json::to_string(&PipelineStage::ExtractionFailed).unwrap();
        assert_eq!(json, "\"extraction_failed\"");
        assert!(PipelineStage::SummaryReady.is_success());
        assert!(!PipelineStage::NoArticles.is_success());
    }
}
