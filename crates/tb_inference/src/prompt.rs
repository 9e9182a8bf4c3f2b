use tb_core::truncate_chars;
use tracing::warn;

pub const ARTICLE_SEPARATOR: &str = "\n\n---\n\n";
pub const ARTICLES_HEADING: &str = "### Articles for Analysis:";

/// The single instruction blob sent to the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroundingPrompt {
    pub text: String,
    /// Length in chars of the article blob embedded in `text`.
    pub combined_chars: usize,
    pub truncated: bool,
}

/// Joins the articles in order and cuts the whole blob to `ceiling` chars.
pub fn combine_articles<S: AsRef<str>>(articles: &[S], ceiling: usize) -> (String, bool) {
    let combined = articles
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(ARTICLE_SEPARATOR);

    let cut = truncate_chars(&combined, ceiling);
    if cut.len() < combined.len() {
        warn!(
            "Combined text is too long ({} chars), truncating to {}",
            combined.chars().count(),
            ceiling
        );
        return (cut.to_string(), true);
    }
    (combined, false)
}

pub fn build_prompt<S: AsRef<str>>(topic: &str, articles: &[S], ceiling: usize) -> GroundingPrompt {
    let (combined, truncated) = combine_articles(articles, ceiling);
    let text = format!(
        r#"
You are an expert research summarization assistant. Synthesize the information from several web articles about the topic: **{topic}**.

Follow these rules strictly:
1.  **Format:** Write the summary as a clear, concise bullet-point list in Markdown. Output only the list.
2.  **Content:** Include only key findings, facts, trends and statistics stated explicitly in the articles below. Do not add outside knowledge and do not speculate.
3.  **Tone:** Keep a neutral, factual and professional tone.
4.  **Structure:** Start each bullet with a key insight, followed by at most two supporting sentences of context.

{heading}
{combined}"#,
        topic = topic,
        heading = ARTICLES_HEADING,
        combined = combined,
    );

    GroundingPrompt {
        text,
        combined_chars: combined.chars().count(),
        truncated,
    }
}
