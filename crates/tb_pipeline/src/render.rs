use pulldown_cmark::{html, Options, Parser};

/// Renders model Markdown to HTML and strips anything unsafe (scripts,
/// event handlers) the model may have echoed from a scraped page.
pub fn markdown_to_html(markdown: &str) -> String {
    let options = Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH;
    let parser = Parser::new_ext(markdown, options);

    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, parser);
    ammonia::clean(&out)
}

/// Escapes plain text for embedding in HTML.
pub fn escape_text(text: &str) -> String {
    ammonia::clean_text(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bullets_become_list_items() {
        let html = markdown_to_html("- Alpha is beta.\n- **Gamma** rises.");
        assert!(html.contains("<ul>"));
        assert!(html.contains("<li>Alpha is beta.</li>"));
        assert!(html.contains("<li><strong>Gamma</strong> rises.</li>"));
    }

    #[test]
    fn test_fenced_code() {
        let html = markdown_to_html("```\nlet x = 1;\n```");
        assert!(html.contains("<pre><code>let x = 1;"));
    }

    #[test]
    fn test_scripts_are_stripped() {
        let html = markdown_to_html("<script>alert(1)</script>\n\n- ok <img src=x onerror=alert(1)>");
        assert!(!html.contains("<script"));
        assert!(!html.contains("onerror"));
        assert!(html.contains("ok"));
    }

    #[test]
    fn test_plain_message_passes_through() {
        let html = markdown_to_html("An error occurred while generating the summary. Please try again.");
        assert!(html.starts_with("<p>An error occurred"));
    }

    #[test]
    fn test_escape_text() {
        let escaped = escape_text("<b>x</b>");
        assert!(!escaped.contains('<'));
        assert!(escaped.contains("&lt;"));
    }
}
