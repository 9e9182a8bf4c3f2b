use scraper::{ElementRef, Html, Selector};

/// Containers that usually hold the article body, tried in order; the first
/// one with enough text wins.
const CONTENT_SELECTORS: &[&str] = &[
    "article",
    "main",
    "[role='main']",
    ".article-body",
    ".article-content",
    ".article__body",
    ".post-content",
    ".entry-content",
    ".story-body",
    "#article-body",
    "#content",
];

/// Text under these elements is boilerplate, never article body.
const NOISE_TAGS: &[&str] = &[
    "script", "style", "noscript", "template", "nav", "header", "footer", "aside", "form",
    "button", "svg",
];

/// A container has to carry at least this much text to be trusted over `<body>`.
const MIN_CONTAINER_CHARS: usize = 200;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extracted {
    pub title: Option<String>,
    pub text: String,
}

pub fn extract(html: &str) -> Extracted {
    let document = Html::parse_document(html);
    Extracted {
        title: extract_title(&document),
        text: extract_main_text(&document),
    }
}

pub fn extract_title(document: &Html) -> Option<String> {
    let from_title = Selector::parse("title")
        .ok()
        .and_then(|s| document.select(&s).next())
        .map(|el| collapse_whitespace(&el.text().collect::<String>()));

    let from_og = || {
        Selector::parse("meta[property='og:title']")
            .ok()
            .and_then(|s| document.select(&s).next())
            .and_then(|el| el.value().attr("content"))
            .map(collapse_whitespace)
    };

    from_title
        .filter(|t| !t.is_empty())
        .or_else(from_og)
        .filter(|t| !t.is_empty())
}

/// Picks the first substantial content container (falling back to `<body>`)
/// and returns its readable text with boilerplate removed.
pub fn extract_main_text(document: &Html) -> String {
    for selector_str in CONTENT_SELECTORS {
        let Ok(selector) = Selector::parse(selector_str) else {
            continue;
        };
        for element in document.select(&selector) {
            if is_noise(element) {
                continue;
            }
            let text = container_text(element);
            if text.chars().count() >= MIN_CONTAINER_CHARS {
                return text;
            }
        }
    }

    Selector::parse("body")
        .ok()
        .and_then(|s| document.select(&s).next())
        .map(container_text)
        .unwrap_or_default()
}

fn container_text(element: ElementRef) -> String {
    let paragraphs = paragraphs(element);
    if !paragraphs.is_empty() {
        return paragraphs.join("\n\n");
    }
    collapse_whitespace(&visible_text(element))
}

fn paragraphs(element: ElementRef) -> Vec<String> {
    let Ok(selector) = Selector::parse("p") else {
        return Vec::new();
    };
    element
        .select(&selector)
        .filter(|p| !is_noise(*p))
        .map(|p| collapse_whitespace(&visible_text(p)))
        .filter(|text| !text.is_empty())
        .collect()
}

fn visible_text(element: ElementRef) -> String {
    let mut out = String::new();
    for node in element.descendants() {
        let Some(text) = node.value().as_text() else {
            continue;
        };
        let hidden = node
            .ancestors()
            .filter_map(ElementRef::wrap)
            .any(|el| NOISE_TAGS.contains(&el.value().name()));
        if !hidden {
            out.push_str(text);
            out.push(' ');
        }
    }
    out
}

fn is_noise(element: ElementRef) -> bool {
    NOISE_TAGS.contains(&element.value().name())
        || element
            .ancestors()
            .filter_map(ElementRef::wrap)
            .any(|el| NOISE_TAGS.contains(&el.value().name()))
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn long_paragraph(word: &str) -> String {
        std::iter::repeat(word).take(60).collect::<Vec<_>>().join(" ")
    }

    #[test]
    fn test_extract_prefers_article_paragraphs() {
        let html = format!(
            r#"<html><head><title> Fusion news </title></head><body>
                <nav><a href="/">Home</a> <a href="/world">World</a></nav>
                <article>
                    <h1>Headline</h1>
                    <p>{}</p>
                    <aside><p>Subscribe to our newsletter</p></aside>
                    <p>Second   paragraph.</p>
                </article>
                <footer><p>Copyright</p></footer>
            </body></html>"#,
            long_paragraph("plasma")
        );
        let extracted = extract(&html);
        assert_eq!(extracted.title.as_deref(), Some("Fusion news"));
        assert!(extracted.text.starts_with("plasma plasma"));
        assert!(extracted.text.ends_with("\n\nSecond paragraph."));
        assert!(!extracted.text.contains("Home"));
        assert!(!extracted.text.contains("newsletter"));
        assert!(!extracted.text.contains("Copyright"));
    }

    #[test]
    fn test_short_container_falls_back_to_body() {
        let html = format!(
            r#"<html><body>
                <main><p>tiny</p></main>
                <div class="story"><p>{}</p></div>
                <script>var tracking = true;</script>
            </body></html>"#,
            long_paragraph("tokamak")
        );
        let text = extract(&html).text;
        assert!(text.starts_with("tiny\n\ntokamak"));
        assert!(!text.contains("tracking"));
    }

    #[test]
    fn test_earlier_selector_wins_over_more_specific() {
        let html = format!(
            r#"<html><body><main>
                <div class="promo"><p>Promo text for other stories here.</p></div>
                <div class="article-body"><p>{}</p></div>
            </main></body></html>"#,
            long_paragraph("stellarator")
        );
        let text = extract(&html).text;
        assert!(text.starts_with("Promo text for other stories here."));
        assert!(text.contains("stellarator"));
    }

    #[test]
    fn test_text_without_paragraphs() {
        let html = "<html><body><div>Just   some\n loose <b>text</b></div><style>p{}</style></body></html>";
        assert_eq!(extract(html).text, "Just some loose text");
    }

    #[test]
    fn test_boilerplate_only_page_is_empty() {
        let html = r#"<html><body><header>Site</header><nav>Menu</nav><script>x()</script></body></html>"#;
        let extracted = extract(html);
        assert!(extracted.text.is_empty());
        assert!(extracted.title.is_none());
    }

    #[test]
    fn test_og_title_fallback() {
        let html = r#"<html><head><title>  </title><meta property="og:title" content="From OG"></head><body></body></html>"#;
        assert_eq!(extract(html).title.as_deref(), Some("From OG"));
    }
}
