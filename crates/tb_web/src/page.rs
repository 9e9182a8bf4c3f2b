use tb_core::SummaryReport;
use tb_pipeline::escape_text;
use tb_scrapers::fetcher::parse_url;

const STYLE: &str = "body{font-family:system-ui,sans-serif;max-width:48rem;margin:2rem auto;padding:0 1rem;line-height:1.5}\
form{display:flex;gap:.5rem}input[type=text]{flex:1;padding:.5rem}button{padding:.5rem 1rem}\
.summary{margin-top:1.5rem}.sources{font-size:.9rem;color:#555}";

/// Renders the single page: the topic form, and the result of a run if any.
pub fn render_page(report: Option<&SummaryReport>) -> String {
    let topic = report.map(|r| escape_text(&r.topic)).unwrap_or_default();

    let mut body = String::new();
    if let Some(report) = report {
        let summary = if report.stage.is_success() {
            report.summary_html.clone()
        } else {
            format!("<p class=\"message\">{}</p>", escape_text(&report.summary_html))
        };
        body.push_str(&format!("<section class=\"summary\">\n{}\n</section>\n", summary));

        if !report.links.is_empty() {
            body.push_str("<section class=\"sources\">\n<h2>Sources</h2>\n<ol>\n");
            for link in &report.links {
                let text = escape_text(link);
                // Only web links are clickable.
                if parse_url(link).is_ok() {
                    body.push_str(&format!("<li><a href=\"{0}\" rel=\"noopener noreferrer\">{0}</a></li>\n", text));
                } else {
                    body.push_str(&format!("<li>{}</li>\n", text));
                }
            }
            body.push_str("</ol>\n</section>\n");
        }
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Topic Brief</title>
<style>{style}</style>
</head>
<body>
<h1>Topic Brief</h1>
<form method="post" action="/">
<input type="text" name="topic" value="{topic}" placeholder="Enter a topic" autofocus>
<button type="submit">Summarize</button>
</form>
{body}</body>
</html>
"#,
        style = STYLE,
        topic = topic,
        body = body,
    )
}
