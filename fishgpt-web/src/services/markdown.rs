//! Markdown to HTML for model answers.

use pulldown_cmark::{html, CowStr, Event, Options, Parser, Tag};

/// Render model Markdown as HTML. Raw HTML in the source is shown as text,
/// never passed through, and links or images with a scheme other than
/// http(s) or mailto point nowhere.
pub fn to_html(markdown: &str) -> String {
    let options = Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH;
    let parser = Parser::new_ext(markdown, options).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        Event::Start(Tag::Link {
            link_type,
            dest_url,
            title,
            id,
        }) => Event::Start(Tag::Link {
            link_type,
            dest_url: safe_destination(dest_url),
            title,
            id,
        }),
        Event::Start(Tag::Image {
            link_type,
            dest_url,
            title,
            id,
        }) => Event::Start(Tag::Image {
            link_type,
            dest_url: safe_destination(dest_url),
            title,
            id,
        }),
        other => other,
    });

    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

/// Relative targets and http(s)/mailto URLs pass; anything else becomes `#`.
fn safe_destination(dest: CowStr<'_>) -> CowStr<'_> {
    let trimmed = dest.trim_start();
    let scheme_end = trimmed.find(|c: char| matches!(c, ':' | '/' | '?' | '#'));

    let allowed = match scheme_end {
        Some(i) if trimmed[i..].starts_with(':') => {
            let scheme = trimmed[..i].to_ascii_lowercase();
            matches!(scheme.as_str(), "http" | "https" | "mailto")
        }
        _ => true,
    };

    if allowed {
        dest
    } else {
        CowStr::Borrowed("#")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_headings_and_bold() {
        let html = to_html("## Tucunaré\n\n**Status:** pouco preocupante");
        assert!(html.contains("<h2>Tucunaré</h2>"));
        assert!(html.contains("<strong>Status:</strong>"));
    }

    #[test]
    fn raw_html_is_escaped() {
        let html = to_html("oi <script>alert(1)</script>");
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn plain_error_text_is_a_paragraph() {
        let html = to_html("❌ Erro na API: indisponível");
        assert_eq!(html.trim(), "<p>❌ Erro na API: indisponível</p>");
    }

    #[test]
    fn script_links_are_neutralised() {
        let html = to_html("[x](javascript:alert(1)) e ![y](JavaScript:alert(2))");
        assert!(!html.to_lowercase().contains("javascript:"));
        assert!(html.contains("<a href=\"#\">x</a>"));
    }

    #[test]
    fn web_and_relative_links_are_kept() {
        let html = to_html("[wiki](https://pt.wikipedia.org/wiki/Tucunar%C3%A9) [chat](/chat)");
        assert!(html.contains("href=\"https://pt.wikipedia.org/wiki/Tucunar%C3%A9\""));
        assert!(html.contains("href=\"/chat\""));
    }
}
