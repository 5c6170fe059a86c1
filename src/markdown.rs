// ============================================================================
// MARKDOWN - GitHub-flavoured markdown to HTML for the document page
// ============================================================================
// Raw HTML in the source is shown as text, never injected.
// ============================================================================

use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, HeadingLevel, Options, Parser, Tag, TagEnd};

fn options() -> Options {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);
    options.insert(Options::ENABLE_FOOTNOTES);
    options
}

fn heading_class(level: HeadingLevel) -> Option<&'static str> {
    match level {
        HeadingLevel::H1 => Some("md-h1"),
        HeadingLevel::H2 => Some("md-h2"),
        HeadingLevel::H3 => Some("md-h3"),
        _ => None,
    }
}

/// First word of the fence info, restricted to characters safe in a class name
fn language_of(info: &str) -> Option<String> {
    let lang: String = info
        .split_whitespace()
        .next()?
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '+'))
        .collect();
    (!lang.is_empty()).then_some(lang)
}

fn raw(html: String) -> Event<'static> {
    Event::Html(CowStr::from(html))
}

fn restyle(event: Event<'_>) -> Vec<Event<'_>> {
    match event {
        Event::Start(Tag::Heading { level, .. }) if heading_class(level).is_some() => {
            let class = heading_class(level).unwrap_or_default();
            vec![raw(format!("<{} class=\"{}\">", level, class))]
        }
        Event::End(TagEnd::Heading(level)) if heading_class(level).is_some() => {
            vec![raw(format!("</{}>\n", level))]
        }
        Event::Start(Tag::CodeBlock(kind)) => {
            let lang = match &kind {
                CodeBlockKind::Fenced(info) => language_of(info),
                CodeBlockKind::Indented => None,
            };
            let open = match lang {
                Some(lang) => format!(
                    "<pre class=\"code-block\"><code class=\"language-{}\">",
                    lang
                ),
                None => "<pre class=\"code-block\"><code>".to_string(),
            };
            vec![raw(open)]
        }
        Event::End(TagEnd::CodeBlock) => vec![raw("</code></pre>\n".to_string())],
        Event::Code(code) => vec![
            raw("<code class=\"inline-code\">".to_string()),
            Event::Text(code),
            raw("</code>".to_string()),
        ],
        Event::Html(source) | Event::InlineHtml(source) => vec![Event::Text(source)],
        other => vec![other],
    }
}

/// Render `source` to an HTML fragment
pub fn render_markdown(source: &str) -> String {
    let events = Parser::new_ext(source, options()).flat_map(restyle);
    let mut out = String::with_capacity(source.len() * 3 / 2);
    html::push_html(&mut out, events);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headings_get_level_classes() {
        let out = render_markdown("# Title\n\n## Section\n\n### Case\n\n#### Note");
        assert!(out.contains("<h1 class=\"md-h1\">Title</h1>"));
        assert!(out.contains("<h2 class=\"md-h2\">Section</h2>"));
        assert!(out.contains("<h3 class=\"md-h3\">Case</h3>"));
        assert!(out.contains("<h4>Note</h4>"));
    }

    #[test]
    fn inline_and_block_code_are_styled() {
        let out = render_markdown("Run `cargo test` now.\n\n```rust ignore\nlet x = 1 < 2;\n```\n");
        assert!(out.contains("<code class=\"inline-code\">cargo test</code>"));
        assert!(out.contains("<pre class=\"code-block\"><code class=\"language-rust\">"));
        assert!(out.contains("let x = 1 &lt; 2;"));
        assert!(out.contains("</code></pre>"));
    }

    #[test]
    fn unfenced_code_has_no_language() {
        let out = render_markdown("    indented\n");
        assert!(out.contains("<pre class=\"code-block\"><code>indented"));
    }

    #[test]
    fn tables_tasks_and_strikethrough() {
        let source = "| Step | Expected |\n|---|---|\n| Open | Form shown |\n\n- [x] done\n- [ ] todo\n\n~~old~~";
        let out = render_markdown(source);
        assert!(out.contains("<table>"));
        assert!(out.contains("<td>Form shown</td>"));
        assert!(out.contains("type=\"checkbox\""));
        assert!(out.contains("<del>old</del>"));
    }

    #[test]
    fn raw_html_is_escaped() {
        let out = render_markdown("<script>alert(1)</script>\n\nHi <b>there</b>");
        assert!(!out.contains("<script>"));
        assert!(!out.contains("<b>"));
        assert!(out.contains("&lt;script&gt;"));
    }

    #[test]
    fn fence_language_is_sanitised() {
        assert_eq!(language_of("c++ extra"), Some("c++".to_string()));
        assert_eq!(language_of("\"><img"), Some("img".to_string()));
        assert_eq!(language_of("   "), None);
    }
}
