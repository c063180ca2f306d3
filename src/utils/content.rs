// src/utils/content.rs

//! Main-content extraction from fetched HTML.

use scraper::node::Node;
use scraper::{ElementRef, Html, Selector};

/// Tags whose subtrees never contribute to readable content.
const SKIP_TAGS: [&str; 7] = [
    "script", "style", "nav", "header", "footer", "aside", "iframe",
];

/// Selectors tried in order to locate the main content region.
const CONTENT_SELECTORS: [&str; 5] = ["main", "article", ".content", ".main-content", "#content"];

/// Extract readable text from an HTML document.
///
/// Locates a best-guess main-content region, flattens whitespace, and
/// truncates to `max_len` characters.
pub fn extract_text(html: &str, max_len: usize) -> String {
    let document = Html::parse_document(html);

    let region = CONTENT_SELECTORS
        .iter()
        .filter_map(|s| Selector::parse(s).ok())
        .find_map(|sel| document.select(&sel).next())
        .unwrap_or_else(|| document.root_element());

    let mut buffer = String::new();
    collect_text(region, &mut buffer);

    let text = buffer.split_whitespace().collect::<Vec<_>>().join(" ");
    truncate(&text, max_len)
}

/// Recursively collect text nodes, skipping non-content subtrees.
fn collect_text(element: ElementRef, buffer: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => {
                buffer.push_str(text);
                buffer.push(' ');
            }
            Node::Element(el) if !SKIP_TAGS.contains(&el.name()) => {
                if let Some(child_ref) = ElementRef::wrap(child) {
                    collect_text(child_ref, buffer);
                }
            }
            _ => {}
        }
    }
}

/// Truncate on a character boundary, appending an ellipsis marker.
fn truncate(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max_len).collect();
    out.push_str("...");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefers_main_region_over_boilerplate() {
        let html = r#"
            <html><body>
                <nav>Menu Menu Menu</nav>
                <main><p>Pendidikan vokasi digital berkembang pesat.</p></main>
                <footer>Copyright</footer>
            </body></html>
        "#;
        let text = extract_text(html, 1000);
        assert_eq!(text, "Pendidikan vokasi digital berkembang pesat.");
    }

    #[test]
    fn skips_script_and_style_inside_region() {
        let html = r#"
            <article>
                <script>var x = 1;</script>
                <style>.a { color: red; }</style>
                <p>Akses internet mencapai 75%.</p>
            </article>
        "#;
        let text = extract_text(html, 1000);
        assert_eq!(text, "Akses internet mencapai 75%.");
    }

    #[test]
    fn falls_back_to_whole_document() {
        let html = "<html><body><div><p>Isi dokumen tanpa region utama.</p></div></body></html>";
        let text = extract_text(html, 1000);
        assert_eq!(text, "Isi dokumen tanpa region utama.");
    }

    #[test]
    fn flattens_whitespace() {
        let html = "<main>satu\n\n   dua\t tiga</main>";
        assert_eq!(extract_text(html, 1000), "satu dua tiga");
    }

    #[test]
    fn truncates_long_content() {
        let html = format!("<main>{}</main>", "kata ".repeat(100));
        let text = extract_text(&html, 20);
        assert_eq!(text.chars().count(), 23);
        assert!(text.ends_with("..."));
    }
}
