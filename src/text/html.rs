use scraper::Html;

/// Elements whose text content is never shown to a reader
const HIDDEN_ELEMENTS: &[&str] = &["script", "style", "noscript", "template"];

/// Extracts the visible text of an HTML document
///
/// Text nodes are concatenated in document order without separators, so
/// adjacent inline elements (`a<b>c</b>`) read as one word. Content of
/// `script`, `style`, `noscript` and `template` elements is skipped.
/// Malformed markup is parsed best-effort and never fails.
///
/// # Examples
///
/// ```
/// use crawl_ledger::text::visible_text;
///
/// let text = visible_text("<p>Hello <b>there</b></p><script>var x = 1;</script>");
/// assert_eq!(text, "Hello there");
/// ```
pub fn visible_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let mut text = String::new();

    for node in document.tree.root().descendants() {
        let Some(fragment) = node.value().as_text() else {
            continue;
        };

        let hidden = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .map(|element| HIDDEN_ELEMENTS.contains(&element.name()))
                .unwrap_or(false)
        });

        if !hidden {
            text.push_str(fragment);
        }
    }

    text
}
