//! Host-side construction of toggle markup from word-level corrections.

use crate::toggle::{CORRECTED_ATTR, ORIGINAL_ATTR, TOGGLE_CLASS};
use core_types::SUCCESS_TONE;
use html::entities::{escape_attr, escape_text};

const LINE_BREAK: &str = "<br>";

/// Inline style of a freshly built toggle: a rounded pill showing the corrected text.
pub fn default_pill_style() -> String {
    format!(
        "background:{SUCCESS_TONE}; border-radius:8px; padding:4px; display:inline-block; \
         cursor:pointer; font-size:16px; color:white;"
    )
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToggleSpan {
    pub original: String,
    pub corrected: String,
    pub style: String,
}

impl ToggleSpan {
    pub fn new(original: impl Into<String>, corrected: impl Into<String>) -> Self {
        Self {
            original: original.into(),
            corrected: corrected.into(),
            style: default_pill_style(),
        }
    }

    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = style.into();
        self
    }

    /// The span starts out showing the corrected text.
    pub fn to_html(&self) -> String {
        format!(
            r#"<span class="{TOGGLE_CLASS}" {ORIGINAL_ATTR}="{}" {CORRECTED_ATTR}="{}" style="{}">{}</span>"#,
            escape_attr(&self.original),
            escape_attr(&self.corrected),
            escape_attr(&self.style),
            escape_text(&self.corrected),
        )
    }
}

/// Wrap a body in the outer `<div>` after dropping any trailing run of `<br>`s.
pub fn wrap_document(body: &str) -> String {
    let mut end = body.trim_end();
    while let Some(rest) = end.strip_suffix(LINE_BREAK) {
        end = rest.trim_end();
    }
    format!("<div>{end}</div>")
}

/// Incremental builder for a corrected text: runs of unchanged words, toggle spans, line and
/// paragraph breaks. Each word run and each span is followed by one space.
#[derive(Debug, Default)]
pub struct CorrectionDocument {
    body: String,
    toggles: usize,
}

impl CorrectionDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_same<'a>(&mut self, words: impl IntoIterator<Item = &'a str>) -> &mut Self {
        let run = words.into_iter().collect::<Vec<_>>().join(" ");
        self.body.push_str(&escape_text(&run));
        self.body.push(' ');
        self
    }

    pub fn push_change(&mut self, original: &str, corrected: &str) -> &mut Self {
        self.body.push_str(&ToggleSpan::new(original, corrected).to_html());
        self.body.push(' ');
        self.toggles += 1;
        self
    }

    pub fn end_line(&mut self) -> &mut Self {
        self.body.push_str(LINE_BREAK);
        self
    }

    /// A paragraph ends with its last line, then one more break.
    pub fn end_paragraph(&mut self) -> &mut Self {
        self.end_line().end_line()
    }

    pub fn toggle_count(&self) -> usize {
        self.toggles
    }

    pub fn finish(&self) -> String {
        wrap_document(&self.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::toggle::toggle_element;
    use html::dom_utils::text_content;
    use html::parse_fragment;

    #[test]
    fn span_escapes_quotes_and_markup() {
        let html = ToggleSpan::new(r#"say "hi""#, "a < b & c")
            .with_style("color:white;")
            .to_html();
        assert_eq!(
            html,
            r#"<span class="toggle" data-original="say &quot;hi&quot;" data-corrected="a < b &amp; c" style="color:white;">a &lt; b &amp; c</span>"#
        );
    }

    #[test]
    fn built_span_is_a_working_toggle() {
        let html = ToggleSpan::new("teh", "the").to_html();
        let mut span = parse_fragment(&html).remove(0);
        assert_eq!(text_content(&span), "the");
        toggle_element(&mut span).expect("well-formed toggle");
        assert_eq!(text_content(&span), "teh");
    }

    #[test]
    fn default_style_is_the_success_pill() {
        let style = default_pill_style();
        assert!(style.starts_with("background:#2EBD2E;"));
        assert!(style.contains("cursor:pointer;"));
    }

    #[test]
    fn trailing_breaks_are_trimmed() {
        assert_eq!(wrap_document("a <br><br> \n<br>"), "<div>a</div>");
        assert_eq!(wrap_document("a<br>b"), "<div>a<br>b</div>");
        assert_eq!(wrap_document(""), "<div></div>");
    }

    #[test]
    fn document_lines_and_paragraphs() {
        let mut doc = CorrectionDocument::new();
        doc.push_same(["I", "has"])
            .push_change("a cat", "a dog")
            .end_line()
            .push_same(["fine"])
            .end_paragraph();
        assert_eq!(doc.toggle_count(), 1);
        let html = doc.finish();
        assert!(html.starts_with("<div>I has <span class=\"toggle\""), "{html}");
        assert!(html.ends_with("</span> <br>fine</div>"), "{html}");
    }
}
