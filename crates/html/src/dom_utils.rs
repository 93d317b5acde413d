use crate::traverse::descendants;
use crate::{Id, Node};

/// Concatenated text of all descendant text nodes, the equivalent of `textContent`.
pub fn text_content(node: &Node) -> String {
    descendants(node)
        .filter_map(|n| match n {
            Node::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
        .collect()
}

/// Replace all children of an element with a single text node (none for `""`).
/// Returns `false` when `node` cannot hold children.
pub fn set_text_content(node: &mut Node, text: &str) -> bool {
    let Some(children) = node.children_mut() else {
        return false;
    };
    children.clear();
    if !text.is_empty() {
        children.push(Node::Text {
            id: Id::UNSET,
            text: text.to_string(),
        });
    }
    true
}

/// `classList.contains` over the whitespace-separated `class` attribute.
pub fn has_class(node: &Node, class: &str) -> bool {
    node.attr("class")
        .is_some_and(|list| list.split_ascii_whitespace().any(|c| c == class))
}

/// Set (or add) an attribute value on an element, keeping attribute order.
pub fn set_attr(node: &mut Node, key: &str, value: &str) -> bool {
    let Node::Element { attributes, .. } = node else {
        return false;
    };
    match attributes
        .iter_mut()
        .find(|(k, _)| k.eq_ignore_ascii_case(key))
    {
        Some((_, v)) => *v = Some(value.to_string()),
        None => attributes.push((key.to_ascii_lowercase(), Some(value.to_string()))),
    }
    true
}

/// Plain text of a reported fragment for download: text is copied verbatim, `<br>` becomes a
/// line break, `script`/`style` bodies are skipped. Trailing whitespace is trimmed per line and
/// trailing blank lines are dropped.
pub fn plain_text(node: &Node) -> String {
    let mut raw = String::new();
    let mut stack = vec![node];
    while let Some(node) = stack.pop() {
        match node {
            Node::Text { text, .. } => raw.push_str(text),
            Node::Element { name, .. } => {
                if name.eq_ignore_ascii_case("br") {
                    raw.push('\n');
                    continue;
                }
                if name.eq_ignore_ascii_case("script") || name.eq_ignore_ascii_case("style") {
                    continue;
                }
            }
            Node::Document { .. } | Node::Comment { .. } => {}
        }
        stack.extend(node.children().iter().rev());
    }

    let raw = raw.replace('\u{00A0}', " ");
    let mut lines: Vec<&str> = raw.lines().map(str::trim_end).collect();
    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_document;

    #[test]
    fn text_content_concatenates_descendants() {
        let dom = parse_document("<span>a<b>b</b><!-- no -->c</span>");
        assert_eq!(text_content(&dom.children()[0]), "abc");
    }

    #[test]
    fn set_text_content_replaces_children() {
        let mut dom = parse_document("<span>a<b>b</b></span>");
        let span = &mut dom.children_mut().expect("document")[0];
        assert!(set_text_content(span, "dog"));
        assert_eq!(span.children(), &[Node::text("dog")]);
        assert!(set_text_content(span, ""));
        assert!(span.children().is_empty());
    }

    #[test]
    fn set_text_content_rejects_leaf_nodes() {
        let mut text = Node::text("x");
        assert!(!set_text_content(&mut text, "y"));
    }

    #[test]
    fn class_membership_is_token_based() {
        let dom = parse_document(r#"<b class=" x  toggle "></b><i class="toggled"></i><u></u>"#);
        let kids = dom.children();
        assert!(has_class(&kids[0], "toggle"));
        assert!(!has_class(&kids[1], "toggle"));
        assert!(!has_class(&kids[2], "toggle"));
    }

    #[test]
    fn set_attr_updates_in_place_or_appends() {
        let mut dom = parse_document(r#"<b id="a" style="x"></b>"#);
        let b = &mut dom.children_mut().expect("document")[0];
        assert!(set_attr(b, "STYLE", "y"));
        assert!(set_attr(b, "title", "t"));
        let Node::Element { attributes, .. } = b else {
            panic!("expected element");
        };
        let keys: Vec<(&str, Option<&str>)> = attributes
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_deref()))
            .collect();
        assert_eq!(keys, vec![("id", Some("a")), ("style", Some("y")), ("title", Some("t"))]);
    }

    #[test]
    fn plain_text_turns_breaks_into_newlines() {
        let dom = parse_document(
            r#"<div>The <span class="toggle">cat</span> sat. <br>Next&nbsp;line <br><br>Para two <br><br></div>"#,
        );
        assert_eq!(plain_text(&dom), "The cat sat.\nNext line\n\nPara two");
    }

    #[test]
    fn plain_text_skips_rawtext() {
        let dom = parse_document("<style>p{}</style>visible");
        assert_eq!(plain_text(&dom), "visible");
    }

    #[test]
    fn text_walks_handle_deep_nesting() {
        let depth = 50_000;
        let input = format!("{}a<br>b{}", "<span>".repeat(depth), "</span>".repeat(depth));
        let dom = parse_document(&input);
        assert_eq!(text_content(&dom), "ab");
        assert_eq!(plain_text(&dom), "a\nb");
    }
}
