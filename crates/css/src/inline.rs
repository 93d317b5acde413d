use crate::syntax::{Declaration, parse_declarations, serialize_declarations, set_shorthand};
use html::Node;
use html::dom_utils::set_attr;

// If the element has an inline style attribute, return its value
pub fn get_inline_style(node: &Node) -> Option<&str> {
    node.attr("style")
}

pub fn inline_declarations(node: &Node) -> Vec<Declaration> {
    get_inline_style(node)
        .map(parse_declarations)
        .unwrap_or_default()
}

/// `element.style.<shorthand> = value`, written back into the `style` attribute.
/// Returns `false` for non-elements.
pub fn set_inline_shorthand(node: &mut Node, shorthand: &str, value: &str) -> bool {
    if !node.is_element() {
        return false;
    }
    let mut declarations = inline_declarations(node);
    set_shorthand(&mut declarations, shorthand, value);
    set_attr(node, "style", &serialize_declarations(&declarations))
}

#[cfg(test)]
mod tests {
    use super::*;
    use html::{inner_html, parse_document};

    #[test]
    fn background_is_rewritten_in_style_attribute() {
        let mut dom = parse_document(
            r#"<span class="toggle" style="background:#2EBD2E; color:white;">dog</span>"#,
        );
        let span = &mut dom.children_mut().expect("document")[0];
        assert!(set_inline_shorthand(span, "background", "#DB0000"));
        assert_eq!(
            inner_html(&dom),
            r#"<span class="toggle" style="background: #DB0000; color: white;">dog</span>"#
        );
    }

    #[test]
    fn style_attribute_is_created_when_absent() {
        let mut dom = parse_document(r#"<span class="toggle">dog</span>"#);
        let span = &mut dom.children_mut().expect("document")[0];
        assert!(set_inline_shorthand(span, "background", "#2EBD2E"));
        assert_eq!(
            inner_html(&dom),
            r#"<span class="toggle" style="background: #2EBD2E;">dog</span>"#
        );
    }

    #[test]
    fn text_nodes_are_rejected() {
        let mut text = Node::text("x");
        assert!(!set_inline_shorthand(&mut text, "background", "red"));
    }
}
