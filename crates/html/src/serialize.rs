//! Tree → markup, following the `innerHTML`/`outerHTML` serialization rules the host expects:
//! attributes are double-quoted, void elements get no end tag, rawtext bodies are written
//! verbatim.
use crate::entities::{escape_attr, escape_text};
use crate::tokenizer::{is_rawtext_element, is_void_element};
use crate::types::Node;

/// Markup of `node`'s children, the equivalent of `element.innerHTML`.
pub fn inner_html(node: &Node) -> String {
    let mut out = String::new();
    let rawtext = matches!(node, Node::Element { name, .. } if is_rawtext_element(name));
    for child in node.children() {
        write_node(&mut out, child, rawtext);
    }
    out
}

/// Markup of `node` itself, the equivalent of `element.outerHTML`.
pub fn outer_html(node: &Node) -> String {
    let mut out = String::new();
    write_node(&mut out, node, false);
    out
}

enum Step<'a> {
    Node(&'a Node, bool),
    Close(&'a str),
}

fn write_node(out: &mut String, node: &Node, in_rawtext: bool) {
    // end tags wait on the stack below their element's children
    let mut stack = vec![Step::Node(node, in_rawtext)];
    while let Some(step) = stack.pop() {
        let (node, in_rawtext) = match step {
            Step::Close(name) => {
                out.push_str("</");
                out.push_str(name);
                out.push('>');
                continue;
            }
            Step::Node(node, in_rawtext) => (node, in_rawtext),
        };
        match node {
            Node::Document {
                doctype, children, ..
            } => {
                if let Some(dt) = doctype {
                    out.push_str("<!");
                    out.push_str(dt);
                    out.push('>');
                }
                stack.extend(children.iter().rev().map(|c| Step::Node(c, false)));
            }
            Node::Element {
                name,
                attributes,
                children,
                ..
            } => {
                out.push('<');
                out.push_str(name);
                for (key, value) in attributes {
                    out.push(' ');
                    out.push_str(key);
                    if let Some(value) = value {
                        out.push_str("=\"");
                        out.push_str(&escape_attr(value));
                        out.push('"');
                    }
                }
                out.push('>');
                if is_void_element(name) {
                    continue;
                }
                stack.push(Step::Close(name));
                let rawtext = is_rawtext_element(name);
                stack.extend(children.iter().rev().map(|c| Step::Node(c, rawtext)));
            }
            Node::Text { text, .. } => {
                if in_rawtext {
                    out.push_str(text);
                } else {
                    out.push_str(&escape_text(text));
                }
            }
            Node::Comment { text, .. } => {
                out.push_str("<!--");
                out.push_str(text);
                out.push_str("-->");
            }
        }
    }
}
