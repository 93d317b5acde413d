use crate::Node;

const INDENT_STEP: &str = "  ";
const PREVIEW_CHARS: usize = 40;

fn push_preview(out: &mut String, s: &str) {
    for (i, ch) in s.chars().enumerate() {
        if i == PREVIEW_CHARS {
            out.push('…');
            break;
        }
        out.push(if ch == '\n' { ' ' } else { ch });
    }
}

/// Indented one-line-per-node outline, at most `cap` nodes. Elements show their id, class and
/// `data-*` attributes, which is what toggle debugging needs.
pub fn outline_from_dom(root: &Node, cap: usize) -> Vec<String> {
    fn walk(node: &Node, depth: usize, out: &mut Vec<String>, left: &mut usize) {
        if *left == 0 {
            return;
        }
        *left -= 1;
        let mut line = INDENT_STEP.repeat(depth);
        match node {
            Node::Document { doctype, .. } => match doctype {
                Some(dt) => {
                    line.push_str("<!");
                    line.push_str(dt);
                    line.push('>');
                }
                None => line.push_str("#document"),
            },
            Node::Element {
                id,
                name,
                attributes,
                ..
            } => {
                line.push('<');
                line.push_str(name);
                for (k, v) in attributes {
                    if k == "id" || k == "class" || k.starts_with("data-") {
                        line.push(' ');
                        line.push_str(k);
                        line.push_str("=\"");
                        push_preview(&mut line, v.as_deref().unwrap_or(""));
                        line.push('"');
                    }
                }
                line.push('>');
                line.push_str(&format!("  #{}", id.0));
            }
            Node::Text { text, .. } => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    return;
                }
                line.push('"');
                push_preview(&mut line, trimmed);
                line.push('"');
            }
            Node::Comment { text, .. } => {
                line.push_str("<!-- ");
                push_preview(&mut line, text);
                line.push_str(" -->");
            }
        }
        out.push(line);
        for c in node.children() {
            walk(c, depth + 1, out, left);
        }
    }

    let mut out = Vec::new();
    let mut left = cap;
    walk(root, 0, &mut out, &mut left);
    out
}
