use crate::types::{Id, Node, Token, TokenStream};

/// Build a document tree from a token stream. Node ids are left unset; see
/// [`crate::traverse::assign_node_ids`].
///
/// Open elements live on an explicit stack and are attached to their parent when closed, so
/// deeply nested markup never recurses.
pub fn build_dom(stream: &TokenStream) -> Node {
    let atoms = stream.atoms();
    let mut open = OpenElements::new();
    let mut ignored_end_tags = 0usize;

    for token in stream.tokens() {
        match token {
            Token::Doctype(s) => open.set_doctype(s.clone()),
            Token::Comment(c) => open.append(Node::Comment {
                id: Id::UNSET,
                text: c.clone(),
            }),
            Token::Text(txt) => {
                if !txt.is_empty() {
                    open.append(Node::text(txt.clone()));
                }
            }
            Token::StartTag {
                name,
                attributes,
                self_closing,
            } => {
                let element = Node::Element {
                    id: Id::UNSET,
                    name: atoms.resolve(*name).to_string(),
                    attributes: attributes
                        .iter()
                        .map(|(k, v)| (atoms.resolve(*k).to_string(), v.clone()))
                        .collect(),
                    children: Vec::new(),
                };
                if *self_closing {
                    open.append(element);
                } else {
                    open.push(element);
                }
            }
            Token::EndTag(name) => {
                // an end tag with no matching open element is dropped instead of
                // closing everything above it
                if !open.close(atoms.resolve(*name)) {
                    ignored_end_tags += 1;
                }
            }
        }
    }

    if ignored_end_tags > 0 {
        log::debug!(target: "html.builder", "ignored {ignored_end_tags} unmatched end tag(s)");
    }
    open.finish()
}

/// The document at the bottom, then every element whose end tag has not been seen yet.
struct OpenElements {
    stack: Vec<Node>,
}

impl OpenElements {
    fn new() -> Self {
        Self {
            stack: vec![Node::Document {
                id: Id::UNSET,
                doctype: None,
                children: Vec::new(),
            }],
        }
    }

    fn set_doctype(&mut self, value: String) {
        if let Some(Node::Document { doctype, .. }) = self.stack.first_mut() {
            *doctype = Some(value);
        }
    }

    fn append(&mut self, node: Node) {
        if let Some(children) = self.stack.last_mut().and_then(Node::children_mut) {
            children.push(node);
        }
    }

    fn push(&mut self, element: Node) {
        self.stack.push(element);
    }

    /// Close the innermost open element named `name` and everything opened after it.
    fn close(&mut self, name: &str) -> bool {
        let Some(depth) = self
            .stack
            .iter()
            .skip(1)
            .rposition(|n| n.is_element_named(name))
        else {
            return false;
        };
        self.pop_to(depth + 1);
        true
    }

    fn pop_to(&mut self, len: usize) {
        while self.stack.len() > len.max(1) {
            if let Some(node) = self.stack.pop() {
                self.append(node);
            }
        }
    }

    fn finish(mut self) -> Node {
        self.pop_to(1);
        self.stack.pop().unwrap_or(Node::Document {
            id: Id::UNSET,
            doctype: None,
            children: Vec::new(),
        })
    }
}
