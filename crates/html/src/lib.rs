//! Mutable document tree for host-supplied markup: tokenize, build, edit, serialize.

pub mod debug;
pub mod dom_utils;
pub mod entities;
pub mod serialize;
pub mod traverse;

mod dom_builder;
mod tokenizer;
mod types;

pub use crate::dom_builder::build_dom;
pub use crate::serialize::{inner_html, outer_html};
pub use crate::tokenizer::{Tokenizer, tokenize};
pub use crate::types::{AtomId, AtomTable, Id, Node, NodeId, Token, TokenStream};

/// Parse markup into a document node. Ids are unset.
pub fn parse_document(input: &str) -> Node {
    build_dom(&tokenize(input))
}

/// Parse a markup fragment into its top-level nodes. A doctype, if any, is dropped.
pub fn parse_fragment(input: &str) -> Vec<Node> {
    let mut document = parse_document(input);
    document
        .children_mut()
        .map(std::mem::take)
        .unwrap_or_default()
}
