use crate::{Id, Node};

/// Pre-order walk over `root` and its descendants. Uses an explicit stack, so nesting depth is
/// bounded by memory rather than the call stack.
pub struct Descendants<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<&'a Node> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children().iter().rev());
        Some(node)
    }
}

/// `root` followed by every descendant, in document order.
pub fn descendants(root: &Node) -> Descendants<'_> {
    Descendants { stack: vec![root] }
}

/// Give every node without an id the next id in document order, starting at 1.
/// Nodes that already carry an id keep it.
pub fn assign_node_ids(root: &mut Node) {
    let mut next = max_node_id(root).0.wrapping_add(1).max(1);
    let mut stack: Vec<&mut Node> = vec![root];
    while let Some(node) = stack.pop() {
        if node.id() == Id::UNSET {
            node.set_id(Id(next));
            next = next.wrapping_add(1);
        }
        if let Some(children) = node.children_mut() {
            stack.extend(children.iter_mut().rev());
        }
    }
}

fn max_node_id(root: &Node) -> Id {
    descendants(root).map(Node::id).fold(Id::UNSET, Ord::max)
}

pub fn find_node_by_id(root: &Node, id: Id) -> Option<&Node> {
    descendants(root).find(|n| n.id() == id)
}

pub fn find_node_by_id_mut(root: &mut Node, id: Id) -> Option<&mut Node> {
    let mut stack: Vec<&mut Node> = vec![root];
    while let Some(node) = stack.pop() {
        if node.id() == id {
            return Some(node);
        }
        if let Some(children) = node.children_mut() {
            stack.extend(children.iter_mut().rev());
        }
    }
    None
}

/// Id of the node whose children contain `id`.
pub fn find_parent_id(root: &Node, id: Id) -> Option<Id> {
    descendants(root)
        .find(|n| n.children().iter().any(|c| c.id() == id))
        .map(Node::id)
}

/// Visit every element in document order.
pub fn for_each_element<'a>(root: &'a Node, f: &mut impl FnMut(&'a Node)) {
    descendants(root).filter(|n| n.is_element()).for_each(f);
}
