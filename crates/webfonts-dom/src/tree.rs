//! Arena-based document tree

use crate::NodeId;
use crate::node::Node;

/// Arena tree: nodes are stored in a flat vector and linked by [`NodeId`].
///
/// Index 0 is always the document node. Nodes are never removed; detached
/// subtrees simply become unreachable, which is fine at the scale this crate
/// works at.
#[derive(Debug)]
pub struct DomTree {
    nodes: Vec<Node>,
}

impl DomTree {
    /// Create a tree holding only the document node.
    pub fn new() -> Self {
        Self { nodes: vec![Node::document()] }
    }

    /// The document node
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0 as usize)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0 as usize)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Allocate a new element node, initially detached.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.push(Node::element(tag))
    }

    /// Allocate a new text node, initially detached.
    pub fn create_text(&mut self, content: &str) -> NodeId {
        self.push(Node::text(content.to_string()))
    }

    fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Append `child` as the last child of `parent`.
    ///
    /// Invalid ids are ignored; re-appending an attached node is not
    /// supported and is ignored as well.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if parent == child || !parent.is_valid() || !child.is_valid() {
            return;
        }
        let (Some(_), Some(child_node)) = (self.get(parent), self.get(child)) else {
            return;
        };
        if child_node.parent.is_valid() {
            return;
        }

        let prev_last = self.nodes[parent.0 as usize].last_child;
        {
            let child_node = &mut self.nodes[child.0 as usize];
            child_node.parent = parent;
            child_node.prev_sibling = prev_last;
        }
        if prev_last.is_valid() {
            self.nodes[prev_last.0 as usize].next_sibling = child;
        } else {
            self.nodes[parent.0 as usize].first_child = child;
        }
        self.nodes[parent.0 as usize].last_child = child;
    }

    /// Child ids of a node, in order.
    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let Some(node) = self.get(id) else {
            return out;
        };
        let mut next = node.first_child;
        while next.is_valid() {
            out.push(next);
            next = self.nodes[next.0 as usize].next_sibling;
        }
        out
    }

    /// All descendant ids of `root` in document (pre-)order, excluding
    /// `root` itself.
    pub fn descendants(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(root);
        stack.reverse();
        while let Some(id) = stack.pop() {
            out.push(id);
            let mut children = self.children(id);
            children.reverse();
            stack.extend(children);
        }
        out
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_and_children() {
        let mut tree = DomTree::new();
        let a = tree.create_element("div");
        let b = tree.create_element("span");
        let c = tree.create_element("p");
        tree.append_child(tree.root(), a);
        tree.append_child(a, b);
        tree.append_child(a, c);

        assert_eq!(tree.children(tree.root()), vec![a]);
        assert_eq!(tree.children(a), vec![b, c]);
        assert_eq!(tree.get(b).unwrap().parent, a);
        assert_eq!(tree.get(b).unwrap().next_sibling, c);
        assert_eq!(tree.get(c).unwrap().prev_sibling, b);
    }

    #[test]
    fn test_descendants_document_order() {
        let mut tree = DomTree::new();
        let root = tree.create_element("div");
        let p = tree.create_element("p");
        let span = tree.create_element("span");
        let inner = tree.create_element("div");
        let textarea = tree.create_element("textarea");
        tree.append_child(tree.root(), root);
        tree.append_child(root, p);
        tree.append_child(p, span);
        tree.append_child(root, inner);
        tree.append_child(inner, textarea);

        assert_eq!(tree.descendants(root), vec![p, span, inner, textarea]);
    }

    #[test]
    fn test_append_invalid_ignored() {
        let mut tree = DomTree::new();
        let a = tree.create_element("div");
        tree.append_child(a, a);
        tree.append_child(a, NodeId::NONE);
        assert!(tree.children(a).is_empty());
    }
}
