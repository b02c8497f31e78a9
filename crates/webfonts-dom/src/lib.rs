//! Webfonts DOM
//!
//! In-memory styleable document tree with fabricated computed styles.
//!
//! This crate stands in for the host browser document: it provides element
//! attribute access, inline-style and class-rule storage, resolved
//! `font-family` computation (inheritance plus user-agent defaults for form
//! controls), subtree traversal, selector matching for exclusion predicates,
//! and an idempotent `<style>` injection point in `<head>`. The font
//! resolution engine runs against this tree alone, so the full algorithm is
//! testable without a rendering engine.

mod document;
mod node;
mod selector;
mod style;
mod tree;

pub use document::Document;
pub use node::{Attribute, ElementData, Node, NodeData};
pub use selector::{SelectorList, SimpleSelector};
pub use style::{
    Declaration, GENERIC_FAMILIES, is_generic_family, parse_declarations, parse_font_family_list,
    same_font_stack, serialize_declarations,
};
pub use tree::DomTree;

/// Node identifier (index into the tree arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// The document root node
    pub const ROOT: NodeId = NodeId(0);
    /// Sentinel for "no node"
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Whether this id refers to a node at all
    #[inline]
    pub fn is_valid(self) -> bool {
        self != Self::NONE
    }
}
